//! Calibration-free flat-ground projection from field of view and mount pose.

use super::{GroundProjector, ProjectionError};
use crate::types::{GroundPoint, Pixel};
use serde::{Deserialize, Serialize};

/// Row at which the viewing ray has exactly the mount pitch. Rows are shifted
/// by `height / 2 - CENTER_ROW_BIAS` before being compared to the image center.
/// Hand-tuned for the original camera mount; not derived from optics.
pub const CENTER_ROW_BIAS: i32 = 100;

/// Angle-based ground projector for an uncalibrated forward-facing camera.
///
/// Output points use `y` as forward distance and `x` as lateral offset.
/// All angles are radians; `mount_pitch` is the downward tilt of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatGroundProjector {
    pub image_width: u32,
    pub image_height: u32,
    pub horizontal_fov: f64,
    pub vertical_fov: f64,
    pub mount_height: f64,
    /// Added to every forward distance. The rig configuration calls this the
    /// lateral offset, but it only ever shifts `y`.
    #[serde(alias = "lateral_offset")]
    pub forward_bias: f64,
    pub mount_pitch: f64,
}

impl Default for FlatGroundProjector {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            horizontal_fov: 70f64.to_radians(),
            vertical_fov: 55f64.to_radians(),
            mount_height: 0.5,
            forward_bias: 0.0,
            mount_pitch: 20f64.to_radians(),
        }
    }
}

impl FlatGroundProjector {
    /// Same mount, different image size.
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Row at which the pitch offset is zero.
    pub fn reference_row(&self) -> i32 {
        CENTER_ROW_BIAS
    }

    /// Angle added to the mount pitch for pixels on `row`.
    pub fn pitch_offset(&self, row: i32) -> f64 {
        let center_row = self.image_height as i32 / 2;
        let adjusted_row = row + (center_row - CENTER_ROW_BIAS);
        (adjusted_row - center_row) as f64 / self.image_height as f64 * self.vertical_fov
    }

    /// Depression angle of the viewing ray through `row`.
    pub fn total_pitch(&self, row: i32) -> f64 {
        self.mount_pitch + self.pitch_offset(row)
    }

    /// First row whose viewing ray points below the horizon.
    ///
    /// May be negative when the whole image looks at the ground.
    pub fn horizon_row(&self) -> i32 {
        let level_row = self.reference_row() as f64
            - self.mount_pitch * self.image_height as f64 / self.vertical_fov;
        level_row.floor() as i32 + 1
    }

    /// Project `pixel` onto the ground.
    ///
    /// Rows at or above the horizon make `tan(total_pitch)` zero or negative,
    /// which yields an infinite or negative forward distance. That is passed
    /// through unchanged.
    pub fn project(&self, pixel: Pixel) -> GroundPoint {
        let y = self.mount_height / self.total_pitch(pixel.row).tan() + self.forward_bias;

        let center_col = self.image_width as i32 / 2;
        let theta =
            (pixel.col - center_col) as f64 / self.image_width as f64 * self.horizontal_fov;
        let x = y * theta.tan();

        GroundPoint::new(x, y)
    }
}

impl GroundProjector for FlatGroundProjector {
    fn project_pixel(&self, pixel: Pixel) -> GroundPoint {
        self.project(pixel)
    }

    fn project_pixel_checked(&self, pixel: Pixel) -> Result<GroundPoint, ProjectionError> {
        if self.total_pitch(pixel.row) <= 0.0 {
            return Err(ProjectionError::PixelAboveHorizon {
                row: pixel.row,
                horizon_row: self.horizon_row(),
            });
        }
        let point = self.project(pixel);
        if !point.is_finite() {
            return Err(ProjectionError::NonFinite {
                x: point.x,
                y: point.y,
            });
        }
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> FlatGroundProjector {
        FlatGroundProjector {
            image_width: 640,
            image_height: 480,
            horizontal_fov: 90f64.to_radians(),
            vertical_fov: 60f64.to_radians(),
            mount_height: 0.5,
            forward_bias: 0.0,
            mount_pitch: 20f64.to_radians(),
        }
    }

    #[test]
    fn test_reference_row_uses_mount_pitch() {
        let projector = rig();
        let pixel = Pixel::new(320, CENTER_ROW_BIAS);
        assert_eq!(projector.reference_row(), CENTER_ROW_BIAS);
        assert_eq!(projector.pitch_offset(pixel.row), 0.0);

        let p = projector.project(pixel);
        assert_eq!(p.x, 0.0);
        assert!((p.y - 1.374).abs() < 1e-3, "y = {}", p.y);
        assert_eq!(p.z(), 0.0);
    }

    #[test]
    fn test_row_offsets_follow_shifted_center() {
        let projector = rig();
        // one degree of pitch per eight rows at 60 degrees over 480 rows
        let expected = [(240, 0.6516), (340, 0.4195), (420, 0.2887)];
        for (row, y) in expected {
            let p = projector.project(Pixel::new(320, row));
            assert!((p.y - y).abs() < 1e-3, "row {row}: y = {}", p.y);
        }
    }

    #[test]
    fn test_horizon_row_sits_where_pitch_turns_down() {
        let projector = FlatGroundProjector {
            mount_pitch: 5.05f64.to_radians(),
            ..rig()
        };
        // the level ray falls just over 40 rows above the reference row
        let horizon = projector.horizon_row();
        assert_eq!(horizon, 60);
        assert!(projector.total_pitch(horizon) > 0.0);
        assert!(projector.total_pitch(horizon - 1) < 0.0);
        assert!(projector.project_pixel_checked(Pixel::new(320, 50)).is_err());
    }

    #[test]
    fn test_rows_below_horizon_land_ahead() {
        let projector = rig();
        let horizon = projector.horizon_row();
        // mount pitch exceeds the angle above the reference row: every row sees ground
        assert!(horizon <= 0, "horizon = {horizon}");
        for row in 0..480 {
            for col in [0, 100, 320, 639] {
                let p = projector.project(Pixel::new(col, row));
                assert!(p.y > 0.0, "row {row} col {col} gave {p:?}");
                assert_eq!(p.z(), 0.0);
                assert!(projector.project_pixel_checked(Pixel::new(col, row)).is_ok());
            }
        }
    }

    #[test]
    fn test_lower_rows_are_closer() {
        let projector = rig();
        let near = projector.project(Pixel::new(320, 470));
        let far = projector.project(Pixel::new(320, 300));
        assert!(near.y < far.y);
    }

    #[test]
    fn test_columns_spread_laterally() {
        let projector = rig();
        let left = projector.project(Pixel::new(100, 400));
        let right = projector.project(Pixel::new(540, 400));
        assert!(left.x < 0.0 && right.x > 0.0);
        assert!((left.x + right.x).abs() < 1e-9);
    }

    #[test]
    fn test_forward_bias_shifts_y_only() {
        let base = rig();
        let biased = FlatGroundProjector {
            forward_bias: 0.25,
            ..rig()
        };
        let pixel = Pixel::new(320, 400);
        assert!((biased.project(pixel).y - base.project(pixel).y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_projection_is_repeatable() {
        let projector = rig();
        let a = projector.project(Pixel::new(411, 377));
        let b = projector.project(Pixel::new(411, 377));
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn test_level_ray_gives_infinite_distance() {
        let projector = FlatGroundProjector {
            mount_pitch: 0.0,
            ..rig()
        };
        let pixel = Pixel::new(320, projector.reference_row());
        let p = projector.project(pixel);
        assert!(p.y.is_infinite());
        assert!(matches!(
            projector.project_pixel_checked(pixel),
            Err(ProjectionError::PixelAboveHorizon { .. })
        ));
    }

    #[test]
    fn test_straight_down_lands_under_mount() {
        let projector = FlatGroundProjector {
            mount_pitch: std::f64::consts::FRAC_PI_2,
            ..rig()
        };
        let p = projector.project(Pixel::new(320, projector.reference_row()));
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_lateral_offset_alias() {
        let projector: FlatGroundProjector =
            serde_json::from_str(r#"{"lateral_offset": 0.3, "mount_height": 1.2}"#).unwrap();
        assert_eq!(projector.forward_bias, 0.3);
        assert_eq!(projector.mount_height, 1.2);
        assert_eq!(projector.image_width, 640);
    }
}
