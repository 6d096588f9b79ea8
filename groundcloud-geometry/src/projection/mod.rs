//! Pixel-to-ground projection.
//!
//! Two projectors are provided:
//! - [`FramedProjector`]: a calibrated pinhole camera plus a camera-to-reference
//!   transform, intersecting each viewing ray with the ground plane `z = 0`.
//! - [`FlatGroundProjector`]: a calibration-free estimate from field of view,
//!   mount height and mount pitch.
//!
//! Both have an unchecked path that lets IEEE non-finite values through for
//! rays at or above the horizon, and a checked path that rejects them.

mod flat;
mod framed;

pub use flat::{CENTER_ROW_BIAS, FlatGroundProjector};
pub use framed::{FramedProjector, project_ray, project_ray_checked};

use crate::types::{GroundPoint, Pixel};
use thiserror::Error;

/// Degenerate projections: geometry where the ray never meets the ground in
/// front of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    #[error("ray does not descend toward the ground plane (step z = {step_z})")]
    RayAboveHorizon { step_z: f64 },

    #[error("camera origin is not above the ground plane (z = {height})")]
    CameraBelowGround { height: f64 },

    #[error("pixel row {row} is at or above the horizon row {horizon_row}")]
    PixelAboveHorizon { row: i32, horizon_row: i32 },

    #[error("projection produced a non-finite point ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Anything that maps a pixel straight to a ground point.
pub trait GroundProjector {
    /// Project without validation; degenerate pixels yield non-finite points.
    fn project_pixel(&self, pixel: Pixel) -> GroundPoint;

    /// Project, rejecting pixels that do not land on the ground ahead.
    fn project_pixel_checked(&self, pixel: Pixel) -> Result<GroundPoint, ProjectionError> {
        let point = self.project_pixel(pixel);
        if point.is_finite() {
            Ok(point)
        } else {
            Err(ProjectionError::NonFinite {
                x: point.x,
                y: point.y,
            })
        }
    }
}

impl<P: GroundProjector + ?Sized> GroundProjector for &P {
    fn project_pixel(&self, pixel: Pixel) -> GroundPoint {
        (**self).project_pixel(pixel)
    }

    fn project_pixel_checked(&self, pixel: Pixel) -> Result<GroundPoint, ProjectionError> {
        (**self).project_pixel_checked(pixel)
    }
}
