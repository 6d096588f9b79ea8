//! Human-readable report of an assembled cloud.

use groundcloud_geometry::PointCloud;
use std::fmt;

pub struct CloudSummary {
    pub frame_id: String,
    pub points: usize,
    pub non_finite: usize,
    /// `(min_x, min_y, max_x, max_y)` over finite points.
    pub bounds: Option<(f64, f64, f64, f64)>,
}

impl CloudSummary {
    pub fn of(cloud: &PointCloud) -> Self {
        Self {
            frame_id: cloud.frame_id().to_string(),
            points: cloud.len(),
            non_finite: cloud.iter().filter(|p| !p.is_finite()).count(),
            bounds: cloud
                .bounds()
                .map(|(min, max)| (min.x, min.y, max.x, max.y)),
        }
    }
}

impl fmt::Display for CloudSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame: {}, points: {}", self.frame_id, self.points)?;
        if self.non_finite > 0 {
            write!(f, " ({} non-finite)", self.non_finite)?;
        }
        if let Some((min_x, min_y, max_x, max_y)) = self.bounds {
            write!(
                f,
                ", x: [{:.3}, {:.3}] m, y: [{:.3}, {:.3}] m",
                min_x, max_x, min_y, max_y
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundcloud_geometry::GroundPoint;

    #[test]
    fn test_summary_line() {
        let cloud = PointCloud::new(
            "base_footprint",
            vec![
                GroundPoint::new(1.0, -0.5),
                GroundPoint::new(2.5, 0.25),
                GroundPoint::new(f64::NAN, 0.0),
            ],
        );
        let text = CloudSummary::of(&cloud).to_string();
        assert_eq!(
            text,
            "frame: base_footprint, points: 3 (1 non-finite), x: [1.000, 2.500] m, y: [-0.500, 0.250] m"
        );
    }

    #[test]
    fn test_empty_summary() {
        let text = CloudSummary::of(&PointCloud::empty("base_footprint")).to_string();
        assert_eq!(text, "frame: base_footprint, points: 0");
    }
}
