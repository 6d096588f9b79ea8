//! Forward range capping for assembled point clouds.

use crate::types::PointCloud;
use tracing::debug;

/// Remove every point whose `x` exceeds `forward_cap`, keeping the rest in order.
///
/// Filters on `x` regardless of which projector filled the cloud; callers
/// using a `y`-forward projector must map axes before capping. Points with a
/// NaN `x` compare false and are kept. Returns the number of points removed.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn cap_forward(cloud: &mut PointCloud, forward_cap: f64) -> usize {
    let before = cloud.len();
    cloud.retain(|p| !(p.x > forward_cap));
    let removed = before - cloud.len();
    debug!(
        "Capped cloud at x <= {}: removed {} of {} points",
        forward_cap, removed, before
    );
    removed
}

impl PointCloud {
    /// See [`cap_forward`].
    pub fn cap_forward(&mut self, forward_cap: f64) -> usize {
        cap_forward(self, forward_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroundPoint;

    fn cloud(xs: &[f64]) -> PointCloud {
        PointCloud::new(
            "base_footprint",
            xs.iter().map(|&x| GroundPoint::new(x, 0.0)).collect(),
        )
    }

    #[test]
    fn test_cap_removes_far_points_in_order() {
        let xs = [1.0, 7.5, 3.0, 5.0, 12.0, -2.0];
        let mut c = cloud(&xs);
        let removed = c.cap_forward(5.0);

        let kept: Vec<f64> = c.iter().map(|p| p.x).collect();
        assert_eq!(kept, vec![1.0, 3.0, 5.0, -2.0]);
        assert_eq!(removed, 2);
        assert_eq!(removed + c.len(), xs.len());
        assert!(xs.iter().filter(|&&x| x > 5.0).count() == removed);
    }

    #[test]
    fn test_cap_is_idempotent() {
        let mut c = cloud(&[0.5, 9.0, 4.0, 4.0001, 3.9]);
        cap_forward(&mut c, 4.0);
        let once = c.clone();
        assert_eq!(cap_forward(&mut c, 4.0), 0);
        assert_eq!(c, once);
        assert!(c.iter().all(|p| p.x <= 4.0));
    }

    #[test]
    fn test_cap_can_empty_cloud() {
        let mut c = cloud(&[10.0, 20.0]);
        assert_eq!(c.cap_forward(1.0), 2);
        assert!(c.is_empty());
        assert_eq!(c.frame_id(), "base_footprint");
    }

    #[test]
    fn test_cap_with_non_finite_x() {
        let xs = [2.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 9.0];
        let mut c = cloud(&xs);
        let removed = c.cap_forward(5.0);

        assert_eq!(removed, 2);
        assert_eq!(removed + c.len(), xs.len());
        let kept: Vec<f64> = c.iter().map(|p| p.x).collect();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0], 2.0);
        assert!(kept[1].is_nan());
        assert_eq!(kept[2], f64::NEG_INFINITY);
        assert_eq!(c.cap_forward(5.0), 0);
    }

    #[test]
    fn test_cap_keeps_everything_within_range() {
        let mut c = cloud(&[1.0, 2.0, 3.0]);
        assert_eq!(c.cap_forward(3.0), 0);
        assert_eq!(c.len(), 3);
    }
}
