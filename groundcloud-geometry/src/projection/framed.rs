//! Ray/ground-plane intersection in a reference frame.

use super::{GroundProjector, ProjectionError};
use crate::camera::CameraModel;
use crate::transform::RigidTransform;
use crate::types::{GroundPoint, Pixel, Ray};
use glam::DVec3;

/// A ray must descend at least this much (reference-frame z per unit step)
/// to be accepted by the checked path.
const MIN_DESCENT: f64 = 1e-9;

/// Intersect `ray` with the plane `z = 0` of the reference frame.
///
/// `scale = -origin.z / step.z` is not guarded: a ray parallel to the ground
/// gives non-finite coordinates, and an upward ray gives a point behind the
/// camera. The returned point has `z` exactly zero.
pub fn project_ray(ray: Ray, camera_to_reference: &RigidTransform) -> GroundPoint {
    let origin = camera_to_reference.transform_point(DVec3::ZERO);
    let step = camera_to_reference.transform_point(ray.direction) - origin;
    let scale = -origin.z / step.z;
    let hit = origin + scale * step;
    GroundPoint::new(hit.x, hit.y)
}

/// Like [`project_ray`], but requires the camera above ground and the ray
/// pointing down, so the hit lies in front of the camera.
pub fn project_ray_checked(
    ray: Ray,
    camera_to_reference: &RigidTransform,
) -> Result<GroundPoint, ProjectionError> {
    let origin = camera_to_reference.transform_point(DVec3::ZERO);
    if origin.z <= 0.0 {
        return Err(ProjectionError::CameraBelowGround { height: origin.z });
    }
    let step = camera_to_reference.transform_point(ray.direction) - origin;
    if step.z > -MIN_DESCENT {
        return Err(ProjectionError::RayAboveHorizon { step_z: step.z });
    }
    Ok(project_ray(ray, camera_to_reference))
}

/// A camera model bound to a resolved camera-to-reference transform.
pub struct FramedProjector<'a, C: CameraModel + ?Sized> {
    camera: &'a C,
    camera_to_reference: RigidTransform,
}

impl<'a, C: CameraModel + ?Sized> FramedProjector<'a, C> {
    pub fn new(camera: &'a C, camera_to_reference: RigidTransform) -> Self {
        Self {
            camera,
            camera_to_reference,
        }
    }
}

impl<C: CameraModel + ?Sized> GroundProjector for FramedProjector<'_, C> {
    fn project_pixel(&self, pixel: Pixel) -> GroundPoint {
        project_ray(
            self.camera.project_pixel_to_ray(pixel),
            &self.camera_to_reference,
        )
    }

    fn project_pixel_checked(&self, pixel: Pixel) -> Result<GroundPoint, ProjectionError> {
        project_ray_checked(
            self.camera.project_pixel_to_ray(pixel),
            &self.camera_to_reference,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PinholeCamera;
    use glam::{DMat3, DQuat};

    /// Optical frame (x right, y down, z forward) mounted `height` above a
    /// base frame (x forward, y left, z up), pitched down by `pitch`.
    fn mount(height: f64, pitch: f64) -> RigidTransform {
        let level = DQuat::from_mat3(&DMat3::from_cols(
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, 0.0),
        ));
        RigidTransform::new(
            DVec3::new(0.0, 0.0, height),
            DQuat::from_rotation_y(pitch) * level,
        )
    }

    #[test]
    fn test_principal_ray_hits_ground_ahead() {
        let pitch = 20f64.to_radians();
        let p = project_ray(Ray::new(0.0, 0.0, 1.0), &mount(0.5, pitch));
        assert!((p.x - 0.5 / pitch.tan()).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
        assert_eq!(p.z(), 0.0);
    }

    #[test]
    fn test_rows_below_horizon_land_ahead() {
        let cam = PinholeCamera::default();
        let projector = FramedProjector::new(&cam, mount(1.0, 10f64.to_radians()));
        // principal row is 10 degrees below the horizon, so every row from it down is valid
        for row in 240..480 {
            for col in [0, 320, 639] {
                let p = projector.project_pixel(Pixel::new(col, row));
                assert!(p.x > 0.0, "row {row} col {col} gave {p:?}");
                assert!(projector.project_pixel_checked(Pixel::new(col, row)).is_ok());
            }
        }
    }

    #[test]
    fn test_forward_maps_to_y_in_y_forward_frame() {
        let y_forward =
            RigidTransform::from_rpy(DVec3::ZERO, 0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let transform = y_forward * mount(0.5, 20f64.to_radians());
        let p = project_ray(Ray::new(0.0, 0.1, 1.0), &transform);
        assert!(p.y > 0.0);
        assert_eq!(p.z(), 0.0);
    }

    #[test]
    fn test_projection_is_repeatable() {
        let transform = mount(0.8, 0.3);
        let ray = Ray::new(0.21, 0.13, 1.0);
        let a = project_ray(ray, &transform);
        let b = project_ray(ray, &transform);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn test_horizontal_ray_is_degenerate() {
        let transform = RigidTransform::from_translation(DVec3::new(0.0, 0.0, 0.5));
        let p = project_ray(Ray::new(1.0, 0.0, 0.0), &transform);
        assert!(!p.is_finite());
        assert!(matches!(
            project_ray_checked(Ray::new(1.0, 0.0, 0.0), &transform),
            Err(ProjectionError::RayAboveHorizon { .. })
        ));
    }

    #[test]
    fn test_upward_ray_is_not_validated() {
        let transform = mount(0.5, 0.0);
        // negative optical y points up
        let ray = Ray::new(0.0, -0.5, 1.0);
        let p = project_ray(ray, &transform);
        assert!(p.x < 0.0);
        assert!(project_ray_checked(ray, &transform).is_err());
    }

    #[test]
    fn test_camera_below_ground_rejected() {
        let transform = mount(-0.2, 0.5);
        assert!(matches!(
            project_ray_checked(Ray::new(0.0, 0.0, 1.0), &transform),
            Err(ProjectionError::CameraBelowGround { .. })
        ));
    }
}
