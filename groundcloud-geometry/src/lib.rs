//! Groundcloud Geometry Crate
//!
//! Camera-agnostic geometry for turning image pixels into points on a flat
//! ground plane. This crate does no image decoding and no frame lookups; it
//! only holds the data model and the numerical projections.
//!
//! ## Modules
//!
//! - [`types`]: pixels, rays, ground points and point clouds
//! - [`camera`]: pinhole camera model and pixel-to-ray conversion
//! - [`transform`]: rigid transforms between reference frames
//! - [`projection`]: ray/ground intersection and the calibration-free projector
//! - [`filter`]: forward range capping for assembled clouds

pub mod camera;
pub mod filter;
pub mod projection;
pub mod transform;
pub mod types;

pub use camera::{CameraModel, PinholeCamera, ray_for};
pub use filter::cap_forward;
pub use projection::{
    CENTER_ROW_BIAS, FlatGroundProjector, FramedProjector, GroundProjector, ProjectionError,
    project_ray, project_ray_checked,
};
pub use transform::RigidTransform;
pub use types::{GroundPoint, Pixel, PixelRow, PointCloud, Ray};
