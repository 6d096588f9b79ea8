//! Pinhole camera model and pixel-to-ray conversion.

use crate::types::{Pixel, Ray};
use serde::{Deserialize, Serialize};

/// A calibrated mapping from pixels to camera-local viewing rays.
///
/// Camera-local axes follow the optical convention: x right, y down, z forward.
pub trait CameraModel {
    /// Ray through `pixel`. Pixels outside the calibrated image still produce a ray.
    fn project_pixel_to_ray(&self, pixel: Pixel) -> Ray;
}

/// Rectified pinhole intrinsics as published with a camera stream.
///
/// `tx`/`ty` are the projection-matrix translation terms of a stereo pair and
/// are zero for a monocular camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinholeCamera {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    pub tx: f64,
    pub ty: f64,
    pub width: u32,
    pub height: u32,
}

impl PinholeCamera {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            ..Self::default()
        }
    }

    /// Whether `pixel` lies inside the calibrated image.
    pub fn contains(&self, pixel: Pixel) -> bool {
        pixel.col >= 0
            && pixel.row >= 0
            && (pixel.col as u32) < self.width
            && (pixel.row as u32) < self.height
    }
}

impl Default for PinholeCamera {
    fn default() -> Self {
        Self {
            fx: 500.0,
            fy: 500.0,
            cx: 320.0,
            cy: 240.0,
            tx: 0.0,
            ty: 0.0,
            width: 640,
            height: 480,
        }
    }
}

impl CameraModel for PinholeCamera {
    fn project_pixel_to_ray(&self, pixel: Pixel) -> Ray {
        Ray::new(
            (pixel.col as f64 - self.cx - self.tx) / self.fx,
            (pixel.row as f64 - self.cy - self.ty) / self.fy,
            1.0,
        )
    }
}

/// Ray through `pixel` for any camera model.
pub fn ray_for<C: CameraModel + ?Sized>(pixel: Pixel, camera: &C) -> Ray {
    camera.project_pixel_to_ray(pixel)
}
