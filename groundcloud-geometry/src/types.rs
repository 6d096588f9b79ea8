//! Core data types for pixels, rays, ground points and point clouds.
//!
//! Everything here is a plain CPU-side value. Points are `f64` throughout
//! because ground distances several meters out are sensitive to the small
//! angles involved in near-horizon projection.

use glam::{DVec2, DVec3};

/// An integer pixel position. Columns grow to the right, rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub col: i32,
    pub row: i32,
}

impl Pixel {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// One image row's foreground pixels, in column order.
pub type PixelRow = Vec<Pixel>;

/// A viewing direction in camera-local coordinates.
///
/// Not normalized: a pinhole model produces rays with `z == 1`, and callers
/// must not assume unit length. A zero-length ray is meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub direction: DVec3,
}

impl Ray {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            direction: DVec3::new(x, y, z),
        }
    }
}

/// A point on the ground plane of a reference frame.
///
/// Only `x` and `y` are stored, so `z` is exactly zero by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundPoint {
    pub x: f64,
    pub y: f64,
}

impl GroundPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Height above the ground plane. Always `0.0`.
    pub const fn z(&self) -> f64 {
        0.0
    }

    /// The point as a 3-D vector with `z == 0`.
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<GroundPoint> for DVec3 {
    fn from(point: GroundPoint) -> Self {
        point.to_dvec3()
    }
}

/// A collection of ground points tagged with the frame they are expressed in.
///
/// The frame id is fixed when the cloud is built. Point order carries no
/// meaning beyond being stable under filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<GroundPoint>,
    frame_id: String,
    stamp: Option<f64>,
}

impl PointCloud {
    pub fn new(frame_id: impl Into<String>, points: Vec<GroundPoint>) -> Self {
        Self {
            points,
            frame_id: frame_id.into(),
            stamp: None,
        }
    }

    pub fn with_stamp(frame_id: impl Into<String>, points: Vec<GroundPoint>, stamp: f64) -> Self {
        Self {
            points,
            frame_id: frame_id.into(),
            stamp: Some(stamp),
        }
    }

    /// An empty cloud in the given frame.
    pub fn empty(frame_id: impl Into<String>) -> Self {
        Self::new(frame_id, Vec::new())
    }

    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Time (seconds) of the transform used to build the cloud, if any.
    pub fn stamp(&self) -> Option<f64> {
        self.stamp
    }

    pub fn points(&self) -> &[GroundPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroundPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned `(min, max)` over the finite points, or `None` if there are none.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut finite = self
            .points
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| DVec2::new(p.x, p.y));
        let first = finite.next()?;
        Some(finite.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    pub(crate) fn retain<F: FnMut(&GroundPoint) -> bool>(&mut self, keep: F) {
        self.points.retain(keep);
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a GroundPoint;
    type IntoIter = std::slice::Iter<'a, GroundPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
