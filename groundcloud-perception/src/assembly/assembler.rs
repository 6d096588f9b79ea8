//! Projecting foreground pixels into a base-frame point cloud.

use crate::frames::{FrameLookup, LookupError, source_frame_for_topic};
use groundcloud_geometry::{
    CameraModel, FramedProjector, GroundPoint, GroundProjector, PixelRow, PointCloud,
    RigidTransform,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Vehicle base frame every assembled cloud is expressed in.
pub const BASE_FRAME: &str = "base_footprint";

/// Errors that abort assembly of a whole frame.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Transform lookup failed for topic '{topic}': {cause}")]
    FrameLookup {
        topic: String,
        #[source]
        cause: LookupError,
    },
}

/// Project every pixel of every row, unchecked, and tag the cloud with `frame_id`.
///
/// Pixels at or above the horizon produce non-finite points.
pub fn assemble<P: GroundProjector + ?Sized>(
    rows: &[PixelRow],
    projector: &P,
    frame_id: &str,
) -> PointCloud {
    let (points, _) = project_rows(rows, projector, false);
    PointCloud::new(frame_id, points)
}

/// Like [`assemble`], but drops pixels the projector rejects as degenerate.
///
/// Returns the cloud and the number of dropped pixels.
pub fn assemble_below_horizon<P: GroundProjector + ?Sized>(
    rows: &[PixelRow],
    projector: &P,
    frame_id: &str,
) -> (PointCloud, usize) {
    let (points, rejected) = project_rows(rows, projector, true);
    (PointCloud::new(frame_id, points), rejected)
}

fn project_rows<P: GroundProjector + ?Sized>(
    rows: &[PixelRow],
    projector: &P,
    guard_horizon: bool,
) -> (Vec<GroundPoint>, usize) {
    if !guard_horizon {
        let points = rows
            .iter()
            .flatten()
            .map(|&pixel| projector.project_pixel(pixel))
            .collect();
        return (points, 0);
    }

    let mut rejected = 0;
    let mut points = Vec::with_capacity(rows.iter().map(Vec::len).sum());
    for &pixel in rows.iter().flatten() {
        match projector.project_pixel_checked(pixel) {
            Ok(point) => points.push(point),
            Err(_) => rejected += 1,
        }
    }
    if rejected > 0 {
        debug!("Dropped {} pixels at or above the horizon", rejected);
    }
    (points, rejected)
}

/// Builds base-frame clouds, resolving camera poses through a [`FrameLookup`].
pub struct CloudAssembler<L: FrameLookup> {
    lookup: L,
    base_frame: String,
    guard_horizon: bool,
}

impl<L: FrameLookup> CloudAssembler<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            base_frame: BASE_FRAME.to_string(),
            guard_horizon: false,
        }
    }

    /// Express clouds in `frame` instead of [`BASE_FRAME`].
    pub fn with_base_frame(mut self, frame: impl Into<String>) -> Self {
        self.base_frame = frame.into();
        self
    }

    /// Drop pixels at or above the horizon instead of emitting non-finite points.
    pub fn with_horizon_guard(mut self, enabled: bool) -> Self {
        self.guard_horizon = enabled;
        self
    }

    /// Frame id assembled clouds are tagged with; a leading `/` used for the
    /// lookup is dropped.
    pub fn base_frame(&self) -> &str {
        self.base_frame.strip_prefix('/').unwrap_or(&self.base_frame)
    }

    /// Pose of the camera publishing on `topic`, in the base frame, at `time`.
    pub fn camera_transform(
        &self,
        topic: &str,
        time: f64,
    ) -> Result<RigidTransform, AssembleError> {
        let source_frame = source_frame_for_topic(topic);
        self.lookup
            .lookup(&self.base_frame, &source_frame, time)
            .map_err(|cause| {
                warn!("Transform lookup for '{}' failed: {}", source_frame, cause);
                AssembleError::FrameLookup {
                    topic: topic.to_owned(),
                    cause,
                }
            })
    }

    /// Project `rows` with an already-built projector into a base-frame cloud.
    pub fn assemble_with<P: GroundProjector + ?Sized>(
        &self,
        rows: &[PixelRow],
        projector: &P,
        stamp: f64,
    ) -> PointCloud {
        let (points, _) = project_rows(rows, projector, self.guard_horizon);
        PointCloud::with_stamp(self.base_frame(), points, stamp)
    }

    /// Project `rows` seen by `camera` on `topic` at `stamp` into the base frame.
    ///
    /// A failed transform lookup fails the whole frame; no partial cloud is
    /// returned.
    #[tracing::instrument(skip_all, fields(topic = %topic, stamp = stamp))]
    pub fn assemble_from_topic<C: CameraModel + ?Sized>(
        &self,
        rows: &[PixelRow],
        camera: &C,
        topic: &str,
        stamp: f64,
    ) -> Result<PointCloud, AssembleError> {
        let transform = self.camera_transform(topic, stamp)?;
        let projector = FramedProjector::new(camera, transform);
        let cloud = self.assemble_with(rows, &projector, stamp);
        info!("Assembled {} points in '{}'", cloud.len(), cloud.frame_id());
        Ok(cloud)
    }
}
