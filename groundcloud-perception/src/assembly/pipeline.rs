//! One mask frame in, one capped base-frame cloud out.

use super::assembler::{AssembleError, CloudAssembler};
use crate::config::{PipelineConfig, ProjectorKind};
use crate::frames::FrameLookup;
use crate::ingest::{MaskFrame, foreground_count, row_foreground};
use groundcloud_geometry::{
    FlatGroundProjector, GroundPoint, GroundProjector, Pixel, PointCloud, ProjectionError,
};
use tracing::{debug, info};

/// [`FlatGroundProjector`] output rotated into base-frame axes.
///
/// The flat projector reports `y` forward and `x` to the right; the base
/// frame has `x` forward and `y` to the left.
#[derive(Debug, Clone, Copy)]
pub struct FlatBaseFrame(pub FlatGroundProjector);

impl FlatBaseFrame {
    fn to_base(point: GroundPoint) -> GroundPoint {
        GroundPoint::new(point.y, -point.x)
    }
}

impl GroundProjector for FlatBaseFrame {
    fn project_pixel(&self, pixel: Pixel) -> GroundPoint {
        Self::to_base(self.0.project(pixel))
    }

    fn project_pixel_checked(&self, pixel: Pixel) -> Result<GroundPoint, ProjectionError> {
        self.0.project_pixel_checked(pixel).map(Self::to_base)
    }
}

/// Extract, assemble and range-cap masks from one camera.
pub struct FramePipeline<L: FrameLookup> {
    config: PipelineConfig,
    assembler: CloudAssembler<L>,
}

impl<L: FrameLookup> FramePipeline<L> {
    pub fn new(config: PipelineConfig, lookup: L) -> Self {
        let assembler = CloudAssembler::new(lookup)
            .with_base_frame(config.base_frame.clone())
            .with_horizon_guard(config.reject_above_horizon);
        Self { config, assembler }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Turn `frame` into a base-frame cloud.
    ///
    /// An empty mask yields an empty cloud. With the framed projector a
    /// failed transform lookup fails the frame even when the mask is empty.
    #[tracing::instrument(skip_all, fields(topic = %frame.topic, timestamp = frame.timestamp))]
    pub fn process(&self, frame: &MaskFrame) -> Result<PointCloud, AssembleError> {
        let rows = row_foreground(&frame.mask);
        let pixel_count = foreground_count(&rows);

        let mut cloud = match self.config.projector {
            ProjectorKind::Framed => self.assembler.assemble_from_topic(
                &rows,
                &self.config.camera,
                &frame.topic,
                frame.timestamp,
            )?,
            ProjectorKind::Flat => {
                let (width, height) = frame.dimensions();
                let projector = FlatBaseFrame(self.config.flat.with_image_size(width, height));
                self.assembler.assemble_with(&rows, &projector, frame.timestamp)
            }
        };

        if let Some(cap) = self.config.forward_cap {
            let removed = cloud.cap_forward(cap);
            debug!("Forward cap {} removed {} points", cap, removed);
        }

        info!(
            "Processed mask: {} foreground pixels -> {} points",
            pixel_count,
            cloud.len()
        );
        Ok(cloud)
    }
}
