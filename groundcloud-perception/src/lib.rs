//! Groundcloud Perception Crate
//!
//! Turns binary detection masks into ground-plane point clouds expressed in
//! the vehicle base frame.
//!
//! ## Modules
//!
//! - [`ingest`]: mask frames and per-row foreground extraction
//! - [`frames`]: the transform-lookup seam, an in-memory transform tree and
//!   topic-to-frame naming
//! - [`assembly`]: cloud assembly and the per-frame pipeline
//! - [`config`]: rig configuration loaded from JSON
//!
//! ## Example
//!
//! ```ignore
//! use groundcloud_perception::{FramePipeline, MaskFrame, RigConfig};
//!
//! let rig = RigConfig::from_path("rig.json")?;
//! let pipeline = FramePipeline::new(rig.pipeline.clone(), rig.transform_tree());
//! let frame = MaskFrame::new(mask, &rig.camera_topic, 0.0);
//! let cloud = pipeline.process(&frame)?;
//! ```

pub mod assembly;
pub mod config;
pub mod frames;
pub mod ingest;

pub use assembly::{
    AssembleError, BASE_FRAME, CloudAssembler, FlatBaseFrame, FramePipeline, assemble,
    assemble_below_horizon,
};
pub use config::{ConfigError, PipelineConfig, ProjectorKind, RigConfig, TransformConfig};
pub use frames::{
    FrameLookup, LATEST, LookupError, StampedTransform, TransformTree, replace_first,
    source_frame_for_topic,
};
pub use ingest::{MaskFrame, foreground_count, row_foreground};
