//! Point cloud assembly
//!
//! Projects row-grouped foreground pixels onto the ground and collects them
//! into a single cloud per camera frame:
//! - [`assembler`]: projector application and frame-lookup-backed assembly
//! - [`pipeline`]: extract, assemble and range-cap one mask frame

pub mod assembler;
pub mod pipeline;

pub use assembler::{AssembleError, BASE_FRAME, CloudAssembler, assemble, assemble_below_horizon};
pub use pipeline::{FlatBaseFrame, FramePipeline};
