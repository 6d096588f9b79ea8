//! Mask ingestion
//!
//! Detection stages upstream hand over binary masks, one per camera image.
//! This module wraps them with their topic and timestamp and groups the
//! foreground pixels by image row.

pub mod mask;

pub use mask::{MaskFrame, foreground_count, row_foreground};
