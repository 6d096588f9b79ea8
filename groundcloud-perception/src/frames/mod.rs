//! Reference-frame lookup
//!
//! Projection needs the camera's pose in the vehicle base frame at the time
//! the image was taken. Whatever owns that knowledge sits behind
//! [`FrameLookup`]; [`TransformTree`] is an in-memory implementation fed from
//! configuration or by the caller.

mod topic;
mod tree;

pub use topic::{replace_first, source_frame_for_topic};
pub use tree::{StampedTransform, TransformTree};

use groundcloud_geometry::RigidTransform;
use thiserror::Error;

/// Lookup time meaning "latest available".
pub const LATEST: f64 = 0.0;

/// Source of rigid transforms between named frames.
pub trait FrameLookup {
    /// Transform mapping `source_frame` coordinates into `target_frame` at
    /// `time` seconds ([`LATEST`] for the newest one). May block.
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        time: f64,
    ) -> Result<RigidTransform, LookupError>;
}

impl<L: FrameLookup + ?Sized> FrameLookup for &L {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        time: f64,
    ) -> Result<RigidTransform, LookupError> {
        (**self).lookup(target_frame, source_frame, time)
    }
}

impl<L: FrameLookup + ?Sized> FrameLookup for Box<L> {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        time: f64,
    ) -> Result<RigidTransform, LookupError> {
        (**self).lookup(target_frame, source_frame, time)
    }
}

/// Errors that can occur while resolving a transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("No transform between '{target_frame}' and '{source_frame}'")]
    UnknownFrames {
        target_frame: String,
        source_frame: String,
    },

    #[error(
        "No transform from '{source_frame}' to '{target_frame}' at t={time} (earliest is t={earliest})"
    )]
    Extrapolation {
        target_frame: String,
        source_frame: String,
        time: f64,
        earliest: f64,
    },

    #[error("Frame lookup unavailable: {0}")]
    Unavailable(String),
}
