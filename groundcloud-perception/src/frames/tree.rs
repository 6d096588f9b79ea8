//! In-memory stamped transform store.

use super::{FrameLookup, LATEST, LookupError};
use groundcloud_geometry::RigidTransform;
use std::collections::HashMap;
use tracing::{debug, trace};

/// A transform valid from `stamp` (seconds) onward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedTransform {
    pub stamp: f64,
    pub transform: RigidTransform,
}

/// Direct parent/child transforms with a time history per edge.
///
/// A lookup is answered from the edge `target <- source` or, inverted, from
/// `source <- target`. Edges are not chained through intermediate frames.
/// Frame names are compared without a leading `/`.
#[derive(Debug, Clone, Default)]
pub struct TransformTree {
    edges: HashMap<(String, String), Vec<StampedTransform>>,
}

fn frame_key(name: &str) -> &str {
    name.trim_start_matches('/')
}

impl TransformTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `transform`, mapping `child` coordinates into `parent`, from `stamp` on.
    pub fn insert(&mut self, parent: &str, child: &str, stamp: f64, transform: RigidTransform) {
        let history = self
            .edges
            .entry((frame_key(parent).to_owned(), frame_key(child).to_owned()))
            .or_default();
        let at = history.partition_point(|s| s.stamp <= stamp);
        history.insert(at, StampedTransform { stamp, transform });
        trace!("Stored {} <- {} at t={}", parent, child, stamp);
    }

    /// Record a transform that holds for all time.
    pub fn insert_static(&mut self, parent: &str, child: &str, transform: RigidTransform) {
        self.insert(parent, child, f64::NEG_INFINITY, transform);
    }

    /// Number of parent/child edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn sample(
        history: &[StampedTransform],
        time: f64,
        target_frame: &str,
        source_frame: &str,
    ) -> Result<RigidTransform, LookupError> {
        let found = if time == LATEST {
            history.last()
        } else {
            let at = history.partition_point(|s| s.stamp <= time);
            at.checked_sub(1).map(|i| &history[i])
        };
        found.map(|s| s.transform).ok_or_else(|| LookupError::Extrapolation {
            target_frame: target_frame.to_owned(),
            source_frame: source_frame.to_owned(),
            time,
            earliest: history.first().map_or(f64::NAN, |s| s.stamp),
        })
    }
}

impl FrameLookup for TransformTree {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        time: f64,
    ) -> Result<RigidTransform, LookupError> {
        let target = frame_key(target_frame);
        let source = frame_key(source_frame);
        if target == source {
            return Ok(RigidTransform::IDENTITY);
        }

        let forward = (target.to_owned(), source.to_owned());
        if let Some(history) = self.edges.get(&forward) {
            return Self::sample(history, time, target, source);
        }

        let backward = (source.to_owned(), target.to_owned());
        if let Some(history) = self.edges.get(&backward) {
            debug!("Answering {} <- {} from inverse edge", target, source);
            return Self::sample(history, time, target, source).map(|t| t.inverse());
        }

        Err(LookupError::UnknownFrames {
            target_frame: target.to_owned(),
            source_frame: source.to_owned(),
        })
    }
}
