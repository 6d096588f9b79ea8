//! Rig configuration: camera, mount, frames and range cap.

use crate::assembly::BASE_FRAME;
use crate::frames::TransformTree;
use glam::DVec3;
use groundcloud_geometry::{FlatGroundProjector, PinholeCamera, RigidTransform};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which projector turns pixels into ground points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectorKind {
    /// Calibrated pinhole camera plus a looked-up camera pose.
    #[default]
    Framed,
    /// Field-of-view estimate from mount height and pitch; no lookup needed.
    Flat,
}

/// A fixed parent/child transform.
///
/// `rpy` holds roll, pitch and yaw in radians about the parent's fixed axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub parent: String,
    pub child: String,
    /// Valid from this time on; `None` means always.
    pub stamp: Option<f64>,
    pub translation: [f64; 3],
    pub rpy: [f64; 3],
}

impl TransformConfig {
    pub fn to_transform(&self) -> RigidTransform {
        let [roll, pitch, yaw] = self.rpy;
        RigidTransform::from_rpy(DVec3::from_array(self.translation), roll, pitch, yaw)
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        let mount_pitch = 20f64.to_radians();
        Self {
            parent: BASE_FRAME.to_string(),
            child: "optical_cam_front".to_string(),
            stamp: None,
            translation: [0.0, 0.0, 0.5],
            // optical axes (z forward, y down) tilted down by the mount pitch
            rpy: [
                -std::f64::consts::FRAC_PI_2 - mount_pitch,
                0.0,
                -std::f64::consts::FRAC_PI_2,
            ],
        }
    }
}

/// Per-frame processing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Frame the clouds are expressed in.
    pub base_frame: String,
    pub projector: ProjectorKind,
    pub camera: PinholeCamera,
    pub flat: FlatGroundProjector,
    /// Drop points farther forward than this (meters).
    pub forward_cap: Option<f64>,
    /// Skip pixels at or above the horizon instead of emitting non-finite points.
    pub reject_above_horizon: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_frame: BASE_FRAME.to_string(),
            projector: ProjectorKind::Framed,
            camera: PinholeCamera::default(),
            flat: FlatGroundProjector::default(),
            forward_cap: None,
            reject_above_horizon: false,
        }
    }
}

/// Everything needed to process masks from one camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Topic the camera publishes on; its optical frame is derived from it.
    pub camera_topic: String,
    pub pipeline: PipelineConfig,
    /// Static transforms loaded into the in-memory transform tree.
    pub transforms: Vec<TransformConfig>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            camera_topic: "usb_cam_front".to_string(),
            pipeline: PipelineConfig::default(),
            transforms: vec![TransformConfig::default()],
        }
    }
}

impl RigConfig {
    /// Load a rig configuration from a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let config: RigConfig = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Loaded rig config: topic '{}', {:?} projector, {} transforms",
            config.camera_topic,
            config.pipeline.projector,
            config.transforms.len()
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Transform tree holding every configured transform.
    pub fn transform_tree(&self) -> TransformTree {
        let mut tree = TransformTree::new();
        for entry in &self.transforms {
            let transform = entry.to_transform();
            match entry.stamp {
                Some(stamp) => tree.insert(&entry.parent, &entry.child, stamp, transform),
                None => tree.insert_static(&entry.parent, &entry.child, transform),
            }
        }
        debug!("Built transform tree with {} edges", tree.len());
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{FrameLookup, LATEST};

    #[test]
    fn test_defaults_serialize_and_reload() {
        let config = RigConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let reloaded = RigConfig::from_json(&json).unwrap();
        assert_eq!(reloaded.camera_topic, config.camera_topic);
        assert_eq!(reloaded.pipeline.projector, config.pipeline.projector);
        assert_eq!(reloaded.pipeline.camera.width, config.pipeline.camera.width);
        assert_eq!(reloaded.transforms[0].child, "optical_cam_front");
        assert!((reloaded.transforms[0].rpy[0] - config.transforms[0].rpy[0]).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = RigConfig::from_json(
            r#"{
                "camera_topic": "usb_cam_left",
                "pipeline": { "projector": "flat", "forward_cap": 6.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.camera_topic, "usb_cam_left");
        assert_eq!(config.pipeline.projector, ProjectorKind::Flat);
        assert_eq!(config.pipeline.forward_cap, Some(6.0));
        assert_eq!(config.pipeline.base_frame, BASE_FRAME);
        assert_eq!(config.transforms.len(), 1);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            RigConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            RigConfig::from_path("/nonexistent/groundcloud/rig.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_default_mount_faces_forward_and_down() {
        let tree = RigConfig::default().transform_tree();
        let t = tree.lookup(BASE_FRAME, "optical_cam_front", LATEST).unwrap();
        assert!((t.transform_point(DVec3::ZERO).z - 0.5).abs() < 1e-12);

        let forward = t.transform_vector(DVec3::Z);
        let pitch = 20f64.to_radians();
        assert!((forward - DVec3::new(pitch.cos(), 0.0, -pitch.sin())).length() < 1e-9);

        let right = t.transform_vector(DVec3::X);
        assert!((right - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-9);
    }
}
