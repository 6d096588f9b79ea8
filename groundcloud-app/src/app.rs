//! Application setup and the single-frame run.

use crate::summary::CloudSummary;
use groundcloud_perception::{
    AssembleError, ConfigError, FramePipeline, MaskFrame, ProjectorKind, RigConfig,
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mask loading error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),
}

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Command-line choices layered over the rig configuration.
pub struct RunOptions {
    pub mask: PathBuf,
    pub config: Option<PathBuf>,
    pub topic: Option<String>,
    pub stamp: f64,
    pub flat: bool,
    pub forward_cap: Option<f64>,
    pub reject_above_horizon: bool,
    pub logging: LoggingConfig,
}

impl RunOptions {
    /// Apply the command-line overrides to `rig`.
    fn apply(&self, rig: &mut RigConfig) {
        if let Some(topic) = &self.topic {
            rig.camera_topic = topic.clone();
        }
        if self.flat {
            rig.pipeline.projector = ProjectorKind::Flat;
        }
        if self.forward_cap.is_some() {
            rig.pipeline.forward_cap = self.forward_cap;
        }
        if self.reject_above_horizon {
            rig.pipeline.reject_above_horizon = true;
        }
    }
}

pub fn run(options: RunOptions) -> Result<(), AppError> {
    init_logging(&options.logging);

    let mut rig = match &options.config {
        Some(path) => RigConfig::from_path(path)?,
        None => {
            info!("No rig config given, using defaults");
            RigConfig::default()
        }
    };
    options.apply(&mut rig);

    let mask = image::open(&options.mask)?.to_luma8();
    info!(
        "Loaded mask {} ({}x{})",
        options.mask.display(),
        mask.width(),
        mask.height()
    );

    let pipeline = FramePipeline::new(rig.pipeline.clone(), rig.transform_tree());
    let frame = MaskFrame::new(mask, rig.camera_topic.clone(), options.stamp);
    let cloud = pipeline.process(&frame)?;

    println!("{}", CloudSummary::of(&cloud));
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level)),
        )
        .with_target(false)
        .init();
}
