//! Groundcloud Application
//!
//! Projects one binary detection mask onto the ground plane and reports the
//! resulting point cloud.
//!
//! Features:
//! - Calibrated pinhole projection through a configured camera mount
//! - Calibration-free flat-ground projection
//! - Horizon rejection and forward range capping

mod app;
mod summary;

use clap::Parser;
use std::path::PathBuf;

/// Groundcloud - mask to ground-plane point cloud
#[derive(Parser, Debug)]
#[command(name = "groundcloud")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Binary mask image; any non-zero pixel is foreground
    mask: PathBuf,

    /// Rig configuration (JSON); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera topic, overriding the configured one
    #[arg(short, long)]
    topic: Option<String>,

    /// Image timestamp in seconds (0 = latest transform)
    #[arg(short, long, default_value_t = 0.0)]
    stamp: f64,

    /// Use the calibration-free flat-ground projector
    #[arg(long)]
    flat: bool,

    /// Drop points farther forward than this many meters
    #[arg(long)]
    forward_cap: Option<f64>,

    /// Skip pixels at or above the horizon
    #[arg(long)]
    reject_above_horizon: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let options = app::RunOptions {
        mask: args.mask,
        config: args.config,
        topic: args.topic,
        stamp: args.stamp,
        flat: args.flat,
        forward_cap: args.forward_cap,
        reject_above_horizon: args.reject_above_horizon,
        logging: app::LoggingConfig {
            level: args.log_level,
        },
    };

    if let Err(e) = app::run(options) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
