//! # Quadra Simulation
//!
//! Headless driver for the Quadra spatial index. Spawns a field of moving
//! shapes, keeps the quadtree in sync with their movement and issues region
//! and line-of-sight queries every tick.
//!
//! Usage: `quadra-sim [CONFIG_PATH]` (defaults to `quadra-sim.toml`).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod sim;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{SimConfig, CONFIG_FILE};
use crate::sim::Simulation;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("quadra=info".parse()?))
        .init();

    info!("Quadra simulation starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let mut config = SimConfig::load_from(&path);
    config.validate();

    let mut simulation = Simulation::new(&config)?;
    let summary = simulation.run();
    summary.log();

    info!("Quadra simulation complete");
    Ok(())
}
