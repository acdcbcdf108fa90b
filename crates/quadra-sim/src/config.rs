//! Simulation configuration.
//!
//! Provides the quadtree parameters plus the size and pacing of the simulated
//! element field. Configuration can be loaded from and saved to a TOML file.

use std::fs;
use std::io;
use std::path::Path;

use quadra_index::QuadTreeConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "quadra-sim.toml";

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Population ===
    /// Number of elements spawned at start
    pub element_count: usize,
    /// Largest element extent
    pub max_element_size: f32,
    /// Largest per-tick displacement on each axis
    pub max_speed: f32,

    // === Pacing ===
    /// Number of ticks to simulate
    pub ticks: u32,
    /// Region queries issued per tick
    pub queries_per_tick: usize,
    /// Radius of each circular region query
    pub query_radius: f32,
    /// Report moves through the notifier queue instead of direct calls
    pub use_move_queue: bool,
    /// RNG seed (None = random)
    pub seed: Option<u64>,

    // === Index ===
    /// Quadtree construction parameters
    pub tree: QuadTreeConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            element_count: 2000,
            max_element_size: 12.0,
            max_speed: 3.0,

            ticks: 600,
            queries_per_tick: 16,
            query_radius: 48.0,
            use_move_queue: true,
            seed: None,

            tree: QuadTreeConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    #[allow(dead_code)]
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    ///
    /// Non-finite values fall back to their defaults. Quadtree parameters are
    /// left alone; the tree rejects bad ones itself.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        for (name, value, fallback) in [
            ("max_element_size", &mut self.max_element_size, defaults.max_element_size),
            ("max_speed", &mut self.max_speed, defaults.max_speed),
            ("query_radius", &mut self.query_radius, defaults.query_radius),
        ] {
            if !value.is_finite() {
                warn!("{name} is not finite, using default {fallback}");
                *value = fallback;
            }
        }

        let smallest_side = self.tree.width.min(self.tree.height);

        self.element_count = self.element_count.clamp(1, 1_000_000);
        self.max_element_size = self.max_element_size.clamp(1.0, (smallest_side / 4.0).max(1.0));
        self.max_speed = self.max_speed.clamp(0.0, self.max_element_size * 4.0);

        self.ticks = self.ticks.clamp(1, 1_000_000);
        self.queries_per_tick = self.queries_per_tick.min(10_000);
        self.query_radius = self.query_radius.clamp(1.0, smallest_side.max(1.0));
    }
}
