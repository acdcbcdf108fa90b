//! Quadtree configuration.
//!
//! Construction parameters can be built in code or loaded from a TOML file.

use std::fs;
use std::io;
use std::path::Path;

use quadra_common::{ConfigError, QuadTreeError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Element limit used when none is given.
pub const DEFAULT_ELEMENT_LIMIT: usize = 10;

/// Depth at which leaves stop subdividing.
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Quadtree construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// Maximum elements a leaf holds before it subdivides
    pub element_limit: usize,
    /// World width
    pub width: f32,
    /// World height
    pub height: f32,
    /// Leaves at this depth never subdivide
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            element_limit: DEFAULT_ELEMENT_LIMIT,
            width: 1024.0,
            height: 1024.0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl QuadTreeConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Quadtree config not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded quadtree config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("{e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read quadtree config: {e}");
                Self::default()
            },
        }
    }

    /// Parses a TOML document. Missing keys take their default values.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self
            .to_toml_string()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved quadtree config to {}", path.display());
        Ok(())
    }

    /// Rejects parameters no tree can be built from.
    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if self.element_limit == 0 {
            return Err(QuadTreeError::InvalidElementLimit(self.element_limit));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(QuadTreeError::InvalidWorldBounds {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_depth == 0 {
            return Err(QuadTreeError::InvalidMaxDepth(self.max_depth));
        }
        Ok(())
    }
}
