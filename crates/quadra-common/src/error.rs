//! Error types for Project Quadra.

use thiserror::Error;

/// Top-level error type for Quadra operations.
#[derive(Debug, Error)]
pub enum QuadraError {
    /// Geometry validation errors
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Spatial index construction errors
    #[error("Quadtree error: {0}")]
    QuadTree(#[from] QuadTreeError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Geometry-specific errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A coordinate or extent is NaN or infinite
    #[error("shape has non-finite coordinates")]
    NonFinite,

    /// Width, height or radius is negative
    #[error("shape has negative extent: {0}")]
    NegativeExtent(f32),
}

/// Quadtree construction errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    /// Element limit must be at least one
    #[error("element limit must be at least 1, got {0}")]
    InvalidElementLimit(usize),

    /// World bounds must be positive and finite
    #[error("world bounds must be positive and finite, got {width}x{height}")]
    InvalidWorldBounds {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Maximum depth must be at least one
    #[error("max depth must be at least 1, got {0}")]
    InvalidMaxDepth(u32),
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

/// Result type alias for Quadra operations.
pub type QuadraResult<T> = Result<T, QuadraError>;
