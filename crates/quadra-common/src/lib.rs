//! # Quadra Common
//!
//! Common types, utilities, and shared abstractions for Project Quadra.
//!
//! This crate provides the collaborators the spatial index is built against:
//! - Geometry primitives (rectangles, circles, triangles, line segments)
//! - The `SpatialElement` contract implemented by anything stored in the index
//! - ID types (ElementId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod element;
pub mod error;
pub mod geometry;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::element::*;
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_generation() {
        let id1 = ElementId::new();
        let id2 = ElementId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_tuple_element_exposes_bounds() {
        let element = (7u32, Shape::from(Circle::new(10.0, 20.0, 5.0)));
        assert_eq!(element.key(), 7);
        assert!((element.x() - 5.0).abs() < f32::EPSILON);
        assert!((element.y() - 15.0).abs() < f32::EPSILON);
        assert!((element.width() - 10.0).abs() < f32::EPSILON);
        assert!((element.height() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_geometry_error_wraps_into_top_level() {
        let err: QuadraError = Shape::from(Rect::new(f32::NAN, 0.0, 1.0, 1.0))
            .validate()
            .map_err(QuadraError::from)
            .err()
            .expect("NaN shape must fail validation");
        assert!(matches!(err, QuadraError::Geometry(GeometryError::NonFinite)));
    }
}
