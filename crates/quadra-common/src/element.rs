//! The contract every element stored in a spatial index implements.

use std::fmt::Debug;
use std::hash::Hash;

use crate::geometry::{Rect, Shape};

/// An object with a stable identity and a 2D shape.
///
/// The index never owns elements. It records the element's key together with
/// a snapshot of its shape, taken on insertion and refreshed whenever the
/// owner reports a move.
pub trait SpatialElement {
    /// Identity used to find the element again after it moves.
    type Key: Copy + Eq + Hash + Debug;

    /// Returns the element's key.
    fn key(&self) -> Self::Key;

    /// Returns the element's current shape.
    fn shape(&self) -> Shape;

    /// Axis-aligned bounds of the current shape.
    fn bounds(&self) -> Rect {
        self.shape().bounds()
    }

    /// Left edge of the bounds.
    fn x(&self) -> f32 {
        self.bounds().x
    }

    /// Top edge of the bounds.
    fn y(&self) -> f32 {
        self.bounds().y
    }

    /// Width of the bounds.
    fn width(&self) -> f32 {
        self.bounds().width
    }

    /// Height of the bounds.
    fn height(&self) -> f32 {
        self.bounds().height
    }
}

impl<K: Copy + Eq + Hash + Debug> SpatialElement for (K, Shape) {
    type Key = K;

    fn key(&self) -> K {
        self.0
    }

    fn shape(&self) -> Shape {
        self.1
    }
}

impl<T: SpatialElement + ?Sized> SpatialElement for &T {
    type Key = T::Key;

    fn key(&self) -> Self::Key {
        (**self).key()
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }
}
