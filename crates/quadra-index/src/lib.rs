//! # Quadra Index
//!
//! Region quadtree for proximity and intersection queries over 2D elements.
//!
//! The tree partitions a fixed world rectangle into quadrants on demand:
//! - Elements live at the deepest node that fully encloses them; elements
//!   straddling a split line stay with the parent.
//! - Nodes subdivide once their bag exceeds the element limit and never merge
//!   back.
//! - Moving elements are re-filed locally through `position_changed` or the
//!   queued [`MoveNotifier`] channel.
//!
//! The tree is not synchronized; callers serialize access themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod movement;
pub mod node;
pub mod tree;

pub use config::{QuadTreeConfig, DEFAULT_ELEMENT_LIMIT, DEFAULT_MAX_DEPTH};
pub use movement::{MoveNotifier, MoveOutcome, MoveReport, PendingMove};
pub use node::{Entry, NodeId, QuadNode, Quadrant};
pub use quadra_common::QuadTreeError;
pub use tree::{QuadTree, QuadTreeStats};
