//! Partition cells of the region quadtree.
//!
//! A node knows its own bounds, its bag of elements and the ids of its
//! relatives. Everything that walks across nodes lives on [`QuadTree`], which
//! owns the arena the ids point into.
//!
//! [`QuadTree`]: crate::QuadTree

use std::fmt;

use quadra_common::{Rect, Shape};

/// Index of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, present in every tree.
    pub const ROOT: Self = Self(0);

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Child slot of an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-left quarter
    TopLeft,
    /// Upper-right quarter
    TopRight,
    /// Lower-left quarter
    BottomLeft,
    /// Lower-right quarter
    BottomRight,
}

impl Quadrant {
    /// All quadrants in delegation order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Bounds of this quarter of `parent`.
    #[must_use]
    pub fn bounds_within(self, parent: &Rect) -> Rect {
        let half_w = parent.width / 2.0;
        let half_h = parent.height / 2.0;
        match self {
            Quadrant::TopLeft => Rect::new(parent.x, parent.y, half_w, half_h),
            Quadrant::TopRight => Rect::new(parent.x + half_w, parent.y, half_w, half_h),
            Quadrant::BottomLeft => Rect::new(parent.x, parent.y + half_h, half_w, half_h),
            Quadrant::BottomRight => {
                Rect::new(parent.x + half_w, parent.y + half_h, half_w, half_h)
            },
        }
    }

    const fn slot(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }
}

/// An element as recorded in a node's bag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<K> {
    /// Element key.
    pub key: K,
    /// Shape at insertion time or at the last reported move.
    pub shape: Shape,
}

/// A single partition cell.
#[derive(Debug, Clone)]
pub struct QuadNode<K> {
    /// Bounding rectangle of this node.
    bounds: Rect,
    /// Bag size above which the node subdivides.
    element_limit: usize,
    /// Distance from the root (root = 0).
    depth: u32,
    /// Non-owning link back to the parent; `None` only for the root.
    parent: Option<NodeId>,
    /// Children in [`Quadrant::ALL`] order, all present or all absent.
    children: Option<[NodeId; 4]>,
    /// Elements stored at this node.
    elements: Vec<Entry<K>>,
}

impl<K: Copy + Eq> QuadNode<K> {
    pub(crate) fn new(bounds: Rect, element_limit: usize, depth: u32, parent: Option<NodeId>) -> Self {
        Self {
            bounds,
            element_limit,
            depth,
            parent,
            children: None,
            elements: Vec::new(),
        }
    }

    /// Returns the bounds of this node.
    #[must_use]
    pub const fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Left edge.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    /// Top edge.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    /// Width of the cell.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    /// Height of the cell.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    /// Bag size above which this node subdivides.
    #[must_use]
    pub const fn element_limit(&self) -> usize {
        self.element_limit
    }

    /// Distance from the root.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in top-left, top-right, bottom-left, bottom-right order.
    #[must_use]
    pub const fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    /// The child covering `quadrant`, if subdivided.
    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children.map(|c| c[quadrant.slot()])
    }

    /// Returns true if this node has children.
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Elements stored directly at this node (not including children).
    #[must_use]
    pub fn elements(&self) -> &[Entry<K>] {
        &self.elements
    }

    /// Returns the number of elements in this node (not including children).
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if this node's own bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if `key` is stored directly at this node.
    #[must_use]
    pub fn holds(&self, key: K) -> bool {
        self.elements.iter().any(|e| e.key == key)
    }

    /// The shape either overlaps this cell or lies inside it.
    ///
    /// This is the admission test for `add` and `remove`.
    #[must_use]
    pub fn accepts(&self, shape: &Shape) -> bool {
        let cell = Shape::Rect(self.bounds);
        cell.intersects(shape) || cell.contains(shape)
    }

    /// The shape lies inside this cell.
    ///
    /// An element only descends into a child that encloses it. A shape
    /// without area must keep clear of the cell edges, so points and
    /// segments on a split line stay with the parent where queries from
    /// either side still reach them.
    #[must_use]
    pub fn encloses(&self, shape: &Shape) -> bool {
        if shape.has_area() {
            return Shape::Rect(self.bounds).contains(shape);
        }
        let inner = shape.bounds();
        inner.x > self.bounds.x
            && inner.right() < self.bounds.right()
            && inner.y > self.bounds.y
            && inner.bottom() < self.bounds.bottom()
    }

    /// A region query must visit this subtree.
    #[must_use]
    pub fn overlaps_query(&self, query: &Shape) -> bool {
        let cell = Shape::Rect(self.bounds);
        cell.intersects(query) || cell.contains(query)
    }

    pub(crate) fn is_overfull(&self) -> bool {
        self.elements.len() > self.element_limit
    }

    pub(crate) fn set_children(&mut self, children: [NodeId; 4]) {
        self.children = Some(children);
    }

    pub(crate) fn push(&mut self, entry: Entry<K>) {
        self.elements.push(entry);
    }

    pub(crate) fn take(&mut self, key: K) -> Option<Entry<K>> {
        let index = self.elements.iter().position(|e| e.key == key)?;
        Some(self.elements.swap_remove(index))
    }

    pub(crate) fn take_at(&mut self, index: usize) -> Entry<K> {
        self.elements.swap_remove(index)
    }

    pub(crate) fn entry_mut(&mut self, key: K) -> Option<&mut Entry<K>> {
        self.elements.iter_mut().find(|e| e.key == key)
    }

    pub(crate) fn reset(&mut self) {
        self.children = None;
        self.elements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_common::{Circle, LineSegment};

    fn node(bounds: Rect) -> QuadNode<u32> {
        QuadNode::new(bounds, 4, 0, None)
    }

    #[test]
    fn test_quadrants_partition_parent() {
        let parent = Rect::new(10.0, 20.0, 100.0, 60.0);
        let quarters: Vec<Rect> = Quadrant::ALL.iter().map(|q| q.bounds_within(&parent)).collect();

        assert_eq!(quarters[0], Rect::new(10.0, 20.0, 50.0, 30.0));
        assert_eq!(quarters[1], Rect::new(60.0, 20.0, 50.0, 30.0));
        assert_eq!(quarters[2], Rect::new(10.0, 50.0, 50.0, 30.0));
        assert_eq!(quarters[3], Rect::new(60.0, 50.0, 50.0, 30.0));

        let area: f32 = quarters.iter().map(Rect::area).sum();
        assert!((area - parent.area()).abs() < f32::EPSILON);
        for (i, a) in quarters.iter().enumerate() {
            assert!(parent.contains(a));
            for b in quarters.iter().skip(i + 1) {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_accepts_and_encloses() {
        let cell = node(Rect::new(0.0, 0.0, 50.0, 50.0));
        let inside = Shape::Rect(Rect::new(10.0, 10.0, 5.0, 5.0));
        let straddling = Shape::Rect(Rect::new(45.0, 45.0, 10.0, 10.0));
        let outside = Shape::Rect(Rect::new(60.0, 60.0, 5.0, 5.0));

        assert!(cell.accepts(&inside) && cell.encloses(&inside));
        assert!(cell.accepts(&straddling) && !cell.encloses(&straddling));
        assert!(!cell.accepts(&outside) && !cell.encloses(&outside));
    }

    #[test]
    fn test_point_on_edge_is_not_enclosed() {
        let cell = node(Rect::new(0.0, 0.0, 50.0, 50.0));
        let on_edge = Shape::Rect(Rect::new(50.0, 20.0, 0.0, 0.0));
        let interior_point = Shape::Circle(Circle::new(20.0, 20.0, 0.0));
        let edge_segment = Shape::Segment(LineSegment::new(50.0, 0.0, 50.0, 50.0));

        assert!(cell.accepts(&on_edge));
        assert!(!cell.encloses(&on_edge));
        assert!(cell.encloses(&interior_point));
        assert!(cell.accepts(&edge_segment));
        assert!(!cell.encloses(&edge_segment));
        assert!(cell.encloses(&Shape::Segment(LineSegment::new(10.0, 20.0, 30.0, 20.0))));
    }

    #[test]
    fn test_bag_operations() {
        let mut cell = node(Rect::new(0.0, 0.0, 10.0, 10.0));
        let shape = Shape::Rect(Rect::new(1.0, 1.0, 1.0, 1.0));
        for key in 0..5 {
            cell.push(Entry { key, shape });
        }

        assert!(cell.is_overfull());
        assert!(cell.holds(3));
        assert_eq!(cell.take(3).map(|e| e.key), Some(3));
        assert!(!cell.holds(3));
        assert!(cell.take(3).is_none());
        assert!(!cell.is_overfull());
        assert_eq!(cell.len(), 4);
    }
}
