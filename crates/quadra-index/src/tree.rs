//! The quadtree itself: node arena, insertion, removal and queries.

use std::fmt::{self, Debug};
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};
use crossbeam_channel::{Receiver, Sender};
use glam::Vec2;
use quadra_common::{LineSegment, QuadTreeError, Rect, Shape, SpatialElement};
use tracing::{debug, warn};

use crate::config::QuadTreeConfig;
use crate::movement::PendingMove;
use crate::node::{Entry, NodeId, QuadNode, Quadrant};

/// Statistics about a quadtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    /// Total number of nodes in the tree.
    pub node_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Total number of elements stored.
    pub element_count: usize,
    /// Elements held by internal nodes because they straddle a child boundary.
    pub straddling_count: usize,
    /// Maximum depth of the tree.
    pub max_depth: u32,
}

/// Region quadtree over a fixed world rectangle anchored at the origin.
///
/// Nodes live in an arena owned by the tree and are never freed individually:
/// once a node subdivides it stays internal until [`QuadTree::clear`].
/// Elements are referenced by key; the tree records a snapshot of each
/// element's shape and relies on the owner to report moves.
pub struct QuadTree<K> {
    /// Node arena; index 0 is the root.
    pub(crate) nodes: Vec<QuadNode<K>>,
    /// Which node holds each tracked element.
    pub(crate) locator: AHashMap<K, NodeId>,
    /// Construction parameters.
    config: QuadTreeConfig,
    /// Movement notifications waiting for [`QuadTree::apply_pending_moves`].
    pub(crate) move_tx: Sender<PendingMove<K>>,
    pub(crate) move_rx: Receiver<PendingMove<K>>,
}

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Creates a tree covering `[0, 0]–[width, height]`.
    ///
    /// Fails if `element_limit` is zero or the world is empty or non-finite.
    pub fn new(element_limit: usize, width: f32, height: f32) -> Result<Self, QuadTreeError> {
        Self::from_config(&QuadTreeConfig {
            element_limit,
            width,
            height,
            ..QuadTreeConfig::default()
        })
    }

    /// Creates a tree with the default element limit.
    pub fn with_world(width: f32, height: f32) -> Result<Self, QuadTreeError> {
        Self::from_config(&QuadTreeConfig {
            width,
            height,
            ..QuadTreeConfig::default()
        })
    }

    /// Creates a tree from a validated configuration.
    pub fn from_config(config: &QuadTreeConfig) -> Result<Self, QuadTreeError> {
        config.validate()?;
        let root = QuadNode::new(
            Rect::new(0.0, 0.0, config.width, config.height),
            config.element_limit,
            0,
            None,
        );
        let (move_tx, move_rx) = crossbeam_channel::unbounded();
        Ok(Self {
            nodes: vec![root],
            locator: AHashMap::new(),
            config: config.clone(),
            move_tx,
            move_rx,
        })
    }

    /// The configuration the tree was built with.
    #[must_use]
    pub const fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Element limit applied to every node.
    #[must_use]
    pub const fn get_element_limit(&self) -> usize {
        self.config.element_limit
    }

    /// World width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.config.width
    }

    /// World height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.config.height
    }

    /// World bounds (the root's bounds).
    #[must_use]
    pub fn bounds(&self) -> &Rect {
        self.at(NodeId::ROOT).bounds()
    }

    /// Id of the root node.
    #[must_use]
    pub const fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &QuadNode<K> {
        self.at(NodeId::ROOT)
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&QuadNode<K>> {
        self.nodes.get(id.index())
    }

    /// The node currently holding `key`.
    #[must_use]
    pub fn node_of(&self, key: K) -> Option<NodeId> {
        self.locator.get(&key).copied()
    }

    /// Returns true if `key` is tracked.
    #[must_use]
    pub fn contains_element(&self, key: K) -> bool {
        self.locator.contains_key(&key)
    }

    /// Number of tracked elements, from the locator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locator.len()
    }

    /// Returns true if no element is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locator.is_empty()
    }

    /// Inserts an element.
    ///
    /// Returns `false` if the shape is invalid, the key is already tracked, or
    /// the element lies entirely outside the world.
    pub fn add<E: SpatialElement<Key = K>>(&mut self, element: &E) -> bool {
        let key = element.key();
        let shape = element.shape();
        if let Err(e) = shape.validate() {
            debug!("Rejected element {:?}: {}", key, e);
            return false;
        }
        if self.locator.contains_key(&key) {
            debug!("Rejected element {:?}: already tracked", key);
            return false;
        }
        self.add_at(NodeId::ROOT, Entry { key, shape })
    }

    /// Removes an element.
    ///
    /// The element is looked up by its current shape. If it moved without a
    /// notification the locator is used instead. Elements with an invalid
    /// shape are ignored.
    pub fn remove<E: SpatialElement<Key = K>>(&mut self, element: &E) -> bool {
        let key = element.key();
        let shape = element.shape();
        if let Err(e) = shape.validate() {
            debug!("Ignored removal of {:?}: {}", key, e);
            return false;
        }
        if self.remove_at(NodeId::ROOT, key, &shape) {
            return true;
        }
        match self.locator.get(&key).copied() {
            Some(id) => {
                warn!("Element {:?} moved without notifying the tree; removing from {}", key, id);
                self.take_from(id, key).is_some()
            },
            None => false,
        }
    }

    /// Elements overlapping or contained by `region`.
    ///
    /// A region without area matches the elements it touches. Invalid regions
    /// match nothing.
    #[must_use]
    pub fn get_elements_within_region(&self, region: &Shape) -> AHashSet<K> {
        let mut found = AHashSet::new();
        if region.validate().is_ok() {
            self.collect_region(NodeId::ROOT, region, &mut found);
        }
        found
    }

    /// Elements crossed or touched by `segment`. A zero-length segment acts
    /// as a point; non-finite endpoints match nothing.
    #[must_use]
    pub fn get_elements_intersecting_line_segment(&self, segment: &LineSegment) -> AHashSet<K> {
        let mut found = AHashSet::new();
        let segment = Shape::Segment(*segment);
        if segment.validate().is_ok() {
            self.collect_crossing(NodeId::ROOT, &segment, &mut found);
        }
        found
    }

    /// Elements whose shape covers the point `(x, y)`.
    #[must_use]
    pub fn get_elements_at_point(&self, x: f32, y: f32) -> AHashSet<K> {
        let mut found = AHashSet::new();
        if x.is_finite() && y.is_finite() {
            self.collect_point(NodeId::ROOT, Vec2::new(x, y), &mut found);
        }
        found
    }

    /// Counts elements by walking every node's bag.
    #[must_use]
    pub fn get_number_of_elements(&self) -> usize {
        self.count_from(NodeId::ROOT)
    }

    /// Returns statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats::default();
        self.collect_stats(NodeId::ROOT, &mut stats);
        stats
    }

    /// Drops every element and collapses the tree back to a single root.
    ///
    /// Pending movement notifications are discarded.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NodeId::ROOT.index()].reset();
        self.locator.clear();
        while self.move_rx.try_recv().is_ok() {}
    }

    pub(crate) fn at(&self, id: NodeId) -> &QuadNode<K> {
        &self.nodes[id.index()]
    }

    fn at_mut(&mut self, id: NodeId) -> &mut QuadNode<K> {
        &mut self.nodes[id.index()]
    }

    /// First child of `id` that encloses `shape`, in delegation order.
    pub(crate) fn enclosing_child(&self, id: NodeId, shape: &Shape) -> Option<NodeId> {
        self.at(id)
            .children()?
            .into_iter()
            .find(|child| self.at(*child).encloses(shape))
    }

    /// Inserts below `id`.
    ///
    /// Delegates to the first child that encloses the entry; otherwise the
    /// entry stays in this node's bag. A leaf whose bag overflows subdivides.
    pub(crate) fn add_at(&mut self, id: NodeId, entry: Entry<K>) -> bool {
        if !self.at(id).accepts(&entry.shape) {
            return false;
        }

        if self.at(id).has_children() {
            return match self.enclosing_child(id, &entry.shape) {
                Some(child) => self.add_at(child, entry),
                None => {
                    self.store(id, entry);
                    true
                },
            };
        }

        self.store(id, entry);
        let node = self.at(id);
        if node.is_overfull() && node.depth() < self.config.max_depth {
            self.subdivide(id);
        }
        true
    }

    /// Splits a leaf into four children and pushes down every element that
    /// one of them encloses. Moved elements are not re-added, so a split
    /// never cascades.
    pub(crate) fn subdivide(&mut self, id: NodeId) {
        if self.at(id).has_children() {
            return;
        }

        let bounds = *self.at(id).bounds();
        let depth = self.at(id).depth() + 1;
        let first = self.nodes.len();
        let children = [0, 1, 2, 3].map(|i| NodeId::from_index(first + i));
        for quadrant in Quadrant::ALL {
            self.nodes.push(QuadNode::new(
                quadrant.bounds_within(&bounds),
                self.config.element_limit,
                depth,
                Some(id),
            ));
        }
        self.at_mut(id).set_children(children);

        let total = self.at(id).len();
        let mut moved = 0;
        // Reverse walk: swap_remove only disturbs entries already visited.
        for index in (0..total).rev() {
            let shape = self.at(id).elements()[index].shape;
            if let Some(child) = self.enclosing_child(id, &shape) {
                let entry = self.at_mut(id).take_at(index);
                self.store(child, entry);
                moved += 1;
            }
        }

        debug!(
            "Subdivided {} at depth {}: pushed {} of {} elements down",
            id,
            depth - 1,
            moved,
            total
        );
    }

    fn remove_at(&mut self, id: NodeId, key: K, shape: &Shape) -> bool {
        if !self.at(id).accepts(shape) {
            return false;
        }
        if let Some(child) = self.enclosing_child(id, shape) {
            if self.remove_at(child, key, shape) {
                return true;
            }
        }
        self.take_from(id, key).is_some()
    }

    pub(crate) fn store(&mut self, id: NodeId, entry: Entry<K>) {
        self.at_mut(id).push(entry);
        self.locator.insert(entry.key, id);
    }

    pub(crate) fn take_from(&mut self, id: NodeId, key: K) -> Option<Entry<K>> {
        let entry = self.at_mut(id).take(key)?;
        self.locator.remove(&key);
        Some(entry)
    }

    fn collect_region(&self, id: NodeId, region: &Shape, found: &mut AHashSet<K>) {
        let node = self.at(id);
        if let Some(children) = node.children() {
            for child in children {
                if self.at(child).overlaps_query(region) {
                    self.collect_region(child, region, found);
                }
            }
        }
        for entry in node.elements() {
            if region.contains(&entry.shape) || region.intersects(&entry.shape) {
                found.insert(entry.key);
            }
        }
    }

    fn collect_crossing(&self, id: NodeId, segment: &Shape, found: &mut AHashSet<K>) {
        let node = self.at(id);
        if let Some(children) = node.children() {
            for child in children {
                if Shape::Rect(*self.at(child).bounds()).intersects(segment) {
                    self.collect_crossing(child, segment, found);
                }
            }
        }
        for entry in node.elements() {
            if segment.intersects(&entry.shape) {
                found.insert(entry.key);
            }
        }
    }

    fn collect_point(&self, id: NodeId, point: Vec2, found: &mut AHashSet<K>) {
        let node = self.at(id);
        if let Some(children) = node.children() {
            for child in children {
                if self.at(child).bounds().contains_point(point.x, point.y) {
                    self.collect_point(child, point, found);
                }
            }
        }
        for entry in node.elements() {
            if entry.shape.contains_point(point) {
                found.insert(entry.key);
            }
        }
    }

    fn count_from(&self, id: NodeId) -> usize {
        let node = self.at(id);
        node.len()
            + node
                .children()
                .map_or(0, |children| children.iter().map(|c| self.count_from(*c)).sum())
    }

    fn collect_stats(&self, id: NodeId, stats: &mut QuadTreeStats) {
        let node = self.at(id);
        stats.node_count += 1;
        stats.element_count += node.len();
        stats.max_depth = stats.max_depth.max(node.depth());

        if let Some(children) = node.children() {
            stats.straddling_count += node.len();
            for child in children {
                self.collect_stats(child, stats);
            }
        } else {
            stats.leaf_count += 1;
        }
    }
}

impl<K> Debug for QuadTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("elements", &self.locator.len())
            .finish_non_exhaustive()
    }
}
