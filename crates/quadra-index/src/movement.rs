//! Reacting to elements that change shape while tracked.
//!
//! A move is handled locally: the element's current node keeps it when it
//! still fits, otherwise it bubbles up through its ancestors until one
//! accepts it. The search never restarts from the root, so small moves stay
//! cheap.

use std::fmt::Debug;
use std::hash::Hash;

use crossbeam_channel::Sender;
use quadra_common::{Shape, SpatialElement};
use tracing::{trace, warn};

use crate::node::NodeId;
use crate::tree::QuadTree;

/// What `position_changed` did with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The element still belongs to its node; only its recorded shape changed.
    Unchanged,
    /// The element now fits inside a child of its node and was pushed down.
    Descended {
        /// Node now holding the element.
        node: NodeId,
    },
    /// The element left its node and was re-inserted through an ancestor.
    Relocated {
        /// Node now holding the element.
        node: NodeId,
        /// Levels climbed before an ancestor accepted it.
        hops: u32,
    },
    /// The element left the world (or its shape became invalid) and is no
    /// longer tracked.
    Dropped,
    /// The key is not tracked by this tree.
    NotTracked,
}

/// A queued notification that an element's shape changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMove<K> {
    /// Element key.
    pub key: K,
    /// The element's new shape.
    pub shape: Shape,
}

/// Handle an element (or its owner) keeps to report its own movement.
///
/// Notifications queue up until the tree's owner calls
/// [`QuadTree::apply_pending_moves`]. Handles are cheap to clone and may be
/// sent to other threads.
#[derive(Debug, Clone)]
pub struct MoveNotifier<K> {
    sender: Sender<PendingMove<K>>,
}

impl<K> MoveNotifier<K> {
    /// Queues a move. Returns `false` if the tree has been dropped.
    pub fn notify(&self, key: K, shape: Shape) -> bool {
        self.sender.send(PendingMove { key, shape }).is_ok()
    }

    /// Queues a move using the element's current key and shape.
    pub fn notify_element<E: SpatialElement<Key = K>>(&self, element: &E) -> bool {
        self.notify(element.key(), element.shape())
    }
}

/// Tally of outcomes from one [`QuadTree::apply_pending_moves`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Notifications processed.
    pub processed: usize,
    /// Elements that stayed in their node.
    pub unchanged: usize,
    /// Elements pushed down into a child.
    pub descended: usize,
    /// Elements re-inserted through an ancestor.
    pub relocated: usize,
    /// Elements that left the world.
    pub dropped: usize,
    /// Notifications for keys the tree does not track.
    pub not_tracked: usize,
}

impl MoveReport {
    /// Counts one outcome.
    pub fn record(&mut self, outcome: MoveOutcome) {
        self.processed += 1;
        match outcome {
            MoveOutcome::Unchanged => self.unchanged += 1,
            MoveOutcome::Descended { .. } => self.descended += 1,
            MoveOutcome::Relocated { .. } => self.relocated += 1,
            MoveOutcome::Dropped => self.dropped += 1,
            MoveOutcome::NotTracked => self.not_tracked += 1,
        }
    }
}

impl std::ops::AddAssign for MoveReport {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.unchanged += other.unchanged;
        self.descended += other.descended;
        self.relocated += other.relocated;
        self.dropped += other.dropped;
        self.not_tracked += other.not_tracked;
    }
}

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Re-files an element whose shape changed.
    pub fn position_changed<E: SpatialElement<Key = K>>(&mut self, element: &E) -> MoveOutcome {
        self.relocate(element.key(), element.shape())
    }

    /// Returns a handle elements can use to queue their own moves.
    #[must_use]
    pub fn move_notifier(&self) -> MoveNotifier<K> {
        MoveNotifier {
            sender: self.move_tx.clone(),
        }
    }

    /// Number of queued move notifications.
    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.move_rx.len()
    }

    /// Applies every queued move notification in arrival order.
    pub fn apply_pending_moves(&mut self) -> MoveReport {
        let mut report = MoveReport::default();
        while let Ok(pending) = self.move_rx.try_recv() {
            report.record(self.relocate(pending.key, pending.shape));
        }
        report
    }

    fn relocate(&mut self, key: K, shape: Shape) -> MoveOutcome {
        let Some(node) = self.node_of(key) else {
            return MoveOutcome::NotTracked;
        };

        if let Err(e) = shape.validate() {
            self.take_from(node, key);
            warn!("Element {:?} reported an invalid shape ({}); no longer tracked", key, e);
            return MoveOutcome::Dropped;
        }

        if self.still_fits(node, &shape) {
            if let Some(entry) = self.nodes[node.index()].entry_mut(key) {
                entry.shape = shape;
            }
            let Some(child) = self.enclosing_child(node, &shape) else {
                return MoveOutcome::Unchanged;
            };
            let Some(entry) = self.take_from(node, key) else {
                return MoveOutcome::NotTracked;
            };
            self.add_at(child, entry);
            return self
                .node_of(key)
                .map_or(MoveOutcome::Dropped, |node| MoveOutcome::Descended { node });
        }

        let Some(mut entry) = self.take_from(node, key) else {
            return MoveOutcome::NotTracked;
        };
        entry.shape = shape;

        let mut hops = 0;
        let mut current = self.at(node).parent();
        while let Some(ancestor) = current {
            hops += 1;
            if self.still_fits(ancestor, &shape) {
                if self.add_at(ancestor, entry) {
                    trace!("Element {:?} bubbled up {} level(s) to {}", key, hops, ancestor);
                    if let Some(node) = self.node_of(key) {
                        return MoveOutcome::Relocated { node, hops };
                    }
                }
                break;
            }
            current = self.at(ancestor).parent();
        }

        warn!("Element {:?} left the world bounds; no longer tracked", key);
        MoveOutcome::Dropped
    }

    /// The root keeps anything it accepts; other nodes only keep elements
    /// they enclose, so queries pruned by cell bounds stay exact.
    fn still_fits(&self, id: NodeId, shape: &Shape) -> bool {
        let node = self.at(id);
        if node.parent().is_none() {
            node.accepts(shape)
        } else {
            node.encloses(shape)
        }
    }
}
