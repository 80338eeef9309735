use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::view::ViewId;

/// Why a container needs re-layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidationKind {
    /// A container-level style property changed
    Style,
    /// A child's item properties changed
    Item,
    /// Children were added or removed
    Children,
}

/// Tracks which containers are dirty and why. Marking an already-dirty node
/// again is a no-op; draining hands nodes back parents-first so layout runs
/// top-down.
#[derive(Debug, Default)]
pub struct InvalidationSystem {
    dirty: HashMap<ViewId, HashSet<InvalidationKind>>,
}

impl InvalidationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an invalidation. Returns whether the node was newly dirtied.
    pub fn mark(&mut self, view: ViewId, kind: InvalidationKind) -> bool {
        let reasons = self.dirty.entry(view).or_default();
        let newly_dirty = reasons.is_empty();
        reasons.insert(kind);
        debug!(view, ?kind, newly_dirty, "layout invalidated");
        newly_dirty
    }

    pub fn is_dirty(&self, view: ViewId) -> bool {
        self.dirty.contains_key(&view)
    }

    pub fn has_pending(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn reasons(&self, view: ViewId) -> Option<&HashSet<InvalidationKind>> {
        self.dirty.get(&view)
    }

    pub fn remove_view(&mut self, view: ViewId) {
        self.dirty.remove(&view);
    }

    pub fn clear(&mut self) {
        self.dirty.clear();
    }

    /// Drain all dirty nodes sorted by tree depth (parents before children,
    /// ties broken by id for determinism). `depth_of` is supplied by the
    /// tree that owns the parent links.
    pub fn drain_ordered<F>(&mut self, depth_of: F) -> Vec<ViewId>
    where
        F: Fn(ViewId) -> usize,
    {
        let mut nodes: Vec<(ViewId, usize)> = self
            .dirty
            .drain()
            .map(|(view, _)| (view, depth_of(view)))
            .collect();

        nodes.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        nodes.into_iter().map(|(view, _)| view).collect()
    }
}
