use std::collections::HashMap;

use taffy::{AvailableSpace, Dimension, Layout, NodeId, Size, Style, TaffyTree};
use tracing::{debug, warn};

use flexview_style::{
    apply_item_style, taffy_container_style, AlignContent, AlignItems, FlexDirection,
    FlexItemStyle, FlexWrap, FlexboxStyle, JustifyContent, DEFAULT_ORDER,
};

use crate::engine::FlexEngine;
use crate::view::ViewId;

struct ChildEntry {
    view: ViewId,
    order: i32,
}

/// Reference `FlexEngine` backed by a taffy tree.
///
/// Taffy has no `order` property, so containers keep their children in
/// insertion order here and hand taffy a stably order-sorted list. It also
/// has no forced line break, so `flex-wrap-before` is recorded but does not
/// influence the computed layout.
pub struct TaffyFlexEngine {
    taffy: TaffyTree,
    node_map: HashMap<ViewId, NodeId>,
    children: HashMap<ViewId, Vec<ChildEntry>>,
    parent_map: HashMap<ViewId, ViewId>,
    layout_cache: HashMap<ViewId, Layout>,
    dirty_views: Vec<ViewId>,
    root: Option<NodeId>,
}

impl TaffyFlexEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: HashMap::new(),
            children: HashMap::new(),
            parent_map: HashMap::new(),
            layout_cache: HashMap::new(),
            dirty_views: Vec::new(),
            root: None,
        }
    }

    /// Fixed content size for a leaf, standing in for native measurement.
    pub fn set_intrinsic_size(&mut self, view: ViewId, width: f32, height: f32) {
        self.with_style(view, |style| {
            style.size.width = Dimension::Length(width);
            style.size.height = Dimension::Length(height);
        });
        self.mark_dirty(view);
    }

    pub fn compute_layout(
        &mut self,
        available_space: Size<AvailableSpace>,
    ) -> Result<(), taffy::TaffyError> {
        let Some(root) = self.root else {
            return Ok(());
        };

        // The root fills the definite viewport; without this it would size
        // to content and leave no free space to distribute.
        let mut root_style = self.taffy.style(root)?.clone();
        if let AvailableSpace::Definite(width) = available_space.width {
            root_style.size.width = Dimension::Length(width);
        }
        if let AvailableSpace::Definite(height) = available_space.height {
            root_style.size.height = Dimension::Length(height);
        }
        self.taffy.set_style(root, root_style)?;

        self.taffy.compute_layout(root, available_space)?;

        // Cache layouts for all views
        for (&view, &node) in &self.node_map {
            if let Ok(layout) = self.taffy.layout(node) {
                self.layout_cache.insert(view, *layout);
            }
        }

        self.dirty_views.clear();
        debug!(views = self.node_map.len(), "layout computed");
        Ok(())
    }

    pub fn layout(&self, view: ViewId) -> Option<&Layout> {
        self.layout_cache.get(&view)
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty_views.is_empty()
    }

    fn mark_dirty(&mut self, view: ViewId) {
        if !self.dirty_views.contains(&view) {
            self.dirty_views.push(view);
        }
    }

    fn with_style<F>(&mut self, view: ViewId, mutate: F)
    where
        F: FnOnce(&mut Style),
    {
        let Some(&node) = self.node_map.get(&view) else {
            warn!(view, "style change for unregistered view");
            return;
        };
        let mut style = match self.taffy.style(node) {
            Ok(style) => style.clone(),
            Err(err) => {
                warn!(view, %err, "failed to read layout style");
                return;
            }
        };
        mutate(&mut style);
        if let Err(err) = self.taffy.set_style(node, style) {
            warn!(view, %err, "failed to update layout style");
        }
    }

    /// Hand taffy the container's children sorted by `order`, keeping
    /// insertion order for ties.
    fn sync_children(&mut self, parent: ViewId) {
        let Some(&parent_node) = self.node_map.get(&parent) else {
            return;
        };
        let Some(entries) = self.children.get(&parent) else {
            return;
        };

        let mut ordered: Vec<(i32, NodeId)> = entries
            .iter()
            .filter_map(|entry| {
                self.node_map
                    .get(&entry.view)
                    .map(|&node| (entry.order, node))
            })
            .collect();
        ordered.sort_by_key(|&(order, _)| order);

        let nodes: Vec<NodeId> = ordered.into_iter().map(|(_, node)| node).collect();
        if let Err(err) = self.taffy.set_children(parent_node, &nodes) {
            warn!(parent, %err, "failed to update layout children");
        }
    }
}

impl Default for TaffyFlexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FlexEngine for TaffyFlexEngine {
    fn register_view(&mut self, view: ViewId, container: Option<&FlexboxStyle>) {
        let style = match container {
            Some(container) => taffy_container_style(container),
            None => Style::default(),
        };
        match self.taffy.new_leaf(style) {
            Ok(node) => {
                self.node_map.insert(view, node);
                self.mark_dirty(view);
            }
            Err(err) => warn!(view, %err, "failed to create layout node"),
        }
    }

    fn remove_view(&mut self, view: ViewId) {
        if let Some(parent) = self.parent_map.remove(&view) {
            if let Some(entries) = self.children.get_mut(&parent) {
                entries.retain(|entry| entry.view != view);
            }
            self.sync_children(parent);
        }
        self.children.remove(&view);
        self.layout_cache.remove(&view);
        self.dirty_views.retain(|&dirty| dirty != view);

        if let Some(node) = self.node_map.remove(&view) {
            if self.root == Some(node) {
                self.root = None;
            }
            if let Err(err) = self.taffy.remove(node) {
                warn!(view, %err, "failed to remove layout node");
            }
        }
    }

    fn add_child(&mut self, parent: ViewId, child: ViewId) {
        self.parent_map.insert(child, parent);
        self.children
            .entry(parent)
            .or_default()
            .push(ChildEntry {
                view: child,
                order: DEFAULT_ORDER,
            });
        self.sync_children(parent);
        self.mark_dirty(parent);
    }

    fn remove_child(&mut self, parent: ViewId, child: ViewId) {
        self.parent_map.remove(&child);
        if let Some(entries) = self.children.get_mut(&parent) {
            entries.retain(|entry| entry.view != child);
        }
        self.sync_children(parent);
        self.mark_dirty(parent);
    }

    fn set_root(&mut self, view: ViewId) {
        self.root = self.node_map.get(&view).copied();
    }

    fn set_flex_direction(&mut self, view: ViewId, value: FlexDirection) {
        debug!(view, %value, "set flex-direction");
        self.with_style(view, |style| style.flex_direction = value.into());
        self.mark_dirty(view);
    }

    fn set_flex_wrap(&mut self, view: ViewId, value: FlexWrap) {
        debug!(view, %value, "set flex-wrap");
        self.with_style(view, |style| style.flex_wrap = value.into());
        self.mark_dirty(view);
    }

    fn set_justify_content(&mut self, view: ViewId, value: JustifyContent) {
        debug!(view, %value, "set justify-content");
        self.with_style(view, |style| style.justify_content = Some(value.into()));
        self.mark_dirty(view);
    }

    fn set_align_items(&mut self, view: ViewId, value: AlignItems) {
        debug!(view, %value, "set align-items");
        self.with_style(view, |style| style.align_items = Some(value.into()));
        self.mark_dirty(view);
    }

    fn set_align_content(&mut self, view: ViewId, value: AlignContent) {
        debug!(view, %value, "set align-content");
        self.with_style(view, |style| style.align_content = Some(value.into()));
        self.mark_dirty(view);
    }

    fn update_item(&mut self, view: ViewId, item: &FlexItemStyle) {
        self.with_style(view, |style| apply_item_style(style, item));

        if let Some(&parent) = self.parent_map.get(&view) {
            let mut order_changed = false;
            if let Some(entries) = self.children.get_mut(&parent) {
                for entry in entries.iter_mut() {
                    if entry.view == view && entry.order != item.order {
                        entry.order = item.order;
                        order_changed = true;
                    }
                }
            }
            if order_changed {
                self.sync_children(parent);
            }
        }

        if item.flex_wrap_before {
            debug!(view, "flex-wrap-before requested; taffy has no forced line break");
        }
        self.mark_dirty(view);
    }

    fn invalidate(&mut self, view: ViewId) {
        debug!(view, "invalidate");
        self.mark_dirty(view);
    }
}

#[cfg(test)]
mod tests {
    use flexview_style::{AlignSelf, FlexBasis, JustifyContent};

    use crate::view::ViewTree;

    #[test]
    fn test_row_children_are_laid_out_left_to_right() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let a = tree.add_view();
        let b = tree.add_view();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.engine_mut().set_intrinsic_size(a, 50.0, 40.0);
        tree.engine_mut().set_intrinsic_size(b, 50.0, 40.0);

        tree.set_root(root).unwrap();
        tree.compute_layout(300.0, 100.0).unwrap();

        let layout_a = tree.layout(a).unwrap();
        let layout_b = tree.layout(b).unwrap();
        assert_eq!(layout_a.location.x, 0.0);
        assert_eq!(layout_b.location.x, 50.0);
        assert_eq!(layout_a.size.width, 50.0);
    }

    #[test]
    fn test_order_reorders_children_stably() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let a = tree.add_view();
        let b = tree.add_view();
        let c = tree.add_view();
        for &child in &[a, b, c] {
            tree.add_child(root, child).unwrap();
            tree.engine_mut().set_intrinsic_size(child, 50.0, 50.0);
        }

        // b comes first; a and c tie and keep insertion order
        tree.set_order(a, 2).unwrap();
        tree.set_order(b, 1).unwrap();
        tree.set_order(c, 2).unwrap();

        tree.set_root(root).unwrap();
        tree.compute_layout(300.0, 100.0).unwrap();

        assert_eq!(tree.layout(b).unwrap().location.x, 0.0);
        assert_eq!(tree.layout(a).unwrap().location.x, 50.0);
        assert_eq!(tree.layout(c).unwrap().location.x, 100.0);
    }

    #[test]
    fn test_flex_grow_distributes_free_space() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let small = tree.add_view();
        let large = tree.add_view();
        tree.add_child(root, small).unwrap();
        tree.add_child(root, large).unwrap();

        tree.set_flex_grow(small, 1.0).unwrap();
        tree.set_flex_grow(large, 2.0).unwrap();

        tree.set_root(root).unwrap();
        tree.compute_layout(300.0, 100.0).unwrap();

        assert_eq!(tree.layout(small).unwrap().size.width, 100.0);
        assert_eq!(tree.layout(large).unwrap().size.width, 200.0);
    }

    #[test]
    fn test_justify_flex_end_pushes_children_right() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let child = tree.add_view();
        tree.add_child(root, child).unwrap();
        tree.engine_mut().set_intrinsic_size(child, 60.0, 40.0);
        tree.set_justify_content(root, JustifyContent::FlexEnd).unwrap();

        tree.set_root(root).unwrap();
        tree.compute_layout(200.0, 100.0).unwrap();

        assert_eq!(tree.layout(child).unwrap().location.x, 140.0);
    }

    #[test]
    fn test_flex_basis_percent_sets_main_size() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let child = tree.add_view();
        tree.add_child(root, child).unwrap();
        tree.set_flex_basis(child, FlexBasis::Percent(25.0)).unwrap();
        tree.set_flex_shrink(child, 0.0).unwrap();

        tree.set_root(root).unwrap();
        tree.compute_layout(400.0, 100.0).unwrap();

        assert_eq!(tree.layout(child).unwrap().size.width, 100.0);
    }

    #[test]
    fn test_align_self_overrides_container_alignment() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let stretched = tree.add_view();
        let pinned = tree.add_view();
        tree.add_child(root, stretched).unwrap();
        tree.add_child(root, pinned).unwrap();
        tree.engine_mut().set_intrinsic_size(pinned, 50.0, 20.0);
        tree.set_align_self(pinned, AlignSelf::FlexEnd).unwrap();

        tree.set_root(root).unwrap();
        tree.compute_layout(200.0, 100.0).unwrap();

        // Container default align-items is stretch
        assert_eq!(tree.layout(stretched).unwrap().size.height, 100.0);
        assert_eq!(tree.layout(pinned).unwrap().location.y, 80.0);
    }

    #[test]
    fn test_root_fills_definite_viewport() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        tree.set_root(root).unwrap();
        tree.compute_layout(640.0, 480.0).unwrap();

        let layout = tree.layout(root).unwrap();
        assert_eq!(layout.size.width, 640.0);
        assert_eq!(layout.size.height, 480.0);
    }

    #[test]
    fn test_compute_without_root_is_a_no_op() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        assert!(tree.compute_layout(100.0, 100.0).is_ok());
        assert!(tree.layout(root).is_none());
    }

    #[test]
    fn test_removed_child_leaves_layout() {
        let mut tree = ViewTree::new();
        let root = tree.add_flexbox();
        let a = tree.add_view();
        let b = tree.add_view();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.engine_mut().set_intrinsic_size(a, 50.0, 50.0);
        tree.engine_mut().set_intrinsic_size(b, 50.0, 50.0);
        tree.set_root(root).unwrap();
        tree.compute_layout(300.0, 100.0).unwrap();
        assert_eq!(tree.layout(b).unwrap().location.x, 50.0);

        tree.remove_child(root, a).unwrap();
        tree.compute_layout(300.0, 100.0).unwrap();
        assert_eq!(tree.layout(b).unwrap().location.x, 0.0);
    }
}
