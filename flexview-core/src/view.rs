use std::collections::HashMap;

use tracing::debug;

use flexview_reactive::StyleProperty;
use flexview_style::{
    is_valid_flex_basis, is_valid_flex_grow, is_valid_flex_shrink, AlignContent, AlignItems,
    AlignSelf, FlexBasis, FlexDirection, FlexItemStyle, FlexWrap, FlexboxStyle, JustifyContent,
    DEFAULT_FLEX_GROW, DEFAULT_FLEX_SHRINK, DEFAULT_ORDER,
};

use crate::engine::FlexEngine;
use crate::error::ViewError;
use crate::invalidation::{InvalidationKind, InvalidationSystem};
use crate::taffy_engine::TaffyFlexEngine;

pub type ViewId = u64;

/// Container-level properties of a flexbox view.
pub struct FlexboxProperties {
    pub flex_direction: StyleProperty<FlexDirection>,
    pub flex_wrap: StyleProperty<FlexWrap>,
    pub justify_content: StyleProperty<JustifyContent>,
    pub align_items: StyleProperty<AlignItems>,
    pub align_content: StyleProperty<AlignContent>,
}

impl FlexboxProperties {
    fn new() -> Self {
        Self {
            flex_direction: StyleProperty::new("flex-direction", FlexDirection::default()),
            flex_wrap: StyleProperty::new("flex-wrap", FlexWrap::default()),
            justify_content: StyleProperty::new("justify-content", JustifyContent::default()),
            align_items: StyleProperty::new("align-items", AlignItems::default()),
            align_content: StyleProperty::new("align-content", AlignContent::default()),
        }
    }

    pub fn snapshot(&self) -> FlexboxStyle {
        FlexboxStyle {
            flex_direction: self.flex_direction.get(),
            flex_wrap: self.flex_wrap.get(),
            justify_content: self.justify_content.get(),
            align_items: self.align_items.get(),
            align_content: self.align_content.get(),
        }
    }
}

/// Child-level properties; every view carries them, they only affect layout
/// once the view is parented to a flexbox container.
pub struct FlexItemProperties {
    pub order: StyleProperty<i32>,
    pub flex_grow: StyleProperty<f32>,
    pub flex_shrink: StyleProperty<f32>,
    pub flex_wrap_before: StyleProperty<bool>,
    pub flex_basis: StyleProperty<FlexBasis>,
    pub align_self: StyleProperty<AlignSelf>,
}

impl FlexItemProperties {
    fn new() -> Self {
        Self {
            order: StyleProperty::new("order", DEFAULT_ORDER),
            flex_grow: StyleProperty::new("flex-grow", DEFAULT_FLEX_GROW)
                .with_validator(|value| is_valid_flex_grow(*value)),
            flex_shrink: StyleProperty::new("flex-shrink", DEFAULT_FLEX_SHRINK)
                .with_validator(|value| is_valid_flex_shrink(*value)),
            flex_wrap_before: StyleProperty::new("flex-wrap-before", false),
            flex_basis: StyleProperty::new("flex-basis", FlexBasis::Auto)
                .with_validator(|value| is_valid_flex_basis(*value)),
            align_self: StyleProperty::new("align-self", AlignSelf::default()),
        }
    }

    pub fn snapshot(&self) -> FlexItemStyle {
        FlexItemStyle {
            order: self.order.get(),
            flex_grow: self.flex_grow.get(),
            flex_shrink: self.flex_shrink.get(),
            flex_wrap_before: self.flex_wrap_before.get(),
            flex_basis: self.flex_basis.get(),
            align_self: self.align_self.get(),
        }
    }
}

pub enum ViewKind {
    Flexbox(FlexboxProperties),
    Plain,
}

impl ViewKind {
    pub fn is_flexbox(&self) -> bool {
        matches!(self, Self::Flexbox(_))
    }
}

pub struct ViewNode {
    id: ViewId,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    kind: ViewKind,
    item: FlexItemProperties,
}

impl ViewNode {
    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }
}

/// The view tree: nodes with parent/child links, typed flexbox property
/// accessors, and change propagation into a layout engine.
pub struct ViewTree<E: FlexEngine = TaffyFlexEngine> {
    views: HashMap<ViewId, ViewNode>,
    root: Option<ViewId>,
    next_id: ViewId,
    engine: E,
    invalidation: InvalidationSystem,
}

impl ViewTree<TaffyFlexEngine> {
    pub fn new() -> Self {
        Self::with_engine(TaffyFlexEngine::new())
    }

    /// Drain pending invalidations (parents first) and recompute layout for
    /// the given viewport.
    pub fn compute_layout(&mut self, width: f32, height: f32) -> Result<(), taffy::TaffyError> {
        let dirty = self.drain_dirty();
        debug!(dirty = dirty.len(), "computing layout");
        self.engine.compute_layout(taffy::Size {
            width: taffy::AvailableSpace::Definite(width),
            height: taffy::AvailableSpace::Definite(height),
        })
    }

    pub fn layout(&self, view: ViewId) -> Option<taffy::Layout> {
        self.engine.layout(view).copied()
    }
}

impl Default for ViewTree<TaffyFlexEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FlexEngine> ViewTree<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            views: HashMap::new(),
            root: None,
            next_id: 1,
            engine,
            invalidation: InvalidationSystem::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Create a flexbox container view.
    pub fn add_flexbox(&mut self) -> ViewId {
        self.insert(ViewKind::Flexbox(FlexboxProperties::new()))
    }

    /// Create a plain (non-flexbox) view.
    pub fn add_view(&mut self) -> ViewId {
        self.insert(ViewKind::Plain)
    }

    fn insert(&mut self, kind: ViewKind) -> ViewId {
        let id = self.next_id;
        self.next_id += 1;

        let container = match &kind {
            ViewKind::Flexbox(props) => Some(props.snapshot()),
            ViewKind::Plain => None,
        };
        self.engine.register_view(id, container.as_ref());

        self.views.insert(
            id,
            ViewNode {
                id,
                parent: None,
                children: Vec::new(),
                kind,
                item: FlexItemProperties::new(),
            },
        );
        id
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains_key(&view)
    }

    pub fn set_root(&mut self, view: ViewId) -> Result<(), ViewError> {
        self.node(view)?;
        self.root = Some(view);
        self.engine.set_root(view);
        Ok(())
    }

    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    pub fn parent(&self, view: ViewId) -> Result<Option<ViewId>, ViewError> {
        Ok(self.node(view)?.parent)
    }

    pub fn children(&self, view: ViewId) -> Result<&[ViewId], ViewError> {
        Ok(&self.node(view)?.children)
    }

    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<(), ViewError> {
        self.node(parent)?;
        let previous_parent = self.node(child)?.parent;

        // The parent chain must stay acyclic; the depth walk and engine
        // child syncing both rely on it
        if self.is_ancestor(child, parent) {
            return Err(ViewError::Cycle { parent, child });
        }

        if let Some(previous) = previous_parent {
            self.detach(previous, child);
        }

        if let Some(parent_node) = self.views.get_mut(&parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.views.get_mut(&child) {
            child_node.parent = Some(parent);
        }

        self.engine.add_child(parent, child);
        // Carry any item values set before parenting
        let item = self.node(child)?.item.snapshot();
        self.engine.update_item(child, &item);

        self.invalidation.mark(parent, InvalidationKind::Children);
        self.engine.invalidate(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> Result<(), ViewError> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Ok(());
        }

        self.detach(parent, child);
        self.invalidation.mark(parent, InvalidationKind::Children);
        self.engine.invalidate(parent);
        Ok(())
    }

    /// Whether `ancestor` is `view` itself or appears on its parent chain.
    fn is_ancestor(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.views.get(&id).and_then(|node| node.parent);
        }
        false
    }

    fn detach(&mut self, parent: ViewId, child: ViewId) {
        if let Some(parent_node) = self.views.get_mut(&parent) {
            parent_node.children.retain(|&id| id != child);
        }
        if let Some(child_node) = self.views.get_mut(&child) {
            child_node.parent = None;
        }
        self.engine.remove_child(parent, child);
    }

    /// Remove a view and its entire subtree.
    pub fn remove_view(&mut self, view: ViewId) -> Result<(), ViewError> {
        let parent = self.node(view)?.parent;
        if let Some(parent) = parent {
            self.detach(parent, view);
            self.invalidation.mark(parent, InvalidationKind::Children);
            self.engine.invalidate(parent);
        }

        // Collect the subtree before mutating
        let mut pending = vec![view];
        let mut subtree = Vec::new();
        while let Some(current) = pending.pop() {
            if let Some(node) = self.views.get(&current) {
                pending.extend(node.children.iter().copied());
            }
            subtree.push(current);
        }

        for id in subtree {
            self.views.remove(&id);
            self.engine.remove_view(id);
            self.invalidation.remove_view(id);
            if self.root == Some(id) {
                self.root = None;
            }
        }
        Ok(())
    }

    fn node(&self, view: ViewId) -> Result<&ViewNode, ViewError> {
        self.views.get(&view).ok_or(ViewError::ViewNotFound(view))
    }

    /// Container-level properties of a flexbox view, for reads and change
    /// subscriptions. Writes should go through the typed setters so the
    /// engine is kept in sync.
    pub fn flexbox_props(&self, view: ViewId) -> Result<&FlexboxProperties, ViewError> {
        match &self.node(view)?.kind {
            ViewKind::Flexbox(props) => Ok(props),
            ViewKind::Plain => Err(ViewError::NotAFlexbox(view)),
        }
    }

    pub fn item_props(&self, view: ViewId) -> Result<&FlexItemProperties, ViewError> {
        Ok(&self.node(view)?.item)
    }

    pub fn container_style(&self, view: ViewId) -> Result<FlexboxStyle, ViewError> {
        Ok(self.flexbox_props(view)?.snapshot())
    }

    pub fn item_style(&self, view: ViewId) -> Result<FlexItemStyle, ViewError> {
        Ok(self.node(view)?.item.snapshot())
    }

    // ----- container-level accessors -----

    pub fn flex_direction(&self, view: ViewId) -> Result<FlexDirection, ViewError> {
        Ok(self.flexbox_props(view)?.flex_direction.get())
    }

    pub fn set_flex_direction(
        &mut self,
        view: ViewId,
        value: FlexDirection,
    ) -> Result<(), ViewError> {
        self.flexbox_props(view)?.flex_direction.set(value);
        self.engine.set_flex_direction(view, value);
        self.invalidation.mark(view, InvalidationKind::Style);
        Ok(())
    }

    pub fn flex_wrap(&self, view: ViewId) -> Result<FlexWrap, ViewError> {
        Ok(self.flexbox_props(view)?.flex_wrap.get())
    }

    pub fn set_flex_wrap(&mut self, view: ViewId, value: FlexWrap) -> Result<(), ViewError> {
        self.flexbox_props(view)?.flex_wrap.set(value);
        self.engine.set_flex_wrap(view, value);
        self.invalidation.mark(view, InvalidationKind::Style);
        Ok(())
    }

    pub fn justify_content(&self, view: ViewId) -> Result<JustifyContent, ViewError> {
        Ok(self.flexbox_props(view)?.justify_content.get())
    }

    pub fn set_justify_content(
        &mut self,
        view: ViewId,
        value: JustifyContent,
    ) -> Result<(), ViewError> {
        self.flexbox_props(view)?.justify_content.set(value);
        self.engine.set_justify_content(view, value);
        self.invalidation.mark(view, InvalidationKind::Style);
        Ok(())
    }

    pub fn align_items(&self, view: ViewId) -> Result<AlignItems, ViewError> {
        Ok(self.flexbox_props(view)?.align_items.get())
    }

    pub fn set_align_items(&mut self, view: ViewId, value: AlignItems) -> Result<(), ViewError> {
        self.flexbox_props(view)?.align_items.set(value);
        self.engine.set_align_items(view, value);
        self.invalidation.mark(view, InvalidationKind::Style);
        Ok(())
    }

    pub fn align_content(&self, view: ViewId) -> Result<AlignContent, ViewError> {
        Ok(self.flexbox_props(view)?.align_content.get())
    }

    pub fn set_align_content(
        &mut self,
        view: ViewId,
        value: AlignContent,
    ) -> Result<(), ViewError> {
        self.flexbox_props(view)?.align_content.set(value);
        self.engine.set_align_content(view, value);
        self.invalidation.mark(view, InvalidationKind::Style);
        Ok(())
    }

    // ----- child-level accessors -----

    pub fn order(&self, view: ViewId) -> Result<i32, ViewError> {
        Ok(self.node(view)?.item.order.get())
    }

    pub fn set_order(&mut self, view: ViewId, value: i32) -> Result<(), ViewError> {
        self.set_child_property(view, "order", value.to_string(), |item| {
            item.order.set(value)
        })
    }

    pub fn flex_grow(&self, view: ViewId) -> Result<f32, ViewError> {
        Ok(self.node(view)?.item.flex_grow.get())
    }

    pub fn set_flex_grow(&mut self, view: ViewId, value: f32) -> Result<(), ViewError> {
        self.set_child_property(view, "flex-grow", value.to_string(), |item| {
            item.flex_grow.set(value)
        })
    }

    pub fn flex_shrink(&self, view: ViewId) -> Result<f32, ViewError> {
        Ok(self.node(view)?.item.flex_shrink.get())
    }

    pub fn set_flex_shrink(&mut self, view: ViewId, value: f32) -> Result<(), ViewError> {
        self.set_child_property(view, "flex-shrink", value.to_string(), |item| {
            item.flex_shrink.set(value)
        })
    }

    pub fn flex_wrap_before(&self, view: ViewId) -> Result<bool, ViewError> {
        Ok(self.node(view)?.item.flex_wrap_before.get())
    }

    pub fn set_flex_wrap_before(&mut self, view: ViewId, value: bool) -> Result<(), ViewError> {
        self.set_child_property(view, "flex-wrap-before", value.to_string(), |item| {
            item.flex_wrap_before.set(value)
        })
    }

    pub fn flex_basis(&self, view: ViewId) -> Result<FlexBasis, ViewError> {
        Ok(self.node(view)?.item.flex_basis.get())
    }

    pub fn set_flex_basis(&mut self, view: ViewId, value: FlexBasis) -> Result<(), ViewError> {
        self.set_child_property(view, "flex-basis", format!("{value:?}"), |item| {
            item.flex_basis.set(value)
        })
    }

    pub fn align_self(&self, view: ViewId) -> Result<AlignSelf, ViewError> {
        Ok(self.node(view)?.item.align_self.get())
    }

    pub fn set_align_self(&mut self, view: ViewId, value: AlignSelf) -> Result<(), ViewError> {
        self.set_child_property(view, "align-self", value.to_string(), |item| {
            item.align_self.set(value)
        })
    }

    /// Shared path for child-level writes: store the value, then propagate
    /// to the engine and invalidate the parent once iff the parent is a
    /// flexbox container.
    fn set_child_property<F>(
        &mut self,
        view: ViewId,
        property: &'static str,
        rendered: String,
        apply: F,
    ) -> Result<(), ViewError>
    where
        F: FnOnce(&FlexItemProperties) -> bool,
    {
        let (accepted, parent, item) = {
            let node = self.node(view)?;
            (apply(&node.item), node.parent, node.item.snapshot())
        };

        if !accepted {
            return Err(ViewError::InvalidValue {
                property,
                value: rendered,
            });
        }

        if let Some(parent_id) = parent {
            let parent_is_flexbox = self
                .views
                .get(&parent_id)
                .map(|node| node.kind.is_flexbox())
                .unwrap_or(false);

            if parent_is_flexbox {
                self.engine.update_item(view, &item);
                self.engine.invalidate(parent_id);
                self.invalidation.mark(parent_id, InvalidationKind::Item);
                debug!(view, parent = parent_id, property, "child flex property changed");
            }
        }
        Ok(())
    }

    // ----- markup binding -----

    /// Apply one kebab-case name/value pair from markup. Enum values parse
    /// with fallback-to-default; numeric values failing validation are
    /// rejected.
    pub fn set_property_str(
        &mut self,
        view: ViewId,
        name: &str,
        value: &str,
    ) -> Result<(), ViewError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "flex-direction" => {
                self.set_flex_direction(view, FlexDirection::parse_or_default(value))
            }
            "flex-wrap" => self.set_flex_wrap(view, FlexWrap::parse_or_default(value)),
            "justify-content" => {
                self.set_justify_content(view, JustifyContent::parse_or_default(value))
            }
            "align-items" => self.set_align_items(view, AlignItems::parse_or_default(value)),
            "align-content" => self.set_align_content(view, AlignContent::parse_or_default(value)),
            "order" => {
                let order = value.trim().parse::<i32>().map_err(|_| {
                    ViewError::InvalidValue {
                        property: "order",
                        value: value.to_string(),
                    }
                })?;
                self.set_order(view, order)
            }
            "flex-grow" => {
                let grow = value.trim().parse::<f32>().map_err(|_| {
                    ViewError::InvalidValue {
                        property: "flex-grow",
                        value: value.to_string(),
                    }
                })?;
                self.set_flex_grow(view, grow)
            }
            "flex-shrink" => {
                let shrink = value.trim().parse::<f32>().map_err(|_| {
                    ViewError::InvalidValue {
                        property: "flex-shrink",
                        value: value.to_string(),
                    }
                })?;
                self.set_flex_shrink(view, shrink)
            }
            "flex-wrap-before" => match value.trim().to_ascii_lowercase().as_str() {
                "true" => self.set_flex_wrap_before(view, true),
                "false" => self.set_flex_wrap_before(view, false),
                _ => Err(ViewError::InvalidValue {
                    property: "flex-wrap-before",
                    value: value.to_string(),
                }),
            },
            "flex-basis" => {
                let basis = FlexBasis::parse(value).ok_or_else(|| ViewError::InvalidValue {
                    property: "flex-basis",
                    value: value.to_string(),
                })?;
                self.set_flex_basis(view, basis)
            }
            "align-self" => self.set_align_self(view, AlignSelf::parse_or_default(value)),
            _ => Err(ViewError::UnknownProperty(name.to_string())),
        }
    }

    // ----- invalidation -----

    pub fn needs_layout(&self) -> bool {
        self.invalidation.has_pending()
    }

    pub fn is_dirty(&self, view: ViewId) -> bool {
        self.invalidation.is_dirty(view)
    }

    /// Drain dirty views, parents first.
    pub fn drain_dirty(&mut self) -> Vec<ViewId> {
        let views = &self.views;
        self.invalidation.drain_ordered(|view| {
            let mut depth = 0;
            let mut current = view;
            while let Some(parent) = views.get(&current).and_then(|node| node.parent) {
                depth += 1;
                current = parent;
            }
            depth
        })
    }
}
