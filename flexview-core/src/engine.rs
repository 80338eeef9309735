use flexview_style::{
    AlignContent, AlignItems, FlexDirection, FlexItemStyle, FlexWrap, FlexboxStyle, JustifyContent,
};

use crate::view::ViewId;

/// Capability interface to a platform layout engine.
///
/// The view tree forwards every accepted property change through this trait:
/// one setter call per container-level change, `update_item` plus one
/// `invalidate` of the parent per child-level change, and structural
/// mirroring for parenting. Implementations own the actual box-model
/// computation.
pub trait FlexEngine {
    /// A view joined the tree. `container` is present for flexbox
    /// containers and carries their initial style.
    fn register_view(&mut self, view: ViewId, container: Option<&FlexboxStyle>);

    fn remove_view(&mut self, view: ViewId);

    fn add_child(&mut self, parent: ViewId, child: ViewId);

    fn remove_child(&mut self, parent: ViewId, child: ViewId);

    fn set_root(&mut self, view: ViewId);

    fn set_flex_direction(&mut self, view: ViewId, value: FlexDirection);

    fn set_flex_wrap(&mut self, view: ViewId, value: FlexWrap);

    fn set_justify_content(&mut self, view: ViewId, value: JustifyContent);

    fn set_align_items(&mut self, view: ViewId, value: AlignItems);

    fn set_align_content(&mut self, view: ViewId, value: AlignContent);

    /// Push a child's complete item style (order, grow, shrink, basis,
    /// wrap-before, align-self).
    fn update_item(&mut self, view: ViewId, item: &FlexItemStyle);

    /// Mark a container as needing re-layout.
    fn invalidate(&mut self, view: ViewId);
}
