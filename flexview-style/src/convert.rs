//! Conversions into the taffy style model.
//!
//! `order` and `flex-wrap-before` have no taffy counterpart; engines handle
//! those (child reordering, forced wrap) themselves.

use taffy::{Dimension, Display, Style};

use crate::enums::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};
use crate::item::{FlexBasis, FlexItemStyle, FlexboxStyle};

impl From<FlexDirection> for taffy::FlexDirection {
    fn from(value: FlexDirection) -> Self {
        match value {
            FlexDirection::Row => Self::Row,
            FlexDirection::RowReverse => Self::RowReverse,
            FlexDirection::Column => Self::Column,
            FlexDirection::ColumnReverse => Self::ColumnReverse,
        }
    }
}

impl From<FlexWrap> for taffy::FlexWrap {
    fn from(value: FlexWrap) -> Self {
        match value {
            FlexWrap::Nowrap => Self::NoWrap,
            FlexWrap::Wrap => Self::Wrap,
            FlexWrap::WrapReverse => Self::WrapReverse,
        }
    }
}

impl From<JustifyContent> for taffy::JustifyContent {
    fn from(value: JustifyContent) -> Self {
        match value {
            JustifyContent::FlexStart => Self::FlexStart,
            JustifyContent::FlexEnd => Self::FlexEnd,
            JustifyContent::Center => Self::Center,
            JustifyContent::SpaceBetween => Self::SpaceBetween,
            JustifyContent::SpaceAround => Self::SpaceAround,
        }
    }
}

impl From<AlignItems> for taffy::AlignItems {
    fn from(value: AlignItems) -> Self {
        match value {
            AlignItems::FlexStart => Self::FlexStart,
            AlignItems::FlexEnd => Self::FlexEnd,
            AlignItems::Center => Self::Center,
            AlignItems::Baseline => Self::Baseline,
            AlignItems::Stretch => Self::Stretch,
        }
    }
}

impl From<AlignContent> for taffy::AlignContent {
    fn from(value: AlignContent) -> Self {
        match value {
            AlignContent::FlexStart => Self::FlexStart,
            AlignContent::FlexEnd => Self::FlexEnd,
            AlignContent::Center => Self::Center,
            AlignContent::SpaceBetween => Self::SpaceBetween,
            AlignContent::SpaceAround => Self::SpaceAround,
            AlignContent::Stretch => Self::Stretch,
        }
    }
}

impl From<AlignSelf> for Option<taffy::AlignSelf> {
    fn from(value: AlignSelf) -> Self {
        match value {
            AlignSelf::Auto => None,
            AlignSelf::FlexStart => Some(taffy::AlignSelf::FlexStart),
            AlignSelf::FlexEnd => Some(taffy::AlignSelf::FlexEnd),
            AlignSelf::Center => Some(taffy::AlignSelf::Center),
            AlignSelf::Baseline => Some(taffy::AlignSelf::Baseline),
            AlignSelf::Stretch => Some(taffy::AlignSelf::Stretch),
        }
    }
}

impl From<FlexBasis> for Dimension {
    fn from(value: FlexBasis) -> Self {
        match value {
            FlexBasis::Auto => Dimension::Auto,
            FlexBasis::Length(length) => Dimension::Length(length),
            // Markup percentages are 0..=100, taffy wants a fraction
            FlexBasis::Percent(percent) => Dimension::Percent(percent / 100.0),
        }
    }
}

/// Build the taffy style of a flexbox container node.
pub fn taffy_container_style(style: &FlexboxStyle) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: style.flex_direction.into(),
        flex_wrap: style.flex_wrap.into(),
        justify_content: Some(style.justify_content.into()),
        align_items: Some(style.align_items.into()),
        align_content: Some(style.align_content.into()),
        ..Default::default()
    }
}

/// Merge the child-level properties into an existing taffy style, leaving
/// everything else (size, container fields) untouched.
pub fn apply_item_style(target: &mut Style, item: &FlexItemStyle) {
    target.flex_grow = item.flex_grow;
    target.flex_shrink = item.flex_shrink;
    target.flex_basis = item.flex_basis.into();
    target.align_self = item.align_self.into();
}
