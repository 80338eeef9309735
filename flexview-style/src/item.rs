//! Scalar per-child properties, their validity predicates, and the plain
//! style snapshots exchanged with layout engines.

use serde::{Deserialize, Serialize};

use crate::enums::{
    AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent,
};

pub const DEFAULT_ORDER: i32 = 1;
pub const DEFAULT_FLEX_GROW: f32 = 0.0;
pub const DEFAULT_FLEX_SHRINK: f32 = 1.0;

/// Main-size basis of a child before free space is distributed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexBasis {
    #[default]
    Auto,
    Length(f32),
    Percent(f32),
}

impl FlexBasis {
    /// Parse a markup value: `auto`, a non-negative number, or a
    /// non-negative percentage such as `50%`. Returns `None` for anything
    /// else; numeric basis values do not fall back.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }

        let (number, percent) = match token.strip_suffix('%') {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        let value: f32 = number.trim().parse().ok()?;
        let basis = if percent {
            Self::Percent(value)
        } else {
            Self::Length(value)
        };
        is_valid_flex_basis(basis).then_some(basis)
    }
}

pub fn is_valid_flex_grow(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

pub fn is_valid_flex_shrink(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

pub fn is_valid_flex_basis(basis: FlexBasis) -> bool {
    match basis {
        FlexBasis::Auto => true,
        FlexBasis::Length(value) | FlexBasis::Percent(value) => {
            value.is_finite() && value >= 0.0
        }
    }
}

/// Container-level flexbox style snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FlexboxStyle {
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
}

impl FlexboxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one kebab-case markup assignment. Enum values parse with
    /// fallback-to-default. Returns whether the property name was
    /// recognized.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        match name.trim().to_ascii_lowercase().as_str() {
            "flex-direction" => self.flex_direction = FlexDirection::parse_or_default(value),
            "flex-wrap" => self.flex_wrap = FlexWrap::parse_or_default(value),
            "justify-content" => self.justify_content = JustifyContent::parse_or_default(value),
            "align-items" => self.align_items = AlignItems::parse_or_default(value),
            "align-content" => self.align_content = AlignContent::parse_or_default(value),
            _ => return false,
        }
        true
    }
}

/// Child-level flexbox style snapshot, settable on any view whose parent is
/// a flexbox container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FlexItemStyle {
    pub order: i32,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_wrap_before: bool,
    pub flex_basis: FlexBasis,
    pub align_self: AlignSelf,
}

impl Default for FlexItemStyle {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            flex_grow: DEFAULT_FLEX_GROW,
            flex_shrink: DEFAULT_FLEX_SHRINK,
            flex_wrap_before: false,
            flex_basis: FlexBasis::Auto,
            align_self: AlignSelf::Auto,
        }
    }
}

impl FlexItemStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one kebab-case markup assignment. Numeric values failing their
    /// validity predicate are rejected and leave the style untouched; the
    /// `align-self` enum parses with fallback-to-default. Returns whether
    /// the assignment was applied.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "order" => match value.parse::<i32>() {
                Ok(order) => self.order = order,
                Err(_) => return false,
            },
            "flex-grow" => match value.parse::<f32>() {
                Ok(grow) if is_valid_flex_grow(grow) => self.flex_grow = grow,
                _ => return false,
            },
            "flex-shrink" => match value.parse::<f32>() {
                Ok(shrink) if is_valid_flex_shrink(shrink) => self.flex_shrink = shrink,
                _ => return false,
            },
            "flex-wrap-before" => match value.to_ascii_lowercase().as_str() {
                "true" => self.flex_wrap_before = true,
                "false" => self.flex_wrap_before = false,
                _ => return false,
            },
            "flex-basis" => match FlexBasis::parse(value) {
                Some(basis) => self.flex_basis = basis,
                None => return false,
            },
            "align-self" => self.align_self = AlignSelf::parse_or_default(value),
            _ => return false,
        }
        true
    }
}
