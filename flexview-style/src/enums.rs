//! Flexbox enum properties: value sets, defaults, and markup parsing.
//!
//! Markup binding is deliberately forgiving: `parse_or_default` folds case
//! and falls back to the documented default on any unrecognized token.
//! `FromStr` is the strict variant for callers that want to see the failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{token}` is not a valid value for `{property}`")]
pub struct ParseEnumError {
    pub property: &'static str,
    pub token: String,
}

macro_rules! markup_tokens {
    ($ty:ident, $property:literal, { $($token:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Markup tokens accepted for this property.
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            /// Case-insensitive parse falling back to the default on any
            /// unrecognized token.
            pub fn parse_or_default(token: &str) -> Self {
                token.parse().unwrap_or_default()
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(token: &str) -> Result<Self, Self::Err> {
                match token.trim().to_ascii_lowercase().as_str() {
                    $($token => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        property: $property,
                        token: token.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let token = match self {
                    $(Self::$variant => $token,)+
                };
                f.write_str(token)
            }
        }
    };
}

/// Main-axis direction of a flexbox container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

markup_tokens!(FlexDirection, "flex-direction", {
    "row" => Row,
    "row-reverse" => RowReverse,
    "column" => Column,
    "column-reverse" => ColumnReverse,
});

impl FlexDirection {
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    pub fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    pub fn is_column(self) -> bool {
        !self.is_row()
    }
}

/// Whether children wrap onto additional cross-axis lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexWrap {
    #[default]
    Nowrap,
    Wrap,
    WrapReverse,
}

markup_tokens!(FlexWrap, "flex-wrap", {
    "nowrap" => Nowrap,
    "wrap" => Wrap,
    "wrap-reverse" => WrapReverse,
});

/// Distribution of free space along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

markup_tokens!(JustifyContent, "justify-content", {
    "flex-start" => FlexStart,
    "flex-end" => FlexEnd,
    "center" => Center,
    "space-between" => SpaceBetween,
    "space-around" => SpaceAround,
});

/// Cross-axis alignment of children within their line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    #[default]
    Stretch,
}

markup_tokens!(AlignItems, "align-items", {
    "flex-start" => FlexStart,
    "flex-end" => FlexEnd,
    "center" => Center,
    "baseline" => Baseline,
    "stretch" => Stretch,
});

/// Distribution of cross-axis lines when the container wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    #[default]
    Stretch,
}

markup_tokens!(AlignContent, "align-content", {
    "flex-start" => FlexStart,
    "flex-end" => FlexEnd,
    "center" => Center,
    "space-between" => SpaceBetween,
    "space-around" => SpaceAround,
    "stretch" => Stretch,
});

/// Per-child override of the container's `align-items`. `Auto` defers to the
/// container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    #[default]
    Auto,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

markup_tokens!(AlignSelf, "align-self", {
    "auto" => Auto,
    "flex-start" => FlexStart,
    "flex-end" => FlexEnd,
    "center" => Center,
    "baseline" => Baseline,
    "stretch" => Stretch,
});

impl From<AlignItems> for AlignSelf {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        assert_eq!(FlexDirection::default(), FlexDirection::Row);
        assert_eq!(FlexWrap::default(), FlexWrap::Nowrap);
        assert_eq!(JustifyContent::default(), JustifyContent::FlexStart);
        assert_eq!(AlignItems::default(), AlignItems::Stretch);
        assert_eq!(AlignContent::default(), AlignContent::Stretch);
        assert_eq!(AlignSelf::default(), AlignSelf::Auto);
    }

    #[test]
    fn test_invalid_tokens_fall_back_to_default() {
        for bad in ["", "bogus", "row ward", "flexstart", "42"] {
            assert_eq!(FlexDirection::parse_or_default(bad), FlexDirection::Row);
            assert_eq!(FlexWrap::parse_or_default(bad), FlexWrap::Nowrap);
            assert_eq!(
                JustifyContent::parse_or_default(bad),
                JustifyContent::FlexStart
            );
            assert_eq!(AlignItems::parse_or_default(bad), AlignItems::Stretch);
            assert_eq!(AlignContent::parse_or_default(bad), AlignContent::Stretch);
            assert_eq!(AlignSelf::parse_or_default(bad), AlignSelf::Auto);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            FlexDirection::parse_or_default("ROW-Reverse"),
            FlexDirection::RowReverse
        );
        assert_eq!(FlexWrap::parse_or_default("WRAP"), FlexWrap::Wrap);
        assert_eq!(
            JustifyContent::parse_or_default("Space-Between"),
            JustifyContent::SpaceBetween
        );
        assert_eq!(AlignItems::parse_or_default("BaseLine"), AlignItems::Baseline);
        assert_eq!(AlignSelf::parse_or_default("AUTO"), AlignSelf::Auto);
    }

    #[test]
    fn test_every_token_round_trips_through_display() {
        for &token in FlexDirection::TOKENS {
            let value = FlexDirection::parse_or_default(token);
            assert_eq!(value.to_string(), token);
        }
        for &token in JustifyContent::TOKENS {
            let value = JustifyContent::parse_or_default(token);
            assert_eq!(value.to_string(), token);
        }
        for &token in AlignContent::TOKENS {
            let value = AlignContent::parse_or_default(token);
            assert_eq!(value.to_string(), token);
        }
    }

    #[test]
    fn test_strict_parse_reports_property_and_token() {
        let err = "diagonal".parse::<FlexDirection>().unwrap_err();
        assert_eq!(err.property, "flex-direction");
        assert_eq!(err.token, "diagonal");
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&FlexDirection::RowReverse).unwrap();
        assert_eq!(json, "\"row-reverse\"");

        let parsed: AlignContent = serde_json::from_str("\"space-around\"").unwrap();
        assert_eq!(parsed, AlignContent::SpaceAround);
    }

    #[test]
    fn test_align_self_from_align_items() {
        assert_eq!(AlignSelf::from(AlignItems::Center), AlignSelf::Center);
        assert_eq!(AlignSelf::from(AlignItems::Stretch), AlignSelf::Stretch);
    }

    #[test]
    fn test_direction_axis_helpers() {
        assert!(FlexDirection::Row.is_row());
        assert!(FlexDirection::RowReverse.is_reverse());
        assert!(FlexDirection::ColumnReverse.is_column());
        assert!(!FlexDirection::Column.is_reverse());
    }
}
