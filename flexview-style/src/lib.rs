pub mod enums;
pub mod item;
pub mod convert;

pub use enums::{
    AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent, ParseEnumError,
};
pub use item::{
    is_valid_flex_basis, is_valid_flex_grow, is_valid_flex_shrink, FlexBasis, FlexItemStyle,
    FlexboxStyle, DEFAULT_FLEX_GROW, DEFAULT_FLEX_SHRINK, DEFAULT_ORDER,
};
pub use convert::{apply_item_style, taffy_container_style};
