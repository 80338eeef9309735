use thiserror::Error;

use crate::view::ViewId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("view {0} does not exist")]
    ViewNotFound(ViewId),

    #[error("view {0} is not a flexbox container")]
    NotAFlexbox(ViewId),

    #[error("invalid value `{value}` for property `{property}`")]
    InvalidValue {
        property: &'static str,
        value: String,
    },

    #[error("unknown style property `{0}`")]
    UnknownProperty(String),

    #[error("parenting view {child} under view {parent} would create a cycle")]
    Cycle { parent: ViewId, child: ViewId },
}
