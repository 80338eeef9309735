pub mod engine;
pub mod error;
pub mod invalidation;
pub mod taffy_engine;
pub mod view;

pub use engine::FlexEngine;
pub use error::ViewError;
pub use invalidation::{InvalidationKind, InvalidationSystem};
pub use taffy_engine::TaffyFlexEngine;
pub use view::{FlexItemProperties, FlexboxProperties, ViewId, ViewKind, ViewNode, ViewTree};

// Re-export common types from taffy
pub use taffy::{AvailableSpace, Layout, Size};
