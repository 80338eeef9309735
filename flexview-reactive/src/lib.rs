pub mod signal;
pub mod effect;
pub mod property;

pub use signal::{Signal, SignalId, SubscriptionId};
pub use effect::{Effect, EffectId};
pub use property::StyleProperty;
