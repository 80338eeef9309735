use std::sync::Arc;
use tokio::sync::broadcast;

use crate::signal::{Signal, SignalId, SubscriptionId};

type Validator<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A named style property: a documented default, an optional validity
/// predicate, and an observable current value.
///
/// Invalid writes are rejected silently at this layer; `set` reports the
/// outcome and the owner decides how to surface a rejection.
pub struct StyleProperty<T> {
    name: &'static str,
    default: T,
    validator: Option<Validator<T>>,
    signal: Signal<T>,
}

impl<T> StyleProperty<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(name: &'static str, default: T) -> Self {
        Self {
            name,
            default: default.clone(),
            validator: None,
            signal: Signal::new(default),
        }
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn get(&self) -> T {
        self.signal.get()
    }

    /// Store a new value, returning whether it was accepted. A value rejected
    /// by the validity predicate leaves the current value untouched.
    pub fn set(&self, value: T) -> bool {
        if let Some(validator) = &self.validator {
            if !validator(&value) {
                return false;
            }
        }
        self.signal.set(value);
        true
    }

    pub fn is_valid(&self, value: &T) -> bool {
        match &self.validator {
            Some(validator) => validator(value),
            None => true,
        }
    }

    /// Restore the documented default.
    pub fn reset(&self) {
        self.signal.set(self.default.clone());
    }

    pub fn is_default(&self) -> bool {
        self.get() == self.default
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.signal.subscribe()
    }

    pub fn subscribe_fn<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.signal.subscribe_fn(callback)
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.signal
    }

    pub fn id(&self) -> SignalId {
        self.signal.id()
    }
}

impl<T> Clone for StyleProperty<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            default: self.default.clone(),
            validator: self.validator.clone(),
            signal: self.signal.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grow_property() -> StyleProperty<f32> {
        StyleProperty::new("flex-grow", 0.0f32).with_validator(|v| v.is_finite() && *v >= 0.0)
    }

    #[test]
    fn test_starts_at_default() {
        let property = grow_property();
        assert_eq!(property.get(), 0.0);
        assert!(property.is_default());
        assert_eq!(property.name(), "flex-grow");
    }

    #[test]
    fn test_set_valid_value() {
        let property = grow_property();
        assert!(property.set(2.5));
        assert_eq!(property.get(), 2.5);
        assert!(!property.is_default());
    }

    #[test]
    fn test_rejects_invalid_and_keeps_value() {
        let property = grow_property();
        assert!(property.set(1.0));

        assert!(!property.set(-3.0));
        assert!(!property.set(f32::NAN));
        assert_eq!(property.get(), 1.0);
    }

    #[test]
    fn test_reset_restores_default() {
        let property = grow_property();
        property.set(4.0);
        property.reset();
        assert_eq!(property.get(), 0.0);
        assert!(property.is_default());
    }

    #[test]
    fn test_property_without_validator_accepts_all() {
        let property = StyleProperty::new("order", 1i32);
        assert!(property.set(-5));
        assert_eq!(property.get(), -5);
    }
}
