use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::property::StyleProperty;
use crate::signal::{Signal, SignalId, SubscriptionId};

pub type EffectId = usize;

static NEXT_EFFECT_ID: AtomicUsize = AtomicUsize::new(0);

type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

/// Watches a signal or style property: the callback runs immediately with
/// the current value and again on every change. Disposing (or dropping) the
/// effect unregisters the subscription, so the callback stops firing, then
/// runs the cleanup if one was attached.
pub struct Effect {
    id: EffectId,
    dependency: SignalId,
    unsubscribe: Option<Unsubscribe>,
    cleanup: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Effect {
    pub fn from_signal<F, T>(signal: &Signal<T>, effect_fn: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        let subscription: SubscriptionId = signal.subscribe_fn(effect_fn);
        let source = signal.clone();

        Self {
            id: NEXT_EFFECT_ID.fetch_add(1, Ordering::Relaxed),
            dependency: signal.id(),
            unsubscribe: Some(Box::new(move || source.unsubscribe(subscription))),
            cleanup: None,
        }
    }

    /// Watch a style property, e.g. to forward accepted changes to a
    /// platform setter. Rejected writes never notify, so the callback only
    /// sees valid values.
    pub fn from_property<F, T>(property: &StyleProperty<T>, effect_fn: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        Self::from_signal(property.signal(), effect_fn)
    }

    pub fn with_cleanup<C>(mut self, cleanup_fn: C) -> Self
    where
        C: Fn() + Send + Sync + 'static,
    {
        self.cleanup = Some(Arc::new(cleanup_fn));
        self
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn dependency(&self) -> SignalId {
        self.dependency
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        self.release();
    }
}
