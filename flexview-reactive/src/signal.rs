use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

pub type SignalId = usize;

/// Identifies one `subscribe_fn` registration on a signal, for later
/// removal via `unsubscribe`.
pub type SubscriptionId = usize;

static NEXT_SIGNAL_ID: AtomicUsize = AtomicUsize::new(0);

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// An observable value: reads return a clone of the current value, writes
/// notify every registered callback and every broadcast receiver.
pub struct Signal<T> {
    id: SignalId,
    value: Arc<RwLock<T>>,
    sender: broadcast::Sender<T>,
    subscribers: Arc<RwLock<Vec<(SubscriptionId, Subscriber<T>)>>>,
    next_subscription: Arc<AtomicUsize>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = broadcast::channel(1024);

        Self {
            id: NEXT_SIGNAL_ID.fetch_add(1, Ordering::Relaxed),
            value: Arc::new(RwLock::new(value)),
            sender,
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_subscription: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().unwrap().clone()
    }

    pub fn set(&self, value: T) {
        {
            let mut current = self.value.write().unwrap();
            *current = value.clone();
        }
        self.notify(&value);
    }

    /// Mutate the current value in place, then notify subscribers once.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        let value = {
            let mut current = self.value.write().unwrap();
            updater(&mut current);
            current.clone()
        };
        self.notify(&value);
    }

    /// Subscribe as a channel; receivers that lag past the channel capacity
    /// miss intermediate values.
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Register a callback invoked on every change, and immediately with the
    /// current value. The returned id removes the registration again via
    /// `unsubscribe`.
    pub fn subscribe_fn<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Subscriber<T> = Arc::new(callback);
        let subscription = self.next_subscription.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.push((subscription, callback.clone()));
        }

        let current = self.get();
        callback(&current);
        subscription
    }

    /// Remove a callback registered with `subscribe_fn`. Unknown ids are
    /// ignored.
    pub fn unsubscribe(&self, subscription: SubscriptionId) {
        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.retain(|(id, _)| *id != subscription);
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    fn notify(&self, value: &T) {
        // No receivers is not an error
        let _ = self.sender.send(value.clone());

        if let Ok(subscribers) = self.subscribers.read() {
            for (_, subscriber) in subscribers.iter() {
                subscriber(value);
            }
        }
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: self.value.clone(),
            sender: self.sender.clone(),
            subscribers: self.subscribers.clone(),
            next_subscription: self.next_subscription.clone(),
        }
    }
}
