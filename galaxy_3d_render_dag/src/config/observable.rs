/// Observable boolean settings.
///
/// A setting is shared between the thread that edits configuration (UI,
/// input, console) and the render thread. Listeners run synchronously on
/// the mutating thread, under the setting's lock, and only when the value
/// actually changes.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Change listener: receives `(old, new)`
type Listener = Box<dyn Fn(bool, bool) + Send + Sync>;

struct Inner {
    value: bool,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// A named boolean configuration leaf with change notification.
///
/// Listeners must not call back into the same setting: they run while the
/// setting is locked. In this crate they only push commands onto a graph
/// queue.
pub struct ObservableBool {
    path: String,
    inner: Mutex<Inner>,
}

impl ObservableBool {
    /// Create a setting identified by its dotted path (e.g. "rendering.debug.wireframe")
    pub fn new(path: &str, initial: bool) -> Arc<Self> {
        Arc::new(Self {
            path: path.to_string(),
            inner: Mutex::new(Inner {
                value: initial,
                next_id: 0,
                listeners: Vec::new(),
            }),
        })
    }

    // A listener that panicked poisons the lock; the value itself is still valid.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Dotted path of this setting
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current value
    pub fn get(&self) -> bool {
        self.lock().value
    }

    /// Set the value, notifying listeners if it changed.
    ///
    /// Returns true if the value changed.
    pub fn set(&self, value: bool) -> bool {
        let mut inner = self.lock();
        let old = inner.value;
        if old == value {
            return false;
        }
        inner.value = value;
        for (_, listener) in &inner.listeners {
            listener(old, value);
        }
        true
    }

    /// Flip the value and return the new one
    pub fn toggle(&self) -> bool {
        let mut inner = self.lock();
        let old = inner.value;
        inner.value = !old;
        for (_, listener) in &inner.listeners {
            listener(old, !old);
        }
        !old
    }

    /// Register a change listener.
    ///
    /// Returns the subscription guard together with the value observed at
    /// registration time. Both are taken under the same lock, so no change
    /// can slip between reading the initial value and the first
    /// notification.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> (Subscription, bool)
    where
        F: Fn(bool, bool) + Send + Sync + 'static,
    {
        let mut current = false;
        let subscription = self.subscribe_with_initial(|value| current = value, listener);
        (subscription, current)
    }

    /// Register a change listener, handing the current value to `init`
    /// while the setting is still locked.
    ///
    /// `init` runs before `listener` can observe any change.
    pub fn subscribe_with_initial<I, F>(self: &Arc<Self>, init: I, listener: F) -> Subscription
    where
        I: FnOnce(bool),
        F: Fn(bool, bool) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        init(inner.value);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));

        Subscription {
            setting: Arc::downgrade(self),
            id,
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn unsubscribe(&self, id: u64) {
        self.lock().listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

impl std::fmt::Debug for ObservableBool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ObservableBool")
            .field("path", &self.path)
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Live listener registration. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    setting: Weak<ObservableBool>,
    id: u64,
}

impl Subscription {
    /// Path of the observed setting, if it is still alive
    pub fn path(&self) -> Option<String> {
        self.setting.upgrade().map(|s| s.path().to_string())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(setting) = self.setting.upgrade() {
            setting.unsubscribe(self.id);
        }
    }
}
