/// Render-subscriber registry.
///
/// External systems (world, held items, debug overlays, ...) participate in
/// rendering by registering a [`RenderSubscriber`]. Nodes ask the registry
/// for the current subscriber list every frame and call the callback that
/// matches their pass.

use std::sync::{Arc, Mutex};
use crate::engine_warn;
use crate::error::Result;
use super::graphics_state::GraphicsState;

const SOURCE: &str = "galaxy3d::Subscribers";

/// Shared handle to a subscriber
pub type SubscriberHandle = Arc<Mutex<dyn RenderSubscriber>>;

/// Per-pass rendering callbacks. Every callback defaults to doing nothing.
pub trait RenderSubscriber: Send {
    fn render_opaque(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        Ok(())
    }

    fn render_alpha_blend(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        Ok(())
    }

    fn render_overlay(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        Ok(())
    }

    /// Objects held in hand (pick, axe, torch, ...)
    fn render_first_person(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        Ok(())
    }

    fn render_shadows(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        Ok(())
    }
}

/// Source of the current subscribers
pub trait SubscriberRegistry: Send + Sync {
    /// Snapshot of the subscribers for this frame.
    ///
    /// Callers must not keep the result across frames.
    ///
    /// # Errors
    ///
    /// Whatever prevents the registry from listing its subscribers. An
    /// empty registry is not an error.
    fn render_subscribers(&self) -> Result<Vec<SubscriberHandle>>;
}

/// Registry backed by a locked list, in registration order
#[derive(Default)]
pub struct SimpleSubscriberRegistry {
    subscribers: Mutex<Vec<SubscriberHandle>>,
}

impl SimpleSubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, subscriber: SubscriberHandle) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(subscriber),
            Err(_) => engine_warn!(SOURCE, "Registry lock poisoned, subscriber not registered"),
        }
    }

    /// Remove a subscriber (compared by identity). Returns false if it was not registered.
    pub fn unregister(&self, subscriber: &SubscriberHandle) -> bool {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            engine_warn!(SOURCE, "Registry lock poisoned, subscriber not unregistered");
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| !Arc::ptr_eq(s, subscriber));
        subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubscriberRegistry for SimpleSubscriberRegistry {
    fn render_subscribers(&self) -> Result<Vec<SubscriberHandle>> {
        self.subscribers
            .lock()
            .map(|s| s.clone())
            .map_err(|_| crate::engine_err!(SOURCE, "Registry lock poisoned"))
    }
}

/// Run `callback` on every subscriber of the registry, in order.
///
/// Stops at the first failure and returns it.
pub fn for_each_subscriber<F>(
    registry: &dyn SubscriberRegistry,
    graphics: &mut dyn GraphicsState,
    mut callback: F,
) -> Result<()>
where
    F: FnMut(&mut dyn RenderSubscriber, &mut dyn GraphicsState) -> Result<()>,
{
    for subscriber in registry.render_subscribers()? {
        let mut guard = subscriber
            .lock()
            .map_err(|_| crate::engine_err!(SOURCE, "Render subscriber lock poisoned"))?;
        callback(&mut *guard, &mut *graphics)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "subscribers_tests.rs"]
mod tests;
