/// Configuration-to-capability bindings.
///
/// A trigger watches one boolean setting and keeps one node capability in
/// step with it. The initial value is applied directly to the node's
/// desired set when the trigger is bound; every later transition is queued
/// as a [`GraphCommand`] for the render thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use crate::config::{ObservableBool, Subscription};
use crate::engine_debug;
use super::command::{GraphCommand, GraphCommandSender};
use super::node::{Capability, NodeKey};
use super::state_change::DesiredStateChanges;

/// Binding between one setting and one node capability.
///
/// Fires exactly once per observed transition of the setting. Dropping the
/// trigger unsubscribes from the setting.
pub struct Trigger {
    node: NodeKey,
    capability: Capability,
    path: String,
    last: Arc<AtomicBool>,
    fired: Arc<AtomicU64>,
    _subscription: Subscription,
}

impl Trigger {
    /// Subscribe to `setting` and synchronise `desired` with its current value
    pub(crate) fn bind(
        setting: &Arc<ObservableBool>,
        node: NodeKey,
        capability: Capability,
        desired: &mut DesiredStateChanges,
        commands: GraphCommandSender,
    ) -> Self {
        let last = Arc::new(AtomicBool::new(false));
        let fired = Arc::new(AtomicU64::new(0));
        let path = setting.path().to_string();

        let listener_last = last.clone();
        let listener_fired = fired.clone();
        let listener_path = path.clone();
        let mut initial = false;

        let subscription = setting.subscribe_with_initial(
            |value| {
                last.store(value, Ordering::SeqCst);
                initial = value;
            },
            move |_, new| {
                // Only an actual change of the cached value fires
                if listener_last.swap(new, Ordering::SeqCst) == new {
                    return;
                }
                listener_fired.fetch_add(1, Ordering::SeqCst);
                engine_debug!(
                    "galaxy3d::Trigger",
                    "'{}' -> {}: {} {}",
                    listener_path,
                    new,
                    if new { "enable" } else { "disable" },
                    capability
                );
                let command = if new {
                    GraphCommand::EnableCapability { node, capability }
                } else {
                    GraphCommand::DisableCapability { node, capability }
                };
                commands.send(command);
            },
        );

        if initial {
            desired.insert(capability.state_change());
        } else {
            desired.remove(&capability.state_change());
        }
        engine_debug!(
            "galaxy3d::Trigger",
            "Bound '{}' to {} (initially {})",
            path,
            capability,
            if initial { "enabled" } else { "disabled" }
        );

        Self {
            node,
            capability,
            path,
            last,
            fired,
            _subscription: subscription,
        }
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Path of the bound setting
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last value observed
    pub fn value(&self) -> bool {
        self.last.load(Ordering::SeqCst)
    }

    /// Number of transitions fired since binding
    pub fn fired(&self) -> u64 {
        self.fired.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("path", &self.path)
            .field("capability", &self.capability)
            .field("value", &self.value())
            .field("fired", &self.fired())
            .finish()
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
