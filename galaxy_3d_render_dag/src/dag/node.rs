/// Render nodes and what they declare to the graph.
///
/// A node is one rendering pass. It owns no graph state itself: its desired
/// state changes, inclusion conditions, configuration subscriptions and
/// capability triggers are handed to the graph through [`NodeSetup`] during
/// `initialise()` and kept in the node's graph entry from then on.

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;
use slotmap::new_key_type;
use crate::config::{ObservableBool, Subscription};
use crate::error::{Error, Result};
use crate::engine_error;
use super::command::{GraphCommand, GraphCommandSender};
use super::context::FrameContext;
use super::state_change::{DesiredStateChanges, StateChange};
use super::trigger::Trigger;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a node within a RenderGraph.
    ///
    /// Keys remain valid after other nodes are removed.
    pub struct NodeKey;
}

// ===== LIFECYCLE =====

/// Where a node is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Registered, `initialise()` not yet called
    Uninitialised,
    /// Initialised, not yet placed by a rebuild
    Initialised,
    /// In the current task list
    Active,
    /// Initialised but excluded by its condition
    Suspended,
    /// Torn down (terminal)
    Destroyed,
}

// ===== CAPABILITIES =====

/// An optional state change a node can toggle at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Wireframe,
}

impl Capability {
    /// The state change that is active while the capability is enabled
    pub fn state_change(self) -> StateChange {
        match self {
            Capability::Wireframe => StateChange::SetWireframe(true),
        }
    }

    /// The flag declaring this capability
    pub fn flag(self) -> Capabilities {
        match self {
            Capability::Wireframe => Capabilities::WIREFRAME,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Wireframe => write!(f, "wireframe"),
        }
    }
}

bitflags! {
    /// Set of capabilities a node declares
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        const WIREFRAME = 1 << 0;
    }
}

impl Capabilities {
    pub fn supports(self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }
}

// ===== NODE TRAIT =====

/// One rendering pass.
///
/// External services (camera, configuration, subscriber registry) are
/// passed to the node's constructor. The graph calls `initialise()` exactly
/// once, then `process()` once per frame while the node is in the task
/// list, and `destroy()` on removal or shutdown.
///
/// `process()` runs with every desired state change already applied and
/// must not apply or revert them itself. It may return early without doing
/// any work while still staying in the task list.
pub trait Node: Send {
    /// Unique node URI (e.g. "engine:firstPersonViewNode")
    fn name(&self) -> &str;

    /// Capabilities this node supports toggling
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Declare baseline state changes, conditions and triggers
    fn initialise(&mut self, setup: &mut NodeSetup<'_>) -> Result<()>;

    /// Render one frame
    fn process(&mut self, frame: &mut FrameContext<'_>) -> Result<()>;

    /// Release node resources
    fn destroy(&mut self) {}
}

/// Inclusion predicate over shared configuration
pub type Condition = Box<dyn Fn() -> bool + Send + Sync>;

/// Everything the graph keeps on behalf of one node
#[derive(Default)]
pub(crate) struct NodeBindings {
    pub(crate) desired: DesiredStateChanges,
    pub(crate) conditions: Vec<Condition>,
    pub(crate) subscriptions: Vec<Subscription>,
    pub(crate) triggers: Vec<Trigger>,
}

impl NodeBindings {
    /// All conditions hold (vacuously true without conditions)
    pub(crate) fn condition_holds(&self) -> bool {
        self.conditions.iter().all(|condition| condition())
    }
}

// ===== NODE SETUP =====

/// Handed to [`Node::initialise`] to declare the node's graph bindings
pub struct NodeSetup<'a> {
    key: NodeKey,
    name: &'a str,
    capabilities: Capabilities,
    bindings: &'a mut NodeBindings,
    commands: &'a GraphCommandSender,
}

impl<'a> NodeSetup<'a> {
    pub(crate) fn new(
        key: NodeKey,
        name: &'a str,
        capabilities: Capabilities,
        bindings: &'a mut NodeBindings,
        commands: &'a GraphCommandSender,
    ) -> Self {
        Self { key, name, capabilities, bindings, commands }
    }

    /// Key of the node being initialised
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Add a baseline state change. Returns false if already present.
    pub fn add_desired_state_change(&mut self, change: StateChange) -> bool {
        self.bindings.desired.insert(change)
    }

    /// Remove a state change. Returns false if absent.
    pub fn remove_desired_state_change(&mut self, change: &StateChange) -> bool {
        self.bindings.desired.remove(change)
    }

    pub fn desired_state_changes(&self) -> &DesiredStateChanges {
        &self.bindings.desired
    }

    /// Gate the node's inclusion on `condition`.
    ///
    /// All conditions must hold. Pair with [`require_subscription`](Self::require_subscription)
    /// for every setting the predicate reads, otherwise the graph only
    /// notices a change at the next rebuild.
    pub fn require_condition<F>(&mut self, condition: F)
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.bindings.conditions.push(Box::new(condition));
    }

    /// Re-evaluate this node's conditions whenever `setting` changes
    pub fn require_subscription(&mut self, setting: &Arc<ObservableBool>) {
        let key = self.key;
        let commands = self.commands.clone();
        let (subscription, _) = setting.subscribe(move |_, _| {
            commands.send(GraphCommand::ReevaluateConditions(key));
        });
        self.bindings.subscriptions.push(subscription);
    }

    /// Bind `setting` to one of the node's capabilities.
    ///
    /// The capability is synchronised with the current value right away.
    pub fn bind_trigger(&mut self, setting: &Arc<ObservableBool>, capability: Capability) -> Result<()> {
        if !self.capabilities.supports(capability) {
            engine_error!(
                "galaxy3d::NodeSetup",
                "Node '{}' binds a trigger to undeclared capability '{}'",
                self.name, capability
            );
            return Err(Error::UnsupportedCapability {
                node: self.name.to_string(),
                capability: capability.to_string(),
            });
        }

        let trigger = Trigger::bind(
            setting,
            self.key,
            capability,
            &mut self.bindings.desired,
            self.commands.clone(),
        );
        self.bindings.triggers.push(trigger);
        Ok(())
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
