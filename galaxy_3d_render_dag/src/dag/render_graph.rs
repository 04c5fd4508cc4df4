/// Render graph: registered nodes, their ordering dependencies and the
/// lazily rebuilt task list.
///
/// Every operation that can change what a frame executes goes through
/// [`RenderGraph::mark_dirty`]. The task list is rebuilt on the next read
/// when dirty, never patched in place.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{mpsc, Arc};
use bitflags::bitflags;
use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap};
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error, engine_trace, engine_warn};
use super::command::{GraphCommand, GraphCommandSender};
use super::context::FrameContext;
use super::node::{Capabilities, Capability, Node, NodeBindings, NodeKey, NodeSetup, NodeState};
use super::state_change::{DesiredStateChanges, StateChange};
use super::task_list::TaskList;
use super::trigger::Trigger;

const SOURCE: &str = "galaxy3d::RenderGraph";

bitflags! {
    /// Why the task list must be rebuilt
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DirtyFlags: u32 {
        /// A node was added, initialised or removed
        const NODES         = 1 << 0;
        /// A dependency was declared or removed
        const DEPENDENCIES  = 1 << 1;
        /// A node's desired state changes changed
        const STATE_CHANGES = 1 << 2;
        /// A node's condition result flipped
        const CONDITIONS    = 1 << 3;
        /// Rebuild explicitly requested
        const REQUESTED     = 1 << 4;
    }
}

/// One registered node and everything the graph tracks for it
struct NodeEntry {
    node: Box<dyn Node>,
    name: String,
    capabilities: Capabilities,
    state: NodeState,
    bindings: NodeBindings,
    /// Condition result as of the last evaluation
    included: bool,
}

/// Directed acyclic graph of render nodes.
///
/// Owned by the render thread. Other threads reach it only through the
/// [`GraphCommandSender`] returned by [`command_sender`](Self::command_sender).
pub struct RenderGraph {
    nodes: SlotMap<NodeKey, NodeEntry>,
    names: FxHashMap<String, NodeKey>,
    /// Live nodes in registration order (sort tie-break)
    registration_order: Vec<NodeKey>,
    /// before -> [after, ...]
    successors: FxHashMap<NodeKey, Vec<NodeKey>>,
    /// Last removed key per slot; a reused slot forgets older keys
    destroyed: SecondaryMap<NodeKey, ()>,
    dirty: DirtyFlags,
    task_list: Arc<TaskList>,
    generation: u64,
    sender: GraphCommandSender,
    receiver: mpsc::Receiver<GraphCommand>,
}

impl RenderGraph {
    /// Create an empty graph. The first `task_list()` call builds.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            nodes: SlotMap::with_key(),
            names: FxHashMap::default(),
            registration_order: Vec::new(),
            successors: FxHashMap::default(),
            destroyed: SecondaryMap::new(),
            dirty: DirtyFlags::REQUESTED,
            task_list: Arc::new(TaskList::empty()),
            generation: 0,
            sender: GraphCommandSender::new(sender),
            receiver,
        }
    }

    /// Producer side of the command queue, for use from any thread
    pub fn command_sender(&self) -> GraphCommandSender {
        self.sender.clone()
    }

    // ===== NODES =====

    /// Register a node and initialise it
    ///
    /// # Errors
    ///
    /// `DuplicateNode` if the name is taken, or whatever `initialise()`
    /// returns. A node whose initialisation fails is removed again.
    pub fn add_node<N: Node + 'static>(&mut self, node: N) -> Result<NodeKey> {
        self.add_boxed_node(Box::new(node))
    }

    /// [`add_node`](Self::add_node) for an already boxed node
    pub fn add_boxed_node(&mut self, node: Box<dyn Node>) -> Result<NodeKey> {
        let key = self.register_node(node)?;
        if let Err(err) = self.initialise_node(key) {
            self.remove_node(key)?;
            return Err(err);
        }
        Ok(key)
    }

    /// Register a node without initialising it.
    ///
    /// Uninitialised nodes take part in ordering but are never executed.
    pub fn register_node(&mut self, node: Box<dyn Node>) -> Result<NodeKey> {
        let name = node.name().to_string();
        if self.names.contains_key(&name) {
            engine_error!(SOURCE, "Node '{}' is already registered", name);
            return Err(Error::DuplicateNode(name));
        }

        let capabilities = node.capabilities();
        let key = self.nodes.insert(NodeEntry {
            node,
            name: name.clone(),
            capabilities,
            state: NodeState::Uninitialised,
            bindings: NodeBindings::default(),
            included: false,
        });
        self.names.insert(name.clone(), key);
        self.registration_order.push(key);
        self.mark_dirty(DirtyFlags::NODES);
        engine_debug!(SOURCE, "Registered node '{}'", name);
        Ok(key)
    }

    /// Run the node's `initialise()`.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if the node was already initialised.
    pub fn initialise_node(&mut self, key: NodeKey) -> Result<()> {
        let entry = self
            .nodes
            .get_mut(key)
            .ok_or_else(|| Error::UnknownNode(format!("{:?}", key)))?;
        if entry.state != NodeState::Uninitialised {
            engine_error!(SOURCE, "Node '{}' initialised twice", entry.name);
            return Err(Error::InitializationFailed(format!(
                "node '{}' is already initialised", entry.name
            )));
        }

        let NodeEntry { node, name, capabilities, bindings, .. } = &mut *entry;
        let mut setup = NodeSetup::new(key, name.as_str(), *capabilities, bindings, &self.sender);
        node.initialise(&mut setup)?;

        entry.included = entry.bindings.condition_holds();
        entry.state = NodeState::Initialised;
        engine_debug!(SOURCE, "Initialised node '{}' ({} state changes)", entry.name, entry.bindings.desired.len());
        self.mark_dirty(DirtyFlags::NODES);
        Ok(())
    }

    /// Initialise every registered node still uninitialised, in registration order
    pub fn initialise_all(&mut self) -> Result<()> {
        let pending: Vec<NodeKey> = self
            .registration_order
            .iter()
            .copied()
            .filter(|key| self.nodes.get(*key).map(|e| e.state) == Some(NodeState::Uninitialised))
            .collect();
        for key in pending {
            self.initialise_node(key)?;
        }
        Ok(())
    }

    /// Destroy and unregister a node, dropping its dependencies,
    /// subscriptions and triggers
    pub fn remove_node(&mut self, key: NodeKey) -> Result<()> {
        let mut entry = self
            .nodes
            .remove(key)
            .ok_or_else(|| Error::UnknownNode(format!("{:?}", key)))?;

        entry.node.destroy();
        self.names.remove(&entry.name);
        self.registration_order.retain(|k| *k != key);
        self.successors.remove(&key);
        for afters in self.successors.values_mut() {
            afters.retain(|k| *k != key);
        }
        self.destroyed.insert(key, ());
        self.mark_dirty(DirtyFlags::NODES);
        engine_debug!(SOURCE, "Removed node '{}'", entry.name);
        Ok(())
    }

    /// Destroy every node, last registered first
    pub fn shutdown(&mut self) {
        let keys: Vec<NodeKey> = self.registration_order.iter().rev().copied().collect();
        for key in keys {
            if let Err(err) = self.remove_node(key) {
                engine_warn!(SOURCE, "Shutdown: {}", err);
            }
        }
        self.task_list = Arc::new(TaskList::empty());
    }

    pub fn node_key(&self, name: &str) -> Option<NodeKey> {
        self.names.get(name).copied()
    }

    pub fn node_name(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(key).map(|entry| entry.name.as_str())
    }

    /// Lifecycle state; None for unknown keys.
    ///
    /// A removed node reports `Destroyed` until its slot is reused by a
    /// node that is removed in turn.
    pub fn node_state(&self, key: NodeKey) -> Option<NodeState> {
        match self.nodes.get(key) {
            Some(entry) => Some(entry.state),
            None if self.destroyed.contains_key(key) => Some(NodeState::Destroyed),
            None => None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node names in registration order
    pub fn node_names(&self) -> Vec<&str> {
        self.registration_order
            .iter()
            .filter_map(|key| self.node_name(*key))
            .collect()
    }

    // ===== DEPENDENCIES =====

    /// Declare that `before` must run before `after`.
    ///
    /// Returns false if the ordering was already declared. Cycles are
    /// reported by the next rebuild.
    pub fn add_dependency(&mut self, before: NodeKey, after: NodeKey) -> Result<bool> {
        let before_name = self.entry(before)?.name.clone();
        let after_name = self.entry(after)?.name.clone();

        let afters = self.successors.entry(before).or_default();
        if afters.contains(&after) {
            return Ok(false);
        }
        afters.push(after);
        engine_trace!(SOURCE, "Dependency '{}' -> '{}'", before_name, after_name);
        self.mark_dirty(DirtyFlags::DEPENDENCIES);
        Ok(true)
    }

    /// [`add_dependency`](Self::add_dependency) by node name
    pub fn add_dependency_by_name(&mut self, before: &str, after: &str) -> Result<bool> {
        let before = self.node_key(before).ok_or_else(|| Error::UnknownNode(before.to_string()))?;
        let after = self.node_key(after).ok_or_else(|| Error::UnknownNode(after.to_string()))?;
        self.add_dependency(before, after)
    }

    /// Remove a declared ordering. Returns false if it was not declared.
    pub fn remove_dependency(&mut self, before: NodeKey, after: NodeKey) -> bool {
        let Some(afters) = self.successors.get_mut(&before) else {
            return false;
        };
        let Some(index) = afters.iter().position(|k| *k == after) else {
            return false;
        };
        afters.remove(index);
        self.mark_dirty(DirtyFlags::DEPENDENCIES);
        true
    }

    // ===== DESIRED STATE CHANGES =====

    pub fn desired_state_changes(&self, key: NodeKey) -> Option<&DesiredStateChanges> {
        self.nodes.get(key).map(|entry| &entry.bindings.desired)
    }

    /// Triggers the node bound during initialisation
    pub fn triggers(&self, key: NodeKey) -> &[Trigger] {
        self.nodes
            .get(key)
            .map(|entry| entry.bindings.triggers.as_slice())
            .unwrap_or(&[])
    }

    /// Add a state change to a node.
    ///
    /// Returns whether membership changed; the graph is marked dirty only then.
    pub fn add_desired_state_change(&mut self, key: NodeKey, change: StateChange) -> Result<bool> {
        let entry = self.entry_mut(key)?;
        if !entry.bindings.desired.insert(change) {
            return Ok(false);
        }
        self.mark_dirty(DirtyFlags::STATE_CHANGES);
        Ok(true)
    }

    /// Remove a state change from a node.
    ///
    /// Returns whether membership changed; removing an absent change is a no-op.
    pub fn remove_desired_state_change(&mut self, key: NodeKey, change: &StateChange) -> Result<bool> {
        let entry = self.entry_mut(key)?;
        if !entry.bindings.desired.remove(change) {
            return Ok(false);
        }
        self.mark_dirty(DirtyFlags::STATE_CHANGES);
        Ok(true)
    }

    // ===== CAPABILITIES =====

    /// Turn a declared capability on (idempotent)
    pub fn enable_capability(&mut self, key: NodeKey, capability: Capability) -> Result<bool> {
        self.check_capability(key, capability)?;
        let changed = self.add_desired_state_change(key, capability.state_change())?;
        engine_trace!(SOURCE, "Enable {} on {:?}: {}", capability, key, if changed { "changed" } else { "unchanged" });
        Ok(changed)
    }

    /// Turn a declared capability off (idempotent)
    pub fn disable_capability(&mut self, key: NodeKey, capability: Capability) -> Result<bool> {
        self.check_capability(key, capability)?;
        let changed = self.remove_desired_state_change(key, &capability.state_change())?;
        engine_trace!(SOURCE, "Disable {} on {:?}: {}", capability, key, if changed { "changed" } else { "unchanged" });
        Ok(changed)
    }

    pub fn capability_enabled(&self, key: NodeKey, capability: Capability) -> bool {
        self.desired_state_changes(key)
            .map(|desired| desired.contains(&capability.state_change()))
            .unwrap_or(false)
    }

    fn check_capability(&self, key: NodeKey, capability: Capability) -> Result<()> {
        let entry = self.entry(key)?;
        if !entry.capabilities.supports(capability) {
            engine_error!(SOURCE, "Node '{}' does not declare capability '{}'", entry.name, capability);
            return Err(Error::UnsupportedCapability {
                node: entry.name.clone(),
                capability: capability.to_string(),
            });
        }
        Ok(())
    }

    // ===== DIRTY TRACKING =====

    /// Request a rebuild before the next task list read (idempotent)
    pub fn mark_dirty(&mut self, reasons: DirtyFlags) {
        if !self.dirty.contains(reasons) {
            engine_debug!(SOURCE, "Marked dirty: {:?}", reasons);
        }
        self.dirty |= reasons;
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Pending rebuild reasons
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    // ===== COMMANDS & CONDITIONS =====

    /// Apply every queued command, in arrival order.
    ///
    /// Commands targeting removed nodes are dropped with a warning. Returns
    /// the number of commands drained.
    pub fn process_pending_commands(&mut self) -> usize {
        let mut count = 0;
        while let Ok(command) = self.receiver.try_recv() {
            count += 1;
            let result = match command {
                GraphCommand::EnableCapability { node, capability } => {
                    self.enable_capability(node, capability).map(|_| ())
                }
                GraphCommand::DisableCapability { node, capability } => {
                    self.disable_capability(node, capability).map(|_| ())
                }
                GraphCommand::ReevaluateConditions(node) => {
                    self.reevaluate_conditions(node).map(|_| ())
                }
                GraphCommand::MarkDirty(reasons) => {
                    self.mark_dirty(reasons);
                    Ok(())
                }
            };
            if let Err(err) = result {
                engine_warn!(SOURCE, "Dropped graph command: {}", err);
            }
        }
        count
    }

    /// Re-evaluate one node's conditions.
    ///
    /// Returns true if the result flipped, in which case the graph is
    /// marked dirty.
    pub fn reevaluate_conditions(&mut self, key: NodeKey) -> Result<bool> {
        let entry = self.entry_mut(key)?;
        if entry.state == NodeState::Uninitialised {
            return Ok(false);
        }
        let included = entry.bindings.condition_holds();
        if included == entry.included {
            return Ok(false);
        }
        entry.included = included;
        engine_debug!(
            SOURCE,
            "Condition of '{}' is now {}",
            entry.name,
            if included { "true" } else { "false" }
        );
        self.mark_dirty(DirtyFlags::CONDITIONS);
        Ok(true)
    }

    // ===== TASK LIST =====

    /// Current task list, rebuilt first if the graph is dirty.
    ///
    /// # Errors
    ///
    /// `DependencyCycle` if the declared orderings cannot be satisfied. The
    /// previous list is discarded and the graph stays dirty.
    pub fn task_list(&mut self) -> Result<Arc<TaskList>> {
        if self.is_dirty() {
            self.rebuild()?;
        }
        Ok(self.task_list.clone())
    }

    /// Rebuild the task list now, dirty or not
    pub fn rebuild(&mut self) -> Result<()> {
        for entry in self.nodes.values_mut() {
            if entry.state != NodeState::Uninitialised {
                entry.included = entry.bindings.condition_holds();
            }
        }

        let order = match self.sorted_nodes() {
            Ok(order) => order,
            Err(err) => {
                self.task_list = Arc::new(TaskList::empty());
                engine_error!(SOURCE, "Rebuild failed: {}", err);
                return Err(err);
            }
        };

        let included: Vec<NodeKey> = order
            .into_iter()
            .filter(|key| {
                self.nodes
                    .get(*key)
                    .map(|entry| entry.state != NodeState::Uninitialised && entry.included)
                    .unwrap_or(false)
            })
            .collect();

        self.generation += 1;
        let task_list = TaskList::build(
            self.generation,
            included
                .iter()
                .filter_map(|key| self.nodes.get(*key).map(|entry| (*key, &entry.bindings.desired))),
        );

        for (key, entry) in self.nodes.iter_mut() {
            if entry.state == NodeState::Uninitialised {
                continue;
            }
            entry.state = if task_list.contains(key) {
                NodeState::Active
            } else {
                NodeState::Suspended
            };
        }

        engine_debug!(
            SOURCE,
            "Rebuilt task list #{} ({:?}): {} of {} nodes, {} tasks",
            self.generation,
            self.dirty,
            task_list.len(),
            self.nodes.len(),
            task_list.tasks().len()
        );
        self.task_list = Arc::new(task_list);
        self.dirty = DirtyFlags::empty();
        Ok(())
    }

    /// Kahn's algorithm over every registered node, ties broken by
    /// registration order
    fn sorted_nodes(&self) -> Result<Vec<NodeKey>> {
        let rank: FxHashMap<NodeKey, usize> = self
            .registration_order
            .iter()
            .enumerate()
            .map(|(index, key)| (*key, index))
            .collect();

        let mut in_degree = vec![0usize; self.registration_order.len()];
        for afters in self.successors.values() {
            for after in afters {
                if let Some(index) = rank.get(after) {
                    in_degree[*index] += 1;
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(index, _)| Reverse(index))
            .collect();

        let mut order = Vec::with_capacity(self.registration_order.len());
        while let Some(Reverse(index)) = ready.pop() {
            let key = self.registration_order[index];
            order.push(key);
            if let Some(afters) = self.successors.get(&key) {
                for after in afters {
                    if let Some(after_index) = rank.get(after) {
                        in_degree[*after_index] -= 1;
                        if in_degree[*after_index] == 0 {
                            ready.push(Reverse(*after_index));
                        }
                    }
                }
            }
        }

        if order.len() < self.registration_order.len() {
            let unresolved = in_degree
                .iter()
                .enumerate()
                .filter(|(_, degree)| **degree > 0)
                .filter_map(|(index, _)| self.node_name(self.registration_order[index]))
                .map(str::to_string)
                .collect();
            return Err(Error::DependencyCycle(unresolved));
        }
        Ok(order)
    }

    // ===== EXECUTION =====

    /// Run one node's `process()`
    pub fn execute_node(&mut self, key: NodeKey, frame: &mut FrameContext<'_>) -> Result<()> {
        let entry = self.entry_mut(key)?;
        if entry.state == NodeState::Uninitialised {
            return Err(Error::InitializationFailed(format!(
                "node '{}' executed before initialisation", entry.name
            )));
        }
        entry.node.process(frame)
    }

    /// Number of completed rebuilds
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn entry(&self, key: NodeKey) -> Result<&NodeEntry> {
        self.nodes
            .get(key)
            .ok_or_else(|| Error::UnknownNode(format!("{:?}", key)))
    }

    fn entry_mut(&mut self, key: NodeKey) -> Result<&mut NodeEntry> {
        self.nodes
            .get_mut(key)
            .ok_or_else(|| Error::UnknownNode(format!("{:?}", key)))
    }
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RenderGraph {
    fn drop(&mut self) {
        for entry in self.nodes.values_mut() {
            entry.node.destroy();
        }
    }
}

#[cfg(test)]
#[path = "render_graph_tests.rs"]
mod tests;
