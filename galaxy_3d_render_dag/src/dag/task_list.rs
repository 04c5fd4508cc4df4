/// Flattened per-frame work: the ordered nodes plus the state changes
/// bracketing each of them.

use super::node::NodeKey;
use super::state_change::{DesiredStateChanges, StateChange};

/// One step of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTask {
    ApplyStateChange(StateChange),
    RevertStateChange(StateChange),
    ExecuteNode(NodeKey),
}

/// Ordered, condition-filtered task list produced by a rebuild.
///
/// Immutable once built; a rebuild swaps in a new list instead of patching
/// this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    generation: u64,
    nodes: Vec<NodeKey>,
    tasks: Vec<RenderTask>,
}

impl TaskList {
    /// List with no nodes and no tasks
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the task stream for `nodes`, in order.
    ///
    /// Between two consecutive nodes, state changes present in both stay
    /// applied. The others are reverted (in reverse application order)
    /// before the next node's new ones are applied. Everything still
    /// applied after the last node is reverted.
    pub(crate) fn build<'a, I>(generation: u64, nodes: I) -> Self
    where
        I: IntoIterator<Item = (NodeKey, &'a DesiredStateChanges)>,
    {
        let mut keys = Vec::new();
        let mut tasks = Vec::new();
        let mut applied: Vec<StateChange> = Vec::new();

        for (key, desired) in nodes {
            for change in applied.iter().rev() {
                if !desired.contains(change) {
                    tasks.push(RenderTask::RevertStateChange(change.clone()));
                }
            }
            applied.retain(|change| desired.contains(change));

            for change in desired {
                if !applied.contains(change) {
                    tasks.push(RenderTask::ApplyStateChange(change.clone()));
                    applied.push(change.clone());
                }
            }

            tasks.push(RenderTask::ExecuteNode(key));
            keys.push(key);
        }

        for change in applied.into_iter().rev() {
            tasks.push(RenderTask::RevertStateChange(change));
        }

        Self {
            generation,
            nodes: keys,
            tasks,
        }
    }

    /// Rebuild counter of the graph that produced this list (0 = never built)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nodes to execute, in order
    pub fn nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    pub fn tasks(&self) -> &[RenderTask] {
        &self.tasks
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains(&key)
    }
}

#[cfg(test)]
#[path = "task_list_tests.rs"]
mod tests;
