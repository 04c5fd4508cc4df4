/// Cross-thread hand-off into the render graph.
///
/// Configuration listeners run on whichever thread mutates the setting.
/// They never touch the graph directly: they push a [`GraphCommand`] onto
/// the graph's queue, and the render thread drains it at the start of the
/// next frame.

use std::sync::mpsc;
use super::node::{Capability, NodeKey};
use super::render_graph::DirtyFlags;

/// A deferred graph mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphCommand {
    /// Add the capability's state change to the node's desired set
    EnableCapability { node: NodeKey, capability: Capability },
    /// Remove the capability's state change from the node's desired set
    DisableCapability { node: NodeKey, capability: Capability },
    /// Re-evaluate the node's inclusion conditions
    ReevaluateConditions(NodeKey),
    /// Request a rebuild for the given reasons
    MarkDirty(DirtyFlags),
}

/// Cloneable, thread-safe producer side of a graph's command queue
#[derive(Debug, Clone)]
pub struct GraphCommandSender {
    sender: mpsc::Sender<GraphCommand>,
}

impl GraphCommandSender {
    pub(crate) fn new(sender: mpsc::Sender<GraphCommand>) -> Self {
        Self { sender }
    }

    /// Queue a command.
    ///
    /// Returns false if the graph has been dropped.
    pub fn send(&self, command: GraphCommand) -> bool {
        self.sender.send(command).is_ok()
    }
}
