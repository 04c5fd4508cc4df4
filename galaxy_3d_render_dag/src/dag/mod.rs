//! Render-task graph core
//!
//! - **StateChange**: reversible GPU state mutation, compared by value
//! - **Node**: one rendering pass with a set of desired state changes
//! - **Trigger**: keeps a node capability in step with a configuration setting
//! - **RenderGraph**: registered nodes + orderings, lazily rebuilt task list
//! - **FrameScheduler**: executes the task list once per frame
//!
//! Configuration changes reach the graph through a command queue drained
//! by the scheduler at the start of each frame:
//!
//! ```text
//! setting.set() ─▶ Trigger ─▶ GraphCommand ─▶ process_pending_commands()
//!                                               └─▶ desired set changes ─▶ dirty
//!                                                                          └─▶ task_list() rebuilds
//! ```

mod command;
mod context;
mod node;
mod render_graph;
mod scheduler;
mod state_change;
mod task_list;
mod trigger;

pub use command::{GraphCommand, GraphCommandSender};
pub use context::{FrameContext, StateContext};
pub use node::{Capabilities, Capability, Condition, Node, NodeKey, NodeSetup, NodeState};
pub use render_graph::{DirtyFlags, RenderGraph};
pub use scheduler::{FrameScheduler, FrameStats};
pub use state_change::{DesiredStateChanges, StateChange};
pub use task_list::{RenderTask, TaskList};
pub use trigger::Trigger;
