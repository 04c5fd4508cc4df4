/// Per-frame driver: walks the current task list, bracketing every node
/// with its state changes.

use crate::error::Result;
use crate::engine_warn;
use super::context::{FrameContext, StateContext};
use super::render_graph::RenderGraph;
use super::state_change::StateChange;
use super::task_list::RenderTask;

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Index of the rendered frame
    pub frame_index: u64,
    /// Generation of the task list that was executed
    pub generation: u64,
    pub nodes_executed: usize,
    pub state_changes_applied: usize,
    pub state_changes_reverted: usize,
}

/// Executes one task list per frame on the render thread
#[derive(Debug, Default)]
pub struct FrameScheduler {
    frame_index: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next frame to render
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Render one frame.
    ///
    /// Drains the graph's command queue, rebuilds the task list if needed
    /// and executes it. On failure every state change still applied is
    /// reverted before the error is returned; nothing is retried.
    pub fn render_frame(&mut self, graph: &mut RenderGraph, ctx: &mut StateContext<'_>) -> Result<FrameStats> {
        graph.process_pending_commands();
        let task_list = graph.task_list()?;

        let frame_index = self.frame_index;
        self.frame_index += 1;

        let mut stats = FrameStats {
            frame_index,
            generation: task_list.generation(),
            ..FrameStats::default()
        };
        let mut applied: Vec<StateChange> = Vec::new();

        for task in task_list.tasks() {
            let result = match task {
                RenderTask::ApplyStateChange(change) => change.apply(ctx).map(|_| {
                    applied.push(change.clone());
                    stats.state_changes_applied += 1;
                }),
                RenderTask::RevertStateChange(change) => {
                    if let Some(index) = applied.iter().rposition(|c| c == change) {
                        applied.remove(index);
                    }
                    change.revert(ctx).map(|_| stats.state_changes_reverted += 1)
                }
                RenderTask::ExecuteNode(key) => {
                    let mut frame = FrameContext::new(&mut *ctx.graphics, ctx.frame_buffers, frame_index);
                    graph.execute_node(*key, &mut frame).map(|_| stats.nodes_executed += 1)
                }
            };

            if let Err(err) = result {
                for change in applied.iter().rev() {
                    if let Err(revert_err) = change.revert(ctx) {
                        engine_warn!("galaxy3d::FrameScheduler", "Reverting '{}' failed: {}", change, revert_err);
                    }
                }
                return Err(err);
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
