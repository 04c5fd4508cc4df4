/// Execution contexts handed to state changes and nodes.

use crate::services::{FrameBuffers, GraphicsState};

/// What a [`StateChange`](super::StateChange) acts on
pub struct StateContext<'a> {
    pub graphics: &'a mut dyn GraphicsState,
    pub frame_buffers: &'a dyn FrameBuffers,
}

impl<'a> StateContext<'a> {
    pub fn new(graphics: &'a mut dyn GraphicsState, frame_buffers: &'a dyn FrameBuffers) -> Self {
        Self { graphics, frame_buffers }
    }
}

/// What a node's `process()` receives for one frame.
///
/// The node's desired state changes are already applied when it runs.
pub struct FrameContext<'a> {
    pub graphics: &'a mut dyn GraphicsState,
    pub frame_buffers: &'a dyn FrameBuffers,
    /// Index of the frame being rendered (starts at 0)
    pub frame_index: u64,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        graphics: &'a mut dyn GraphicsState,
        frame_buffers: &'a dyn FrameBuffers,
        frame_index: u64,
    ) -> Self {
        Self { graphics, frame_buffers, frame_index }
    }
}
