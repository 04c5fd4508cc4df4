/*!
# Galaxy 3D Render DAG

Render-task graph for the Galaxy 3D engine.

A frame is described as a set of composable render nodes, each owning the
GPU state it needs while it runs. The graph orders the nodes by their
declared dependencies, drops the ones whose condition currently fails, and
flattens the result into a task list that brackets every node with the
application and reversion of its state changes. The task list is rebuilt
lazily, only after something marked the graph dirty.

## Architecture

- **StateChange**: reversible GPU state mutation (wireframe, viewport, FBO bind, blending, ...)
- **Node**: one rendering pass declaring its desired state changes
- **Trigger**: keeps a node capability (e.g. wireframe) in step with a configuration setting
- **RenderGraph**: registered nodes + orderings, dirty flags, task list rebuild
- **FrameScheduler**: executes the task list once per frame on the render thread

Graphics API, camera, frame buffers and render subscribers are external
services reached through traits in [`galaxy3d::services`].
*/

// Internal modules
mod error;
mod engine;
mod monitor;
pub mod log;
pub mod config;
pub mod services;
pub mod dag;
pub mod nodes;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logger + performance monitor)
    pub use crate::engine::Engine;

    // Instrumentation
    pub use crate::monitor::{ActivityScope, NullPerformanceMonitor, PerformanceMonitor};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Observable configuration
    pub mod config {
        pub use crate::config::*;
    }

    // External services
    pub mod services {
        pub use crate::services::*;
    }

    // Graph core
    pub mod dag {
        pub use crate::dag::*;
    }

    // Concrete nodes
    pub mod nodes {
        pub use crate::nodes::*;
    }
}

// Re-export math library at crate root
pub use glam;
