//! Error types for the Galaxy3D render graph
//!
//! This module defines the error types used throughout the render graph:
//! configuration errors detected while building or rebuilding the task list,
//! lifecycle misuse, and failures reported by external collaborators.

use std::fmt;

/// Result type for render graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render graph errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Declared node orderings form a cycle (names of the unresolved nodes)
    DependencyCycle(Vec<String>),

    /// A node with the same name is already registered
    DuplicateNode(String),

    /// The node key or name is not registered in the graph
    UnknownNode(String),

    /// Lifecycle misuse (initialise called twice, node used before initialisation, ...)
    InitializationFailed(String),

    /// The node never declared the capability it is asked to toggle
    UnsupportedCapability {
        /// Node name
        node: String,
        /// Capability name
        capability: String,
    },

    /// Invalid resource (unknown frame buffer, missing setting, ...)
    InvalidResource(String),

    /// Failure reported by an external collaborator (graphics API, camera, ...)
    BackendError(String),
}

impl Error {
    /// Whether this error is a graph configuration error.
    ///
    /// Configuration errors are fatal at build/rebuild time: they will not
    /// go away on the next frame.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::DependencyCycle(_) | Error::DuplicateNode(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DependencyCycle(nodes) => {
                write!(f, "Dependency cycle between nodes: {}", nodes.join(", "))
            }
            Error::DuplicateNode(name) => write!(f, "Duplicate node: {}", name),
            Error::UnknownNode(name) => write!(f, "Unknown node: {}", name),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::UnsupportedCapability { node, capability } => {
                write!(f, "Node '{}' does not support capability '{}'", node, capability)
            }
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_render_dag::engine_err;
/// let err = engine_err!("galaxy3d::FrameBuffers", "Cannot bind '{}'", "gbuffer");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::BackendError(message)
    }};
}

/// Log an error and return early with an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_render_dag::engine_bail;
/// # fn f() -> galaxy_3d_render_dag::galaxy3d::Result<()> {
/// engine_bail!("galaxy3d::Camera", "No active camera");
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
