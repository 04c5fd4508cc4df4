//! Configuration module
//!
//! Hierarchical, observable rendering settings. Settings are edited from
//! any thread; interested parties subscribe to individual boolean leaves.

mod observable;
mod rendering_config;

pub use observable::{ObservableBool, Subscription};
pub use rendering_config::{Config, RenderingConfig, RenderingDebugConfig};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
