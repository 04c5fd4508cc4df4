/// Rendering configuration tree.
///
/// `Config` → `RenderingConfig` → `RenderingDebugConfig`. Every leaf is an
/// [`ObservableBool`] shared through `Arc`, so nodes, conditions and
/// triggers can hold the exact setting they depend on.

use std::sync::Arc;
use super::observable::ObservableBool;

/// Root of the configuration tree
#[derive(Debug)]
pub struct Config {
    rendering: RenderingConfig,
}

impl Config {
    /// Create a configuration with every setting at its default value
    pub fn new() -> Self {
        Self {
            rendering: RenderingConfig::new(),
        }
    }

    /// Rendering settings
    pub fn rendering(&self) -> &RenderingConfig {
        &self.rendering
    }

    /// Iterate over every leaf setting
    pub fn settings(&self) -> impl Iterator<Item = &Arc<ObservableBool>> {
        let debug = &self.rendering.debug;
        [
            &self.rendering.dynamic_shadows,
            &debug.wireframe,
            &debug.first_person_elements_hidden,
            &debug.hud_hidden,
        ]
        .into_iter()
    }

    /// Look up a leaf setting by dotted path
    pub fn setting(&self, path: &str) -> Option<&Arc<ObservableBool>> {
        self.settings().find(|s| s.path() == path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// `rendering.*` settings
#[derive(Debug)]
pub struct RenderingConfig {
    dynamic_shadows: Arc<ObservableBool>,
    debug: RenderingDebugConfig,
}

impl RenderingConfig {
    fn new() -> Self {
        Self {
            dynamic_shadows: ObservableBool::new("rendering.dynamic_shadows", false),
            debug: RenderingDebugConfig::new(),
        }
    }

    /// Debug settings
    pub fn debug(&self) -> &RenderingDebugConfig {
        &self.debug
    }

    /// `rendering.dynamic_shadows`
    pub fn dynamic_shadows(&self) -> &Arc<ObservableBool> {
        &self.dynamic_shadows
    }

    pub fn is_dynamic_shadows(&self) -> bool {
        self.dynamic_shadows.get()
    }

    pub fn set_dynamic_shadows(&self, value: bool) -> bool {
        self.dynamic_shadows.set(value)
    }
}

/// `rendering.debug.*` settings
#[derive(Debug)]
pub struct RenderingDebugConfig {
    wireframe: Arc<ObservableBool>,
    first_person_elements_hidden: Arc<ObservableBool>,
    hud_hidden: Arc<ObservableBool>,
}

impl RenderingDebugConfig {
    fn new() -> Self {
        Self {
            wireframe: ObservableBool::new("rendering.debug.wireframe", false),
            first_person_elements_hidden: ObservableBool::new(
                "rendering.debug.first_person_elements_hidden",
                false,
            ),
            hud_hidden: ObservableBool::new("rendering.debug.hud_hidden", false),
        }
    }

    /// `rendering.debug.wireframe`
    pub fn wireframe(&self) -> &Arc<ObservableBool> {
        &self.wireframe
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe.get()
    }

    pub fn set_wireframe(&self, value: bool) -> bool {
        self.wireframe.set(value)
    }

    /// `rendering.debug.first_person_elements_hidden`
    pub fn first_person_elements_hidden(&self) -> &Arc<ObservableBool> {
        &self.first_person_elements_hidden
    }

    pub fn is_first_person_elements_hidden(&self) -> bool {
        self.first_person_elements_hidden.get()
    }

    pub fn set_first_person_elements_hidden(&self, value: bool) -> bool {
        self.first_person_elements_hidden.set(value)
    }

    /// `rendering.debug.hud_hidden`
    pub fn hud_hidden(&self) -> &Arc<ObservableBool> {
        &self.hud_hidden
    }

    pub fn is_hud_hidden(&self) -> bool {
        self.hud_hidden.get()
    }

    pub fn set_hud_hidden(&self, value: bool) -> bool {
        self.hud_hidden.set(value)
    }
}
