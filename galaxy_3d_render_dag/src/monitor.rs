//! Performance instrumentation hooks
//!
//! Nodes bracket their real work with named activities
//! ("rendering/firstPersonView"). The engine holds one global monitor;
//! by default it is [`NullPerformanceMonitor`], so instrumentation is never
//! required for rendering to work.

/// Receives scoped start/end activity markers.
///
/// Activities nest: every `start_activity` is matched by one `end_activity`
/// closing the most recently started activity.
pub trait PerformanceMonitor: Send + Sync {
    /// Begin a named activity
    fn start_activity(&self, name: &str);

    /// End the most recently started activity
    fn end_activity(&self);
}

/// Monitor that ignores every marker
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPerformanceMonitor;

impl PerformanceMonitor for NullPerformanceMonitor {
    fn start_activity(&self, _name: &str) {}

    fn end_activity(&self) {}
}

/// RAII guard for one activity on the global monitor.
///
/// The activity ends when the guard is dropped, including on early
/// returns through `?`.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_render_dag::galaxy3d::ActivityScope;
///
/// {
///     let _activity = ActivityScope::start("rendering/overlays");
///     // ... node work ...
/// } // end_activity() here
/// ```
#[must_use = "the activity ends as soon as the guard is dropped"]
pub struct ActivityScope {
    _private: (),
}

impl ActivityScope {
    /// Start `name` on the engine's performance monitor
    pub fn start(name: &str) -> Self {
        crate::engine::Engine::start_activity(name);
        Self { _private: () }
    }
}

impl Drop for ActivityScope {
    fn drop(&mut self) {
        crate::engine::Engine::end_activity();
    }
}
