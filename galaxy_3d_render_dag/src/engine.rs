/// Galaxy3D render graph - global engine services
///
/// The render graph itself is an ordinary owned value passed around by the
/// caller. Only the cross-cutting services that every module reaches for
/// without a handle live here: the logger and the performance monitor.
/// Both use thread-safe static storage with RwLock and fall back to
/// built-in defaults when nothing was installed.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::monitor::{PerformanceMonitor, NullPerformanceMonitor};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Global performance monitor (initialized with NullPerformanceMonitor)
static MONITOR: OnceLock<RwLock<Box<dyn PerformanceMonitor>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

fn monitor_lock() -> &'static RwLock<Box<dyn PerformanceMonitor>> {
    MONITOR.get_or_init(|| RwLock::new(Box::new(NullPerformanceMonitor)))
}

// ===== PUBLIC API =====

/// Access point for the engine-wide logger and performance monitor
pub struct Engine;

impl Engine {
    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger, network logger, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use galaxy_3d_render_dag::galaxy3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }

    // ===== PERFORMANCE MONITOR API =====

    /// Install a performance monitor
    ///
    /// Until one is installed every activity marker is a no-op.
    pub fn set_performance_monitor<M: PerformanceMonitor + 'static>(monitor: M) {
        if let Ok(mut lock) = monitor_lock().write() {
            *lock = Box::new(monitor);
        }
        crate::engine_debug!("galaxy3d::Engine", "Performance monitor installed");
    }

    /// Reset the performance monitor to the no-op default
    pub fn reset_performance_monitor() {
        if let Ok(mut lock) = monitor_lock().write() {
            *lock = Box::new(NullPerformanceMonitor);
        }
    }

    /// Begin a named activity on the global monitor
    ///
    /// Prefer [`ActivityScope`](crate::monitor::ActivityScope), which
    /// guarantees the matching `end_activity`.
    pub fn start_activity(name: &str) {
        if let Ok(lock) = monitor_lock().read() {
            lock.start_activity(name);
        }
    }

    /// End the most recent activity on the global monitor
    pub fn end_activity() {
        if let Ok(lock) = monitor_lock().read() {
            lock.end_activity();
        }
    }

    /// Reset all global services for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        Self::reset_logger();
        Self::reset_performance_monitor();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
