//! Unit tests for error.rs
//!
//! Tests Error variants, Display output, classification and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_dependency_cycle_display_lists_nodes() {
    let err = Error::DependencyCycle(vec!["engine:a".to_string(), "engine:b".to_string()]);
    let display = format!("{}", err);
    assert!(display.contains("Dependency cycle"));
    assert!(display.contains("engine:a, engine:b"));
}

#[test]
fn test_duplicate_node_display() {
    let err = Error::DuplicateNode("engine:overlaysNode".to_string());
    assert_eq!(format!("{}", err), "Duplicate node: engine:overlaysNode");
}

#[test]
fn test_unsupported_capability_display() {
    let err = Error::UnsupportedCapability {
        node: "engine:shadowMapNode".to_string(),
        capability: "Wireframe".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("engine:shadowMapNode"));
    assert!(display.contains("Wireframe"));
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("glDepthFunc failed".to_string());
    assert!(format!("{}", err).starts_with("Backend error"));
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[test]
fn test_configuration_errors_are_classified() {
    assert!(Error::DependencyCycle(Vec::new()).is_configuration_error());
    assert!(Error::DuplicateNode("x".to_string()).is_configuration_error());
    assert!(!Error::UnknownNode("x".to_string()).is_configuration_error());
    assert!(!Error::BackendError("x".to_string()).is_configuration_error());
}

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidResource("fbo".to_string());
    let _: &dyn std::error::Error = &err;
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_helper(fail: bool) -> Result<u32> {
    if fail {
        crate::engine_bail!("galaxy3d::Test", "failed with {}", 42);
    }
    Ok(7)
}

#[test]
fn test_engine_bail_returns_backend_error() {
    match bail_helper(true) {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "failed with 42"),
        other => panic!("Expected BackendError, got {:?}", other),
    }
    assert_eq!(bail_helper(false).unwrap(), 7);
}

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("galaxy3d::Test", "missing '{}'", "gbuffer");
    assert!(matches!(err, Error::BackendError(ref m) if m == "missing 'gbuffer'"));
}
