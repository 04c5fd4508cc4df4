/// Tests for the subscriber registry

use super::*;
use crate::error::Error;
use crate::services::mock_services::{new_log, take_log, MockGraphics, MockSubscriber};

fn poison(registry: &Arc<SimpleSubscriberRegistry>) {
    let registry = registry.clone();
    let _ = std::thread::spawn(move || {
        let _guard = registry.subscribers.lock().unwrap();
        panic!("subscriber list poisoned");
    })
    .join();
}

// ============================================================================
// Tests: SimpleSubscriberRegistry
// ============================================================================

#[test]
fn test_render_subscribers_in_registration_order() {
    let registry = SimpleSubscriberRegistry::new();
    let log = new_log();
    let first: SubscriberHandle = Arc::new(Mutex::new(MockSubscriber { name: "first".to_string(), log: log.clone() }));
    let second: SubscriberHandle = Arc::new(Mutex::new(MockSubscriber { name: "second".to_string(), log: log.clone() }));
    registry.register(first.clone());
    registry.register(second.clone());

    let listed = registry.render_subscribers().unwrap();

    assert_eq!(listed.len(), 2);
    assert!(Arc::ptr_eq(&listed[0], &first));
    assert!(Arc::ptr_eq(&listed[1], &second));
}

#[test]
fn test_poisoned_registry_is_reported() {
    let registry = Arc::new(SimpleSubscriberRegistry::new());
    let log = new_log();
    registry.register(Arc::new(Mutex::new(MockSubscriber { name: "hand".to_string(), log: log.clone() })));
    poison(&registry);

    assert!(matches!(registry.render_subscribers(), Err(Error::BackendError(_))));

    let mut graphics = MockGraphics::new();
    let result = for_each_subscriber(&*registry, &mut graphics, |s, g| s.render_first_person(g));
    assert!(matches!(result, Err(Error::BackendError(_))));
    assert!(take_log(&log).is_empty());
}

#[test]
fn test_poisoned_registry_rejects_registration() {
    let registry = Arc::new(SimpleSubscriberRegistry::new());
    poison(&registry);
    let handle: SubscriberHandle = Arc::new(Mutex::new(MockSubscriber { name: "late".to_string(), log: new_log() }));

    registry.register(handle.clone());

    assert!(!registry.unregister(&handle));
    assert!(registry.render_subscribers().is_err());
}

// ============================================================================
// Tests: custom registries
// ============================================================================

#[test]
fn test_registry_failure_propagates_through_for_each() {
    struct Offline;
    impl SubscriberRegistry for Offline {
        fn render_subscribers(&self) -> Result<Vec<SubscriberHandle>> {
            Err(Error::BackendError("subscriber service offline".to_string()))
        }
    }

    let mut graphics = MockGraphics::new();
    let mut calls = 0;
    let result = for_each_subscriber(&Offline, &mut graphics, |_, _| {
        calls += 1;
        Ok(())
    });

    match result {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "subscriber service offline"),
        other => panic!("expected BackendError, got {:?}", other),
    }
    assert_eq!(calls, 0);
}
