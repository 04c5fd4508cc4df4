/// Tests for capabilities, NodeBindings and NodeSetup

use super::*;
use std::sync::mpsc;
use slotmap::SlotMap;
use crate::config::ObservableBool;
use crate::services::READ_ONLY_GBUFFER;

fn test_key() -> NodeKey {
    let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
    keys.insert(())
}

fn channel() -> (GraphCommandSender, mpsc::Receiver<GraphCommand>) {
    let (sender, receiver) = mpsc::channel();
    (GraphCommandSender::new(sender), receiver)
}

// ============================================================================
// Tests: Capability
// ============================================================================

#[test]
fn test_wireframe_capability_maps_to_set_wireframe() {
    assert_eq!(Capability::Wireframe.state_change(), StateChange::SetWireframe(true));
    assert_eq!(Capability::Wireframe.flag(), Capabilities::WIREFRAME);
    assert_eq!(Capability::Wireframe.to_string(), "wireframe");
}

#[test]
fn test_capabilities_supports() {
    assert!(Capabilities::WIREFRAME.supports(Capability::Wireframe));
    assert!(!Capabilities::empty().supports(Capability::Wireframe));
}

// ============================================================================
// Tests: NodeBindings
// ============================================================================

#[test]
fn test_no_conditions_always_holds() {
    let bindings = NodeBindings::default();
    assert!(bindings.condition_holds());
}

#[test]
fn test_all_conditions_must_hold() {
    let flag = ObservableBool::new("a", true);
    let mut bindings = NodeBindings::default();
    bindings.conditions.push(Box::new(|| true));
    let reader = flag.clone();
    bindings.conditions.push(Box::new(move || reader.get()));

    assert!(bindings.condition_holds());
    flag.set(false);
    assert!(!bindings.condition_holds());
}

// ============================================================================
// Tests: NodeSetup
// ============================================================================

#[test]
fn test_setup_desired_state_changes() {
    let (sender, _receiver) = channel();
    let mut bindings = NodeBindings::default();
    let mut setup = NodeSetup::new(test_key(), "test:node", Capabilities::empty(), &mut bindings, &sender);

    assert!(setup.add_desired_state_change(StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER)));
    assert!(!setup.add_desired_state_change(StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER)));
    assert!(!setup.remove_desired_state_change(&StateChange::EnableBlending));
    assert_eq!(setup.desired_state_changes().len(), 1);
    assert_eq!(setup.name(), "test:node");
}

#[test]
fn test_require_subscription_queues_reevaluation() {
    let (sender, receiver) = channel();
    let key = test_key();
    let setting = ObservableBool::new("rendering.dynamic_shadows", false);
    let mut bindings = NodeBindings::default();
    {
        let mut setup = NodeSetup::new(key, "test:node", Capabilities::empty(), &mut bindings, &sender);
        setup.require_subscription(&setting);
    }

    setting.set(true);
    assert_eq!(receiver.try_recv().ok(), Some(GraphCommand::ReevaluateConditions(key)));
    assert!(receiver.try_recv().is_err());

    drop(bindings);
    assert_eq!(setting.listener_count(), 0);
}

#[test]
fn test_bind_trigger_rejects_undeclared_capability() {
    let (sender, _receiver) = channel();
    let setting = ObservableBool::new("rendering.debug.wireframe", true);
    let mut bindings = NodeBindings::default();
    let mut setup = NodeSetup::new(test_key(), "test:node", Capabilities::empty(), &mut bindings, &sender);

    let result = setup.bind_trigger(&setting, Capability::Wireframe);
    assert!(matches!(result, Err(Error::UnsupportedCapability { .. })));
    assert!(setup.desired_state_changes().is_empty());
}

#[test]
fn test_bind_trigger_syncs_initial_value() {
    let (sender, _receiver) = channel();
    let setting = ObservableBool::new("rendering.debug.wireframe", true);
    let mut bindings = NodeBindings::default();
    {
        let mut setup = NodeSetup::new(test_key(), "test:node", Capabilities::WIREFRAME, &mut bindings, &sender);
        setup.bind_trigger(&setting, Capability::Wireframe).unwrap();
    }

    assert!(bindings.desired.contains(&StateChange::SetWireframe(true)));
    assert_eq!(bindings.triggers.len(), 1);
}
