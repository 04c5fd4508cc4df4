/// Tests for task list generation

use super::*;
use slotmap::SlotMap;
use crate::services::{BlendFactor, READ_ONLY_GBUFFER, SHADOW_MAP};

fn keys(count: usize) -> Vec<NodeKey> {
    let mut map: SlotMap<NodeKey, ()> = SlotMap::with_key();
    (0..count).map(|_| map.insert(())).collect()
}

fn set(changes: &[StateChange]) -> DesiredStateChanges {
    changes.iter().cloned().collect()
}

#[test]
fn test_empty_list() {
    let list = TaskList::empty();
    assert!(list.is_empty());
    assert!(list.tasks().is_empty());
    assert_eq!(list.generation(), 0);
}

#[test]
fn test_single_node_is_bracketed() {
    let k = keys(1);
    let desired = set(&[
        StateChange::BindFbo(READ_ONLY_GBUFFER),
        StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER),
    ]);

    let list = TaskList::build(3, [(k[0], &desired)]);

    assert_eq!(list.generation(), 3);
    assert_eq!(list.nodes(), &[k[0]]);
    assert_eq!(list.tasks(), &[
        RenderTask::ApplyStateChange(StateChange::BindFbo(READ_ONLY_GBUFFER)),
        RenderTask::ApplyStateChange(StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER)),
        RenderTask::ExecuteNode(k[0]),
        RenderTask::RevertStateChange(StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER)),
        RenderTask::RevertStateChange(StateChange::BindFbo(READ_ONLY_GBUFFER)),
    ]);
}

#[test]
fn test_shared_state_changes_stay_applied() {
    let k = keys(2);
    let opaque = set(&[
        StateChange::BindFbo(READ_ONLY_GBUFFER),
        StateChange::SetWireframe(true),
    ]);
    let blend = set(&[
        StateChange::BindFbo(READ_ONLY_GBUFFER),
        StateChange::EnableBlending,
        StateChange::SetBlendFunction(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha),
    ]);

    let list = TaskList::build(1, [(k[0], &opaque), (k[1], &blend)]);

    assert_eq!(list.tasks(), &[
        RenderTask::ApplyStateChange(StateChange::BindFbo(READ_ONLY_GBUFFER)),
        RenderTask::ApplyStateChange(StateChange::SetWireframe(true)),
        RenderTask::ExecuteNode(k[0]),
        RenderTask::RevertStateChange(StateChange::SetWireframe(true)),
        RenderTask::ApplyStateChange(StateChange::EnableBlending),
        RenderTask::ApplyStateChange(StateChange::SetBlendFunction(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)),
        RenderTask::ExecuteNode(k[1]),
        RenderTask::RevertStateChange(StateChange::SetBlendFunction(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)),
        RenderTask::RevertStateChange(StateChange::EnableBlending),
        RenderTask::RevertStateChange(StateChange::BindFbo(READ_ONLY_GBUFFER)),
    ]);
}

#[test]
fn test_different_targets_are_reverted_and_reapplied() {
    let k = keys(2);
    let shadows = set(&[StateChange::BindFbo(SHADOW_MAP)]);
    let opaque = set(&[StateChange::BindFbo(READ_ONLY_GBUFFER)]);

    let list = TaskList::build(1, [(k[0], &shadows), (k[1], &opaque)]);

    assert_eq!(list.tasks(), &[
        RenderTask::ApplyStateChange(StateChange::BindFbo(SHADOW_MAP)),
        RenderTask::ExecuteNode(k[0]),
        RenderTask::RevertStateChange(StateChange::BindFbo(SHADOW_MAP)),
        RenderTask::ApplyStateChange(StateChange::BindFbo(READ_ONLY_GBUFFER)),
        RenderTask::ExecuteNode(k[1]),
        RenderTask::RevertStateChange(StateChange::BindFbo(READ_ONLY_GBUFFER)),
    ]);
}

#[test]
fn test_every_apply_has_a_matching_revert() {
    let k = keys(3);
    let a = set(&[StateChange::EnableFaceCulling, StateChange::DisableDepthWriting]);
    let b = set(&[]);
    let c = set(&[StateChange::DisableDepthWriting, StateChange::SetWireframe(true)]);

    let list = TaskList::build(1, [(k[0], &a), (k[1], &b), (k[2], &c)]);

    let applies = list.tasks().iter().filter(|t| matches!(t, RenderTask::ApplyStateChange(_))).count();
    let reverts = list.tasks().iter().filter(|t| matches!(t, RenderTask::RevertStateChange(_))).count();
    assert_eq!(applies, reverts);
    assert_eq!(applies, 4);
    assert!(list.contains(k[1]));
    assert_eq!(list.len(), 3);
}
