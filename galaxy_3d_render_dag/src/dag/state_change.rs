/// Reversible GPU state mutations.
///
/// A `StateChange` is a plain value: it describes a mutation and knows how
/// to enter and leave it, but holds no runtime state. Toggling a state on
/// or off for a node is expressed by adding or removing the value from the
/// node's [`DesiredStateChanges`], never by mutating the value.

use std::fmt;
use crate::error::Result;
use crate::services::{BlendFactor, DepthFunction, Face, FboName, Viewport};
use super::context::StateContext;

/// One reversible mutation of renderer/GPU state.
///
/// Two values are equal when they are the same kind of mutation with the
/// same target, which is what set membership relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateChange {
    /// Line polygon mode when `true`, fill when `false`
    SetWireframe(bool),
    /// Viewport covering the whole named frame buffer
    SetViewportToSizeOf(FboName),
    /// Render into the named frame buffer
    BindFbo(FboName),
    SetDepthFunction(DepthFunction),
    EnableBlending,
    /// Source and destination blend factors
    SetBlendFunction(BlendFactor, BlendFactor),
    DisableDepthWriting,
    EnableFaceCulling,
    SetFacesToCull(Face),
}

impl StateChange {
    /// Enter the state.
    ///
    /// Errors come only from the graphics or frame buffer services and are
    /// returned as-is.
    pub fn apply(&self, ctx: &mut StateContext<'_>) -> Result<()> {
        match self {
            StateChange::SetWireframe(enabled) => ctx.graphics.set_wireframe(*enabled),
            StateChange::SetViewportToSizeOf(fbo) => {
                let (width, height) = ctx.frame_buffers.size_of(fbo)?;
                ctx.graphics.set_viewport(Viewport::from_size(width, height))
            }
            StateChange::BindFbo(fbo) => ctx.frame_buffers.bind(fbo, &mut *ctx.graphics),
            StateChange::SetDepthFunction(function) => ctx.graphics.set_depth_function(*function),
            StateChange::EnableBlending => ctx.graphics.set_blending(true),
            StateChange::SetBlendFunction(source, destination) => {
                ctx.graphics.set_blend_function(*source, *destination)
            }
            StateChange::DisableDepthWriting => ctx.graphics.set_depth_writing(false),
            StateChange::EnableFaceCulling => ctx.graphics.set_face_culling(true),
            StateChange::SetFacesToCull(face) => ctx.graphics.set_faces_to_cull(*face),
        }
    }

    /// Leave the state, restoring the renderer default.
    pub fn revert(&self, ctx: &mut StateContext<'_>) -> Result<()> {
        match self {
            StateChange::SetWireframe(_) => ctx.graphics.set_wireframe(false),
            StateChange::SetViewportToSizeOf(_) => {
                let (width, height) = ctx.frame_buffers.display_size();
                ctx.graphics.set_viewport(Viewport::from_size(width, height))
            }
            StateChange::BindFbo(_) => ctx.graphics.bind_frame_buffer(None),
            StateChange::SetDepthFunction(_) => {
                ctx.graphics.set_depth_function(DepthFunction::default())
            }
            StateChange::EnableBlending => ctx.graphics.set_blending(false),
            StateChange::SetBlendFunction(_, _) => {
                ctx.graphics.set_blend_function(BlendFactor::One, BlendFactor::Zero)
            }
            StateChange::DisableDepthWriting => ctx.graphics.set_depth_writing(true),
            StateChange::EnableFaceCulling => ctx.graphics.set_face_culling(false),
            StateChange::SetFacesToCull(_) => ctx.graphics.set_faces_to_cull(Face::default()),
        }
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateChange::SetWireframe(enabled) => {
                write!(f, "SetWireframe: {}", if *enabled { "on" } else { "off" })
            }
            StateChange::SetViewportToSizeOf(fbo) => write!(f, "SetViewportToSizeOf: {}", fbo),
            StateChange::BindFbo(fbo) => write!(f, "BindFbo: {}", fbo),
            StateChange::SetDepthFunction(function) => write!(f, "SetDepthFunction: {:?}", function),
            StateChange::EnableBlending => write!(f, "EnableBlending"),
            StateChange::SetBlendFunction(source, destination) => {
                write!(f, "SetBlendFunction: {:?}, {:?}", source, destination)
            }
            StateChange::DisableDepthWriting => write!(f, "DisableDepthWriting"),
            StateChange::EnableFaceCulling => write!(f, "EnableFaceCulling"),
            StateChange::SetFacesToCull(face) => write!(f, "SetFacesToCull: {:?}", face),
        }
    }
}

/// The set of state changes a node needs active while it executes.
///
/// Membership is by equality. Iteration follows insertion order, which is
/// the order state changes are applied in; they are reverted in reverse.
/// Equality between two sets ignores order.
#[derive(Debug, Clone, Default)]
pub struct DesiredStateChanges {
    changes: Vec<StateChange>,
}

impl DesiredStateChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state change. Returns false (and does nothing) if already present.
    pub fn insert(&mut self, change: StateChange) -> bool {
        if self.changes.contains(&change) {
            return false;
        }
        self.changes.push(change);
        true
    }

    /// Remove a state change. Returns false (and does nothing) if absent.
    pub fn remove(&mut self, change: &StateChange) -> bool {
        match self.changes.iter().position(|c| c == change) {
            Some(index) => {
                self.changes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, change: &StateChange) -> bool {
        self.changes.contains(change)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateChange> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

impl PartialEq for DesiredStateChanges {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.changes.iter().all(|c| other.contains(c))
    }
}

impl Eq for DesiredStateChanges {}

impl<'a> IntoIterator for &'a DesiredStateChanges {
    type Item = &'a StateChange;
    type IntoIter = std::slice::Iter<'a, StateChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl FromIterator<StateChange> for DesiredStateChanges {
    fn from_iter<I: IntoIterator<Item = StateChange>>(iter: I) -> Self {
        let mut set = Self::new();
        for change in iter {
            set.insert(change);
        }
        set
    }
}

#[cfg(test)]
#[path = "state_change_tests.rs"]
mod tests;
