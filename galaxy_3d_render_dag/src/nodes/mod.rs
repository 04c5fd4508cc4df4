//! Concrete render nodes
//!
//! Each node receives the [`RenderServices`](crate::services::RenderServices)
//! bundle in its constructor and declares its state changes, conditions
//! and triggers in `initialise()`.

mod default_graph;
mod first_person_view_node;
mod opaque_objects_node;
mod overlays_node;
mod shadow_map_node;
mod simple_blend_materials_node;

pub use default_graph::build_default_render_graph;
pub use first_person_view_node::{FirstPersonViewNode, FIRST_PERSON_FOV_DEGREES};
pub use opaque_objects_node::OpaqueObjectsNode;
pub use overlays_node::OverlaysNode;
pub use shadow_map_node::ShadowMapNode;
pub use simple_blend_materials_node::SimpleBlendMaterialsNode;

#[cfg(test)]
#[path = "nodes_tests.rs"]
mod tests;
