//! Assembly of the engine's standard frame.

use crate::dag::RenderGraph;
use crate::engine_info;
use crate::error::Result;
use crate::services::RenderServices;
use super::{
    FirstPersonViewNode, OpaqueObjectsNode, OverlaysNode, ShadowMapNode, SimpleBlendMaterialsNode,
};

/// Build the standard render graph:
///
/// ```text
/// shadow map ─▶ opaque objects ─▶ simple blend materials ─▶ overlays ─▶ first person view
/// ```
///
/// Every node is constructed with `services` and initialised.
///
/// # Errors
///
/// Returns the first node initialisation error.
pub fn build_default_render_graph(services: &RenderServices) -> Result<RenderGraph> {
    let mut graph = RenderGraph::new();

    let chain = [
        graph.add_node(ShadowMapNode::new(services))?,
        graph.add_node(OpaqueObjectsNode::new(services))?,
        graph.add_node(SimpleBlendMaterialsNode::new(services))?,
        graph.add_node(OverlaysNode::new(services))?,
        graph.add_node(FirstPersonViewNode::new(services))?,
    ];
    for pair in chain.windows(2) {
        graph.add_dependency(pair[0], pair[1])?;
    }

    engine_info!("galaxy3d::RenderGraph", "Default render graph built ({} nodes)", graph.node_count());
    Ok(graph)
}
