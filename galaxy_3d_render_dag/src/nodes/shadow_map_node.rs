/// Shadow map generation.

use crate::dag::{FrameContext, Node, NodeSetup, StateChange};
use crate::error::Result;
use crate::monitor::ActivityScope;
use crate::services::{for_each_subscriber, Face, RenderServices, SHADOW_MAP};

/// Renders every subscriber's shadow casters into the shadow map.
///
/// Only part of the graph while `rendering.dynamic_shadows` is set. Front
/// faces are culled to reduce shadow acne.
pub struct ShadowMapNode {
    services: RenderServices,
}

impl ShadowMapNode {
    pub const NAME: &'static str = "engine:shadowMapNode";

    pub fn new(services: &RenderServices) -> Self {
        Self {
            services: services.clone(),
        }
    }
}

impl Node for ShadowMapNode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn initialise(&mut self, setup: &mut NodeSetup<'_>) -> Result<()> {
        let dynamic_shadows = self.services.config.rendering().dynamic_shadows().clone();
        setup.require_subscription(&dynamic_shadows);
        setup.require_condition(move || dynamic_shadows.get());

        setup.add_desired_state_change(StateChange::BindFbo(SHADOW_MAP));
        setup.add_desired_state_change(StateChange::SetViewportToSizeOf(SHADOW_MAP));
        setup.add_desired_state_change(StateChange::EnableFaceCulling);
        setup.add_desired_state_change(StateChange::SetFacesToCull(Face::Front));
        Ok(())
    }

    fn process(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let _activity = ActivityScope::start("rendering/shadowMap");
        for_each_subscriber(&*self.services.subscribers, &mut *frame.graphics, |subscriber, graphics| {
            subscriber.render_shadows(graphics)
        })
    }
}
