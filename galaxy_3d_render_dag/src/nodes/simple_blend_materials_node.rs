/// Alpha-blended materials (glass, water surface, particles).

use crate::dag::{FrameContext, Node, NodeSetup, StateChange};
use crate::error::Result;
use crate::monitor::ActivityScope;
use crate::services::{for_each_subscriber, BlendFactor, RenderServices, READ_ONLY_GBUFFER};

/// Renders every subscriber's alpha-blend pass with standard
/// `SrcAlpha, OneMinusSrcAlpha` blending and depth writes off.
pub struct SimpleBlendMaterialsNode {
    services: RenderServices,
}

impl SimpleBlendMaterialsNode {
    pub const NAME: &'static str = "engine:simpleBlendMaterialsNode";

    pub fn new(services: &RenderServices) -> Self {
        Self {
            services: services.clone(),
        }
    }
}

impl Node for SimpleBlendMaterialsNode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn initialise(&mut self, setup: &mut NodeSetup<'_>) -> Result<()> {
        setup.add_desired_state_change(StateChange::BindFbo(READ_ONLY_GBUFFER));
        setup.add_desired_state_change(StateChange::EnableBlending);
        setup.add_desired_state_change(StateChange::SetBlendFunction(
            BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha,
        ));
        setup.add_desired_state_change(StateChange::DisableDepthWriting);
        Ok(())
    }

    fn process(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let _activity = ActivityScope::start("rendering/simpleBlendMaterials");
        for_each_subscriber(&*self.services.subscribers, &mut *frame.graphics, |subscriber, graphics| {
            subscriber.render_alpha_blend(graphics)
        })
    }
}
