/// Opaque geometry into the G-buffer.

use crate::dag::{Capabilities, Capability, FrameContext, Node, NodeSetup, StateChange};
use crate::error::Result;
use crate::monitor::ActivityScope;
use crate::services::{for_each_subscriber, RenderServices, READ_ONLY_GBUFFER};

/// Renders every subscriber's opaque pass. Wireframe-capable.
pub struct OpaqueObjectsNode {
    services: RenderServices,
}

impl OpaqueObjectsNode {
    pub const NAME: &'static str = "engine:opaqueObjectsNode";

    pub fn new(services: &RenderServices) -> Self {
        Self {
            services: services.clone(),
        }
    }
}

impl Node for OpaqueObjectsNode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::WIREFRAME
    }

    fn initialise(&mut self, setup: &mut NodeSetup<'_>) -> Result<()> {
        setup.bind_trigger(self.services.config.rendering().debug().wireframe(), Capability::Wireframe)?;
        setup.add_desired_state_change(StateChange::BindFbo(READ_ONLY_GBUFFER));
        setup.add_desired_state_change(StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER));
        Ok(())
    }

    fn process(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let _activity = ActivityScope::start("rendering/opaqueObjects");
        for_each_subscriber(&*self.services.subscribers, &mut *frame.graphics, |subscriber, graphics| {
            subscriber.render_opaque(graphics)
        })
    }
}
