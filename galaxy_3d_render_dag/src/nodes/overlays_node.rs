/// HUD-like overlays drawn over the scene (selection boxes, debug gizmos).

use crate::dag::{Capabilities, Capability, FrameContext, Node, NodeSetup};
use crate::error::Result;
use crate::monitor::ActivityScope;
use crate::services::{for_each_subscriber, RenderServices};

/// Renders every subscriber's overlay pass.
///
/// Wireframe-capable. A no-op while `rendering.debug.hud_hidden` is set,
/// without leaving the task list.
pub struct OverlaysNode {
    services: RenderServices,
}

impl OverlaysNode {
    pub const NAME: &'static str = "engine:overlaysNode";

    pub fn new(services: &RenderServices) -> Self {
        Self {
            services: services.clone(),
        }
    }
}

impl Node for OverlaysNode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::WIREFRAME
    }

    fn initialise(&mut self, setup: &mut NodeSetup<'_>) -> Result<()> {
        setup.bind_trigger(self.services.config.rendering().debug().wireframe(), Capability::Wireframe)
    }

    fn process(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        if self.services.config.rendering().debug().is_hud_hidden() {
            return Ok(());
        }

        let _activity = ActivityScope::start("rendering/overlays");
        for_each_subscriber(&*self.services.subscribers, &mut *frame.graphics, |subscriber, graphics| {
            subscriber.render_overlay(graphics)
        })
    }
}
