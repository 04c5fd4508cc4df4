/// First person view: the objects held in hand (pick, axe, torch, ...).

use crate::dag::{Capabilities, Capability, FrameContext, Node, NodeSetup, StateChange};
use crate::error::Result;
use crate::monitor::ActivityScope;
use crate::services::{
    for_each_subscriber, DepthFunction, GraphicsState, RenderServices, READ_ONLY_GBUFFER,
};

/// Field of view used while rendering first person elements
pub const FIRST_PERSON_FOV_DEGREES: f32 = 90.0;

/// Renders first person elements on top of the G-buffer.
///
/// Wireframe-capable through `rendering.debug.wireframe`. Stays in the task
/// list while `rendering.debug.first_person_elements_hidden` is set, but
/// does no work.
pub struct FirstPersonViewNode {
    services: RenderServices,
}

impl FirstPersonViewNode {
    pub const NAME: &'static str = "engine:firstPersonViewNode";

    pub fn new(services: &RenderServices) -> Self {
        Self {
            services: services.clone(),
        }
    }
}

impl Node for FirstPersonViewNode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::WIREFRAME
    }

    fn initialise(&mut self, setup: &mut NodeSetup<'_>) -> Result<()> {
        let debug = self.services.config.rendering().debug();
        setup.bind_trigger(debug.wireframe(), Capability::Wireframe)?;
        setup.add_desired_state_change(StateChange::SetViewportToSizeOf(READ_ONLY_GBUFFER));
        Ok(())
    }

    fn process(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        if self.services.config.rendering().debug().is_first_person_elements_hidden() {
            return Ok(());
        }

        let _activity = ActivityScope::start("rendering/firstPersonView");
        let graphics = &mut *frame.graphics;

        frame.frame_buffers.bind(&READ_ONLY_GBUFFER, &mut *graphics)?;

        graphics.push_matrix()?;
        let drawn = self.draw_held_items(&mut *graphics);
        let restored = self.restore(&mut *graphics);
        drawn.and(restored)
    }
}

impl FirstPersonViewNode {
    fn draw_held_items(&self, graphics: &mut dyn GraphicsState) -> Result<()> {
        graphics.load_identity()?;
        graphics.set_depth_function(DepthFunction::Always)?;

        self.services.with_camera(|camera| {
            camera.update_matrices_with_fov(FIRST_PERSON_FOV_DEGREES);
            camera.load_projection_matrix(&mut *graphics)
        })?;

        for_each_subscriber(&*self.services.subscribers, graphics, |subscriber, graphics| {
            subscriber.render_first_person(graphics)
        })
    }

    /// Undo everything `draw_held_items` may have changed. Every step runs
    /// even if an earlier one fails; the first failure is returned.
    fn restore(&self, graphics: &mut dyn GraphicsState) -> Result<()> {
        let camera = self.services.with_camera(|camera| {
            camera.update_matrices();
            camera.load_projection_matrix(&mut *graphics)
        });
        let depth = graphics.set_depth_function(DepthFunction::LessOrEqual);
        let popped = graphics.pop_matrix();
        camera.and(depth).and(popped)
    }
}
