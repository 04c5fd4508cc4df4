//! External collaborators of the render graph
//!
//! The graph core treats these as opaque services: it calls into them but
//! never implements graphics, camera math or subscriber iteration itself.
//!
//! - **GraphicsState**: backend pipeline state (wireframe, viewport, depth, blending, ...)
//! - **FrameBuffers**: named render targets (bind, size queries)
//! - **Camera**: active camera, projection updates parameterized by FOV
//! - **SubscriberRegistry**: external render participants, re-queried every frame

mod camera;
mod frame_buffers;
mod graphics_state;
mod subscribers;

#[cfg(test)]
pub(crate) mod mock_services;

pub use camera::{Camera, PerspectiveCamera};
pub use frame_buffers::{FboName, FrameBuffers, READ_ONLY_GBUFFER, SCENE_OPAQUE, SHADOW_MAP};
pub use graphics_state::{BlendFactor, DepthFunction, Face, GraphicsState, Viewport};
pub use subscribers::{
    for_each_subscriber, RenderSubscriber, SimpleSubscriberRegistry, SubscriberHandle,
    SubscriberRegistry,
};

use std::sync::{Arc, Mutex};
use crate::config::Config;
use crate::error::Result;

/// Services handed to node constructors.
///
/// Built once by whoever assembles the graph; cloning shares the same
/// underlying services.
#[derive(Clone)]
pub struct RenderServices {
    pub camera: Arc<Mutex<dyn Camera>>,
    pub config: Arc<Config>,
    pub subscribers: Arc<dyn SubscriberRegistry>,
}

impl RenderServices {
    pub fn new(
        camera: Arc<Mutex<dyn Camera>>,
        config: Arc<Config>,
        subscribers: Arc<dyn SubscriberRegistry>,
    ) -> Self {
        Self { camera, config, subscribers }
    }

    /// Run `f` with the active camera locked
    pub fn with_camera<R>(&self, f: impl FnOnce(&mut dyn Camera) -> Result<R>) -> Result<R> {
        let mut camera = self
            .camera
            .lock()
            .map_err(|_| crate::engine_err!("galaxy3d::RenderServices", "Camera lock poisoned"))?;
        f(&mut *camera)
    }
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod tests;
