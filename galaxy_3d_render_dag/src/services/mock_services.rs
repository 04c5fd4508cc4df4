/// Mock services for unit tests (no GPU required)
///
/// Recording doubles for the graphics state, frame buffers, camera and
/// render subscribers, so the graph can be exercised end to end without a
/// graphics backend.

use std::sync::{Arc, Mutex};
use glam::Mat4;
use rustc_hash::FxHashMap;
use crate::config::Config;
use crate::error::{Error, Result};
use super::{
    BlendFactor, Camera, DepthFunction, Face, FboName, FrameBuffers, GraphicsState,
    RenderServices, RenderSubscriber, SimpleSubscriberRegistry, Viewport,
    READ_ONLY_GBUFFER, SCENE_OPAQUE, SHADOW_MAP,
};

/// Shared call log
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn take_log(log: &CallLog) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

// ============================================================================
// Mock GraphicsState
// ============================================================================

/// Records every call as a short string; optionally fails calls whose
/// record starts with `fail_on`.
#[derive(Debug, Default)]
pub struct MockGraphics {
    pub calls: Vec<String>,
    pub fail_on: Option<String>,
}

impl MockGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(prefix: &str) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(prefix.to_string()),
        }
    }

    pub fn take_calls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: String) -> Result<()> {
        if let Some(prefix) = &self.fail_on {
            if call.starts_with(prefix.as_str()) {
                return Err(Error::BackendError(format!("mock failure on {}", call)));
            }
        }
        self.calls.push(call);
        Ok(())
    }
}

impl GraphicsState for MockGraphics {
    fn set_wireframe(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("wireframe({})", enabled))
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record(format!("viewport({}x{})", viewport.width, viewport.height))
    }

    fn bind_frame_buffer(&mut self, target: Option<&FboName>) -> Result<()> {
        match target {
            Some(name) => self.record(format!("bind({})", name)),
            None => self.record("bind(default)".to_string()),
        }
    }

    fn set_depth_function(&mut self, function: DepthFunction) -> Result<()> {
        self.record(format!("depth_func({:?})", function))
    }

    fn set_blending(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("blending({})", enabled))
    }

    fn set_blend_function(&mut self, source: BlendFactor, destination: BlendFactor) -> Result<()> {
        self.record(format!("blend_func({:?},{:?})", source, destination))
    }

    fn set_depth_writing(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("depth_writing({})", enabled))
    }

    fn set_face_culling(&mut self, enabled: bool) -> Result<()> {
        self.record(format!("face_culling({})", enabled))
    }

    fn set_faces_to_cull(&mut self, face: Face) -> Result<()> {
        self.record(format!("cull({:?})", face))
    }

    fn push_matrix(&mut self) -> Result<()> {
        self.record("push_matrix".to_string())
    }

    fn pop_matrix(&mut self) -> Result<()> {
        self.record("pop_matrix".to_string())
    }

    fn load_identity(&mut self) -> Result<()> {
        self.record("load_identity".to_string())
    }

    fn load_projection_matrix(&mut self, _projection: &Mat4) -> Result<()> {
        self.record("load_projection".to_string())
    }
}

// ============================================================================
// Mock FrameBuffers
// ============================================================================

/// Fixed-size frame buffers: G-buffer and scene 1280x720, shadow map
/// 1024x1024, display 1920x1080.
#[derive(Debug)]
pub struct MockFrameBuffers {
    pub sizes: FxHashMap<FboName, (u32, u32)>,
    pub display: (u32, u32),
}

impl MockFrameBuffers {
    pub fn new() -> Self {
        let mut sizes = FxHashMap::default();
        sizes.insert(READ_ONLY_GBUFFER, (1280, 720));
        sizes.insert(SCENE_OPAQUE, (1280, 720));
        sizes.insert(SHADOW_MAP, (1024, 1024));
        Self {
            sizes,
            display: (1920, 1080),
        }
    }
}

impl FrameBuffers for MockFrameBuffers {
    fn size_of(&self, name: &FboName) -> Result<(u32, u32)> {
        self.sizes
            .get(name)
            .copied()
            .ok_or_else(|| Error::InvalidResource(format!("Unknown frame buffer '{}'", name)))
    }

    fn display_size(&self) -> (u32, u32) {
        self.display
    }
}

// ============================================================================
// Mock Camera
// ============================================================================

/// Camera recording matrix updates into a shared log
pub struct MockCamera {
    pub log: CallLog,
}

impl Camera for MockCamera {
    fn update_matrices(&mut self) {
        self.log.lock().unwrap().push("camera.update".to_string());
    }

    fn update_matrices_with_fov(&mut self, fov_degrees: f32) {
        self.log.lock().unwrap().push(format!("camera.update_fov({})", fov_degrees));
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

// ============================================================================
// Mock RenderSubscriber
// ============================================================================

/// Subscriber recording `<name>.<pass>` into a shared log
pub struct MockSubscriber {
    pub name: String,
    pub log: CallLog,
}

impl MockSubscriber {
    fn record(&self, pass: &str) -> Result<()> {
        self.log.lock().unwrap().push(format!("{}.{}", self.name, pass));
        Ok(())
    }
}

impl RenderSubscriber for MockSubscriber {
    fn render_opaque(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        self.record("opaque")
    }

    fn render_alpha_blend(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        self.record("alpha_blend")
    }

    fn render_overlay(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        self.record("overlay")
    }

    fn render_first_person(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        self.record("first_person")
    }

    fn render_shadows(&mut self, _graphics: &mut dyn GraphicsState) -> Result<()> {
        self.record("shadows")
    }
}

// ============================================================================
// Bundles
// ============================================================================

/// Services plus the logs their doubles write to
pub struct MockServices {
    pub services: RenderServices,
    pub config: Arc<Config>,
    pub registry: Arc<SimpleSubscriberRegistry>,
    /// Camera and subscriber calls, in order
    pub log: CallLog,
}

/// Services with a mock camera and one subscriber named "hand"
pub fn mock_services() -> MockServices {
    let log = new_log();
    let config = Arc::new(Config::new());
    let registry = Arc::new(SimpleSubscriberRegistry::new());
    registry.register(Arc::new(Mutex::new(MockSubscriber {
        name: "hand".to_string(),
        log: log.clone(),
    })));
    let camera: Arc<Mutex<dyn Camera>> = Arc::new(Mutex::new(MockCamera { log: log.clone() }));

    MockServices {
        services: RenderServices::new(camera, config.clone(), registry.clone()),
        config,
        registry,
        log,
    }
}
