/// Graphics state service.
///
/// The render graph never talks to a graphics API directly. State changes
/// and nodes go through [`GraphicsState`], implemented by the backend that
/// owns the GPU context on the render thread.

use glam::Mat4;
use crate::error::Result;
use super::frame_buffers::FboName;

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DepthFunction {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

impl Default for DepthFunction {
    fn default() -> Self {
        DepthFunction::LessOrEqual
    }
}

/// Blend factor for source/destination colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

/// Polygon faces selected for culling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

impl Default for Face {
    fn default() -> Self {
        Face::Back
    }
}

/// Viewport rectangle and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-size viewport at the origin with the default [0, 1] depth range
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Pipeline state of the backend graphics API.
///
/// Every call may fail with a backend error; the render graph passes such
/// failures through unchanged and never retries.
pub trait GraphicsState {
    /// Line (true) or fill (false) polygon mode
    fn set_wireframe(&mut self, enabled: bool) -> Result<()>;

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Bind a named frame buffer, or the default (display) one for `None`
    fn bind_frame_buffer(&mut self, target: Option<&FboName>) -> Result<()>;

    fn set_depth_function(&mut self, function: DepthFunction) -> Result<()>;

    fn set_blending(&mut self, enabled: bool) -> Result<()>;

    fn set_blend_function(&mut self, source: BlendFactor, destination: BlendFactor) -> Result<()>;

    fn set_depth_writing(&mut self, enabled: bool) -> Result<()>;

    fn set_face_culling(&mut self, enabled: bool) -> Result<()>;

    fn set_faces_to_cull(&mut self, face: Face) -> Result<()>;

    // ===== MATRIX STACK =====

    fn push_matrix(&mut self) -> Result<()>;

    fn pop_matrix(&mut self) -> Result<()>;

    fn load_identity(&mut self) -> Result<()>;

    fn load_projection_matrix(&mut self, projection: &Mat4) -> Result<()>;
}
