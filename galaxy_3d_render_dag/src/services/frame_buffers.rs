/// Frame buffer target service.
///
/// Named render targets owned by the backend. State changes query their
/// size (viewport sizing) and bind them.

use std::borrow::Cow;
use std::fmt;
use crate::error::Result;
use super::graphics_state::GraphicsState;

/// Name of a frame buffer object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FboName(Cow<'static, str>);

impl FboName {
    /// Name known at compile time
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FboName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// G-buffer sampled by late passes (first person view, overlays)
pub const READ_ONLY_GBUFFER: FboName = FboName::from_static("engine:fbo.readOnlyGBuffer");

/// Depth-only shadow map rendered from the main light
pub const SHADOW_MAP: FboName = FboName::from_static("engine:fbo.shadowMap");

/// Opaque scene color, input of the blending passes
pub const SCENE_OPAQUE: FboName = FboName::from_static("engine:fbo.sceneOpaque");

/// Named render targets provided by the backend
pub trait FrameBuffers {
    /// Size in pixels of a named frame buffer
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if no frame buffer has this name.
    fn size_of(&self, name: &FboName) -> Result<(u32, u32)>;

    /// Size in pixels of the display (default frame buffer)
    fn display_size(&self) -> (u32, u32);

    /// Bind a named frame buffer for rendering
    fn bind(&self, name: &FboName, graphics: &mut dyn GraphicsState) -> Result<()> {
        self.size_of(name)?;
        graphics.bind_frame_buffer(Some(name))
    }
}
