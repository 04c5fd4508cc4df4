/// Camera service.
///
/// Nodes bracket their GPU work with projection updates: a node that wants
/// a narrow or wide field of view loads its own projection, renders, then
/// restores the default one.

use glam::{Mat4, Vec3};
use crate::error::Result;
use super::graphics_state::GraphicsState;

/// Active camera as seen by render nodes
pub trait Camera: Send {
    /// Recompute view/projection with the camera's own field of view
    fn update_matrices(&mut self);

    /// Recompute view/projection with an explicit field of view (degrees)
    fn update_matrices_with_fov(&mut self, fov_degrees: f32);

    fn view_matrix(&self) -> Mat4;

    fn projection_matrix(&self) -> Mat4;

    /// Upload the current projection matrix to the graphics state
    fn load_projection_matrix(&self, graphics: &mut dyn GraphicsState) -> Result<()> {
        graphics.load_projection_matrix(&self.projection_matrix())
    }
}

/// Perspective camera driven by position, direction and field of view.
///
/// Matrices are only recomputed by `update_matrices*`; setters leave them
/// stale until the next update, like the rest of the frame data.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    fov_degrees: f32,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
    active_fov_degrees: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_degrees,
            aspect_ratio,
            z_near,
            z_far,
            active_fov_degrees: fov_degrees,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the viewing direction (normalized internally; zero is ignored)
    pub fn set_direction(&mut self, direction: Vec3) {
        if let Some(normalized) = direction.try_normalize() {
            self.direction = normalized;
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Configured field of view (degrees)
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Field of view used by the last matrix update (degrees)
    pub fn active_fov_degrees(&self) -> f32 {
        self.active_fov_degrees
    }
}

impl Camera for PerspectiveCamera {
    fn update_matrices(&mut self) {
        self.update_matrices_with_fov(self.fov_degrees);
    }

    fn update_matrices_with_fov(&mut self, fov_degrees: f32) {
        self.active_fov_degrees = fov_degrees;
        self.view_matrix = Mat4::look_to_rh(self.position, self.direction, self.up);
        self.projection_matrix = Mat4::perspective_rh_gl(
            fov_degrees.to_radians(),
            self.aspect_ratio,
            self.z_near,
            self.z_far,
        );
    }

    fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }
}
