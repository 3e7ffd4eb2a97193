// Fixed screen-space projection

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Maps game coordinates (origin top-left, y down) onto the whole surface,
/// stretching if the window does not match the logical size
#[derive(Debug, Clone)]
pub struct Camera {
    view_proj: Mat4,
}

impl Camera {
    pub fn new(logical_size: Vec2) -> Self {
        let view_proj = Mat4::orthographic_rh(
            0.0,
            logical_size.x,
            logical_size.y, // bottom
            0.0,            // top
            -1.0,
            1.0,
        );
        Self { view_proj }
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
