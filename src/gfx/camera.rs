//! Fixed perspective camera
//!
//! The visualiser does not orbit or pan; each viewport gets a camera parked
//! at a fixed eye position looking at the house. Only the aspect ratio ever
//! changes, on window resize.

use cgmath::{perspective, Deg, Matrix4, Point3, SquareMatrix, Vector3};

/// Perspective camera with a fixed eye and look-at target
#[derive(Debug, Clone)]
pub struct ViewCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl ViewCamera {
    /// Creates a camera at `eye` looking at `target`
    pub fn new(eye: Point3<f32>, target: Point3<f32>, fov_y_deg: f32, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            fov_y_deg,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Updates the projection aspect ratio for a new surface size
    ///
    /// Ignores degenerate sizes so a minimized window cannot poison the
    /// projection matrix.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = perspective(Deg(self.fov_y_deg), self.aspect, self.near, self.far);
        proj * view
    }

    /// Produces the GPU-side uniform for this camera
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
            view_proj: self.build_view_projection_matrix().into(),
        }
    }
}

/// Camera data as uploaded to the GPU
///
/// The eye position is stored in homogeneous coordinates to satisfy the
/// 16 byte alignment requirement.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = ViewCamera::new(
            Point3::new(8.0, 6.0, 12.0),
            Point3::new(0.0, 0.0, 0.0),
            45.0,
            1.0,
        );
        camera.resize_projection(1600, 800);
        assert!((camera.aspect - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resize_ignores_zero_dimensions() {
        let mut camera = ViewCamera::new(
            Point3::new(8.0, 6.0, 12.0),
            Point3::new(0.0, 0.0, 0.0),
            45.0,
            1.5,
        );
        camera.resize_projection(0, 600);
        camera.resize_projection(800, 0);
        assert!((camera.aspect - 1.5).abs() < f32::EPSILON);
    }
}
