//! House object graph
//!
//! A typed scene graph for one house: fixed structural parts, the
//! parameter-driven window list, and the fixed pool of indicator markers.
//! Windows and markers live in explicit fields rather than being fished out
//! of a generic child list, so the updater can replace exactly what it owns.

use cgmath::{Matrix4, Vector3};

use crate::gfx::geometry::GeometryData;
use crate::gfx::material::StandardMaterial;
use crate::gfx::renderer::PartGpu;

/// Number of indicator markers in the fixed pool
pub const MARKER_POOL: usize = 10;

/// The two visual presentations built from the same parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HouseStyle {
    Stylized,
    Realistic,
}

/// One mesh node of the house
///
/// Transforms are local to the house root; the renderer composes them with
/// the root rotation/scale each frame. `gpu` stays `None` until the renderer
/// first draws the part.
pub struct Part {
    pub name: &'static str,
    pub geometry: GeometryData,
    pub material: StandardMaterial,
    pub position: Vector3<f32>,
    /// Euler rotation in radians, applied Y then X then Z
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub gpu: Option<PartGpu>,
}

impl Part {
    pub fn new(name: &'static str, geometry: GeometryData, material: StandardMaterial) -> Self {
        Self {
            name,
            geometry,
            material,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            gpu: None,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn rotated_y(mut self, radians: f32) -> Self {
        self.rotation.y = radians;
        self
    }

    pub fn rotated_x(mut self, radians: f32) -> Self {
        self.rotation.x = radians;
        self
    }

    /// Local transform relative to the house root
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(cgmath::Rad(self.rotation.y))
            * Matrix4::from_angle_x(cgmath::Rad(self.rotation.x))
            * Matrix4::from_angle_z(cgmath::Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// A window assembly occupying one of the eight fixed slots
pub struct Window {
    pub frame: Part,
    pub glass: Part,
    /// Index into the fixed slot list this window was attached at
    pub slot: usize,
}

/// One indicator marker from the fixed pool
///
/// Markers representing bathrooms orbit the house while visible; hidden
/// markers keep their last position but are neither animated nor drawn.
pub struct Marker {
    pub part: Part,
    pub visible: bool,
}

/// The house as one owned object graph
///
/// Owned by exactly one viewport; the two variants never share parts.
pub struct HouseGraph {
    pub style: HouseStyle,
    /// Accumulated rotation about the vertical axis, radians
    pub rotation: f32,
    /// Uniform scale from the parameter triple
    pub scale: f32,
    pub structure: Vec<Part>,
    pub windows: Vec<Window>,
    pub markers: [Marker; MARKER_POOL],
}

impl HouseGraph {
    /// Root transform applied above every part's local transform
    pub fn root_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(cgmath::Rad(self.rotation)) * Matrix4::from_scale(self.scale)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn visible_marker_count(&self) -> usize {
        self.markers.iter().filter(|m| m.visible).count()
    }

    /// Indices of the currently visible markers, in pool order
    pub fn visible_marker_indices(&self) -> Vec<usize> {
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.visible)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;

    #[test]
    fn test_part_local_matrix_applies_translation() {
        let part = Part::new(
            "test",
            generate_box(1.0, 1.0, 1.0),
            StandardMaterial::default(),
        )
        .at(1.0, 2.0, 3.0);

        let m = part.local_matrix();
        assert!((m.w.x - 1.0).abs() < 1e-6);
        assert!((m.w.y - 2.0).abs() < 1e-6);
        assert!((m.w.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_root_matrix_scales_uniformly() {
        let mut graph = crate::house::build(HouseStyle::Stylized);
        graph.scale = 2.0;
        graph.rotation = 0.0;
        let m = graph.root_matrix();
        assert!((m.x.x - 2.0).abs() < 1e-6);
        assert!((m.y.y - 2.0).abs() < 1e-6);
        assert!((m.z.z - 2.0).abs() < 1e-6);
    }
}
