//! # Procedural Geometry Generation
//!
//! Every mesh in the visualiser is generated procedurally; there are no
//! model files. The house builder composes these primitives into parts.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned cuboid with explicit dimensions
//! - **Sphere**: UV sphere with configurable resolution
//! - **Cone**: flat-shaded cone; four segments make the stylized pyramid roof
//! - **Gable prism**: triangular prism for the realistic roof
//! - **Plane**: ground quad in the XZ plane

pub mod primitives;

pub use primitives::*;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<crate::gfx::vertex::Vertex3D> {
        use crate::gfx::vertex::Vertex3D;

        (0..self.positions.len())
            .map(|i| Vertex3D {
                position: self.positions[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
