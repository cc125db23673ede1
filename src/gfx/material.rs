//! Standard surface materials
//!
//! Physically-inspired material properties (base color, roughness, metalness,
//! opacity, emissive) as used by the house builder. Every part of the house
//! owns its material directly; the renderer uploads it as a small uniform the
//! first time the part is drawn.

/// Material definition with standard surface properties
#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    /// RGBA base color; alpha below 1.0 enables blending (window glass)
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }
}

impl StandardMaterial {
    /// Creates an opaque material from RGB color and roughness
    pub fn new(r: f32, g: f32, b: f32, roughness: f32) -> Self {
        Self {
            base_color: [r, g, b, 1.0],
            roughness: roughness.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color and intensity
    pub fn with_emission(mut self, r: f32, g: f32, b: f32, intensity: f32) -> Self {
        self.emissive = [r, g, b];
        self.emissive_intensity = intensity;
        self
    }

    /// True when the material needs alpha blending
    pub fn is_transparent(&self) -> bool {
        self.base_color[3] < 1.0
    }

    /// GPU uniform for this material
    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            emissive_intensity: self.emissive_intensity,
            metallic: self.metallic,
            roughness: self.roughness,
            _padding: [0.0; 2],
        }
    }
}

/// GPU uniform data for materials
///
/// Must match the `Material` struct in `house.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub metallic: f32,
    pub roughness: f32,
    _padding: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_clamps_factors() {
        let material = StandardMaterial::new(1.0, 0.5, 0.2, 2.0)
            .with_metallic(-1.0)
            .with_alpha(3.0);
        assert!((material.roughness - 1.0).abs() < f32::EPSILON);
        assert!((material.metallic - 0.0).abs() < f32::EPSILON);
        assert!((material.base_color[3] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_transparency_detection() {
        let glass = StandardMaterial::new(0.53, 0.81, 0.92, 0.1).with_alpha(0.7);
        assert!(glass.is_transparent());
        assert!(!StandardMaterial::default().is_transparent());
    }
}
