//! Light rigs
//!
//! Each scene variant carries a fixed rig: the stylized scene uses a simple
//! three-light setup, the realistic scene a richer five-light one. Rigs are
//! styling constants, never derived from the house parameters.

/// Maximum lights a rig can carry (sized for the realistic rig)
pub const MAX_LIGHTS: usize = 5;

/// Light kinds understood by the forward shader
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

/// A single light in a rig
#[derive(Copy, Clone, Debug)]
pub struct Light {
    pub kind: LightKind,
    /// World position for point lights; direction source for directional
    /// lights (the light looks from here toward the origin). Unused for
    /// ambient.
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            position: [0.0; 3],
            color,
            intensity,
        }
    }

    pub fn directional(position: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            color,
            intensity,
        }
    }

    pub fn point(position: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            color,
            intensity,
        }
    }
}

/// A fixed per-variant set of lights plus shadow settings
///
/// The first directional light in the rig is the shadow caster; its position
/// drives the shadow pass view-projection.
#[derive(Clone, Debug)]
pub struct LightRig {
    pub lights: Vec<Light>,
    pub shadow_map_size: u32,
}

impl LightRig {
    /// Simple rig for the stylized scene: ambient, one shadow-casting
    /// directional, one blue accent point light.
    pub fn stylized() -> Self {
        Self {
            lights: vec![
                Light::ambient([1.0, 1.0, 1.0], 0.6),
                Light::directional([10.0, 20.0, 10.0], [1.0, 1.0, 1.0], 0.8),
                Light::point([-5.0, 5.0, 5.0], [0.231, 0.510, 0.965], 0.5),
            ],
            shadow_map_size: 1024,
        }
    }

    /// Richer rig for the realistic scene: ambient, key directional with a
    /// higher-resolution shadow map, fill, and two rim/accent lights.
    pub fn realistic() -> Self {
        Self {
            lights: vec![
                Light::ambient([1.0, 1.0, 1.0], 0.45),
                Light::directional([12.0, 24.0, 8.0], [1.0, 0.98, 0.92], 1.0),
                Light::directional([-8.0, 10.0, -6.0], [0.75, 0.8, 0.9], 0.35),
                Light::point([-6.0, 4.0, 8.0], [0.9, 0.95, 1.0], 0.4),
                Light::point([5.0, 2.0, -7.0], [1.0, 0.85, 0.6], 0.3),
            ],
            shadow_map_size: 2048,
        }
    }

    /// Position of the shadow-casting key light
    pub fn key_light_position(&self) -> [f32; 3] {
        self.lights
            .iter()
            .find(|light| light.kind == LightKind::Directional)
            .map(|light| light.position)
            .unwrap_or([10.0, 20.0, 10.0])
    }

    /// Packs the rig into the fixed-size GPU uniform
    pub fn uniform(&self) -> LightsUniform {
        let mut packed = LightsUniform::zeroed();
        let count = self.lights.len().min(MAX_LIGHTS);
        for (slot, light) in self.lights.iter().take(MAX_LIGHTS).enumerate() {
            let kind = match light.kind {
                LightKind::Ambient => 0.0,
                LightKind::Directional => 1.0,
                LightKind::Point => 2.0,
            };
            packed.lights[slot] = LightUniform {
                position: [
                    light.position[0],
                    light.position[1],
                    light.position[2],
                    kind,
                ],
                color: [
                    light.color[0],
                    light.color[1],
                    light.color[2],
                    light.intensity,
                ],
            };
        }
        packed.count = [count as u32, 0, 0, 0];
        packed
    }
}

/// One light as seen by the shader
///
/// `position.w` encodes the light kind, `color.a` the intensity.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

/// The whole rig as seen by the shader
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightUniform; MAX_LIGHTS],
    /// Active light count in `.x`; the rest is alignment padding
    pub count: [u32; 4],
}

impl LightsUniform {
    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylized_rig_has_three_lights() {
        let rig = LightRig::stylized();
        assert_eq!(rig.lights.len(), 3);
        assert_eq!(rig.lights[0].kind, LightKind::Ambient);
        assert_eq!(rig.lights[1].kind, LightKind::Directional);
        assert_eq!(rig.lights[2].kind, LightKind::Point);
    }

    #[test]
    fn test_realistic_rig_has_five_lights_and_bigger_shadow_map() {
        let stylized = LightRig::stylized();
        let realistic = LightRig::realistic();
        assert_eq!(realistic.lights.len(), 5);
        assert!(realistic.shadow_map_size > stylized.shadow_map_size);
    }

    #[test]
    fn test_uniform_packs_kind_and_intensity() {
        let packed = LightRig::stylized().uniform();
        assert_eq!(packed.count[0], 3);
        // Directional key light sits in slot 1 with kind tag 1.0.
        assert_eq!(packed.lights[1].position[3], 1.0);
        assert!((packed.lights[1].color[3] - 0.8).abs() < f32::EPSILON);
        // Unused slots stay zeroed.
        assert_eq!(packed.lights[4].color, [0.0; 4]);
    }
}
