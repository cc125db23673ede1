//! House construction
//!
//! Builds the fixed parts of a house graph for one style. All dimensions and
//! colors here are styling constants; only scale, window count, and marker
//! visibility ever respond to the parameters, and those are applied by
//! [`crate::house::update`] after building.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::gfx::geometry::{
    generate_box, generate_cone, generate_gable_prism, generate_sphere,
};
use crate::gfx::material::StandardMaterial;
use crate::house::animate::{ORBIT_HEIGHT, ORBIT_RADIUS};
use crate::house::graph::{HouseGraph, HouseStyle, Marker, Part, Window, MARKER_POOL};

/// The eight fixed window slots, in attachment order: two pairs on the front
/// face, then one pair on each side face. Window counts below eight always
/// occupy a prefix of this list.
pub const WINDOW_SLOTS: [([f32; 3], f32); 8] = [
    ([-1.2, 0.5, 2.05], 0.0),
    ([1.2, 0.5, 2.05], 0.0),
    ([-1.2, -0.5, 2.05], 0.0),
    ([1.2, -0.5, 2.05], 0.0),
    ([2.05, 0.5, -1.2], FRAC_PI_2),
    ([2.05, 0.5, 1.2], FRAC_PI_2),
    ([-2.05, 0.5, -1.2], -FRAC_PI_2),
    ([-2.05, 0.5, 1.2], -FRAC_PI_2),
];

/// Builds the fixed parts of a house for the given style
///
/// The returned graph has no windows attached and all markers hidden; the
/// caller must run the parametric update once to populate them for the
/// current parameters.
pub fn build(style: HouseStyle) -> HouseGraph {
    let structure = match style {
        HouseStyle::Stylized => stylized_structure(),
        HouseStyle::Realistic => realistic_structure(),
    };

    let markers = std::array::from_fn(|i| Marker {
        part: marker_part(i),
        visible: false,
    });

    HouseGraph {
        style,
        rotation: 0.0,
        scale: 1.0,
        structure,
        windows: Vec::new(),
        markers,
    }
}

/// Creates the window assembly for one slot
pub fn make_window(style: HouseStyle, slot: usize) -> Window {
    let (position, yaw) = WINDOW_SLOTS[slot];

    let (frame_material, glass_material) = match style {
        HouseStyle::Stylized => (
            StandardMaterial::new(0.725, 0.110, 0.110, 0.6),
            StandardMaterial::new(0.529, 0.808, 0.922, 0.1).with_alpha(0.7),
        ),
        HouseStyle::Realistic => (
            StandardMaterial::new(0.90, 0.89, 0.86, 0.5),
            StandardMaterial::new(0.60, 0.75, 0.85, 0.05)
                .with_alpha(0.5)
                .with_metallic(0.1),
        ),
    };

    let frame = Part::new("window_frame", generate_box(0.7, 0.7, 0.1), frame_material)
        .at(position[0], position[1], position[2])
        .rotated_y(yaw);

    // Glass sits just outside the frame along the slot's outward direction.
    let offset = 0.03;
    let glass = Part::new("window_glass", generate_box(0.6, 0.6, 0.05), glass_material)
        .at(
            position[0] + yaw.sin() * offset,
            position[1],
            position[2] + yaw.cos() * offset,
        )
        .rotated_y(yaw);

    Window { frame, glass, slot }
}

fn marker_part(index: usize) -> Part {
    let material = StandardMaterial::new(0.231, 0.510, 0.965, 0.3).with_emission(
        0.231, 0.510, 0.965, 0.5,
    );

    // Parked on a static ring; the stylized animation overwrites this every
    // tick, the realistic variant leaves the ring as-is.
    let angle = index as f32 / MARKER_POOL as f32 * 2.0 * PI;
    Part::new("marker", generate_sphere(0.2, 16, 16), material).at(
        ORBIT_RADIUS * angle.cos(),
        ORBIT_HEIGHT,
        ORBIT_RADIUS * angle.sin(),
    )
}

/// Flat-colored house: box base, pyramid roof, door, knob
fn stylized_structure() -> Vec<Part> {
    let mut parts = Vec::new();

    parts.push(Part::new(
        "base",
        generate_box(4.0, 3.0, 4.0),
        StandardMaterial::new(0.831, 0.773, 0.627, 0.7),
    ));

    parts.push(
        Part::new(
            "roof",
            generate_cone(3.5, 2.5, 4),
            StandardMaterial::new(0.725, 0.110, 0.110, 0.6),
        )
        .at(0.0, 2.75, 0.0)
        .rotated_y(PI / 4.0),
    );

    parts.push(
        Part::new(
            "door",
            generate_box(0.8, 1.5, 0.1),
            StandardMaterial::new(0.420, 0.267, 0.137, 0.8),
        )
        .at(0.0, -0.75, 2.05),
    );

    parts.push(
        Part::new(
            "door_knob",
            generate_sphere(0.05, 16, 16),
            StandardMaterial::new(0.984, 0.749, 0.141, 0.2).with_metallic(0.8),
        )
        .at(0.3, -0.75, 2.1),
    );

    parts
}

/// Higher-detail house: gabled roof pair, chimney, framed panel door
fn realistic_structure() -> Vec<Part> {
    let mut parts = Vec::new();

    parts.push(Part::new(
        "base",
        generate_box(4.0, 3.0, 4.0),
        StandardMaterial::new(0.780, 0.720, 0.600, 0.85),
    ));

    let shingle = StandardMaterial::new(0.250, 0.200, 0.180, 0.9);
    parts.push(
        Part::new("roof_gable_a", generate_gable_prism(4.4, 1.8, 4.4), shingle.clone())
            .at(0.0, 1.5, 0.0),
    );
    parts.push(
        Part::new("roof_gable_b", generate_gable_prism(4.4, 1.8, 4.4), shingle)
            .at(0.0, 1.5, 0.0)
            .rotated_y(FRAC_PI_2),
    );

    parts.push(
        Part::new(
            "chimney",
            generate_box(0.5, 1.2, 0.5),
            StandardMaterial::new(0.450, 0.200, 0.150, 0.9),
        )
        .at(1.2, 2.4, 0.8),
    );

    parts.push(
        Part::new(
            "door_frame",
            generate_box(1.0, 1.7, 0.08),
            StandardMaterial::new(0.300, 0.190, 0.100, 0.8),
        )
        .at(0.0, -0.65, 2.02),
    );
    parts.push(
        Part::new(
            "door_slab",
            generate_box(0.8, 1.5, 0.1),
            StandardMaterial::new(0.380, 0.240, 0.120, 0.7),
        )
        .at(0.0, -0.75, 2.06),
    );
    // Two inset decorative panels on the slab
    parts.push(
        Part::new(
            "door_panel_upper",
            generate_box(0.5, 0.5, 0.03),
            StandardMaterial::new(0.330, 0.210, 0.105, 0.75),
        )
        .at(0.0, -0.45, 2.12),
    );
    parts.push(
        Part::new(
            "door_panel_lower",
            generate_box(0.5, 0.5, 0.03),
            StandardMaterial::new(0.330, 0.210, 0.105, 0.75),
        )
        .at(0.0, -1.05, 2.12),
    );

    parts.push(
        Part::new(
            "door_knob",
            generate_sphere(0.05, 16, 16),
            StandardMaterial::new(0.850, 0.750, 0.400, 0.25).with_metallic(0.9),
        )
        .at(0.3, -0.75, 2.14),
    );

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_returns_empty_window_list() {
        let graph = build(HouseStyle::Stylized);
        assert_eq!(graph.window_count(), 0);
    }

    #[test]
    fn test_build_hides_all_markers() {
        for style in [HouseStyle::Stylized, HouseStyle::Realistic] {
            let graph = build(style);
            assert_eq!(graph.markers.len(), MARKER_POOL);
            assert_eq!(graph.visible_marker_count(), 0);
        }
    }

    #[test]
    fn test_stylized_structure_parts() {
        let graph = build(HouseStyle::Stylized);
        let names: Vec<&str> = graph.structure.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["base", "roof", "door", "door_knob"]);
    }

    #[test]
    fn test_realistic_structure_has_gables_and_chimney() {
        let graph = build(HouseStyle::Realistic);
        let names: Vec<&str> = graph.structure.iter().map(|p| p.name).collect();
        assert!(names.contains(&"roof_gable_a"));
        assert!(names.contains(&"roof_gable_b"));
        assert!(names.contains(&"chimney"));
        assert!(names.contains(&"door_frame"));
        assert!(names.contains(&"door_panel_upper"));
    }

    #[test]
    fn test_window_slots_front_first() {
        // The first four slots are on the front face (z = 2.05), the rest on
        // the sides.
        for (pos, yaw) in WINDOW_SLOTS.iter().take(4) {
            assert!((pos[2] - 2.05).abs() < f32::EPSILON);
            assert_eq!(*yaw, 0.0);
        }
        for (pos, _) in WINDOW_SLOTS.iter().skip(4) {
            assert!((pos[0].abs() - 2.05).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_glass_offset_follows_slot_orientation() {
        // Front window: glass pushed along +Z.
        let front = make_window(HouseStyle::Stylized, 0);
        assert!(front.glass.position.z > front.frame.position.z);

        // Right-side window: glass pushed along +X.
        let side = make_window(HouseStyle::Stylized, 4);
        assert!(side.glass.position.x > side.frame.position.x);
        assert!((side.glass.position.z - side.frame.position.z).abs() < 1e-6);
    }

    #[test]
    fn test_markers_start_on_static_ring() {
        let graph = build(HouseStyle::Realistic);
        for marker in graph.markers.iter() {
            let p = marker.part.position;
            let radius = (p.x * p.x + p.z * p.z).sqrt();
            assert!((radius - ORBIT_RADIUS).abs() < 1e-5);
            assert!((p.y - ORBIT_HEIGHT).abs() < 1e-5);
        }
    }
}
