//! Per-frame animation
//!
//! Advances a house graph by one display frame: the whole house slowly spins
//! about the vertical axis, and in the stylized variant the visible markers
//! orbit it with a phase offset per marker and a gentle vertical bob. All of
//! this is plain math over the graph; redrawing is the viewport's job.

use std::f32::consts::TAU;

use crate::house::graph::{HouseGraph, HouseStyle};

/// House rotation per tick in radians (a full turn every ~1257 ticks)
pub const ROTATION_PER_TICK: f32 = 0.005;
/// Marker orbit angular speed in radians per tick
pub const ORBIT_SPEED: f32 = 0.02;
/// Marker orbit radius around the house, in house-local units
pub const ORBIT_RADIUS: f32 = 4.0;
/// Marker orbit base height
pub const ORBIT_HEIGHT: f32 = 3.0;
/// Vertical bob frequency in radians per tick
pub const BOB_SPEED: f32 = 0.05;
/// Vertical bob amplitude
pub const BOB_AMPLITUDE: f32 = 0.3;

/// Advances the graph to frame `frame`
///
/// The realistic variant only rotates; marker orbiting is a stylized-scene
/// feature.
pub fn advance(graph: &mut HouseGraph, frame: u64) {
    graph.rotation = (graph.rotation + ROTATION_PER_TICK) % TAU;

    if graph.style != HouseStyle::Stylized {
        return;
    }

    let visible = graph.visible_marker_count();
    if visible == 0 {
        return;
    }

    for (index, marker) in graph.markers.iter_mut().enumerate() {
        if marker.visible {
            let [x, y, z] = marker_position(index, visible, frame);
            marker.part.position.x = x;
            marker.part.position.y = y;
            marker.part.position.z = z;
        }
    }
}

/// Orbit position for a visible marker
///
/// Markers are spread at even phase offsets (`index / visible` of a full
/// turn) so they never bunch up, and the bob phase is offset by the pool
/// index so neighbours do not move in lockstep.
pub fn marker_position(index: usize, visible: usize, frame: u64) -> [f32; 3] {
    let angle = index as f32 / visible as f32 * TAU + frame as f32 * ORBIT_SPEED;
    [
        ORBIT_RADIUS * angle.cos(),
        ORBIT_HEIGHT + BOB_AMPLITUDE * (frame as f32 * BOB_SPEED + index as f32).sin(),
        ORBIT_RADIUS * angle.sin(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::{apply, build};
    use crate::params::HouseParams;

    #[test]
    fn test_marker_position_reference_sample() {
        // t = 0, index 0 of 2 visible markers: angle 0, no bob offset.
        let [x, y, z] = marker_position(0, 2, 0);
        assert!((x - 4.0).abs() < 1e-6);
        assert!((y - 3.0).abs() < 1e-6);
        assert!(z.abs() < 1e-6);
    }

    #[test]
    fn test_markers_evenly_phased() {
        // With 4 visible markers the phase offsets are quarter turns.
        let a = marker_position(0, 4, 0);
        let b = marker_position(1, 4, 0);
        assert!((a[0] - 4.0).abs() < 1e-5);
        assert!(b[0].abs() < 1e-4);
        assert!((b[2] - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_accumulates_per_tick() {
        let mut graph = build(HouseStyle::Stylized);
        apply(&mut graph, &HouseParams::new(3, 2, 2000));

        for frame in 0..100u64 {
            advance(&mut graph, frame);
        }
        assert!((graph.rotation - 0.005 * 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_wraps_at_full_turn() {
        let mut graph = build(HouseStyle::Stylized);
        apply(&mut graph, &HouseParams::new(3, 2, 2000));

        // ~1257 ticks per full turn; go a bit past one.
        for frame in 0..1400u64 {
            advance(&mut graph, frame);
        }
        assert!(graph.rotation >= 0.0);
        assert!(graph.rotation < TAU);
    }

    #[test]
    fn test_realistic_markers_stay_parked() {
        let mut graph = build(HouseStyle::Realistic);
        apply(&mut graph, &HouseParams::new(3, 4, 2000));

        let before: Vec<_> = graph.markers.iter().map(|m| m.part.position).collect();
        for frame in 0..50u64 {
            advance(&mut graph, frame);
        }
        let after: Vec<_> = graph.markers.iter().map(|m| m.part.position).collect();
        assert_eq!(before, after);
        // But the house still rotates.
        assert!(graph.rotation > 0.0);
    }

    #[test]
    fn test_hidden_markers_do_not_move() {
        let mut graph = build(HouseStyle::Stylized);
        apply(&mut graph, &HouseParams::new(3, 2, 2000));

        let parked = graph.markers[9].part.position;
        for frame in 0..50u64 {
            advance(&mut graph, frame);
        }
        assert_eq!(graph.markers[9].part.position, parked);
        // Visible markers did move.
        assert_ne!(
            graph.markers[0].part.position,
            graph.markers[1].part.position
        );
    }
}
