//! Parametric updates
//!
//! Reconciles an existing house graph with a new parameter triple without
//! rebuilding the fixed parts: rescale the root, replace the window set,
//! recompute marker visibility. Calling this twice with the same parameters
//! leaves the graph in the same state as calling it once.

use crate::house::builder::{make_window, WINDOW_SLOTS};
use crate::house::graph::HouseGraph;
use crate::params::HouseParams;

/// Windows stop growing past this count no matter how many bedrooms
pub const MAX_WINDOWS: usize = 8;

/// Applies the parameter triple to the graph, in place
///
/// The window set is fully replaced and marker visibility fully recomputed
/// before this returns, so an animation tick can never observe a torn
/// update.
pub fn apply(graph: &mut HouseGraph, params: &HouseParams) {
    graph.scale = params.scale_factor();

    // Drop every attached window, then re-attach the slot-list prefix.
    graph.windows.clear();
    let window_count = (params.bedrooms() as usize).min(MAX_WINDOWS.min(WINDOW_SLOTS.len()));
    for slot in 0..window_count {
        graph.windows.push(make_window(graph.style, slot));
    }

    // The lowest-indexed markers represent the bathrooms.
    for (index, marker) in graph.markers.iter_mut().enumerate() {
        marker.visible = index < params.bathrooms() as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::graph::HouseStyle;
    use crate::house::{build, graph::MARKER_POOL};

    #[test]
    fn test_window_count_tracks_bedrooms_capped_at_eight() {
        let mut graph = build(HouseStyle::Stylized);
        for bedrooms in 1..=20 {
            let params = HouseParams::new(bedrooms, 2, 2000);
            apply(&mut graph, &params);
            assert_eq!(graph.window_count(), (bedrooms as usize).min(8));
        }
    }

    #[test]
    fn test_windows_fill_slot_prefix_in_order() {
        let mut graph = build(HouseStyle::Stylized);
        apply(&mut graph, &HouseParams::new(5, 2, 2000));
        let slots: Vec<usize> = graph.windows.iter().map(|w| w.slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_marker_visibility_is_index_predicate() {
        let mut graph = build(HouseStyle::Stylized);
        for bathrooms in 1..=10 {
            let params = HouseParams::new(3, bathrooms, 2000);
            apply(&mut graph, &params);
            for (i, marker) in graph.markers.iter().enumerate() {
                assert_eq!(marker.visible, i < bathrooms as usize);
            }
            assert_eq!(graph.visible_marker_count(), bathrooms as usize);
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut once = build(HouseStyle::Stylized);
        let mut twice = build(HouseStyle::Stylized);
        let params = HouseParams::new(6, 4, 3500);

        apply(&mut once, &params);
        apply(&mut twice, &params);
        apply(&mut twice, &params);

        assert_eq!(once.window_count(), twice.window_count());
        assert_eq!(
            once.visible_marker_indices(),
            twice.visible_marker_indices()
        );
        assert!((once.scale - twice.scale).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shrinking_bedrooms_removes_windows() {
        let mut graph = build(HouseStyle::Stylized);
        apply(&mut graph, &HouseParams::new(8, 2, 2000));
        assert_eq!(graph.window_count(), 8);
        apply(&mut graph, &HouseParams::new(2, 2, 2000));
        assert_eq!(graph.window_count(), 2);
    }

    #[test]
    fn test_end_to_end_parameter_sweep() {
        let mut graph = build(HouseStyle::Stylized);

        apply(&mut graph, &HouseParams::new(1, 1, 500));
        assert_eq!(graph.window_count(), 1);
        assert_eq!(graph.visible_marker_indices(), vec![0]);
        assert!((graph.scale - 0.633_333_3).abs() < 1e-5);

        apply(&mut graph, &HouseParams::new(8, 10, 10_000));
        assert_eq!(graph.window_count(), 8);
        assert_eq!(graph.visible_marker_count(), MARKER_POOL);
        assert!((graph.scale - 1.466_666_6).abs() < 1e-5);
    }
}
