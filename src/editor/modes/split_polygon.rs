//! Split polygon mode.
//!
//! With a single Polygon selected, clicks trace a cut line. A click landing
//! outside the polygon (with at least one earlier click) terminates the
//! line: a thin corridor is buffered around it and subtracted from the
//! polygon, leaving a MultiPolygon of the split parts. A cut line that never
//! touches the polygon cancels silently.

use bevy::window::SystemCursorIcon;
use geo::{BooleanOps, Contains, LineString, Point, Polygon};

use crate::constants::DEFAULT_SPLIT_GAP;
use crate::editor::action::{ClickOutcome, Diagnostic, EditAction, EditType, MoveOutcome};
use crate::editor::event::{ClickEvent, PointerMoveEvent};
use crate::editor::state::EditState;
use crate::features::{Feature, Geometry};
use crate::geometry::{
    corridor, nearest_point_on_line, planar_bearing, segment_intersection, snap_to_right_angle,
    MapCoord,
};

use super::ModeHandler;

#[derive(Default)]
pub struct SplitPolygonMode;

fn selected_polygon(state: &EditState) -> Option<(usize, Polygon<f64>)> {
    let index = state.single_selected_index()?;
    match &state.data().feature(index)?.geometry {
        Geometry::Polygon(poly) => Some((index, poly.clone())),
        _ => None,
    }
}

/// Snap `candidate` to a right angle relative to the polygon edge nearest to
/// the previous cut point.
fn snapped_point(polygon: &Polygon<f64>, previous: MapCoord, candidate: MapCoord) -> MapCoord {
    let Some(nearest) = nearest_point_on_line(polygon.exterior(), previous) else {
        return candidate;
    };
    let coords = &polygon.exterior().0;
    let edge_bearing = planar_bearing(coords[nearest.segment_index], coords[nearest.segment_index + 1]);
    snap_to_right_angle(previous, candidate, edge_bearing)
}

/// True when any cut segment crosses a ring of the polygon. The terminal
/// click lands outside the polygon, so every usable cut crosses a ring.
fn cut_crosses_boundary(cut: &LineString<f64>, polygon: &Polygon<f64>) -> bool {
    cut.lines().any(|seg| {
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .flat_map(|ring| ring.lines())
            .any(|edge| segment_intersection(seg, edge).is_some())
    })
}

impl ModeHandler for SplitPolygonMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        let Some((index, polygon)) = selected_polygon(state) else {
            state.reset_gesture();
            return ClickOutcome::warn(Diagnostic::invalid_selection(
                "splitting requires a single Polygon selection",
            ));
        };

        let point = match state.click_sequence().last() {
            Some(&previous) if state.settings().lock_90_degree => {
                snapped_point(&polygon, previous, event.map_coords)
            }
            _ => event.map_coords,
        };
        state.push_click(point);

        let terminal =
            state.click_sequence().len() >= 2 && !polygon.contains(&Point::from(point));
        if !terminal {
            return ClickOutcome::none();
        }

        let cut = LineString::new(state.click_sequence().to_vec());
        state.reset_gesture();

        // A cut that never touches the polygon is a no-op, not an error
        if !cut_crosses_boundary(&cut, &polygon) {
            return ClickOutcome::none();
        }

        let gap = if state.settings().split_gap > 0.0 {
            state.settings().split_gap
        } else {
            DEFAULT_SPLIT_GAP
        };
        let parts = polygon.difference(&corridor(&cut, gap));
        if parts.0.is_empty() {
            return ClickOutcome::warn(Diagnostic::degenerate_geometry(
                "the cut removed the entire polygon",
            ));
        }

        ClickOutcome::action(EditAction {
            updated_data: state
                .data()
                .replace_geometry(index, Geometry::MultiPolygon(parts)),
            edit_type: EditType::Split,
            feature_indexes: vec![index],
            context: None,
        })
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        state: &mut EditState,
    ) -> MoveOutcome {
        if state.click_sequence().is_empty() {
            return MoveOutcome::none();
        }

        let cursor = match (selected_polygon(state), state.click_sequence().last()) {
            (Some((_, polygon)), Some(&previous)) if state.settings().lock_90_degree => {
                snapped_point(&polygon, previous, event.map_coords)
            }
            _ => event.map_coords,
        };
        let mut preview = state.click_sequence().to_vec();
        preview.push(cursor);
        state.set_tentative_feature(Feature::new(Geometry::LineString(LineString::new(preview))));
        MoveOutcome::none()
    }

    fn cursor(&self, _is_dragging: bool) -> SystemCursorIcon {
        SystemCursorIcon::Crosshair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::event::ModifierState;
    use crate::features::FeatureCollection;
    use geo::{coord, Area};

    fn square_state() -> EditState {
        let mut state = EditState::new(FeatureCollection::from_features(vec![Feature::new(
            Geometry::Polygon(Polygon::new(
                LineString::new(vec![
                    coord! { x: 0.0, y: 0.0 },
                    coord! { x: 10.0, y: 0.0 },
                    coord! { x: 10.0, y: 10.0 },
                    coord! { x: 0.0, y: 10.0 },
                ]),
                vec![],
            )),
        )]));
        state.set_selection([0]);
        state
    }

    fn click(x: f64, y: f64) -> ClickEvent {
        ClickEvent {
            map_coords: coord! { x: x, y: y },
            screen_coords: [0.0, 0.0],
            modifiers: ModifierState::default(),
            pick_radius: 0.5,
        }
    }

    #[test]
    fn test_vertical_cut_splits_square_in_two() {
        let mut mode = SplitPolygonMode;
        let mut state = square_state();

        // Enter above the square, exit below it
        assert!(mode.handle_click(&click(5.0, 12.0), &mut state).action.is_none());
        let outcome = mode.handle_click(&click(5.0, -2.0), &mut state);

        let action = outcome.action.unwrap();
        assert_eq!(action.edit_type, EditType::Split);
        assert_eq!(action.feature_indexes, vec![0]);
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.0.len(), 2);
                for part in &mp.0 {
                    assert!(part.unsigned_area() > 0.0);
                }
                // The corridor gap eats a sliver of area
                let total: f64 = mp.0.iter().map(|p| p.unsigned_area()).sum();
                assert!(total < 100.0);
                assert!(total > 90.0);
            }
            other => panic!("expected MultiPolygon, got {}", other.type_name()),
        }
        assert!(state.click_sequence().is_empty());
    }

    #[test]
    fn test_non_intersecting_cut_cancels_silently() {
        let mut mode = SplitPolygonMode;
        let mut state = square_state();

        mode.handle_click(&click(20.0, 0.0), &mut state);
        let outcome = mode.handle_click(&click(20.0, 10.0), &mut state);
        assert!(outcome.action.is_none());
        assert!(outcome.diagnostic.is_none());
        assert!(state.click_sequence().is_empty());
    }

    #[test]
    fn test_wrong_selection_warns() {
        let mut mode = SplitPolygonMode;
        let mut state = square_state();
        state.clear_selection();

        let outcome = mode.handle_click(&click(5.0, 12.0), &mut state);
        assert!(outcome.action.is_none());
        assert!(outcome.diagnostic.is_some());
    }

    #[test]
    fn test_clicks_inside_polygon_keep_accumulating() {
        let mut mode = SplitPolygonMode;
        let mut state = square_state();

        mode.handle_click(&click(5.0, 12.0), &mut state);
        mode.handle_click(&click(5.0, 5.0), &mut state);
        mode.handle_click(&click(2.0, 5.0), &mut state);
        assert_eq!(state.click_sequence().len(), 3);

        let outcome = mode.handle_click(&click(-2.0, 5.0), &mut state);
        assert!(outcome.action.is_some());
    }

    #[test]
    fn test_right_angle_lock_snaps_cut_points() {
        let mut mode = SplitPolygonMode;
        let mut state = square_state();
        state.settings_mut().lock_90_degree = true;

        mode.handle_click(&click(5.0, 12.0), &mut state);
        // Slightly off-vertical; the nearest edge is the horizontal top, so
        // the segment snaps to vertical
        mode.handle_click(&click(5.4, 5.0), &mut state);
        let snapped = state.click_sequence()[1];
        assert!((snapped.x - 5.0).abs() < 1e-9);
    }
}
