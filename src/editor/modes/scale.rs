//! Scale mode: drag scales the selection uniformly about its center.

use bevy::window::SystemCursorIcon;
use geo::AffineTransform;

use crate::constants::MIN_SCALE_FACTOR;
use crate::editor::action::{ClickOutcome, EditType, MoveOutcome};
use crate::editor::event::{DragEvent, PointerMoveEvent};
use crate::editor::state::EditState;
use crate::geometry::{planar_distance, MapCoord};

use super::transform_common::TransformSnapshot;
use super::ModeHandler;

#[derive(Default)]
pub struct ScaleMode {
    snapshot: Option<TransformSnapshot>,
}

fn scaling(center: MapCoord, from: MapCoord, to: MapCoord) -> AffineTransform<f64> {
    let reference = planar_distance(center, from);
    let factor = if reference < f64::EPSILON {
        1.0
    } else {
        (planar_distance(center, to) / reference).max(MIN_SCALE_FACTOR)
    };
    AffineTransform::scale(factor, factor, center)
}

impl ModeHandler for ScaleMode {
    fn handle_start_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> MoveOutcome {
        self.snapshot = TransformSnapshot::capture(state)
            .filter(|s| planar_distance(s.center, event.press_origin) >= f64::EPSILON);
        match self.snapshot {
            Some(_) => MoveOutcome::pan_cancelled(),
            None => MoveOutcome::none(),
        }
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        state: &mut EditState,
    ) -> MoveOutcome {
        let (Some(snapshot), Some(origin), true) =
            (&self.snapshot, event.press_origin, event.is_dragging)
        else {
            return MoveOutcome::none();
        };

        let transform = scaling(snapshot.center, origin, event.map_coords);
        MoveOutcome::action(snapshot.apply(state, &transform, EditType::Scaling))
    }

    fn handle_stop_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> ClickOutcome {
        let Some(snapshot) = self.snapshot.take() else {
            return ClickOutcome::none();
        };

        let transform = scaling(snapshot.center, event.press_origin, event.map_coords);
        ClickOutcome::action(snapshot.apply(state, &transform, EditType::Scaled))
    }

    fn reset(&mut self) {
        self.snapshot = None;
    }

    fn cursor(&self, is_dragging: bool) -> SystemCursorIcon {
        if is_dragging {
            SystemCursorIcon::Grabbing
        } else {
            SystemCursorIcon::NwseResize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::event::ModifierState;
    use crate::features::{Feature, FeatureCollection, Geometry};
    use geo::{coord, LineString, Polygon};

    fn state() -> EditState {
        // Unit square centered on (1, 1)
        let mut state = EditState::new(FeatureCollection::from_features(vec![Feature::new(
            Geometry::Polygon(Polygon::new(
                LineString::new(vec![
                    coord! { x: 0.0, y: 0.0 },
                    coord! { x: 2.0, y: 0.0 },
                    coord! { x: 2.0, y: 2.0 },
                    coord! { x: 0.0, y: 2.0 },
                ]),
                vec![],
            )),
        )]));
        state.set_selection([0]);
        state
    }

    fn drag(x: f64, y: f64, origin: (f64, f64)) -> DragEvent {
        DragEvent {
            map_coords: coord! { x: x, y: y },
            press_origin: coord! { x: origin.0, y: origin.1 },
            modifiers: ModifierState::default(),
            pick_radius: 0.5,
        }
    }

    #[test]
    fn test_drag_outward_doubles() {
        let mut mode = ScaleMode::default();
        let mut state = state();

        assert!(mode
            .handle_start_dragging(&drag(2.0, 1.0, (2.0, 1.0)), &mut state)
            .cancel_map_pan);

        // Press was 1 unit from the center, release 2 units
        let action = mode
            .handle_stop_dragging(&drag(3.0, 1.0, (2.0, 1.0)), &mut state)
            .action
            .unwrap();
        assert_eq!(action.edit_type, EditType::Scaled);
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::Polygon(poly) => {
                assert_eq!(poly.exterior().0[0], coord! { x: -1.0, y: -1.0 });
                assert_eq!(poly.exterior().0[2], coord! { x: 3.0, y: 3.0 });
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_factor_is_clamped_at_minimum() {
        let center = coord! { x: 0.0, y: 0.0 };
        let transform = scaling(center, coord! { x: 10.0, y: 0.0 }, center);
        // Collapsing drag still leaves a sliver of geometry
        let expected = AffineTransform::scale(MIN_SCALE_FACTOR, MIN_SCALE_FACTOR, center);
        assert_eq!(transform, expected);
    }

    #[test]
    fn test_press_on_center_is_ignored() {
        let mut mode = ScaleMode::default();
        let mut state = state();
        let outcome = mode.handle_start_dragging(&drag(1.0, 1.0, (1.0, 1.0)), &mut state);
        assert!(!outcome.cancel_map_pan);
    }
}
