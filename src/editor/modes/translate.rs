//! Translate mode: drag a selected feature to move the whole selection.
//! Holding Alt constrains the move to the dominant axis.

use bevy::window::SystemCursorIcon;
use geo::AffineTransform;

use crate::editor::action::{ClickOutcome, EditType, MoveOutcome};
use crate::editor::event::{DragEvent, PointerMoveEvent};
use crate::editor::picking::geometry_hit;
use crate::editor::state::EditState;
use crate::geometry::MapCoord;

use super::transform_common::TransformSnapshot;
use super::ModeHandler;

#[derive(Default)]
pub struct TranslateMode {
    snapshot: Option<TransformSnapshot>,
}

fn translation(from: MapCoord, to: MapCoord, axis_lock: bool) -> AffineTransform<f64> {
    let mut dx = to.x - from.x;
    let mut dy = to.y - from.y;
    if axis_lock {
        if dx.abs() >= dy.abs() {
            dy = 0.0;
        } else {
            dx = 0.0;
        }
    }
    AffineTransform::translate(dx, dy)
}

impl ModeHandler for TranslateMode {
    fn handle_start_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> MoveOutcome {
        // The drag must start on a selected feature, otherwise the camera
        // keeps the gesture
        let grabs_selection = state
            .selected_features()
            .any(|(_, f)| geometry_hit(&f.geometry, event.press_origin, event.pick_radius));
        if !grabs_selection {
            return MoveOutcome::none();
        }

        self.snapshot = TransformSnapshot::capture(state);
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

        let transform = translation(origin, event.map_coords, event.modifiers.alt);
        MoveOutcome::action(snapshot.apply(state, &transform, EditType::Translating))
    }

    fn handle_stop_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> ClickOutcome {
        let Some(snapshot) = self.snapshot.take() else {
            return ClickOutcome::none();
        };

        let transform = translation(event.press_origin, event.map_coords, event.modifiers.alt);
        ClickOutcome::action(snapshot.apply(state, &transform, EditType::Translated))
    }

    fn reset(&mut self) {
        self.snapshot = None;
    }

    fn cursor(&self, is_dragging: bool) -> SystemCursorIcon {
        if is_dragging {
            SystemCursorIcon::Grabbing
        } else {
            SystemCursorIcon::Move
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

    fn drag(x: f64, y: f64, origin: (f64, f64)) -> DragEvent {
        DragEvent {
            map_coords: coord! { x: x, y: y },
            press_origin: coord! { x: origin.0, y: origin.1 },
            modifiers: ModifierState::default(),
            pick_radius: 0.5,
        }
    }

    #[test]
    fn test_drag_on_selection_translates() {
        let mut mode = TranslateMode::default();
        let mut state = state();

        let start = mode.handle_start_dragging(&drag(5.0, 5.0, (5.0, 5.0)), &mut state);
        assert!(start.cancel_map_pan);

        let moved = mode.handle_pointer_move(
            &PointerMoveEvent {
                map_coords: coord! { x: 8.0, y: 5.0 },
                modifiers: ModifierState::default(),
                pick_radius: 0.5,
                is_dragging: true,
                press_origin: Some(coord! { x: 5.0, y: 5.0 }),
            },
            &mut state,
        );
        let action = moved.action.unwrap();
        assert_eq!(action.edit_type, EditType::Translating);

        let finished = mode.handle_stop_dragging(&drag(8.0, 5.0, (5.0, 5.0)), &mut state);
        let action = finished.action.unwrap();
        assert_eq!(action.edit_type, EditType::Translated);
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::Polygon(poly) => {
                assert_eq!(poly.exterior().0[0], coord! { x: 3.0, y: 0.0 });
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_drag_off_selection_leaves_pan_alone() {
        let mut mode = TranslateMode::default();
        let mut state = state();
        let outcome = mode.handle_start_dragging(&drag(50.0, 50.0, (50.0, 50.0)), &mut state);
        assert!(!outcome.cancel_map_pan);
        assert!(mode
            .handle_stop_dragging(&drag(60.0, 60.0, (50.0, 50.0)), &mut state)
            .action
            .is_none());
    }

    #[test]
    fn test_alt_drag_locks_to_dominant_axis() {
        let mut mode = TranslateMode::default();
        let mut state = state();
        mode.handle_start_dragging(&drag(5.0, 5.0, (5.0, 5.0)), &mut state);

        let finished = mode.handle_stop_dragging(
            &DragEvent {
                map_coords: coord! { x: 8.0, y: 6.0 },
                press_origin: coord! { x: 5.0, y: 5.0 },
                modifiers: ModifierState {
                    alt: true,
                    ..ModifierState::default()
                },
                pick_radius: 0.5,
            },
            &mut state,
        );
        // dx dominates, so dy is dropped
        let action = finished.action.unwrap();
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::Polygon(poly) => {
                assert_eq!(poly.exterior().0[0], coord! { x: 3.0, y: 0.0 });
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_intermediate_moves_never_compound() {
        let mut mode = TranslateMode::default();
        let mut state = state();
        mode.handle_start_dragging(&drag(5.0, 5.0, (5.0, 5.0)), &mut state);

        for _ in 0..3 {
            let moved = mode.handle_pointer_move(
                &PointerMoveEvent {
                    map_coords: coord! { x: 6.0, y: 5.0 },
                    modifiers: ModifierState::default(),
                    pick_radius: 0.5,
                    is_dragging: true,
                    press_origin: Some(coord! { x: 5.0, y: 5.0 }),
                },
                &mut state,
            );
            // Same pointer position always yields the same result
            let action = moved.action.unwrap();
            match &action.updated_data.feature(0).unwrap().geometry {
                Geometry::Polygon(poly) => {
                    assert_eq!(poly.exterior().0[0], coord! { x: 1.0, y: 0.0 });
                }
                other => panic!("expected Polygon, got {}", other.type_name()),
            }
        }
    }
}
