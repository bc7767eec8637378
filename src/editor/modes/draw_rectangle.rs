//! Draw rectangle mode: two clicks spanning opposite corners.

use bevy::window::SystemCursorIcon;

use crate::editor::action::{ClickOutcome, EditAction, EditType, MoveOutcome};
use crate::editor::event::{ClickEvent, PointerMoveEvent};
use crate::editor::state::EditState;
use crate::features::{Feature, Geometry};
use crate::geometry::rectangle_polygon;

use super::ModeHandler;

#[derive(Default)]
pub struct DrawRectangleMode;

impl ModeHandler for DrawRectangleMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        let Some(&corner) = state.click_sequence().first() else {
            state.push_click(event.map_coords);
            return ClickOutcome::none();
        };

        state.reset_gesture();
        let rectangle = rectangle_polygon(corner, event.map_coords);
        let new_index = state.data().len();
        ClickOutcome::action(EditAction {
            updated_data: state
                .data()
                .add_feature(Feature::new(Geometry::Polygon(rectangle))),
            edit_type: EditType::AddFeature,
            feature_indexes: vec![new_index],
            context: None,
        })
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        state: &mut EditState,
    ) -> MoveOutcome {
        if let Some(&corner) = state.click_sequence().first() {
            let preview = rectangle_polygon(corner, event.map_coords);
            state.set_tentative_feature(Feature::new(Geometry::Polygon(preview)));
        }
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

    fn click(x: f64, y: f64) -> ClickEvent {
        ClickEvent {
            map_coords: coord! { x: x, y: y },
            screen_coords: [0.0, 0.0],
            modifiers: ModifierState::default(),
            pick_radius: 0.5,
        }
    }

    #[test]
    fn test_two_clicks_create_rectangle() {
        let mut mode = DrawRectangleMode;
        let mut state = EditState::new(FeatureCollection::new());

        assert!(mode.handle_click(&click(2.0, 8.0), &mut state).action.is_none());
        let action = mode.handle_click(&click(6.0, 3.0), &mut state).action.unwrap();

        assert_eq!(action.edit_type, EditType::AddFeature);
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::Polygon(poly) => {
                assert!((poly.unsigned_area() - 20.0).abs() < 1e-12);
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
        assert!(state.click_sequence().is_empty());
    }
}
