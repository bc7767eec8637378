//! Draw circle mode: first click sets the center, second click the radius.
//! Circles are tessellated into polygons using the configured step count.

use bevy::window::SystemCursorIcon;

use crate::editor::action::{ClickOutcome, EditAction, EditType, MoveOutcome};
use crate::editor::event::{ClickEvent, PointerMoveEvent};
use crate::editor::state::EditState;
use crate::features::{Feature, Geometry};
use crate::geometry::{circle_polygon, planar_distance};

use super::ModeHandler;

#[derive(Default)]
pub struct DrawCircleMode;

impl ModeHandler for DrawCircleMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        let Some(&center) = state.click_sequence().first() else {
            state.push_click(event.map_coords);
            return ClickOutcome::none();
        };

        state.reset_gesture();
        let radius = planar_distance(center, event.map_coords);
        let circle = circle_polygon(center, radius, state.settings().circle_steps);
        let new_index = state.data().len();
        ClickOutcome::action(EditAction {
            updated_data: state
                .data()
                .add_feature(Feature::new(Geometry::Polygon(circle))),
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
        if let Some(&center) = state.click_sequence().first() {
            let radius = planar_distance(center, event.map_coords);
            let steps = state.settings().circle_steps;
            state.set_tentative_feature(Feature::new(Geometry::Polygon(circle_polygon(
                center, radius, steps,
            ))));
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
    use crate::constants::DEFAULT_CIRCLE_STEPS;
    use crate::editor::event::ModifierState;
    use crate::features::FeatureCollection;
    use geo::coord;

    fn click(x: f64, y: f64) -> ClickEvent {
        ClickEvent {
            map_coords: coord! { x: x, y: y },
            screen_coords: [0.0, 0.0],
            modifiers: ModifierState::default(),
            pick_radius: 0.5,
        }
    }

    fn pointer_move(x: f64, y: f64) -> PointerMoveEvent {
        PointerMoveEvent {
            map_coords: coord! { x: x, y: y },
            modifiers: ModifierState::default(),
            pick_radius: 0.5,
            is_dragging: false,
            press_origin: None,
        }
    }

    #[test]
    fn test_tentative_circle_uses_configured_steps() {
        let mut mode = DrawCircleMode;
        let mut state = EditState::new(FeatureCollection::new());

        mode.handle_click(&click(0.0, 0.0), &mut state);
        mode.handle_pointer_move(&pointer_move(10.0, 0.0), &mut state);

        match &state.tentative_feature().unwrap().geometry {
            Geometry::Polygon(poly) => {
                // 64 segments: 64 distinct vertices plus the closing coord
                assert_eq!(
                    poly.exterior().0.len() as u32,
                    DEFAULT_CIRCLE_STEPS + 1
                );
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_second_click_commits_circle() {
        let mut mode = DrawCircleMode;
        let mut state = EditState::new(FeatureCollection::new());

        mode.handle_click(&click(0.0, 0.0), &mut state);
        let action = mode.handle_click(&click(5.0, 0.0), &mut state).action.unwrap();
        assert_eq!(action.edit_type, EditType::AddFeature);
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::Polygon(poly) => {
                for coord in &poly.exterior().0 {
                    let r = planar_distance(coord! { x: 0.0, y: 0.0 }, *coord);
                    assert!((r - 5.0).abs() < 1e-9);
                }
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_low_step_counts_are_clamped() {
        let mut mode = DrawCircleMode;
        let mut state = EditState::new(FeatureCollection::new());
        state.settings_mut().circle_steps = 1;

        mode.handle_click(&click(0.0, 0.0), &mut state);
        let action = mode.handle_click(&click(5.0, 0.0), &mut state).action.unwrap();
        match &action.updated_data.feature(0).unwrap().geometry {
            Geometry::Polygon(poly) => {
                // Clamped to the 4-segment minimum
                assert_eq!(poly.exterior().0.len(), 5);
            }
            other => panic!("expected Polygon, got {}", other.type_name()),
        }
    }
}
