//! Draw point mode: one click, one Point feature.

use bevy::window::SystemCursorIcon;
use geo::Point;

use crate::editor::action::{ClickOutcome, EditAction, EditType};
use crate::editor::event::ClickEvent;
use crate::editor::state::EditState;
use crate::features::{Feature, Geometry};

use super::ModeHandler;

#[derive(Default)]
pub struct DrawPointMode;

impl ModeHandler for DrawPointMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        let feature = Feature::new(Geometry::Point(Point::from(event.map_coords)));
        let new_index = state.data().len();
        ClickOutcome::action(EditAction {
            updated_data: state.data().add_feature(feature),
            edit_type: EditType::AddFeature,
            feature_indexes: vec![new_index],
            context: None,
        })
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

    #[test]
    fn test_click_adds_point_feature() {
        let mut mode = DrawPointMode;
        let mut state = EditState::new(FeatureCollection::new());
        let outcome = mode.handle_click(
            &ClickEvent {
                map_coords: geo::coord! { x: 3.0, y: 4.0 },
                screen_coords: [0.0, 0.0],
                modifiers: ModifierState::default(),
                pick_radius: 0.5,
            },
            &mut state,
        );

        let action = outcome.action.unwrap();
        assert_eq!(action.edit_type, EditType::AddFeature);
        assert_eq!(action.feature_indexes, vec![0]);
        assert_eq!(action.updated_data.len(), 1);
        assert_eq!(
            action.updated_data.feature(0).unwrap().geometry,
            Geometry::Point(Point::new(3.0, 4.0))
        );
        // The handler never mutates the shared collection itself
        assert!(state.data().is_empty());
    }
}
