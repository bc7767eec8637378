//! Draw polygon mode: clicks accumulate vertices; clicking the first vertex
//! again (or pressing Enter) with at least three vertices closes the ring.

use bevy::window::SystemCursorIcon;
use geo::{LineString, Polygon};

use crate::editor::action::{ClickOutcome, EditAction, EditType, MoveOutcome};
use crate::editor::event::{ClickEvent, EditKey, PointerMoveEvent};
use crate::editor::state::EditState;
use crate::features::{Feature, Geometry};
use crate::geometry::planar_distance;

use super::ModeHandler;

#[derive(Default)]
pub struct DrawPolygonMode;

fn commit_ring(state: &mut EditState) -> ClickOutcome {
    let ring = state.click_sequence().to_vec();
    state.reset_gesture();

    let polygon = Polygon::new(LineString::new(ring), vec![]);
    let new_index = state.data().len();
    ClickOutcome::action(EditAction {
        updated_data: state
            .data()
            .add_feature(Feature::new(Geometry::Polygon(polygon))),
        edit_type: EditType::AddFeature,
        feature_indexes: vec![new_index],
        context: None,
    })
}

impl ModeHandler for DrawPolygonMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        let closes = state.click_sequence().len() >= 3
            && state
                .click_sequence()
                .first()
                .is_some_and(|&first| {
                    planar_distance(first, event.map_coords) <= event.pick_radius
                });

        if closes {
            return commit_ring(state);
        }

        state.push_click(event.map_coords);
        ClickOutcome::none()
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        state: &mut EditState,
    ) -> MoveOutcome {
        if !state.click_sequence().is_empty() {
            let mut preview = state.click_sequence().to_vec();
            preview.push(event.map_coords);
            let geometry = if preview.len() >= 3 {
                Geometry::Polygon(Polygon::new(LineString::new(preview), vec![]))
            } else {
                Geometry::LineString(LineString::new(preview))
            };
            state.set_tentative_feature(Feature::new(geometry));
        }
        MoveOutcome::none()
    }

    fn handle_key(&mut self, key: EditKey, state: &mut EditState) -> ClickOutcome {
        match key {
            EditKey::Enter if state.click_sequence().len() >= 3 => commit_ring(state),
            EditKey::Enter => ClickOutcome::none(),
        }
    }

    fn cursor(&self, _is_dragging: bool) -> SystemCursorIcon {
        SystemCursorIcon::Crosshair
    }
}
