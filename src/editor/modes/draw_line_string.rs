//! Draw line mode.
//!
//! With no selection, two clicks create a new two-point LineString. With
//! exactly one LineString selected, each click appends a position to it (or
//! prepends, when drawing at the front). Any other selection is invalid.
//! Holding Ctrl locks the new segment to right angles.

use bevy::window::SystemCursorIcon;
use geo::LineString;

use crate::editor::action::{ClickOutcome, Diagnostic, EditAction, EditContext, EditType};
use crate::editor::event::{ClickEvent, PointerMoveEvent};
use crate::editor::state::EditState;
use crate::features::{Feature, Geometry};
use crate::geometry::{planar_bearing, snap_to_right_angle, MapCoord};

use super::ModeHandler;

#[derive(Default)]
pub struct DrawLineStringMode;

/// Ctrl constrains the segment from `anchor` onto right angles relative to
/// the adjoining segment, or onto the axes when there is none.
fn constrain(anchor: MapCoord, neighbor: Option<MapCoord>, candidate: MapCoord) -> MapCoord {
    let reference = neighbor.map_or(0.0, |n| planar_bearing(n, anchor));
    snap_to_right_angle(anchor, candidate, reference)
}

fn extend_selected(
    index: usize,
    line: &LineString<f64>,
    event: &ClickEvent,
    state: &EditState,
) -> ClickOutcome {
    let coords = &line.0;
    let at_front = state.settings().draw_at_front;
    let position_index = if at_front { 0 } else { coords.len() };

    let point = match (event.modifiers.ctrl, at_front) {
        (false, _) => event.map_coords,
        (true, true) => match coords.first() {
            Some(&anchor) => constrain(anchor, coords.get(1).copied(), event.map_coords),
            None => event.map_coords,
        },
        (true, false) => match coords.last() {
            Some(&anchor) => {
                let neighbor = coords.len().checked_sub(2).and_then(|i| coords.get(i));
                constrain(anchor, neighbor.copied(), event.map_coords)
            }
            None => event.map_coords,
        },
    };

    let path = vec![position_index];
    ClickOutcome::action(EditAction {
        updated_data: state.data().add_position(index, &path, point),
        edit_type: EditType::AddPosition,
        feature_indexes: vec![index],
        context: Some(EditContext::AddPosition {
            position_indexes: path,
            position: point,
        }),
    })
}

impl ModeHandler for DrawLineStringMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        if !state.selected_indexes().is_empty() {
            let selected: Vec<usize> = state.selected_indexes().to_vec();
            if let [index] = selected.as_slice() {
                if let Some(Geometry::LineString(line)) =
                    state.data().feature(*index).map(|f| f.geometry.clone())
                {
                    return extend_selected(*index, &line, event, state);
                }
            }
            state.reset_gesture();
            return ClickOutcome::warn(Diagnostic::invalid_selection(
                "drawing a line requires a single LineString selection",
            ));
        }

        let point = match state.click_sequence().last() {
            Some(&previous) if event.modifiers.ctrl => {
                constrain(previous, None, event.map_coords)
            }
            _ => event.map_coords,
        };
        state.push_click(point);
        if state.click_sequence().len() < 2 {
            return ClickOutcome::none();
        }

        let line = LineString::new(state.click_sequence().to_vec());
        state.reset_gesture();

        let new_index = state.data().len();
        ClickOutcome::action(EditAction {
            updated_data: state
                .data()
                .add_feature(Feature::new(Geometry::LineString(line))),
            edit_type: EditType::AddFeature,
            feature_indexes: vec![new_index],
            context: None,
        })
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        state: &mut EditState,
    ) -> crate::editor::action::MoveOutcome {
        if let &[start] = state.click_sequence() {
            let end = if event.modifiers.ctrl {
                constrain(start, None, event.map_coords)
            } else {
                event.map_coords
            };
            let preview = LineString::new(vec![start, end]);
            state.set_tentative_feature(Feature::new(Geometry::LineString(preview)));
        }
        crate::editor::action::MoveOutcome::none()
    }

    fn cursor(&self, _is_dragging: bool) -> SystemCursorIcon {
        SystemCursorIcon::Crosshair
    }
}
