//! Modify mode: per-vertex editing of selected features.
//!
//! Existing vertices are dragged to move them and clicked to remove them;
//! intermediate (midpoint) handles are clicked to insert a vertex. A click
//! on an edge away from any handle inserts a vertex at the projected point.

use bevy::window::SystemCursorIcon;
use geo::LineString;

use crate::editor::action::{
    ClickOutcome, Diagnostic, EditAction, EditContext, EditType, MoveOutcome,
};
use crate::editor::event::{ClickEvent, DragEvent, PointerMoveEvent};
use crate::editor::handles::{feature_edit_handles, nearest_handle, EditHandle, HandleKind};
use crate::editor::state::EditState;
use crate::features::Geometry;
use crate::geometry::{nearest_point_on_line, MapCoord};

use super::ModeHandler;

/// The vertex currently being dragged.
struct DraggedVertex {
    feature_index: usize,
    position_indexes: Vec<usize>,
}

#[derive(Default)]
pub struct ModifyMode {
    dragging: Option<DraggedVertex>,
}

fn selection_handles(state: &EditState) -> Vec<EditHandle> {
    state
        .selected_features()
        .flat_map(|(index, feature)| feature_edit_handles(index, &feature.geometry))
        .collect()
}

/// The projected point on the selected-feature edge nearest to `position`,
/// with the coordinate path a vertex would be inserted at.
fn nearest_edge_insert(
    state: &EditState,
    position: MapCoord,
    radius: f64,
) -> Option<(usize, Vec<usize>, MapCoord)> {
    let mut best: Option<(f64, usize, Vec<usize>, MapCoord)> = None;

    let mut consider = |feature_index: usize, prefix: &[usize], line: &LineString<f64>| {
        let Some(nearest) = nearest_point_on_line(line, position) else {
            return;
        };
        if nearest.distance > radius {
            return;
        }
        if best.as_ref().is_none_or(|(d, ..)| nearest.distance < *d) {
            let mut path = prefix.to_vec();
            path.push(nearest.segment_index + 1);
            best = Some((nearest.distance, feature_index, path, nearest.position));
        }
    };

    for (feature_index, feature) in state.selected_features() {
        match &feature.geometry {
            Geometry::LineString(ls) => consider(feature_index, &[], ls),
            Geometry::MultiLineString(mls) => {
                for (part, ls) in mls.0.iter().enumerate() {
                    consider(feature_index, &[part], ls);
                }
            }
            Geometry::Polygon(poly) => {
                for (ring_index, ring) in std::iter::once(poly.exterior())
                    .chain(poly.interiors())
                    .enumerate()
                {
                    consider(feature_index, &[ring_index], ring);
                }
            }
            Geometry::MultiPolygon(mp) => {
                for (part, poly) in mp.0.iter().enumerate() {
                    for (ring_index, ring) in std::iter::once(poly.exterior())
                        .chain(poly.interiors())
                        .enumerate()
                    {
                        consider(feature_index, &[part, ring_index], ring);
                    }
                }
            }
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        }
    }

    best.map(|(_, feature_index, path, point)| (feature_index, path, point))
}

fn move_action(
    state: &EditState,
    drag: &DraggedVertex,
    position: MapCoord,
    edit_type: EditType,
) -> EditAction {
    EditAction {
        updated_data: state
            .data()
            .move_position(drag.feature_index, &drag.position_indexes, position),
        edit_type,
        feature_indexes: vec![drag.feature_index],
        context: Some(EditContext::MovePosition {
            position_indexes: drag.position_indexes.clone(),
            position,
        }),
    }
}

impl ModeHandler for ModifyMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        let handles = selection_handles(state);
        let Some(handle) = nearest_handle(&handles, event.map_coords, event.pick_radius) else {
            // No handle nearby; an edge hit still inserts at the projection
            let Some((feature_index, path, position)) =
                nearest_edge_insert(state, event.map_coords, event.pick_radius)
            else {
                return ClickOutcome::none();
            };
            return ClickOutcome::action(EditAction {
                updated_data: state.data().add_position(feature_index, &path, position),
                edit_type: EditType::AddPosition,
                feature_indexes: vec![feature_index],
                context: Some(EditContext::AddPosition {
                    position_indexes: path,
                    position,
                }),
            });
        };

        match handle.kind {
            HandleKind::Intermediate => ClickOutcome::action(EditAction {
                updated_data: state.data().add_position(
                    handle.feature_index,
                    &handle.position_indexes,
                    handle.position,
                ),
                edit_type: EditType::AddPosition,
                feature_indexes: vec![handle.feature_index],
                context: Some(EditContext::AddPosition {
                    position_indexes: handle.position_indexes.clone(),
                    position: handle.position,
                }),
            }),
            HandleKind::Existing => {
                let Some(feature) = state.data().feature(handle.feature_index) else {
                    return ClickOutcome::none();
                };
                match feature.geometry.remove_position(&handle.position_indexes) {
                    Some(geometry) => ClickOutcome::action(EditAction {
                        updated_data: state
                            .data()
                            .replace_geometry(handle.feature_index, geometry),
                        edit_type: EditType::RemovePosition,
                        feature_indexes: vec![handle.feature_index],
                        context: Some(EditContext::RemovePosition {
                            position_indexes: handle.position_indexes.clone(),
                        }),
                    }),
                    None => ClickOutcome::warn(Diagnostic::degenerate_geometry(format!(
                        "cannot remove another position from this {}",
                        feature.geometry.type_name()
                    ))),
                }
            }
            // Vertex handles only in this mode
            HandleKind::Rotate => ClickOutcome::none(),
        }
    }

    fn handle_start_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> MoveOutcome {
        let handles = selection_handles(state);
        let grabbed = nearest_handle(&handles, event.press_origin, event.pick_radius)
            .filter(|handle| handle.kind == HandleKind::Existing);

        match grabbed {
            Some(handle) => {
                self.dragging = Some(DraggedVertex {
                    feature_index: handle.feature_index,
                    position_indexes: handle.position_indexes.clone(),
                });
                MoveOutcome::pan_cancelled()
            }
            None => MoveOutcome::none(),
        }
    }

    fn handle_pointer_move(
        &mut self,
        event: &PointerMoveEvent,
        state: &mut EditState,
    ) -> MoveOutcome {
        match (&self.dragging, event.is_dragging) {
            (Some(drag), true) => MoveOutcome::action(move_action(
                state,
                drag,
                event.map_coords,
                EditType::MovePosition,
            )),
            _ => MoveOutcome::none(),
        }
    }

    fn handle_stop_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> ClickOutcome {
        match self.dragging.take() {
            Some(drag) => ClickOutcome::action(move_action(
                state,
                &drag,
                event.map_coords,
                EditType::FinishMovePosition,
            )),
            None => ClickOutcome::none(),
        }
    }

    fn reset(&mut self) {
        self.dragging = None;
    }

    fn cursor(&self, is_dragging: bool) -> SystemCursorIcon {
        if is_dragging {
            SystemCursorIcon::Grabbing
        } else {
            SystemCursorIcon::Default
        }
    }

    fn edit_handles(&self, state: &EditState) -> Vec<EditHandle> {
        selection_handles(state)
    }
}
