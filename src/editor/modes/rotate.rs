//! Rotate mode: drag rotates the selection around its bounding-box center.

use bevy::window::SystemCursorIcon;
use geo::AffineTransform;

use crate::editor::action::{ClickOutcome, EditType, MoveOutcome};
use crate::editor::event::{DragEvent, PointerMoveEvent};
use crate::editor::handles::{EditHandle, HandleKind};
use crate::editor::state::EditState;
use crate::geometry::{bounding_circle, planar_bearing, MapCoord};

use super::transform_common::TransformSnapshot;
use super::ModeHandler;

#[derive(Default)]
pub struct RotateMode {
    snapshot: Option<TransformSnapshot>,
}

fn rotation(center: MapCoord, from: MapCoord, to: MapCoord) -> AffineTransform<f64> {
    let degrees = (planar_bearing(center, to) - planar_bearing(center, from)).to_degrees();
    AffineTransform::rotate(degrees, center)
}

impl ModeHandler for RotateMode {
    fn handle_start_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> MoveOutcome {
        self.snapshot = TransformSnapshot::capture(state)
            // A press on the pivot has no defined angle
            .filter(|s| s.center != event.press_origin);
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

        let transform = rotation(snapshot.center, origin, event.map_coords);
        MoveOutcome::action(snapshot.apply(state, &transform, EditType::Rotating))
    }

    fn handle_stop_dragging(&mut self, event: &DragEvent, state: &mut EditState) -> ClickOutcome {
        let Some(snapshot) = self.snapshot.take() else {
            return ClickOutcome::none();
        };

        let transform = rotation(snapshot.center, event.press_origin, event.map_coords);
        ClickOutcome::action(snapshot.apply(state, &transform, EditType::Rotated))
    }

    fn reset(&mut self) {
        self.snapshot = None;
    }

    fn cursor(&self, is_dragging: bool) -> SystemCursorIcon {
        if is_dragging {
            SystemCursorIcon::Grabbing
        } else {
            SystemCursorIcon::Crosshair
        }
    }

    /// A single pivot marker above the bounding circle of the selection.
    fn edit_handles(&self, state: &EditState) -> Vec<EditHandle> {
        let mut selected = state.selected_features().peekable();
        let Some(&(first_index, _)) = selected.peek() else {
            return vec![];
        };
        let collection = geo::Geometry::GeometryCollection(geo::GeometryCollection(
            selected.map(|(_, f)| f.geometry.to_geo()).collect(),
        ));
        let Some((center, radius)) = bounding_circle(&collection) else {
            return vec![];
        };

        vec![EditHandle {
            position: MapCoord {
                x: center.x,
                y: center.y + radius,
            },
            position_indexes: vec![],
            feature_index: first_index,
            kind: HandleKind::Rotate,
        }]
    }
}
