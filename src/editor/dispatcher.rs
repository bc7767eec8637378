//! Event dispatch: raw window input becomes mode-handler calls.
//!
//! The dispatcher owns click-versus-drag disambiguation (a press that moves
//! further than [`CLICK_DRAG_THRESHOLD_PX`] becomes a drag), applies
//! committed actions to the shared state, feeds final edits into undo
//! history, and relays diagnostics.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow};
use bevy_egui::EguiContexts;

use crate::constants::{CLICK_DRAG_THRESHOLD_PX, HANDLE_PICK_RADIUS_PX};
use crate::features::FeatureCollection;
use crate::geometry::MapCoord;

use super::action::{ClickOutcome, Diagnostic, EditAction, EditType, MoveOutcome};
use super::camera::PanSuppression;
use super::event::{ClickEvent, DragEvent, EditKey, ModifierState, PointerMoveEvent};
use super::history::EditHistory;
use super::modes::{GeometryMode, ModeHandler};
use super::params::{is_cursor_over_ui, CameraParams};
use super::state::EditState;

/// The mode selected in the toolbar or by shortcut.
#[derive(Resource, Default)]
pub struct CurrentMode {
    pub mode: GeometryMode,
}

/// The live handler for the current mode.
#[derive(Resource)]
pub struct ActiveHandler(pub Box<dyn ModeHandler>);

impl Default for ActiveHandler {
    fn default() -> Self {
        Self(GeometryMode::default().build_handler())
    }
}

/// Press tracking for click/drag disambiguation, plus the pre-edit snapshot
/// staged for undo while a drag produces intermediate actions.
#[derive(Resource, Default)]
pub struct PointerState {
    pressed: bool,
    press_screen: Option<Vec2>,
    press_map: Option<MapCoord>,
    dragging: bool,
    pre_edit: Option<FeatureCollection>,
}

impl PointerState {
    fn clear_press(&mut self) {
        self.pressed = false;
        self.press_screen = None;
        self.press_map = None;
        self.dragging = false;
    }
}

/// Abandon any gesture in flight. A drag's intermediate edits roll back to
/// the staged pre-drag collection, so nothing half-applied survives and no
/// stale snapshot leaks into the next final edit's undo entry.
pub fn cancel_gesture(
    handler: &mut dyn ModeHandler,
    state: &mut EditState,
    pointer: &mut PointerState,
) {
    if let Some(previous) = pointer.pre_edit.take() {
        state.set_data(previous);
    }
    handler.reset();
    state.reset_gesture();
    pointer.clear_press();
}

/// Announces every committed edit.
#[derive(Message)]
pub struct EditCommitted {
    pub edit_type: EditType,
    pub feature_indexes: Vec<usize>,
}

/// Announces a recoverable editing problem.
#[derive(Message)]
pub struct DiagnosticRaised {
    pub diagnostic: Diagnostic,
}

fn apply_action(
    action: EditAction,
    state: &mut EditState,
    history: &mut EditHistory,
    pointer: &mut PointerState,
    commits: &mut MessageWriter<EditCommitted>,
) {
    if action.edit_type.is_final() {
        // A drag stages its pre-edit snapshot at the first intermediate
        // action; a plain click commits against the current data
        let previous = pointer
            .pre_edit
            .take()
            .unwrap_or_else(|| state.data().clone());
        history.push(previous);
        debug!(
            edit_type = ?action.edit_type,
            features = ?action.feature_indexes,
            context = ?action.context,
            "edit committed"
        );
    } else if pointer.pre_edit.is_none() {
        pointer.pre_edit = Some(state.data().clone());
    }

    state.set_data(action.updated_data);
    commits.write(EditCommitted {
        edit_type: action.edit_type,
        feature_indexes: action.feature_indexes,
    });
}

fn apply_click_outcome(
    outcome: ClickOutcome,
    state: &mut EditState,
    history: &mut EditHistory,
    pointer: &mut PointerState,
    commits: &mut MessageWriter<EditCommitted>,
    diagnostics: &mut MessageWriter<DiagnosticRaised>,
) {
    if let Some(action) = outcome.action {
        apply_action(action, state, history, pointer, commits);
    }
    if let Some(diagnostic) = outcome.diagnostic {
        warn!(%diagnostic, "edit rejected");
        diagnostics.write(DiagnosticRaised { diagnostic });
    }
}

fn apply_move_outcome(
    outcome: MoveOutcome,
    state: &mut EditState,
    history: &mut EditHistory,
    pointer: &mut PointerState,
    commits: &mut MessageWriter<EditCommitted>,
    diagnostics: &mut MessageWriter<DiagnosticRaised>,
) -> bool {
    let cancel = outcome.cancel_map_pan;
    apply_click_outcome(
        ClickOutcome {
            action: outcome.action,
            diagnostic: outcome.diagnostic,
        },
        state,
        history,
        pointer,
        commits,
        diagnostics,
    );
    cancel
}

fn modifier_state(keyboard: &ButtonInput<KeyCode>) -> ModifierState {
    ModifierState {
        shift: keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight),
        ctrl: keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight),
        alt: keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight),
    }
}

/// Rebuild the handler when the mode changes, resetting the outgoing
/// handler and any shared gesture state first.
pub fn sync_mode_handler(
    current: Res<CurrentMode>,
    mut handler: ResMut<ActiveHandler>,
    mut state: ResMut<EditState>,
    mut pointer: ResMut<PointerState>,
    mut last_mode: Local<Option<GeometryMode>>,
) {
    if *last_mode == Some(current.mode) {
        return;
    }

    cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);
    handler.0 = current.mode.build_handler();
    *last_mode = Some(current.mode);
    debug!(mode = current.mode.display_name(), "mode changed");
}

pub fn handle_mode_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current: ResMut<CurrentMode>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let new_mode = if keyboard.just_pressed(KeyCode::KeyV) {
        Some(GeometryMode::View)
    } else if keyboard.just_pressed(KeyCode::KeyS) {
        Some(GeometryMode::Select)
    } else if keyboard.just_pressed(KeyCode::KeyP) {
        Some(GeometryMode::DrawPoint)
    } else if keyboard.just_pressed(KeyCode::KeyL) {
        Some(GeometryMode::DrawLineString)
    } else if keyboard.just_pressed(KeyCode::KeyG) {
        Some(GeometryMode::DrawPolygon)
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        Some(GeometryMode::DrawRectangle)
    } else if keyboard.just_pressed(KeyCode::KeyC) {
        Some(GeometryMode::DrawCircle)
    } else if keyboard.just_pressed(KeyCode::KeyM) {
        Some(GeometryMode::Modify)
    } else if keyboard.just_pressed(KeyCode::KeyT) {
        Some(GeometryMode::Translate)
    } else if keyboard.just_pressed(KeyCode::KeyO) {
        Some(GeometryMode::Rotate)
    } else if keyboard.just_pressed(KeyCode::KeyX) {
        Some(GeometryMode::Scale)
    } else if keyboard.just_pressed(KeyCode::KeyK) {
        Some(GeometryMode::SplitPolygon)
    } else {
        None
    };

    if let Some(mode) = new_mode {
        current.mode = mode;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn dispatch_pointer(
    params: CameraParams,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut handler: ResMut<ActiveHandler>,
    mut state: ResMut<EditState>,
    mut history: ResMut<EditHistory>,
    mut pointer: ResMut<PointerState>,
    mut suppression: ResMut<PanSuppression>,
    mut commits: MessageWriter<EditCommitted>,
    mut diagnostics: MessageWriter<DiagnosticRaised>,
) {
    let over_ui = is_cursor_over_ui(&mut contexts);
    let (Some(screen), Some(map)) = (params.cursor_screen_pos(), params.cursor_map_pos()) else {
        suppression.active = pointer.dragging;
        return;
    };

    let modifiers = modifier_state(&keyboard);
    let pick_radius = params.pick_radius(HANDLE_PICK_RADIUS_PX);
    let mut cancel_pan = false;

    if mouse_button.just_pressed(MouseButton::Left) && !over_ui {
        pointer.pressed = true;
        pointer.press_screen = Some(screen);
        pointer.press_map = Some(map);
        pointer.dragging = false;
    }

    // Promote the press to a drag once it crosses the screen threshold
    if pointer.pressed
        && !pointer.dragging
        && pointer
            .press_screen
            .is_some_and(|origin| origin.distance(screen) > CLICK_DRAG_THRESHOLD_PX)
    {
        pointer.dragging = true;
        let event = DragEvent {
            map_coords: map,
            press_origin: pointer.press_map.unwrap_or(map),
            modifiers,
            pick_radius,
        };
        let outcome = handler.0.handle_start_dragging(&event, &mut state);
        cancel_pan |= apply_move_outcome(
            outcome,
            &mut state,
            &mut history,
            &mut pointer,
            &mut commits,
            &mut diagnostics,
        );
    }

    let move_event = PointerMoveEvent {
        map_coords: map,
        modifiers,
        pick_radius,
        is_dragging: pointer.dragging,
        press_origin: pointer.press_map,
    };
    let outcome = handler.0.handle_pointer_move(&move_event, &mut state);
    cancel_pan |= apply_move_outcome(
        outcome,
        &mut state,
        &mut history,
        &mut pointer,
        &mut commits,
        &mut diagnostics,
    );

    if mouse_button.just_released(MouseButton::Left) && pointer.pressed {
        let press_map = pointer.press_map.unwrap_or(map);
        let was_dragging = pointer.dragging;
        pointer.clear_press();

        let outcome = if was_dragging {
            handler.0.handle_stop_dragging(
                &DragEvent {
                    map_coords: map,
                    press_origin: press_map,
                    modifiers,
                    pick_radius,
                },
                &mut state,
            )
        } else {
            let event = ClickEvent {
                map_coords: map,
                screen_coords: [screen.x, screen.y],
                modifiers,
                pick_radius,
            };
            debug!(map = ?event.map_coords, screen = ?event.screen_coords, "click");
            handler.0.handle_click(&event, &mut state)
        };
        apply_click_outcome(
            outcome,
            &mut state,
            &mut history,
            &mut pointer,
            &mut commits,
            &mut diagnostics,
        );
    }

    suppression.active = cancel_pan;
}

#[allow(clippy::too_many_arguments)]
pub fn handle_edit_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut handler: ResMut<ActiveHandler>,
    mut state: ResMut<EditState>,
    mut history: ResMut<EditHistory>,
    mut pointer: ResMut<PointerState>,
    mut commits: MessageWriter<EditCommitted>,
    mut diagnostics: MessageWriter<DiagnosticRaised>,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    // Escape cancels the in-progress gesture without reaching the handler's
    // key hook
    if keyboard.just_pressed(KeyCode::Escape) {
        cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);
        return;
    }

    if keyboard.just_pressed(KeyCode::Enter) {
        let outcome = handler.0.handle_key(EditKey::Enter, &mut state);
        apply_click_outcome(
            outcome,
            &mut state,
            &mut history,
            &mut pointer,
            &mut commits,
            &mut diagnostics,
        );
        return;
    }

    if keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::Backspace) {
        let mut selected: Vec<usize> = state.selected_indexes().to_vec();
        if selected.is_empty() {
            return;
        }
        // Remove from the back so earlier indexes stay valid
        selected.sort_unstable();
        let mut updated = state.data().clone();
        for &index in selected.iter().rev() {
            updated = updated.remove_feature(index);
        }
        apply_action(
            EditAction {
                updated_data: updated,
                edit_type: EditType::RemoveFeature,
                feature_indexes: selected,
                context: None,
            },
            &mut state,
            &mut history,
            &mut pointer,
            &mut commits,
        );
        state.clear_selection();
        return;
    }

    if ctrl && keyboard.just_pressed(KeyCode::KeyZ) && !shift {
        cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);
        if let Some(restored) = history.undo(state.data().clone()) {
            state.set_data(restored);
        }
    } else if (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ))
    {
        cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);
        if let Some(restored) = history.redo(state.data().clone()) {
            state.set_data(restored);
        }
    }
}

pub fn update_cursor_icon(
    handler: Res<ActiveHandler>,
    pointer: Res<PointerState>,
    mut window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single_mut() else {
        return;
    };

    if is_cursor_over_ui(&mut contexts) {
        commands
            .entity(entity)
            .insert(CursorIcon::System(bevy::window::SystemCursorIcon::Default));
        return;
    }

    commands
        .entity(entity)
        .insert(CursorIcon::System(handler.0.cursor(pointer.dragging)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Feature, FeatureCollection, Geometry};
    use geo::Point;

    fn point_collection(x: f64, y: f64) -> FeatureCollection {
        FeatureCollection::from_features(vec![Feature::new(Geometry::Point(Point::new(x, y)))])
    }

    #[test]
    fn test_cancel_mid_drag_restores_pre_drag_data() {
        let original = point_collection(0.0, 0.0);
        let mut state = EditState::new(original.clone());
        let mut handler = ActiveHandler(GeometryMode::Translate.build_handler());
        let mut pointer = PointerState::default();

        // Mid-drag: intermediate edits applied, pre-drag snapshot staged
        pointer.pressed = true;
        pointer.dragging = true;
        pointer.pre_edit = Some(state.data().clone());
        state.set_data(point_collection(3.0, 4.0));

        cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);

        assert_eq!(state.data(), &original);
        assert!(pointer.pre_edit.is_none());
        assert!(!pointer.pressed);
        assert!(!pointer.dragging);
    }

    #[test]
    fn test_cancel_without_drag_leaves_data_alone() {
        let collection = point_collection(1.0, 2.0);
        let mut state = EditState::new(collection.clone());
        let mut handler = ActiveHandler(GeometryMode::Modify.build_handler());
        let mut pointer = PointerState::default();

        cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);

        assert_eq!(state.data(), &collection);
        assert!(pointer.pre_edit.is_none());
    }
}
