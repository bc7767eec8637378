//! Select mode: click to pick features, shift-click to extend.

use bevy::window::SystemCursorIcon;

use crate::editor::action::ClickOutcome;
use crate::editor::event::ClickEvent;
use crate::editor::picking::pick_feature;
use crate::editor::state::EditState;

use super::ModeHandler;

#[derive(Default)]
pub struct SelectMode;

impl ModeHandler for SelectMode {
    fn handle_click(&mut self, event: &ClickEvent, state: &mut EditState) -> ClickOutcome {
        match pick_feature(state.data(), event.map_coords, event.pick_radius) {
            Some(index) if event.modifiers.shift => state.toggle_selected(index),
            Some(index) => state.set_selection([index]),
            None if !event.modifiers.shift => state.clear_selection(),
            None => {}
        }
        ClickOutcome::none()
    }

    fn cursor(&self, _is_dragging: bool) -> SystemCursorIcon {
        SystemCursorIcon::Default
    }
}
