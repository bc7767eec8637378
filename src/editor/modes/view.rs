//! View mode: pan and inspect, no editing.

use bevy::window::SystemCursorIcon;

use super::ModeHandler;

#[derive(Default)]
pub struct ViewMode;

impl ModeHandler for ViewMode {
    fn cursor(&self, is_dragging: bool) -> SystemCursorIcon {
        if is_dragging {
            SystemCursorIcon::Grabbing
        } else {
            SystemCursorIcon::Grab
        }
    }
}
