//! Interaction modes. Each mode is a stateful handler behind the
//! [`ModeHandler`] trait; the dispatcher feeds it pointer and key events
//! and applies whichever edits it returns.

use bevy::window::SystemCursorIcon;

use super::action::{ClickOutcome, MoveOutcome};
use super::event::{ClickEvent, DragEvent, EditKey, PointerMoveEvent};
use super::handles::EditHandle;
use super::state::EditState;

mod draw_circle;
mod draw_line_string;
mod draw_point;
mod draw_polygon;
mod draw_rectangle;
mod modify;
mod rotate;
mod scale;
mod select;
mod split_polygon;
mod transform_common;
mod translate;
mod view;

pub use draw_circle::DrawCircleMode;
pub use draw_line_string::DrawLineStringMode;
pub use draw_point::DrawPointMode;
pub use draw_polygon::DrawPolygonMode;
pub use draw_rectangle::DrawRectangleMode;
pub use modify::ModifyMode;
pub use rotate::RotateMode;
pub use scale::ScaleMode;
pub use select::SelectMode;
pub use split_polygon::SplitPolygonMode;
pub use translate::TranslateMode;
pub use view::ViewMode;

/// A mode's event contract. Every method has a no-op default so handlers
/// implement only the interactions they care about. Handlers own their
/// private gesture fields; shared state travels in [`EditState`].
pub trait ModeHandler: Send + Sync {
    fn handle_click(&mut self, _event: &ClickEvent, _state: &mut EditState) -> ClickOutcome {
        ClickOutcome::none()
    }

    fn handle_pointer_move(
        &mut self,
        _event: &PointerMoveEvent,
        _state: &mut EditState,
    ) -> MoveOutcome {
        MoveOutcome::none()
    }

    fn handle_start_dragging(&mut self, _event: &DragEvent, _state: &mut EditState) -> MoveOutcome {
        MoveOutcome::none()
    }

    fn handle_stop_dragging(&mut self, _event: &DragEvent, _state: &mut EditState) -> ClickOutcome {
        ClickOutcome::none()
    }

    fn handle_key(&mut self, _key: EditKey, _state: &mut EditState) -> ClickOutcome {
        ClickOutcome::none()
    }

    /// Drop any private gesture state. Must be idempotent.
    fn reset(&mut self) {}

    fn cursor(&self, _is_dragging: bool) -> SystemCursorIcon {
        SystemCursorIcon::Default
    }

    /// Pickable handles to render for the current selection.
    fn edit_handles(&self, _state: &EditState) -> Vec<EditHandle> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryMode {
    View,
    #[default]
    Select,
    DrawPoint,
    DrawLineString,
    DrawPolygon,
    DrawRectangle,
    DrawCircle,
    Modify,
    Translate,
    Rotate,
    Scale,
    SplitPolygon,
}

impl GeometryMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            GeometryMode::View => "View (V)",
            GeometryMode::Select => "Select (S)",
            GeometryMode::DrawPoint => "Point (P)",
            GeometryMode::DrawLineString => "Line (L)",
            GeometryMode::DrawPolygon => "Polygon (G)",
            GeometryMode::DrawRectangle => "Rectangle (R)",
            GeometryMode::DrawCircle => "Circle (C)",
            GeometryMode::Modify => "Modify (M)",
            GeometryMode::Translate => "Translate (T)",
            GeometryMode::Rotate => "Rotate (O)",
            GeometryMode::Scale => "Scale (X)",
            GeometryMode::SplitPolygon => "Split (K)",
        }
    }

    pub fn all() -> &'static [GeometryMode] {
        &[
            GeometryMode::View,
            GeometryMode::Select,
            GeometryMode::DrawPoint,
            GeometryMode::DrawLineString,
            GeometryMode::DrawPolygon,
            GeometryMode::DrawRectangle,
            GeometryMode::DrawCircle,
            GeometryMode::Modify,
            GeometryMode::Translate,
            GeometryMode::Rotate,
            GeometryMode::Scale,
            GeometryMode::SplitPolygon,
        ]
    }

    /// Fresh handler for this mode.
    pub fn build_handler(&self) -> Box<dyn ModeHandler> {
        match self {
            GeometryMode::View => Box::new(ViewMode::default()),
            GeometryMode::Select => Box::new(SelectMode::default()),
            GeometryMode::DrawPoint => Box::new(DrawPointMode::default()),
            GeometryMode::DrawLineString => Box::new(DrawLineStringMode::default()),
            GeometryMode::DrawPolygon => Box::new(DrawPolygonMode::default()),
            GeometryMode::DrawRectangle => Box::new(DrawRectangleMode::default()),
            GeometryMode::DrawCircle => Box::new(DrawCircleMode::default()),
            GeometryMode::Modify => Box::new(ModifyMode::default()),
            GeometryMode::Translate => Box::new(TranslateMode::default()),
            GeometryMode::Rotate => Box::new(RotateMode::default()),
            GeometryMode::Scale => Box::new(ScaleMode::default()),
            GeometryMode::SplitPolygon => Box::new(SplitPolygonMode::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_contain_shortcuts() {
        for mode in GeometryMode::all() {
            let name = mode.display_name();
            assert!(name.contains('('), "missing shortcut in {}", name);
            assert!(name.contains(')'), "missing shortcut in {}", name);
        }
    }

    #[test]
    fn test_all_lists_every_mode() {
        assert_eq!(GeometryMode::all().len(), 12);
    }

    #[test]
    fn test_default_mode_is_select() {
        assert_eq!(GeometryMode::default(), GeometryMode::Select);
    }

    #[test]
    fn test_build_handler_for_every_mode() {
        for mode in GeometryMode::all() {
            // Constructing must not panic; reset twice must be safe
            let mut handler = mode.build_handler();
            handler.reset();
            handler.reset();
        }
    }
}
