//! Pointer and keyboard events as seen by mode handlers.
//!
//! The dispatcher translates raw window input into these map-coordinate
//! events; handlers never touch bevy input types directly.

use crate::geometry::MapCoord;

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// A completed click (press and release without crossing the drag threshold).
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub map_coords: MapCoord,
    pub screen_coords: [f32; 2],
    pub modifiers: ModifierState,
    /// Picking distance in map units, derived from camera zoom
    pub pick_radius: f64,
}

/// Cursor motion, with or without a button held.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub map_coords: MapCoord,
    pub modifiers: ModifierState,
    pub pick_radius: f64,
    /// True once the press has crossed the drag threshold
    pub is_dragging: bool,
    /// Where the active press started, if one is in progress
    pub press_origin: Option<MapCoord>,
}

/// Start or end of a drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEvent {
    pub map_coords: MapCoord,
    pub press_origin: MapCoord,
    pub modifiers: ModifierState,
    pub pick_radius: f64,
}

/// Non-pointer keys forwarded to the active handler. Escape is handled by
/// the dispatcher itself (gesture cancel) and never reaches a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
}
