//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Default number of segments used to tessellate a circle polygon
pub const DEFAULT_CIRCLE_STEPS: u32 = 64;

/// Minimum number of segments a tessellated circle may have
pub const MIN_CIRCLE_STEPS: u32 = 4;

/// Minimum circle radius in map units; smaller drags are clamped to this
pub const MIN_CIRCLE_RADIUS: f64 = 1e-8;

/// Default corridor gap for polygon splitting, in map units
pub const DEFAULT_SPLIT_GAP: f64 = 0.1;

/// Screen-pixel radius used to pick edit handles and close polygon rings
pub const HANDLE_PICK_RADIUS_PX: f32 = 8.0;

/// A press that travels further than this (screen pixels) becomes a drag
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;

/// Smallest scale factor the scale mode will apply during a drag
pub const MIN_SCALE_FACTOR: f64 = 0.01;

/// Maximum number of undo snapshots kept in history
pub const MAX_HISTORY_SIZE: usize = 100;
