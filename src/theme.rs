//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;

// ============================================================================
// Feature Colors
// ============================================================================

/// Committed, unselected feature outlines
pub const FEATURE_COLOR: Color = Color::srgb(0.85, 0.85, 0.8);

/// Light blue for selected features and selection indicators
pub const SELECTION_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

/// Orange preview color for the tentative (uncommitted) feature
pub const TENTATIVE_COLOR: Color = Color::srgba(1.0, 0.7, 0.2, 0.9);

/// Dimmer orange for the rubber-band segment following the cursor
pub const TENTATIVE_GUIDE_COLOR: Color = Color::srgba(1.0, 0.7, 0.2, 0.5);

// ============================================================================
// Edit Handle Colors
// ============================================================================

/// Existing-vertex edit handles
pub const HANDLE_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Midpoint (insertion) edit handles
pub const INTERMEDIATE_HANDLE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);

/// Connector line and grip for the rotate handle
pub const ROTATE_HANDLE_COLOR: Color = Color::srgb(0.2, 1.0, 0.6);
