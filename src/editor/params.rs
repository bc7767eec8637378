//! Common SystemParam bundles for the editor systems.
//!
//! The pointer dispatch and rendering systems all need the same camera and
//! window queries to convert cursor positions into map coordinates, so they
//! are bundled here instead of repeated per system.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::geometry::MapCoord;

use super::camera::{CameraZoom, MapCamera};

/// Bundled camera and window queries for cursor-to-map calculations.
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static CameraZoom),
        With<MapCamera>,
    >,
}

impl CameraParams<'_, '_> {
    pub fn cursor_screen_pos(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    /// Map position of the cursor, if the cursor is over the window.
    pub fn cursor_map_pos(&self) -> Option<MapCoord> {
        let window = self.window.single().ok()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        let world = camera.viewport_to_world_2d(transform, cursor_pos).ok()?;
        Some(MapCoord {
            x: f64::from(world.x),
            y: f64::from(world.y),
        })
    }

    /// Current zoom scale (map units per screen pixel).
    pub fn zoom_scale(&self) -> f32 {
        self.camera
            .single()
            .map(|(_, _, zoom)| zoom.scale)
            .unwrap_or(1.0)
    }

    /// A screen-pixel radius converted into map units at the current zoom.
    pub fn pick_radius(&self, pixels: f32) -> f64 {
        f64::from(pixels * self.zoom_scale())
    }
}

/// Check if the cursor is over egui UI.
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
