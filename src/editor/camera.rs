//! Map camera: pan, zoom, and fit-to-data.

use bevy::camera::visibility::RenderLayers;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::geometry::features_bounds;

use super::state::EditState;

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Set each frame by the dispatcher while a mode handler owns the pointer.
#[derive(Resource, Default)]
pub struct PanSuppression {
    pub active: bool,
}

/// Written after a collection replaces the working data wholesale, so the
/// camera can re-frame it.
#[derive(Message)]
pub struct DataLoaded;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MapCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
        RenderLayers::from_layers(&[0, 1]),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    suppression: Res<PanSuppression>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<MapCamera>>,
) {
    // Middle button pans unconditionally; left button pans unless the active
    // mode has claimed the gesture
    let panning = mouse_button.pressed(MouseButton::Middle)
        || (mouse_button.pressed(MouseButton::Left) && !suppression.active);
    if !panning {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<MapCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        zoom.scale = (zoom.scale - scroll_amount * zoom.scale).clamp(0.001, 1000.0);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<MapCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// Center and zoom the camera so every loaded feature is visible.
pub fn fit_camera_to_data(
    mut loaded: MessageReader<DataLoaded>,
    state: Res<EditState>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<MapCamera>>,
) {
    if loaded.read().next().is_none() {
        return;
    }

    let geometries: Vec<geo::Geometry<f64>> = state
        .data()
        .features()
        .iter()
        .map(|f| f.geometry.to_geo())
        .collect();
    let Some(bounds) = features_bounds(geometries.iter()) else {
        return;
    };
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    let center = bounds.center();
    transform.translation.x = center.x as f32;
    transform.translation.y = center.y as f32;

    // 10% margin around the data
    let scale_x = bounds.width() as f32 / window.width();
    let scale_y = bounds.height() as f32 / window.height();
    zoom.scale = (scale_x.max(scale_y) * 1.1).clamp(0.001, 1000.0);
}
