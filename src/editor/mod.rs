pub mod action;
pub mod camera;
mod dispatcher;
pub mod event;
pub mod handles;
pub mod history;
pub mod modes;
pub mod params;
mod picking;
mod rendering;
pub mod state;

pub use camera::DataLoaded;
pub use dispatcher::{
    cancel_gesture, ActiveHandler, CurrentMode, DiagnosticRaised, EditCommitted, PointerState,
};
pub use history::EditHistory;
pub use modes::GeometryMode;
pub use state::EditState;

use bevy::prelude::*;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditState>()
            .init_resource::<EditHistory>()
            .init_resource::<dispatcher::CurrentMode>()
            .init_resource::<dispatcher::ActiveHandler>()
            .init_resource::<dispatcher::PointerState>()
            .init_resource::<camera::PanSuppression>()
            .add_message::<EditCommitted>()
            .add_message::<DiagnosticRaised>()
            .add_message::<DataLoaded>()
            .init_gizmo_group::<rendering::EditorGizmos>()
            .add_systems(
                Startup,
                (camera::spawn_camera, rendering::configure_gizmos),
            )
            .add_systems(
                Update,
                (
                    dispatcher::handle_mode_shortcuts,
                    dispatcher::sync_mode_handler,
                    dispatcher::dispatch_pointer,
                    dispatcher::handle_edit_keys,
                    // Pan must see this frame's suppression flag
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    camera::fit_camera_to_data,
                    dispatcher::update_cursor_icon,
                    rendering::render_features,
                )
                    .chain(),
            );
    }
}
