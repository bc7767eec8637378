pub mod file_menu;
mod status_bar;
mod toolbar;

pub use status_bar::StatusLine;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusLine>()
            .add_message::<file_menu::LoadFileRequest>()
            .add_message::<file_menu::SaveFileRequest>()
            .add_systems(Startup, file_menu::reopen_last_file)
            .add_systems(
                Update,
                (
                    file_menu::handle_load_requests,
                    file_menu::handle_save_requests,
                    status_bar::collect_diagnostics,
                    status_bar::collect_edit_commits,
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    toolbar::mode_settings_ui,
                    status_bar::status_bar_ui,
                ),
            );
    }
}
