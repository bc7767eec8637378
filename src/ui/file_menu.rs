//! File open/save plumbing: native dialogs plus GeoJSON I/O.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::config::{AppConfig, UpdateLastFilePathRequest};
use crate::editor::{DataLoaded, EditHistory, EditState};
use crate::features::io::{load_collection, save_collection};

use super::status_bar::StatusLine;

/// Message to open a GeoJSON file (empty path opens a picker).
#[derive(Message, Default)]
pub struct LoadFileRequest {
    pub path: Option<PathBuf>,
}

/// Message to save the working collection (empty path opens a picker).
#[derive(Message, Default)]
pub struct SaveFileRequest {
    pub path: Option<PathBuf>,
}

fn pick_open_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("GeoJSON", &["geojson", "json"])
        .pick_file()
}

fn pick_save_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("GeoJSON", &["geojson", "json"])
        .set_file_name("features.geojson")
        .save_file()
}

/// Reopen the file from the previous session, when it still exists.
pub fn reopen_last_file(config: Res<AppConfig>, mut requests: MessageWriter<LoadFileRequest>) {
    if let Some(path) = &config.data.last_file_path
        && path.exists()
    {
        info!(path = %path.display(), "reopening last file");
        requests.write(LoadFileRequest {
            path: Some(path.clone()),
        });
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_load_requests(
    mut requests: MessageReader<LoadFileRequest>,
    mut state: ResMut<EditState>,
    mut history: ResMut<EditHistory>,
    mut status: ResMut<StatusLine>,
    mut loaded: MessageWriter<DataLoaded>,
    mut last_path: MessageWriter<UpdateLastFilePathRequest>,
) {
    for request in requests.read() {
        let Some(path) = request.path.clone().or_else(pick_open_path) else {
            continue;
        };

        match load_collection(&path) {
            Ok((collection, skipped)) => {
                info!(path = %path.display(), features = collection.len(), skipped, "loaded collection");
                status.text = if skipped > 0 {
                    format!(
                        "Loaded {} features from {} ({} unsupported skipped)",
                        collection.len(),
                        path.display(),
                        skipped
                    )
                } else {
                    format!("Loaded {} features from {}", collection.len(), path.display())
                };
                state.set_data(collection);
                state.clear_selection();
                state.reset_gesture();
                history.clear();
                loaded.write(DataLoaded);
                last_path.write(UpdateLastFilePathRequest { path });
            }
            Err(e) => {
                error!(path = %path.display(), "failed to load collection: {e}");
                status.text = format!("Load failed: {e}");
            }
        }
    }
}

pub fn handle_save_requests(
    mut requests: MessageReader<SaveFileRequest>,
    state: Res<EditState>,
    mut status: ResMut<StatusLine>,
    mut last_path: MessageWriter<UpdateLastFilePathRequest>,
) {
    for request in requests.read() {
        let Some(path) = request.path.clone().or_else(pick_save_path) else {
            continue;
        };

        match save_collection(&path, state.data()) {
            Ok(()) => {
                info!(path = %path.display(), features = state.data().len(), "saved collection");
                status.text = format!(
                    "Saved {} features to {}",
                    state.data().len(),
                    path.display()
                );
                last_path.write(UpdateLastFilePathRequest { path });
            }
            Err(e) => {
                error!(path = %path.display(), "failed to save collection: {e}");
                status.text = format!("Save failed: {e}");
            }
        }
    }
}
