use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::editor::state::ModeSettings;
use crate::editor::EditState;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Last opened GeoJSON file, reopened on the next startup
    #[serde(default)]
    pub last_file_path: Option<PathBuf>,

    /// Persisted mode settings (circle steps, split gap, ...)
    #[serde(default)]
    pub mode_settings: ModeSettings,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to update the last file path in config
#[derive(Message)]
pub struct UpdateLastFilePathRequest {
    pub path: PathBuf,
}

fn load_config() -> AppConfig {
    let config_path = crate::paths::config_file();

    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    data
                }
                Err(e) => {
                    warn!("Failed to parse config file, using defaults: {}", e);
                    AppConfigData::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file, using defaults: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, using defaults");
        AppConfigData::default()
    };

    AppConfig {
        data,
        config_path,
        dirty: false,
    }
}

fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system: load config from disk and seed the editor settings with
/// the persisted values.
fn load_config_system(mut config: ResMut<AppConfig>, mut state: ResMut<EditState>) {
    let loaded = load_config();
    config.data = loaded.data;
    config.config_path = loaded.config_path;
    config.dirty = false;

    *state.settings_mut() = config.data.mode_settings.clone();
}

/// Save on request, snapshotting the live editor settings first.
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
    state: Res<EditState>,
) {
    for _ in events.read() {
        if config.data.mode_settings != *state.settings() {
            config.data.mode_settings = state.settings().clone();
            config.dirty = true;
        }
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

fn update_last_file_path_system(
    mut events: MessageReader<UpdateLastFilePathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_file_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastFilePathRequest>()
            .add_systems(PreStartup, load_config_system)
            .add_systems(Update, (save_config_system, update_last_file_path_system));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_data_round_trip() {
        let mut data = AppConfigData::default();
        data.last_file_path = Some(PathBuf::from("/tmp/test.geojson"));
        data.mode_settings.circle_steps = 32;
        data.mode_settings.lock_90_degree = true;

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.last_file_path, data.last_file_path);
        assert_eq!(parsed.mode_settings, data.mode_settings);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: AppConfigData = serde_json::from_str("{}").unwrap();
        assert!(parsed.last_file_path.is_none());
        assert_eq!(parsed.mode_settings, ModeSettings::default());
    }
}
