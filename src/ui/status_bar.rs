//! Bottom status bar: mode, counts, and the latest status or diagnostic.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{CurrentMode, DiagnosticRaised, EditCommitted, EditState};

/// The one-line message shown at the right of the status bar.
#[derive(Resource, Default)]
pub struct StatusLine {
    pub text: String,
}

/// Surface raised diagnostics in the status bar.
pub fn collect_diagnostics(
    mut diagnostics: MessageReader<DiagnosticRaised>,
    mut status: ResMut<StatusLine>,
) {
    for raised in diagnostics.read() {
        status.text = raised.diagnostic.message.clone();
    }
}

/// Surface committed edits in the status bar.
pub fn collect_edit_commits(
    mut commits: MessageReader<EditCommitted>,
    mut status: ResMut<StatusLine>,
) {
    for commit in commits.read() {
        if !commit.edit_type.is_final() {
            continue;
        }
        status.text = match commit.feature_indexes.len() {
            0 => format!("{:?}", commit.edit_type),
            1 => format!(
                "{:?} on feature {}",
                commit.edit_type, commit.feature_indexes[0]
            ),
            n => format!("{:?} on {n} features", commit.edit_type),
        };
    }
}

pub fn status_bar_ui(
    mut contexts: EguiContexts,
    current_mode: Res<CurrentMode>,
    state: Res<EditState>,
    status: Res<StatusLine>,
) -> Result {
    egui::TopBottomPanel::bottom("status_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.label(current_mode.mode.display_name());
            ui.separator();
            ui.label(format!("{} features", state.data().len()));
            if !state.selected_indexes().is_empty() {
                ui.separator();
                ui.label(format!("{} selected", state.selected_indexes().len()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !status.text.is_empty() {
                    ui.label(&status.text);
                }
            });
        });
    });
    Ok(())
}
