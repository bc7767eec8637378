use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::SaveConfigRequest;
use crate::constants::MIN_CIRCLE_STEPS;
use crate::editor::{
    cancel_gesture, ActiveHandler, CurrentMode, EditHistory, EditState, GeometryMode, PointerState,
};

use super::file_menu::{LoadFileRequest, SaveFileRequest};

/// Main toolbar showing file actions, modes, and undo/redo.
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut current_mode: ResMut<CurrentMode>,
    mut handler: ResMut<ActiveHandler>,
    mut state: ResMut<EditState>,
    mut history: ResMut<EditHistory>,
    mut pointer: ResMut<PointerState>,
    mut load_events: MessageWriter<LoadFileRequest>,
    mut save_events: MessageWriter<SaveFileRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                if ui.button("Open").clicked() {
                    load_events.write(LoadFileRequest::default());
                }
                if ui.button("Save").clicked() {
                    save_events.write(SaveFileRequest::default());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                // Mode buttons with keyboard shortcuts
                for mode in GeometryMode::all() {
                    let selected = current_mode.mode == *mode;
                    let label = mode
                        .display_name()
                        .split(" (")
                        .next()
                        .unwrap_or(mode.display_name());

                    let button = egui::Button::new(egui::RichText::new(label).size(14.0).strong())
                        .min_size(egui::vec2(0.0, 28.0))
                        .selected(selected);

                    let response = ui.add(button);
                    if response.clicked() {
                        current_mode.mode = *mode;
                    }
                    response.on_hover_text(mode.display_name());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Same cancellation path as the keyboard shortcuts, so a
                    // gesture in flight never survives a button-driven undo
                    ui.add_enabled_ui(history.can_redo(), |ui| {
                        if ui.button("Redo").clicked() {
                            cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);
                            if let Some(restored) = history.redo(state.data().clone()) {
                                state.set_data(restored);
                            }
                        }
                    });
                    ui.add_enabled_ui(history.can_undo(), |ui| {
                        if ui.button("Undo").clicked() {
                            cancel_gesture(handler.0.as_mut(), &mut state, &mut pointer);
                            if let Some(restored) = history.undo(state.data().clone()) {
                                state.set_data(restored);
                            }
                        }
                    });
                });
            });
        });
    Ok(())
}

/// Secondary toolbar showing settings for the active mode.
pub fn mode_settings_ui(
    mut contexts: EguiContexts,
    current_mode: Res<CurrentMode>,
    mut state: ResMut<EditState>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let has_settings = matches!(
        current_mode.mode,
        GeometryMode::DrawCircle | GeometryMode::DrawLineString | GeometryMode::SplitPolygon
    );
    if !has_settings {
        return Ok(());
    }

    egui::TopBottomPanel::top("mode_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                let mut changed = false;
                let settings = state.settings_mut();

                match current_mode.mode {
                    GeometryMode::DrawCircle => {
                        ui.label("Circle segments:");
                        changed |= ui
                            .add(egui::Slider::new(
                                &mut settings.circle_steps,
                                MIN_CIRCLE_STEPS..=256,
                            ))
                            .changed();
                    }
                    GeometryMode::DrawLineString => {
                        changed |= ui
                            .checkbox(&mut settings.draw_at_front, "Extend at start")
                            .changed();
                    }
                    GeometryMode::SplitPolygon => {
                        changed |= ui
                            .checkbox(&mut settings.lock_90_degree, "Lock to right angles")
                            .changed();
                        ui.label("Gap:");
                        changed |= ui
                            .add(
                                egui::DragValue::new(&mut settings.split_gap)
                                    .range(0.001..=100.0)
                                    .speed(0.01),
                            )
                            .changed();
                    }
                    _ => {}
                }

                if changed {
                    save_events.write(SaveConfigRequest);
                }
            });
        });
    Ok(())
}
