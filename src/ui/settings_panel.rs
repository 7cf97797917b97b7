//! Settings panel UI rendering
//!
//! A form over every configuration value. Nothing takes effect until
//! "Update configs" is clicked.

use eframe::egui;
use egui::{Color32, RichText};
use crate::app::AppState;

/// Result of user interaction with the settings panel
pub enum SettingsInteraction {
    ApplyRequested,
    ResetRequested,
    BackRequested,
}

/// Renders the settings screen
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state (the form buffers are edited in place)
pub fn render_settings_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<SettingsInteraction> {
    let mut interaction = None;
    let form = &mut state.settings_form;

    if ui.button("⬅ Back to photos").clicked() {
        interaction = Some(SettingsInteraction::BackRequested);
    }
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("settings_scroll_area")
        .show(ui, |ui| {
            ui.heading("Photo source");
            egui::Grid::new("settings_source_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Access key");
                    ui.add(egui::TextEdit::singleline(&mut form.access_key).password(true).desired_width(320.0));
                    ui.end_row();

                    ui.label("API URL");
                    ui.add(egui::TextEdit::singleline(&mut form.api_url).desired_width(320.0));
                    ui.end_row();
                });

            ui.add_space(12.0);
            ui.heading("Search");
            egui::Grid::new("settings_search_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    text_row(ui, "Default query", &mut form.default_query);
                    text_row(ui, "Photos per page", &mut form.per_page);
                    ui.label("Order by");
                    egui::ComboBox::from_id_salt("order_by_selector")
                        .selected_text(form.order_by.clone())
                        .show_ui(ui, |ui| {
                            for option in ["latest", "relevant"] {
                                ui.selectable_value(&mut form.order_by, option.to_string(), option);
                            }
                        });
                    ui.end_row();
                    text_row(ui, "Debounce delay (ms)", &mut form.debounce_delay_ms);
                });

            ui.add_space(12.0);
            ui.heading("Grid");
            egui::Grid::new("settings_grid_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    text_row(ui, "Column width (px)", &mut form.column_width);
                    text_row(ui, "Gap (px)", &mut form.gap);
                    text_row(ui, "Lazy load offset (px)", &mut form.lazy_load_offset);
                    text_row(ui, "Load more offset (px)", &mut form.load_offset);
                });

            ui.add_space(12.0);
            ui.label(RichText::new("Empty or invalid values keep their current setting.").weak());
            ui.horizontal(|ui| {
                if ui.button("Update configs").clicked() {
                    interaction = Some(SettingsInteraction::ApplyRequested);
                }
                if ui.button("Reset to defaults").clicked() {
                    interaction = Some(SettingsInteraction::ResetRequested);
                }
            });

            if let Some(err) = &form.error {
                ui.colored_label(Color32::RED, err);
            }
        });

    interaction
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(160.0));
    ui.end_row();
}
