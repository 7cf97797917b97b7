//! Full-page error screens.

use eframe::egui;
use egui::{Color32, RichText};
use rgallery::ConfigError;

/// Result of user interaction with the missing credential screen
pub enum ConfigErrorInteraction {
    OpenSettingsRequested,
    UseDemoRequested,
}

/// Renders an error page with a "Back to photos" action.
///
/// Returns true when the user asked to go back.
pub fn render_error_page(ui: &mut egui::Ui, title: &str, message: &str) -> bool {
    let mut back = false;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading(title);
        ui.add_space(8.0);
        ui.colored_label(Color32::RED, message);
        ui.add_space(16.0);
        back = ui.button("⬅ Back to photos").clicked();
    });
    back
}

/// Renders the screen shown when no photo source can be built.
pub fn render_config_error(ui: &mut egui::Ui, err: &ConfigError) -> Option<ConfigErrorInteraction> {
    let mut interaction = None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading("Photo source not configured");
        ui.add_space(8.0);
        ui.colored_label(Color32::RED, err.to_string());
        if matches!(err, ConfigError::MissingAccessKey) {
            ui.label(RichText::new(format!(
                "Set {} or enter an access key in settings.",
                rgallery::config::ACCESS_KEY_ENV
            )).weak());
        }
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.button("⚙ Open settings").clicked() {
                interaction = Some(ConfigErrorInteraction::OpenSettingsRequested);
            }
            if ui.button("🎲 Browse demo photos").clicked() {
                interaction = Some(ConfigErrorInteraction::UseDemoRequested);
            }
        });
    });
    interaction
}
