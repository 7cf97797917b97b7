//! Header panel UI rendering
//!
//! Handles the top bar with the search box and navigation buttons.

use eframe::egui;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User clicked "Settings"
    OpenSettingsRequested,
    /// User clicked "Demo photos"
    UseDemoRequested,
    /// User clicked the title while away from the grid
    BackToGridRequested,
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        let title = ui.add(egui::Label::new(egui::RichText::new("📷 Gallery").heading()).sense(egui::Sense::click()));
        if title.clicked() && !state.route.is_grid() {
            interaction = Some(HeaderInteraction::BackToGridRequested);
        }

        ui.separator();

        let hint = format!("Search photos (default: {})", state.store.search_config().default_query);
        // Edits are picked up by the coordinator's tick
        ui.add(
            egui::TextEdit::singleline(&mut state.search_text)
                .hint_text(hint)
                .desired_width(320.0),
        );

        if state.store.is_loading() {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⚙ Settings").clicked() {
                interaction = Some(HeaderInteraction::OpenSettingsRequested);
            }

            if !state.demo_mode {
                let demo = ui.button("🎲 Demo photos");
                if demo.clicked() {
                    interaction = Some(HeaderInteraction::UseDemoRequested);
                }
                demo.on_hover_text("Browse generated photos without an access key");
            }
        });
    });

    interaction
}
