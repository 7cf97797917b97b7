//! Status bar UI rendering
//!
//! Handles the bottom status bar summarizing the search session.

use eframe::egui;
use egui::RichText;
use crate::app::AppState;
use crate::io::PhotoLoader;
use crate::utils::format_photo_count;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `loader` - Background loader, for the source name and worker count
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, loader: &PhotoLoader) {
    ui.horizontal(|ui| {
        let source = loader.repository_name().unwrap_or("no source");
        ui.label(RichText::new(format!("Source: {}", source)).strong());
        ui.label(RichText::new("|").strong());

        let store = &state.store;
        ui.label(RichText::new(format!(
            "\"{}\" | {} | Page: {}",
            store.effective_query(),
            format_photo_count(store.photos().len()),
            store.page()
        )).strong());

        match (store.cursors().next(), store.cursors().last()) {
            (Some(next), Some(last)) => {
                ui.label(format!("| Next: {} of {}", next, last));
            }
            (Some(next), None) => {
                ui.label(format!("| Next: {}", next));
            }
            (None, _) if !store.photos().is_empty() => {
                ui.label("| End of results");
            }
            _ => {}
        }

        let in_flight = loader.in_flight();
        if in_flight > 0 {
            ui.label(RichText::new(format!("| Requests in flight: {}", in_flight)).color(egui::Color32::YELLOW));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(state.route.current().path()).monospace());
            let viewport = state.viewport.viewport();
            ui.label(format!(
                "Scroll: {:.0}-{:.0} | Width: {:.0}px",
                viewport.scroll_top,
                viewport.bottom(),
                state.viewport.width()
            ));
        });
    });
}
