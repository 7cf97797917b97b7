//! Details panel UI rendering
//!
//! Shows one photo at full resolution with its owner, caption and date.

use eframe::egui;
use egui::{RichText, ScrollArea};
use crate::app::AppState;
use crate::state::DetailsStatus;
use crate::ui::error_page;
use crate::utils::format_date;

/// Result of user interaction with the details panel
pub enum DetailsInteraction {
    BackRequested,
}

/// Renders the photo details screen
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_details_panel(ui: &mut egui::Ui, state: &AppState) -> Option<DetailsInteraction> {
    let mut interaction = None;

    match state.details.status() {
        DetailsStatus::Failed(err) => {
            if error_page::render_error_page(ui, "Could not load this photo", &err.to_string()) {
                interaction = Some(DetailsInteraction::BackRequested);
            }
        }
        DetailsStatus::Idle | DetailsStatus::Loading => {
            if ui.button("⬅ Back to photos").clicked() {
                interaction = Some(DetailsInteraction::BackRequested);
            }
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
        }
        DetailsStatus::Loaded(photo) => {
            ui.horizontal(|ui| {
                if ui.button("⬅ Back to photos").clicked() {
                    interaction = Some(DetailsInteraction::BackRequested);
                }
                if state.details.is_pending() {
                    ui.spinner();
                }
            });
            ui.separator();

            ScrollArea::vertical()
                .id_salt("details_scroll_area")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(photo.caption());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("by {}", photo.user.name)).strong());
                        ui.label(RichText::new(format_date(&photo.created_at)).weak());
                        ui.label(RichText::new(format!("{} × {}", photo.width, photo.height)).weak());
                    });
                    ui.add_space(8.0);

                    let width = ui.available_width();
                    let height = width / photo.aspect_ratio();
                    ui.add(
                        egui::Image::new(photo.urls.full.as_str())
                            .fit_to_exact_size(egui::vec2(width, height))
                            .corner_radius(6.0)
                            .show_loading_spinner(true),
                    );

                    if !photo.alt_description.is_empty() && photo.alt_description != photo.caption() {
                        ui.add_space(8.0);
                        ui.label(RichText::new(&photo.alt_description).italics());
                    }
                });
        }
    }

    interaction
}
