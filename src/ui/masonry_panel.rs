//! Masonry grid panel
//!
//! Lays the store's photos out in columns, mounts only the tiles near the
//! viewport and evaluates the infinite-scroll sentinel after each frame.

use eframe::egui;
use egui::{Color32, Rect, RichText};
use rgallery::{column_count, visible_placements, LayoutParams, LoadTrigger, TriggerFrame, Viewport};
use crate::app::AppState;

/// Height reserved below the photos for the loading/error/end-of-list footer.
const FOOTER_HEIGHT: f32 = 56.0;
const TILE_ROUNDING: f32 = 6.0;

/// Result of masonry panel interactions that need to be handled by the application.
pub enum MasonryInteraction {
    /// A tile was clicked
    PhotoClicked(String),
    /// The sentinel asked for the next page
    LoadMoreRequested(LoadTrigger),
    /// User clicked "Retry" after a failed page
    RetryRequested,
}

/// Renders the scrollable photo grid.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `sentinel_enabled` - Whether the infinite-scroll trigger may be evaluated this frame
pub fn render_masonry_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    sentinel_enabled: bool,
) -> Option<MasonryInteraction> {
    let mut interaction = None;
    let grid = state.configs.grid;

    let mut scroll_area = egui::ScrollArea::vertical()
        .id_salt("masonry_scroll_area")
        .auto_shrink([false, false]);
    if state.viewport.take_scroll_to_top() {
        scroll_area = scroll_area.vertical_scroll_offset(0.0);
    }

    scroll_area.show_viewport(ui, |ui, viewport_rect| {
        let origin = ui.max_rect().min;
        let available_width = ui.available_width();

        let columns = column_count(available_width, grid.column_width, grid.gap);
        let params = LayoutParams::new(grid.column_width, columns, grid.gap);
        let offset_x = ((available_width - params.content_width()) / 2.0).max(0.0);

        let viewport = Viewport::new(viewport_rect.min.y, viewport_rect.height());
        let visible = visible_placements(
            state.layout_cache.layout(state.store.revision(), state.store.photos(), params),
            viewport,
            grid.lazy_load_offset,
        );
        let content_height = state.layout_cache.total_height();

        ui.set_min_size(egui::vec2(available_width, content_height + grid.gap + FOOTER_HEIGHT));
        state.viewport.observe(viewport.scroll_top, viewport.height, available_width);

        // Tiles
        for placement in &visible {
            let Some(photo) = state.store.photos().get(placement.index) else {
                continue;
            };
            let rect = Rect::from_min_size(
                origin + egui::vec2(offset_x + placement.x, placement.y),
                egui::vec2(placement.width, placement.height),
            );
            ui.painter().rect_filled(rect, TILE_ROUNDING, ui.visuals().faint_bg_color);

            let image = egui::Image::new(photo.urls.small.as_str())
                .fit_to_exact_size(rect.size())
                .maintain_aspect_ratio(false)
                .corner_radius(TILE_ROUNDING)
                .sense(egui::Sense::click());
            let response = ui
                .put(rect, image)
                .on_hover_text(photo.caption())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if response.clicked() {
                interaction = Some(MasonryInteraction::PhotoClicked(photo.id.clone()));
            }
        }

        // Footer sits where the sentinel is
        let footer_rect = Rect::from_min_size(
            origin + egui::vec2(0.0, content_height + grid.gap),
            egui::vec2(available_width, FOOTER_HEIGHT),
        );
        ui.scope_builder(egui::UiBuilder::new().max_rect(footer_rect), |ui| {
            ui.vertical_centered(|ui| {
                if state.store.is_loading() {
                    ui.spinner();
                } else if let Some(err) = state.store.error() {
                    ui.colored_label(Color32::RED, format!("Could not load photos: {}", err));
                    if ui.button("Retry").clicked() {
                        interaction = Some(MasonryInteraction::RetryRequested);
                    }
                } else if state.store.photos().is_empty() {
                    ui.label(RichText::new(format!(
                        "No photos found for \"{}\"",
                        state.store.effective_query()
                    )).weak());
                } else if !state.store.has_more() {
                    ui.label(RichText::new("No more photos").weak());
                }
            });
        });

        // Sentinel; skipped on frames that already produced an interaction
        if sentinel_enabled && interaction.is_none() {
            let frame = TriggerFrame {
                loading: state.store.is_loading(),
                generation: state.store.generation(),
                content_height,
                viewport,
            };
            if let Some(trigger) = state.trigger.update(frame) {
                interaction = Some(MasonryInteraction::LoadMoreRequested(trigger));
            }
        }
    });

    interaction
}
