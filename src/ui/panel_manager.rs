//! Panel orchestration and layout management.
//!
//! Lays out the header, status bar and the central panel for the current
//! route, and folds each panel's interaction into one `PanelInteraction`.

use crate::app::AppState;
use crate::io::PhotoLoader;
use crate::state::Route;
use crate::ui::{details_panel, error_page, header, masonry_panel, settings_panel, status_bar};
use rgallery::LoadTrigger;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// The grid sentinel asked for the next page
    LoadMoreRequested(LoadTrigger),
    /// User asked to retry a failed page
    RetryRequested,
    /// A grid tile was clicked
    PhotoSelected(String),
    /// User left the details or settings screen
    BackToGridRequested,
    OpenSettingsRequested,
    UseDemoRequested,
    /// User clicked "Update configs"
    ApplySettingsRequested,
    /// User clicked "Reset to defaults"
    ResetSettingsRequested,
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &PhotoLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenSettingsRequested => PanelInteraction::OpenSettingsRequested,
                    header::HeaderInteraction::UseDemoRequested => PanelInteraction::UseDemoRequested,
                    header::HeaderInteraction::BackToGridRequested => PanelInteraction::BackToGridRequested,
                });
            }
            ui.add_space(4.0);
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, loader);
        });

        let frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            // The sentinel must not fire on a frame whose interaction would be dropped
            let sentinel_enabled = interaction.is_none();
            let route = state.route.current().clone();
            let route_interaction = match route {
                Route::Settings => settings_panel::render_settings_panel(ui, state).map(|i| match i {
                    settings_panel::SettingsInteraction::ApplyRequested => PanelInteraction::ApplySettingsRequested,
                    settings_panel::SettingsInteraction::ResetRequested => PanelInteraction::ResetSettingsRequested,
                    settings_panel::SettingsInteraction::BackRequested => PanelInteraction::BackToGridRequested,
                }),
                Route::PhotoDetails(_) => details_panel::render_details_panel(ui, state).map(|i| match i {
                    details_panel::DetailsInteraction::BackRequested => PanelInteraction::BackToGridRequested,
                }),
                Route::Grid => match state.config_error.clone() {
                    Some(err) => error_page::render_config_error(ui, &err).map(|i| match i {
                        error_page::ConfigErrorInteraction::OpenSettingsRequested => PanelInteraction::OpenSettingsRequested,
                        error_page::ConfigErrorInteraction::UseDemoRequested => PanelInteraction::UseDemoRequested,
                    }),
                    None => masonry_panel::render_masonry_panel(ui, state, sentinel_enabled).map(|i| match i {
                        masonry_panel::MasonryInteraction::PhotoClicked(id) => PanelInteraction::PhotoSelected(id),
                        masonry_panel::MasonryInteraction::LoadMoreRequested(trigger) => PanelInteraction::LoadMoreRequested(trigger),
                        masonry_panel::MasonryInteraction::RetryRequested => PanelInteraction::RetryRequested,
                    }),
                },
            };
            if interaction.is_none() {
                interaction = route_interaction;
            }
        });

        interaction
    }
}
