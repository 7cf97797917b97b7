//! Photo Gallery GUI Application
//!
//! An infinite-scrolling masonry photo browser built on egui. The viewer features:
//! - Debounced search against the Unsplash photo API
//! - Masonry grid that mounts only the tiles near the viewport
//! - Automatic loading of the next page as the end of the grid approaches
//! - Photo details view, settings view and an offline demo photo source
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `state/` - Viewport, route, settings form and details state
//! - `cache/` - Memoized masonry layout
//! - `io/` - Background photo fetching
//! - `utils/` - Formatting helpers
//! - `ui/` - Panel rendering and interaction

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use log::info;
use rgallery::AppConfigs;
use std::time::Instant;

mod utils;
mod cache;
mod io;
mod app;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator};
use io::PhotoLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the gallery GUI.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Photo Gallery"),
        ..Default::default()
    };

    eframe::run_native(
        "Photo Gallery",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(GalleryApp::new(cc)))
        }),
    )
}

/// The main gallery application.
///
/// Most functionality is delegated:
/// - `ApplicationCoordinator` handles fetching, navigation and configuration changes
/// - `SettingsCoordinator` handles persistence
/// - `PanelManager` handles UI panel layout and rendering
struct GalleryApp {
    /// Centralized application state
    state: AppState,
    /// Background photo fetcher
    loader: PhotoLoader,
}

impl GalleryApp {
    /// Creates the application with configuration from the environment and persistent storage.
    fn new(cc: &eframe::CreationContext) -> Self {
        let env_configs = AppConfigs::from_env();
        let configs = SettingsCoordinator::load_configs(cc.storage, &env_configs);
        info!(
            "Starting gallery: api {}, {} per page, default query '{}'",
            configs.api_url, configs.search.per_page, configs.search.default_query
        );

        let mut state = AppState::new(configs, env_configs);

        let mut loader = PhotoLoader::new();
        ApplicationCoordinator::initialize(&mut state, &mut loader);

        Self { state, loader }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::LoadMoreRequested(trigger) => {
                log::debug!("Infinite scroll trigger: {:?}", trigger);
                ApplicationCoordinator::load_more(&mut self.state, &self.loader, ctx);
            }
            PanelInteraction::RetryRequested => {
                ApplicationCoordinator::retry(&mut self.state, &self.loader, ctx);
            }
            PanelInteraction::PhotoSelected(id) => {
                ApplicationCoordinator::open_photo(&mut self.state, &self.loader, id, ctx);
            }
            PanelInteraction::BackToGridRequested => {
                ApplicationCoordinator::back_to_grid(&mut self.state);
            }
            PanelInteraction::OpenSettingsRequested => {
                ApplicationCoordinator::open_settings(&mut self.state);
            }
            PanelInteraction::UseDemoRequested => {
                ApplicationCoordinator::use_demo_repository(&mut self.state, &mut self.loader);
            }
            PanelInteraction::ApplySettingsRequested => {
                match ApplicationCoordinator::apply_settings(&mut self.state, &mut self.loader) {
                    Ok(()) => ApplicationCoordinator::back_to_grid(&mut self.state),
                    Err(err) => self.state.settings_form.error = Some(err.to_string()),
                }
            }
            PanelInteraction::ResetSettingsRequested => {
                ApplicationCoordinator::reset_settings_form(&mut self.state);
            }
        }
    }
}

impl eframe::App for GalleryApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_configs(storage, &self.state.configs, &self.state.env_configs);
    }

    /// Main update loop:
    /// 1. Apply finished background fetches
    /// 2. Advance the debouncer and start due searches
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions
    /// 5. Wake up again when pending search text settles
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        ApplicationCoordinator::check_loading_completion(&mut self.state, &self.loader);
        ApplicationCoordinator::tick(&mut self.state, &self.loader, ctx, now);

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }

        if let Some(remaining) = self.state.store.debounce_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }
}
