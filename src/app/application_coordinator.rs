//! Application-level coordination and workflow management.
//!
//! Connects the query store and the details state to the background loader,
//! handles navigation and applies configuration changes.

use std::sync::Arc;
use std::time::{Duration, Instant};
use eframe::egui;
use log::{info, warn};
use rgallery::{
    AppConfigs, CommitOutcome, ConfigError, DemoPhotoRepository, FetchRequest, SharedRepository,
    UnsplashRepository,
};
use crate::app::AppState;
use crate::io::{LoadResult, PhotoLoader};
use crate::state::Route;

/// Simulated latency of the offline photo source, so loading states are visible.
const DEMO_LATENCY: Duration = Duration::from_millis(250);

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Builds the remote photo source for a configuration.
    pub fn build_repository(configs: &AppConfigs) -> Result<SharedRepository, ConfigError> {
        configs.validate()?;
        let repository = UnsplashRepository::new(configs)?;
        Ok(Arc::new(repository))
    }

    /// Wires the loader to a photo source at startup.
    ///
    /// Without a usable credential the state records the problem, which blocks
    /// the grid until the user opens settings or switches to demo photos.
    pub fn initialize(state: &mut AppState, loader: &mut PhotoLoader) {
        match Self::build_repository(&state.configs) {
            Ok(repository) => {
                loader.set_repository(repository);
                state.config_error = None;
            }
            Err(err) => {
                warn!("Remote photo source unavailable: {}", err);
                state.config_error = Some(err);
            }
        }
    }

    /// Applies every result the loader has delivered since the last frame.
    ///
    /// Returns true if any result was committed.
    pub fn check_loading_completion(state: &mut AppState, loader: &PhotoLoader) -> bool {
        let mut committed = false;
        for result in loader.check_completion() {
            match result {
                LoadResult::Page { generation, result } => {
                    let outcome = state.store.apply(generation, result);
                    committed |= outcome != CommitOutcome::Aborted;
                }
                LoadResult::Photo { generation, result } => {
                    committed |= state.details.apply(generation, result);
                }
            }
        }
        committed
    }

    /// Feeds the search box into the debouncer and starts a search when one is due.
    pub fn tick(state: &mut AppState, loader: &PhotoLoader, ctx: &egui::Context, now: Instant) {
        let text = state.search_text.clone();
        Self::search_text_changed(state, text, now);

        if !state.can_fetch() {
            return;
        }
        if let Some(request) = state.store.tick(now) {
            if request.query.page == 1 {
                state.reset_grid();
            }
            Self::dispatch(loader, request, ctx);
        }
    }

    /// Records search box text. Unchanged text is ignored by the store.
    pub fn search_text_changed(state: &mut AppState, text: String, now: Instant) {
        state.store.set_raw_text(text, now);
    }

    /// Requests the next page, if the last response advertised one.
    pub fn load_more(state: &mut AppState, loader: &PhotoLoader, ctx: &egui::Context) {
        if !state.can_fetch() {
            return;
        }
        if let Some(request) = state.store.load_more() {
            Self::dispatch(loader, request, ctx);
        }
    }

    /// Re-issues the page that failed.
    pub fn retry(state: &mut AppState, loader: &PhotoLoader, ctx: &egui::Context) {
        if let Some(request) = state.store.retry() {
            Self::dispatch(loader, request, ctx);
        }
    }

    /// Navigates to a photo and looks it up by id.
    pub fn open_photo(state: &mut AppState, loader: &PhotoLoader, id: String, ctx: &egui::Context) {
        let known = state.store.photos().iter().find(|p| p.id == id).cloned();
        let request = state.details.request(&id, known);
        state.route.navigate(Route::PhotoDetails(id));
        loader.start_photo_load(request, ctx);
    }

    /// Leaves the details or settings screen.
    pub fn back_to_grid(state: &mut AppState) {
        state.details.clear();
        state.route.back_to_grid();
    }

    pub fn open_settings(state: &mut AppState) {
        state.settings_form = crate::state::SettingsForm::from_configs(&state.configs);
        state.route.navigate(Route::Settings);
    }

    /// Switches to the offline photo source and restarts the search.
    pub fn use_demo_repository(state: &mut AppState, loader: &mut PhotoLoader) {
        info!("Switching to demo photos");
        loader.set_repository(Arc::new(DemoPhotoRepository::new().with_latency(DEMO_LATENCY)));
        state.demo_mode = true;
        state.config_error = None;
        state.store.restart();
        state.route.back_to_grid();
    }

    /// Validates the settings form and makes it the active configuration.
    ///
    /// Search changes restart the session; grid changes only relayout. A new
    /// credential or API URL rebuilds the remote photo source.
    pub fn apply_settings(state: &mut AppState, loader: &mut PhotoLoader) -> Result<(), ConfigError> {
        let next = state.settings_form.apply(&state.configs);
        next.validate_layout()?;

        let source_changed = next.access_key != state.configs.access_key || next.api_url != state.configs.api_url;
        let grid_changed = next.grid != state.configs.grid;

        if source_changed || (state.config_error.is_some() && !state.demo_mode) {
            let repository = Self::build_repository(&next)?;
            loader.set_repository(repository);
            state.demo_mode = false;
            state.config_error = None;
            state.store.restart();
        }

        state.store.reconfigure(next.search.clone());
        if grid_changed {
            state.trigger.set_load_offset(next.grid.load_offset);
            state.layout_cache.invalidate();
        }

        info!("Configuration updated");
        state.configs = next;
        state.settings_form = crate::state::SettingsForm::from_configs(&state.configs);
        Ok(())
    }

    /// Restores default values in the settings form without applying them.
    pub fn reset_settings_form(state: &mut AppState) {
        let configs = state.configs.clone();
        state.settings_form.reset_to_defaults(&configs);
    }

    fn dispatch(loader: &PhotoLoader, request: FetchRequest, ctx: &egui::Context) {
        loader.start_page_load(request, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DetailsStatus;
    use std::thread;

    fn demo_state() -> (AppState, PhotoLoader) {
        let mut state = AppState::new(AppConfigs::default(), AppConfigs::default());
        let mut loader = PhotoLoader::new();
        ApplicationCoordinator::initialize(&mut state, &mut loader);
        ApplicationCoordinator::use_demo_repository(&mut state, &mut loader);
        (state, loader)
    }

    fn settle(state: &mut AppState, loader: &PhotoLoader) {
        for _ in 0..500 {
            ApplicationCoordinator::check_loading_completion(state, loader);
            if !loader.is_loading() && !state.store.is_loading() && !state.details.is_loading() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_missing_key_blocks_fetching() {
        let mut state = AppState::new(AppConfigs::default(), AppConfigs::default());
        let mut loader = PhotoLoader::new();
        ApplicationCoordinator::initialize(&mut state, &mut loader);

        assert_eq!(state.config_error, Some(ConfigError::MissingAccessKey));
        ApplicationCoordinator::tick(&mut state, &loader, &egui::Context::default(), Instant::now());
        assert!(!state.store.is_loading());
    }

    #[test]
    fn test_demo_source_loads_first_page() {
        let (mut state, loader) = demo_state();
        let ctx = egui::Context::default();

        ApplicationCoordinator::tick(&mut state, &loader, &ctx, Instant::now());
        assert!(state.store.is_loading());
        settle(&mut state, &loader);

        assert_eq!(state.store.photos().len(), 30);
        assert_eq!(state.store.cursors().next(), Some(2));
    }

    #[test]
    fn test_open_photo_shows_known_photo_then_details() {
        let (mut state, loader) = demo_state();
        let ctx = egui::Context::default();
        ApplicationCoordinator::tick(&mut state, &loader, &ctx, Instant::now());
        settle(&mut state, &loader);

        let id = state.store.photos()[3].id.clone();
        ApplicationCoordinator::open_photo(&mut state, &loader, id.clone(), &ctx);
        assert_eq!(state.route.current(), &Route::PhotoDetails(id.clone()));
        assert!(matches!(state.details.status(), DetailsStatus::Loaded(p) if p.id == id));

        settle(&mut state, &loader);
        ApplicationCoordinator::back_to_grid(&mut state);
        assert!(state.route.is_grid());
        assert_eq!(state.store.photos().len(), 30);
    }

    #[test]
    fn test_grid_settings_do_not_restart_search() {
        let (mut state, loader) = demo_state();
        let mut loader = loader;
        let ctx = egui::Context::default();
        ApplicationCoordinator::tick(&mut state, &loader, &ctx, Instant::now());
        settle(&mut state, &loader);

        state.settings_form.gap = "16".into();
        state.settings_form.load_offset = "400".into();
        ApplicationCoordinator::apply_settings(&mut state, &mut loader).unwrap();

        assert_eq!(state.configs.grid.gap, 16.0);
        assert_eq!(state.trigger.load_offset(), 400.0);
        assert_eq!(state.store.photos().len(), 30);
    }

    #[test]
    fn test_search_settings_restart_search() {
        let (mut state, loader) = demo_state();
        let mut loader = loader;
        let ctx = egui::Context::default();
        ApplicationCoordinator::tick(&mut state, &loader, &ctx, Instant::now());
        settle(&mut state, &loader);

        state.settings_form.per_page = "10".into();
        ApplicationCoordinator::apply_settings(&mut state, &mut loader).unwrap();
        assert!(state.store.photos().is_empty());

        ApplicationCoordinator::tick(&mut state, &loader, &ctx, Instant::now());
        settle(&mut state, &loader);
        assert_eq!(state.store.photos().len(), 10);
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let (mut state, mut loader) = demo_state();
        state.settings_form.column_width = "-5".into();
        assert!(matches!(
            ApplicationCoordinator::apply_settings(&mut state, &mut loader),
            Err(ConfigError::InvalidValue { field: "grid.column_width", .. })
        ));
        assert_eq!(state.configs.grid.column_width, 236.0);
    }
}
