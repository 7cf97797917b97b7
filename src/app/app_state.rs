//! Centralized application state for the photo gallery.
//!
//! Focused state components are composed here so each keeps its own
//! invariants while panels borrow only the parts they render.

use rgallery::{AppConfigs, ConfigError, InfiniteScrollTrigger, PhotoQueryStore};
use crate::cache::LayoutCache;
use crate::state::{PhotoDetailsState, RouteState, SettingsForm, ViewportState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Search session: photos, cursors, loading and error state
    pub store: PhotoQueryStore,

    /// Grid scroll geometry
    pub viewport: ViewportState,

    /// Current screen
    pub route: RouteState,

    /// By-id lookup behind the details screen
    pub details: PhotoDetailsState,

    /// Text buffers of the settings screen
    pub settings_form: SettingsForm,

    /// Sentinel that asks for the next page
    pub trigger: InfiniteScrollTrigger,

    /// Memoized masonry positions
    pub layout_cache: LayoutCache,

    // ===== Top-Level State =====
    /// Active configuration
    pub configs: AppConfigs,

    /// Configuration derived from the environment alone
    pub env_configs: AppConfigs,

    /// Text bound to the search box
    pub search_text: String,

    /// Set while no usable photo source exists; blocks the grid
    pub config_error: Option<ConfigError>,

    /// True when browsing generated photos instead of the remote provider
    pub demo_mode: bool,
}

impl AppState {
    /// Creates the application state for a configuration.
    ///
    /// # Arguments
    /// * `configs` - Effective configuration (environment merged with stored settings)
    /// * `env_configs` - Configuration taken from the environment only
    pub fn new(configs: AppConfigs, env_configs: AppConfigs) -> Self {
        Self {
            store: PhotoQueryStore::new(configs.search.clone()),
            viewport: ViewportState::new(),
            route: RouteState::new(),
            details: PhotoDetailsState::new(),
            settings_form: SettingsForm::from_configs(&configs),
            trigger: InfiniteScrollTrigger::new(configs.grid.load_offset),
            layout_cache: LayoutCache::new(),
            configs,
            env_configs,
            search_text: String::new(),
            config_error: None,
            demo_mode: false,
        }
    }

    // ===== High-Level Coordination Methods =====

    /// True when the grid may issue requests.
    pub fn can_fetch(&self) -> bool {
        self.config_error.is_none()
    }

    /// Prepares the grid for a fresh search session.
    pub fn reset_grid(&mut self) {
        self.viewport.request_scroll_to_top();
        self.trigger.reset();
        self.layout_cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_uses_configs() {
        let mut configs = AppConfigs::default();
        configs.grid.load_offset = 600.0;
        configs.search.default_query = "ocean".into();

        let state = AppState::new(configs.clone(), AppConfigs::default());
        assert_eq!(state.trigger.load_offset(), 600.0);
        assert_eq!(state.store.effective_query(), "ocean");
        assert_eq!(state.settings_form.default_query, "ocean");
        assert!(state.route.is_grid());
        assert!(state.can_fetch());
    }
}
