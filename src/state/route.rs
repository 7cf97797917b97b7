//! Navigation between the grid, a photo's details and the settings view.

/// A screen of the application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Root: the masonry grid
    #[default]
    Grid,
    /// Details of one photo
    PhotoDetails(String),
    Settings,
}

impl Route {
    /// Path-style name shown in the status bar.
    pub fn path(&self) -> String {
        match self {
            Route::Grid => "/".to_string(),
            Route::PhotoDetails(id) => format!("/photos/{}", id),
            Route::Settings => "/settings".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteState {
    current: Route,
}

impl RouteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn is_grid(&self) -> bool {
        self.current == Route::Grid
    }

    pub fn navigate(&mut self, route: Route) {
        log::debug!("Navigating {} -> {}", self.current.path(), route.path());
        self.current = route;
    }

    /// Returns to the grid. The grid keeps its photos and scroll position.
    pub fn back_to_grid(&mut self) {
        self.navigate(Route::Grid);
    }
}
