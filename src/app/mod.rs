//! Application-level modules for the photo gallery.
//!
//! This module contains the application coordinator, settings persistence and
//! centralized state management.

mod app_state;
mod application_coordinator;
mod settings_coordinator;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
