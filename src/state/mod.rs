//! State management modules for the photo gallery.
//!
//! This module contains state-only logic (no UI concerns):
//! - Viewport state (scroll offset and size of the grid's scroll area)
//! - Route state (grid, photo details, settings)
//! - Settings form (text buffers behind the settings view)
//! - Photo details state (by-id lookup for the details route)

mod viewport;
mod route;
mod settings_form;
mod photo_details;

pub use viewport::ViewportState;
pub use route::{Route, RouteState};
pub use settings_form::SettingsForm;
pub use photo_details::{DetailsRequest, DetailsStatus, PhotoDetailsState};
