//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the photo gallery:
//! - Header panel (search box, settings and demo buttons)
//! - Masonry panel (windowed photo grid with infinite scroll)
//! - Details panel (single photo view)
//! - Settings panel (configuration form)
//! - Error page (route error boundary and missing credential screen)
//! - Status bar (session summary)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod masonry_panel;
pub mod details_panel;
pub mod settings_panel;
pub mod error_page;
pub mod status_bar;
pub mod panel_manager;
