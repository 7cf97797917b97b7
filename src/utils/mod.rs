//! Utility modules for the photo gallery.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_count, format_date, format_photo_count};
