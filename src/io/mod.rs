//! I/O modules for background photo fetching.

pub mod loading_state;
pub mod photo_loader;

// Re-export commonly used types
pub use loading_state::LoadingState;
pub use photo_loader::{LoadResult, PhotoLoader};
