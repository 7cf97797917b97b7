//! Caching modules for performance optimization.

pub mod layout_cache;

// Re-export commonly used types
pub use layout_cache::LayoutCache;
