pub mod photo;
pub mod error;
pub mod config;
pub mod pagination;
pub mod repository;
pub mod unsplash;
pub mod demo_repository;
pub mod masonry;
pub mod visibility;
pub mod infinite_scroll;
pub mod debounce;
pub mod query_store;

// Export domain model
pub use photo::{Photo, PhotoOwner, PhotoUrls};

// Export errors and configuration
pub use error::{ConfigError, FetchError};
pub use config::{AppConfigs, GridConfig, SearchConfig};

// Export the repository port and its adapters
pub use pagination::PaginationCursors;
pub use repository::{CancellationToken, PhotoPage, PhotoQuery, PhotoRepository, SharedRepository};
pub use unsplash::UnsplashRepository;
pub use demo_repository::DemoPhotoRepository;

// Export layout and scrolling primitives
pub use masonry::{compute_positions, column_count, total_height, IntrinsicSize, LayoutParams, Placement};
pub use visibility::{visible_placements, Viewport, VisibleWindow};
pub use infinite_scroll::{InfiniteScrollTrigger, LoadTrigger, TriggerFrame};
pub use debounce::Debouncer;

// Export the search session store
pub use query_store::{CommitOutcome, FetchRequest, PhotoQueryStore, QueryPhase};
