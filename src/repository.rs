//! The photo source port and the request/response types that cross it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::config::SearchConfig;
use crate::error::FetchError;
use crate::pagination::PaginationCursors;
use crate::photo::Photo;

/// Parameters of one search page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoQuery {
    /// Trimmed search text, never empty
    pub text: String,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    pub order_by: String,
}

impl PhotoQuery {
    /// Builds a request, substituting the default term for blank text.
    pub fn new(text: &str, page: u32, search: &SearchConfig) -> Self {
        let trimmed = text.trim();
        let text = if trimmed.is_empty() {
            search.default_query.trim().to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            text,
            page: page.max(1),
            per_page: search.per_page.max(1),
            order_by: search.order_by.clone(),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    pub cursors: PaginationCursors,
}

/// Cancellation flag shared between the store and a worker.
///
/// Cancellation is cooperative: a repository checks the flag at its
/// suspension points and reports `FetchError::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once the token has been cancelled.
    pub fn check(&self) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A source of photos.
///
/// Implementations block the calling thread; the GUI calls them from
/// background workers only.
pub trait PhotoRepository: Send + Sync {
    /// Fetches one page of search results.
    fn fetch_photos(&self, query: &PhotoQuery, token: &CancellationToken) -> Result<PhotoPage, FetchError>;

    /// Fetches a single photo by identifier.
    fn fetch_photo_by_id(&self, id: &str, token: &CancellationToken) -> Result<Photo, FetchError>;

    /// Short label for logs and the status bar.
    fn name(&self) -> &str;
}

pub type SharedRepository = Arc<dyn PhotoRepository>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_falls_back_to_default_term() {
        let search = SearchConfig::default();
        let query = PhotoQuery::new("   \t", 1, &search);
        assert_eq!(query.text, "sky");
        assert_eq!(query.per_page, 30);
        assert_eq!(query.order_by, "latest");
    }

    #[test]
    fn test_text_is_trimmed_and_page_clamped() {
        let search = SearchConfig::default();
        let query = PhotoQuery::new("  cats ", 0, &search);
        assert_eq!(query.text, "cats");
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let worker_copy = token.clone();
        assert!(worker_copy.check().is_ok());

        token.cancel();
        assert!(worker_copy.is_cancelled());
        assert_eq!(worker_copy.check(), Err(FetchError::Cancelled));
    }
}
