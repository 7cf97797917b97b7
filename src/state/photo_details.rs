//! State of the photo details route.
//!
//! Mirrors the query store's ordering rules on a smaller scale: each lookup
//! gets a generation and a cancellation token, and only the latest lookup may
//! commit.

use log::debug;
use rgallery::{CancellationToken, FetchError, Photo};

/// A by-id lookup the loader must execute.
#[derive(Debug, Clone)]
pub struct DetailsRequest {
    pub generation: u64,
    pub id: String,
    pub token: CancellationToken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsStatus {
    Idle,
    Loading,
    Loaded(Photo),
    Failed(FetchError),
}

#[derive(Debug)]
pub struct PhotoDetailsState {
    id: Option<String>,
    status: DetailsStatus,
    generation: u64,
    token: Option<CancellationToken>,
}

impl Default for PhotoDetailsState {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoDetailsState {
    pub fn new() -> Self {
        Self {
            id: None,
            status: DetailsStatus::Idle,
            generation: 0,
            token: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn status(&self) -> &DetailsStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == DetailsStatus::Loading
    }

    /// True while a lookup is running, even if a photo is already shown.
    pub fn is_pending(&self) -> bool {
        self.token.is_some()
    }

    /// Starts a lookup, superseding any lookup still running.
    ///
    /// A photo already known from the grid is shown immediately; the lookup
    /// then refreshes it.
    pub fn request(&mut self, id: &str, known: Option<Photo>) -> DetailsRequest {
        self.cancel();
        self.generation += 1;

        let token = CancellationToken::new();
        self.id = Some(id.to_string());
        self.token = Some(token.clone());
        self.status = match known {
            Some(photo) => DetailsStatus::Loaded(photo),
            None => DetailsStatus::Loading,
        };

        DetailsRequest {
            generation: self.generation,
            id: id.to_string(),
            token,
        }
    }

    /// Commits a lookup result. Returns false for superseded lookups.
    pub fn apply(&mut self, generation: u64, result: Result<Photo, FetchError>) -> bool {
        if generation != self.generation || self.token.is_none() {
            debug!("Discarding details result #{}", generation);
            return false;
        }
        self.token = None;

        self.status = match result {
            Ok(photo) => DetailsStatus::Loaded(photo),
            Err(err) if err.is_cancellation() => return false,
            Err(err) => DetailsStatus::Failed(err),
        };
        true
    }

    /// Leaves the route: cancels the lookup and forgets the photo.
    pub fn clear(&mut self) {
        self.cancel();
        self.id = None;
        self.status = DetailsStatus::Idle;
    }

    fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgallery::{PhotoOwner, PhotoUrls};

    fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            urls: PhotoUrls {
                small: "s".into(),
                full: "f".into(),
            },
            user: PhotoOwner { name: "Ann".into() },
            description: "Harbour".into(),
            alt_description: String::new(),
            created_at: "2024-03-05T10:00:00Z".into(),
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn test_lookup_commits_photo() {
        let mut details = PhotoDetailsState::new();
        let request = details.request("p1", None);
        assert!(details.is_loading());

        assert!(details.apply(request.generation, Ok(photo("p1"))));
        assert_eq!(details.status(), &DetailsStatus::Loaded(photo("p1")));
    }

    #[test]
    fn test_newer_lookup_supersedes_older() {
        let mut details = PhotoDetailsState::new();
        let first = details.request("p1", None);
        let second = details.request("p2", None);
        assert!(first.token.is_cancelled());

        assert!(!details.apply(first.generation, Ok(photo("p1"))));
        assert!(details.is_loading());
        assert!(details.apply(second.generation, Err(FetchError::Status { status: 404, messages: vec![] })));
        assert!(matches!(details.status(), DetailsStatus::Failed(_)));
    }

    #[test]
    fn test_clear_cancels_and_ignores_late_result() {
        let mut details = PhotoDetailsState::new();
        let request = details.request("p1", Some(photo("p1")));
        details.clear();

        assert!(request.token.is_cancelled());
        assert!(!details.apply(request.generation, Ok(photo("p1"))));
        assert_eq!(details.status(), &DetailsStatus::Idle);
        assert_eq!(details.id(), None);
    }
}
