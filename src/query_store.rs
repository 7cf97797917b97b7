//! Photo query store: the search session state machine.
//!
//! The store owns the accumulated photo list, the pagination cursors and the
//! loading/error state. It never performs I/O itself. Instead every transition
//! that needs data returns a [`FetchRequest`]; the caller executes it (on a
//! worker thread in the GUI, inline in tests) and hands the result back through
//! [`PhotoQueryStore::apply`].
//!
//! Ordering is enforced with a generation counter: each request gets a fresh
//! generation and a cancellation token. Issuing a new request cancels the
//! previous token, and `apply` only commits results whose generation matches
//! the request currently in flight. Anything else is an aborted attempt and is
//! dropped without touching state.

use std::collections::HashSet;
use std::time::{Duration, Instant};
use log::{debug, info, warn};
use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::error::FetchError;
use crate::pagination::PaginationCursors;
use crate::photo::Photo;
use crate::repository::{CancellationToken, PhotoPage, PhotoQuery, PhotoRepository};

/// Coarse lifecycle of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// What `apply` did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Photos were appended (duplicates by id are skipped)
    Appended { added: usize, skipped: usize },
    /// The request failed; the list is unchanged
    Failed,
    /// The result belonged to a superseded request and was discarded
    Aborted,
}

/// A page request the caller must execute.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: PhotoQuery,
    pub token: CancellationToken,
}

impl FetchRequest {
    /// Runs the request against a repository on the current thread.
    pub fn execute(&self, repository: &dyn PhotoRepository) -> Result<PhotoPage, FetchError> {
        self.token.check()?;
        repository.fetch_photos(&self.query, &self.token)
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct PhotoQueryStore {
    search: SearchConfig,
    raw_text: String,
    debouncer: Debouncer<String>,
    page: u32,
    photos: Vec<Photo>,
    seen_ids: HashSet<String>,
    cursors: PaginationCursors,
    phase: QueryPhase,
    error: Option<FetchError>,
    generation: u64,
    in_flight: Option<InFlight>,
    needs_fetch: bool,
    revision: u64,
}

impl PhotoQueryStore {
    /// Creates a store whose first `tick` searches for the default term.
    pub fn new(search: SearchConfig) -> Self {
        let delay = Duration::from_millis(search.debounce_delay_ms);
        Self {
            search,
            raw_text: String::new(),
            debouncer: Debouncer::new(String::new(), delay),
            page: 1,
            photos: Vec::new(),
            seen_ids: HashSet::new(),
            cursors: PaginationCursors::new(),
            phase: QueryPhase::Idle,
            error: None,
            generation: 0,
            in_flight: None,
            needs_fetch: true,
            revision: 0,
        }
    }

    // ===== Queries =====

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The settled search text that drives fetching.
    pub fn debounced_text(&self) -> &str {
        self.debouncer.value()
    }

    /// The term actually sent to the provider.
    pub fn effective_query(&self) -> String {
        PhotoQuery::new(self.debounced_text(), self.page, &self.search).text
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn cursors(&self) -> &PaginationCursors {
        &self.cursors
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// True when the last response advertised a next page.
    pub fn has_more(&self) -> bool {
        self.cursors.next().is_some()
    }

    /// Generation of the most recently issued request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bumped whenever the photo list changes; used to invalidate layouts.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Time until typed text settles, if any is pending.
    pub fn debounce_remaining(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    // ===== Transitions =====

    /// Records raw search box text. Fetching waits for the debounce period.
    pub fn set_raw_text(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text == self.raw_text {
            return;
        }
        self.raw_text = text.clone();
        self.debouncer.push(text, now);
    }

    /// Advances timers. Returns a request when a new search must start.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.phase == QueryPhase::Success {
            self.phase = QueryPhase::Idle;
        }

        if let Some(text) = self.debouncer.poll(now) {
            info!("Search text settled: '{}'", text);
            self.reset_session();
        }

        if self.needs_fetch {
            self.needs_fetch = false;
            return Some(self.start_fetch());
        }
        None
    }

    /// Requests the page named by the `next` cursor. No-op without one.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        let next = self.cursors.next()?;
        if next == self.page {
            // that page is already loading or already failed; see `retry`
            return None;
        }
        debug!("Loading more: page {} -> {}", self.page, next);
        self.page = next;
        Some(self.start_fetch())
    }

    /// Re-issues the current page after a failure.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.error.is_none() || self.is_loading() {
            return None;
        }
        Some(self.start_fetch())
    }

    /// Replaces the search settings and restarts the session if they changed.
    pub fn reconfigure(&mut self, search: SearchConfig) {
        if search == self.search {
            return;
        }
        self.debouncer
            .set_delay(Duration::from_millis(search.debounce_delay_ms));
        self.search = search;
        self.reset_session();
    }

    /// Drops the current results and searches again, e.g. after the photo source changed.
    pub fn restart(&mut self) {
        self.reset_session();
    }

    /// Commits the result of a request.
    pub fn apply(&mut self, generation: u64, result: Result<PhotoPage, FetchError>) -> CommitOutcome {
        let current = matches!(&self.in_flight, Some(f) if f.generation == generation);
        if !current {
            debug!("Discarding result of superseded request #{}", generation);
            return CommitOutcome::Aborted;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let (added, skipped) = self.append(page.photos);
                self.cursors = page.cursors;
                self.phase = QueryPhase::Success;
                self.error = None;
                info!(
                    "Request #{} committed: {} photos added ({} total), next page {:?}",
                    generation,
                    added,
                    self.photos.len(),
                    self.cursors.next()
                );
                CommitOutcome::Appended { added, skipped }
            }
            Err(err) if err.is_cancellation() => {
                self.phase = QueryPhase::Idle;
                CommitOutcome::Aborted
            }
            Err(err) => {
                warn!("Request #{} failed: {}", generation, err);
                self.phase = QueryPhase::Error;
                self.error = Some(err);
                CommitOutcome::Failed
            }
        }
    }

    /// Clears the accumulated results and schedules page 1 for the current text.
    fn reset_session(&mut self) {
        self.cancel_in_flight();
        self.photos.clear();
        self.seen_ids.clear();
        self.page = 1;
        self.cursors = PaginationCursors::new();
        self.error = None;
        self.phase = QueryPhase::Idle;
        self.revision += 1;
        self.needs_fetch = true;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!("Cancelling request #{}", in_flight.generation);
            in_flight.token.cancel();
        }
    }

    fn start_fetch(&mut self) -> FetchRequest {
        self.cancel_in_flight();

        self.generation += 1;
        let token = CancellationToken::new();
        let query = PhotoQuery::new(self.debouncer.value(), self.page, &self.search);

        self.phase = QueryPhase::Loading;
        self.error = None;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            token: token.clone(),
        });

        info!("Request #{}: '{}' page {}", self.generation, query.text, query.page);
        FetchRequest {
            generation: self.generation,
            query,
            token,
        }
    }

    fn append(&mut self, photos: Vec<Photo>) -> (usize, usize) {
        let mut added = 0;
        let mut skipped = 0;
        for photo in photos {
            if self.seen_ids.insert(photo.id.clone()) {
                self.photos.push(photo);
                added += 1;
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!("Skipped {} photos already in the list", skipped);
        }
        if added > 0 {
            self.revision += 1;
        }
        (added, skipped)
    }
}
