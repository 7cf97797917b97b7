//! Background photo fetching.
//!
//! Repository calls block, so each request runs on its own worker thread.
//! Results come back through a channel tagged with the generation of the
//! request that produced them; the caller decides whether they are still
//! wanted.

use eframe::egui;
use log::{debug, error};
use rgallery::{FetchError, FetchRequest, Photo, PhotoPage, SharedRepository};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use crate::io::LoadingState;
use crate::state::DetailsRequest;

/// A finished background fetch.
#[derive(Debug)]
pub enum LoadResult {
    /// A search page for the query store
    Page {
        generation: u64,
        result: Result<PhotoPage, FetchError>,
    },
    /// A by-id lookup for the details route
    Photo {
        generation: u64,
        result: Result<Photo, FetchError>,
    },
}

/// Runs repository calls off the GUI thread.
pub struct PhotoLoader {
    /// Photo source used by new requests
    repository: Option<SharedRepository>,

    /// Number of workers still running
    loading_state: Arc<Mutex<LoadingState>>,

    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl PhotoLoader {
    /// Creates a loader without a photo source; requests fail until one is set.
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            repository: None,
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            sender,
            receiver,
        }
    }

    pub fn with_repository(repository: SharedRepository) -> Self {
        let mut loader = Self::new();
        loader.set_repository(repository);
        loader
    }

    /// Replaces the photo source. Workers already running keep the old one.
    pub fn set_repository(&mut self, repository: SharedRepository) {
        debug!("Photo source set to {}", repository.name());
        self.repository = Some(repository);
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository.as_ref().map(|r| r.name())
    }

    /// Number of workers that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.loading_state.lock().map(|s| s.in_flight).unwrap_or(0)
    }

    pub fn is_loading(&self) -> bool {
        self.loading_state.lock().map(|s| s.is_busy()).unwrap_or(false)
    }

    /// Fetches a search page in the background.
    ///
    /// # Arguments
    /// * `request` - Request issued by the query store
    /// * `ctx` - egui context to wake when the result arrives
    pub fn start_page_load(&self, request: FetchRequest, ctx: &egui::Context) {
        let generation = request.generation;
        self.spawn(ctx, move |repository| LoadResult::Page {
            generation,
            result: match repository {
                Some(repository) => guarded(|| request.execute(repository.as_ref())),
                None => Err(no_source()),
            },
        });
    }

    /// Fetches one photo by id in the background.
    pub fn start_photo_load(&self, request: DetailsRequest, ctx: &egui::Context) {
        let generation = request.generation;
        self.spawn(ctx, move |repository| LoadResult::Photo {
            generation,
            result: match repository {
                Some(repository) => guarded(|| {
                    request.token.check()?;
                    repository.fetch_photo_by_id(&request.id, &request.token)
                }),
                None => Err(no_source()),
            },
        });
    }

    /// Drains every result that has arrived since the last call.
    ///
    /// Call once per frame from the update loop.
    pub fn check_completion(&self) -> Vec<LoadResult> {
        self.receiver.try_iter().collect()
    }

    fn spawn<F>(&self, ctx: &egui::Context, job: F)
    where
        F: FnOnce(Option<SharedRepository>) -> LoadResult + Send + 'static,
    {
        if let Ok(mut state) = self.loading_state.lock() {
            state.started();
        }

        let repository = self.repository.clone();
        let loading_state = Arc::clone(&self.loading_state);
        let sender = self.sender.clone();
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = job(repository);

            // The receiver only disappears when the app shuts down
            let _ = sender.send(result);

            if let Ok(mut state) = loading_state.lock() {
                state.finished();
            }

            ctx_handle.request_repaint();
        });
    }
}

impl Default for PhotoLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a repository call, turning a panic into `FetchError::Worker`.
fn guarded<T, F>(call: F) -> Result<T, FetchError>
where
    F: FnOnce() -> Result<T, FetchError>,
{
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        error!("Photo worker panicked: {}", message);
        Err(FetchError::Worker(message))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

fn no_source() -> FetchError {
    FetchError::Worker("no photo source configured".to_string())
}
