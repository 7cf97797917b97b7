//! Shared bookkeeping for background fetches.

/// Counts worker threads that have not finished yet.
///
/// Wrapped in an `Arc<Mutex<>>` and shared between the GUI thread and the
/// workers; results themselves travel through a channel.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// Workers currently running
    pub in_flight: usize,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn started(&mut self) {
        self.in_flight += 1;
    }

    pub fn finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
