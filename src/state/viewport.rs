//! Scroll viewport state of the masonry grid.

use rgallery::Viewport;

/// Where the grid's scroll area currently is.
///
/// Updated by the grid panel every frame from the `ScrollArea` viewport rect,
/// read by the infinite-scroll trigger and the status bar.
#[derive(Debug, Clone, Default)]
pub struct ViewportState {
    scroll_top: f32,
    height: f32,
    width: f32,
    /// Set when a new search starts; consumed by the grid panel
    scroll_to_top_requested: bool,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_top, self.height)
    }

    // ===== Mutations =====

    /// Records the scroll area geometry observed during the last frame.
    pub fn observe(&mut self, scroll_top: f32, height: f32, width: f32) {
        self.scroll_top = scroll_top.max(0.0);
        self.height = height.max(0.0);
        self.width = width.max(0.0);
    }

    pub fn request_scroll_to_top(&mut self) {
        self.scroll_to_top_requested = true;
        self.scroll_top = 0.0;
    }

    /// Returns true once after `request_scroll_to_top`.
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top_requested)
    }
}
