//! Infinite-scroll trigger.
//!
//! A sentinel sits at the bottom edge of the grid content. When it comes within
//! `load_offset` pixels of the viewport, or when the content is shorter than
//! the viewport, the trigger asks for the next page.
//!
//! The trigger is torn down while a request is loading and fires at most once
//! per arm cycle. A cycle is identified by the store's request generation, so
//! after a no-op `load_more` (no next cursor) it stays quiet until a new
//! request has been issued and settled.

use crate::visibility::Viewport;

/// Why a load was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    /// The sentinel entered the widened viewport
    Sentinel,
    /// The content does not fill the viewport, so no scrolling can happen
    ShortPage,
}

/// Per-frame inputs to the trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerFrame {
    pub loading: bool,
    /// Request generation of the query store
    pub generation: u64,
    /// Total masonry content height; the sentinel sits here
    pub content_height: f32,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Default)]
pub struct InfiniteScrollTrigger {
    load_offset: f32,
    armed: bool,
    spent_for: Option<u64>,
}

impl InfiniteScrollTrigger {
    pub fn new(load_offset: f32) -> Self {
        Self {
            load_offset,
            armed: false,
            spent_for: None,
        }
    }

    pub fn set_load_offset(&mut self, load_offset: f32) {
        self.load_offset = load_offset;
    }

    pub fn load_offset(&self) -> f32 {
        self.load_offset
    }

    /// True while an observation is active.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Forgets the current cycle so the next idle frame re-arms.
    pub fn reset(&mut self) {
        self.armed = false;
        self.spent_for = None;
    }

    /// Evaluates one rendered frame. Returns a trigger when `load_more` should run.
    pub fn update(&mut self, frame: TriggerFrame) -> Option<LoadTrigger> {
        if frame.loading {
            self.armed = false;
            return None;
        }

        if self.spent_for == Some(frame.generation) {
            self.armed = false;
            return None;
        }
        self.armed = true;

        let trigger = if frame.content_height < frame.viewport.height {
            Some(LoadTrigger::ShortPage)
        } else if self.sentinel_visible(frame.content_height, frame.viewport) {
            Some(LoadTrigger::Sentinel)
        } else {
            None
        };

        if trigger.is_some() {
            self.spent_for = Some(frame.generation);
            self.armed = false;
        }
        trigger
    }

    /// Whether a sentinel at `sentinel_y` intersects the viewport widened by the load offset.
    pub fn sentinel_visible(&self, sentinel_y: f32, viewport: Viewport) -> bool {
        viewport.window(self.load_offset).contains(sentinel_y)
    }
}
