//! Memoized masonry positions.

use rgallery::{compute_positions, total_height, LayoutParams, Photo, Placement};

/// Inputs that fully determine a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutKey {
    /// Photo-list revision from the query store
    revision: u64,
    params: LayoutParams,
}

/// Cache for the placement of every photo in the grid.
///
/// Positions depend only on the photo list and the column geometry, so they
/// are recomputed when the store's revision or the geometry changes and
/// reused on every other frame.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<LayoutKey>,
    placements: Vec<Placement>,
    total_height: f32,
    /// Number of recomputations, reported in debug logs
    computations: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the placements for `photos`, recomputing only when needed.
    ///
    /// # Arguments
    /// * `revision` - Revision of the photo list the placements belong to
    /// * `photos` - Photos in display order
    /// * `params` - Column geometry for this frame
    pub fn layout(&mut self, revision: u64, photos: &[Photo], params: LayoutParams) -> &[Placement] {
        let key = LayoutKey { revision, params };
        if self.key != Some(key) || self.placements.len() != photos.len() {
            self.placements = compute_positions(photos, params);
            self.total_height = total_height(&self.placements);
            self.key = Some(key);
            self.computations += 1;
            log::debug!(
                "Layout #{}: {} photos in {} columns, height {:.0}",
                self.computations,
                photos.len(),
                params.column_count,
                self.total_height
            );
        }
        &self.placements
    }

    /// Content height of the last computed layout.
    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Forces the next `layout` call to recompute.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
