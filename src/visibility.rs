//! Viewport windowing for the masonry grid.
//!
//! Only tiles whose vertical span overlaps the viewport widened by a buffer
//! are mounted. Everything here is pure so the grid panel and the tests share
//! the exact same predicate.

use crate::masonry::Placement;

/// Scroll offset and visible height of the grid's scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    /// Visible window `[scroll_top - buffer, scroll_top + height + buffer]`.
    pub fn window(&self, buffer: f32) -> VisibleWindow {
        VisibleWindow {
            start: self.scroll_top - buffer,
            end: self.scroll_top + self.height + buffer,
        }
    }

    /// Bottom edge of the viewport in content coordinates.
    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }
}

/// Vertical range of content coordinates considered on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub start: f32,
    pub end: f32,
}

impl VisibleWindow {
    /// True when the open span `(y, y + height)` overlaps the window.
    pub fn overlaps(&self, y: f32, height: f32) -> bool {
        y + height > self.start && y < self.end
    }

    /// True when a single coordinate lies inside the window.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.start && y <= self.end
    }
}

/// Placements that intersect the buffered viewport, in input order.
pub fn visible_placements(placements: &[Placement], viewport: Viewport, buffer: f32) -> Vec<Placement> {
    let window = viewport.window(buffer);
    placements
        .iter()
        .filter(|p| window.overlaps(p.y, p.height))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(index: usize, y: f32, height: f32) -> Placement {
        Placement {
            index,
            column: 0,
            x: 0.0,
            y,
            width: 100.0,
            height,
        }
    }

    #[test]
    fn test_tile_exactly_spanning_viewport_is_visible() {
        let viewport = Viewport::new(500.0, 300.0);
        let tiles = [tile(0, 500.0, 300.0)];
        assert_eq!(visible_placements(&tiles, viewport, 0.0).len(), 1);
    }

    #[test]
    fn test_tiles_touching_edges_are_excluded() {
        let viewport = Viewport::new(500.0, 300.0);
        let tiles = [
            tile(0, 400.0, 100.0), // ends exactly at scroll_top
            tile(1, 800.0, 50.0),  // starts exactly at viewport bottom
            tile(2, 499.0, 2.0),   // straddles the top edge
            tile(3, 799.0, 10.0),  // straddles the bottom edge
        ];
        let visible: Vec<usize> = visible_placements(&tiles, viewport, 0.0)
            .iter()
            .map(|p| p.index)
            .collect();
        assert_eq!(visible, vec![2, 3]);
    }

    #[test]
    fn test_buffer_widens_window() {
        let viewport = Viewport::new(2000.0, 400.0);
        let tiles = [tile(0, 100.0, 50.0), tile(1, 1200.0, 50.0), tile(2, 3399.0, 10.0)];

        assert!(visible_placements(&tiles, viewport, 0.0).is_empty());

        let visible: Vec<usize> = visible_placements(&tiles, viewport, 1000.0)
            .iter()
            .map(|p| p.index)
            .collect();
        assert_eq!(visible, vec![1, 2]);
    }

    #[test]
    fn test_window_bounds() {
        let window = Viewport::new(200.0, 600.0).window(50.0);
        assert_eq!(window.start, 150.0);
        assert_eq!(window.end, 850.0);
        assert!(window.contains(850.0));
        assert!(!window.contains(851.0));
    }
}
