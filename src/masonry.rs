//! Masonry layout: packs items of varying aspect ratio into fixed-width columns.
//!
//! This module provides pure functions for:
//! - Placing items greedily into the currently shortest column
//! - Measuring the total content height of a placement
//! - Deriving the column count from the available width
//!
//! These functions are stateless and can be tested independently.

use crate::photo::Photo;

/// Anything with an intrinsic pixel size can be laid out.
pub trait IntrinsicSize {
    /// Returns (width, height) in source pixels.
    fn intrinsic_size(&self) -> (f32, f32);
}

impl IntrinsicSize for Photo {
    fn intrinsic_size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

impl IntrinsicSize for (f32, f32) {
    fn intrinsic_size(&self) -> (f32, f32) {
        *self
    }
}

/// Column geometry for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub column_width: f32,
    pub column_count: usize,
    pub gap: f32,
}

impl LayoutParams {
    pub fn new(column_width: f32, column_count: usize, gap: f32) -> Self {
        Self {
            column_width,
            column_count,
            gap,
        }
    }

    /// Width occupied by all columns and the gaps between them.
    pub fn content_width(&self) -> f32 {
        let columns = self.column_count.max(1) as f32;
        columns * self.column_width + (columns - 1.0) * self.gap
    }
}

/// Pixel box assigned to one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index of the item in the input sequence
    pub index: usize,
    /// Column the item was placed in
    pub column: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// Bottom edge of the box.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Places items one by one into the shortest column.
///
/// Ties go to the lowest column index. Every item gets the column width and a
/// height that preserves its aspect ratio; items with a zero dimension are
/// treated as square. A column count of zero is treated as one column.
pub fn compute_positions<T: IntrinsicSize>(items: &[T], params: LayoutParams) -> Vec<Placement> {
    let column_count = params.column_count.max(1);
    let mut column_heights = vec![0.0_f32; column_count];

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (width, height) = item.intrinsic_size();
            let aspect_ratio = if width > 0.0 && height > 0.0 {
                width / height
            } else {
                1.0
            };
            let item_height = params.column_width / aspect_ratio;

            let column = shortest_column(&column_heights);
            let x = column as f32 * (params.column_width + params.gap);
            let y = column_heights[column];

            column_heights[column] += item_height + params.gap;

            Placement {
                index,
                column,
                x,
                y,
                width: params.column_width,
                height: item_height,
            }
        })
        .collect()
}

/// Index of the first column with the minimum height.
fn shortest_column(column_heights: &[f32]) -> usize {
    let mut best = 0;
    for (column, &height) in column_heights.iter().enumerate().skip(1) {
        if height < column_heights[best] {
            best = column;
        }
    }
    best
}

/// Maximum bottom edge over all placements, or 0 when empty.
pub fn total_height(placements: &[Placement]) -> f32 {
    placements
        .iter()
        .map(Placement::bottom)
        .fold(0.0, f32::max)
}

/// Number of columns that fit in `available_width`, never less than one.
pub fn column_count(available_width: f32, column_width: f32, gap: f32) -> usize {
    let stride = column_width + gap;
    if stride <= 0.0 || !available_width.is_finite() {
        return 1;
    }
    ((available_width / stride).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(columns: usize) -> LayoutParams {
        LayoutParams::new(100.0, columns, 10.0)
    }

    #[test]
    fn test_empty_input() {
        let placements = compute_positions::<(f32, f32)>(&[], params(3));
        assert!(placements.is_empty());
        assert_eq!(total_height(&placements), 0.0);
    }

    #[test]
    fn test_single_column_stacks_vertically() {
        let items: [(f32, f32); 3] = [(100.0, 100.0), (200.0, 100.0), (100.0, 200.0)];
        let placements = compute_positions(&items, params(1));

        let ys: Vec<f32> = placements.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 110.0, 170.0]);
        assert!(placements.iter().all(|p| p.x == 0.0 && p.width == 100.0));
        assert_eq!(total_height(&placements), 370.0);
    }

    #[test]
    fn test_shortest_column_first_with_ties_to_lowest_index() {
        // heights: 100, 150, 66.67, 100
        let items: [(f32, f32); 4] = [(100.0, 100.0), (200.0, 300.0), (300.0, 200.0), (100.0, 100.0)];
        let placements = compute_positions(&items, params(3));

        // first three fill columns 0,1,2 in order (all tied at zero)
        assert_eq!(placements[0].column, 0);
        assert_eq!(placements[1].column, 1);
        assert_eq!(placements[2].column, 2);
        assert_eq!(placements[1].x, 110.0);
        assert_eq!(placements[2].x, 220.0);

        // column 2 is now shortest (66.67 + gap)
        assert_eq!(placements[3].column, 2);
        assert!((placements[3].y - (100.0 / 1.5 + 10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_height_preserves_aspect_ratio() {
        let placements = compute_positions(&[(400.0_f32, 300.0_f32)], LayoutParams::new(236.0, 2, 8.0));
        assert!((placements[0].height - 177.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dimensions_are_square() {
        let placements = compute_positions(&[(0.0_f32, 0.0_f32), (50.0_f32, 0.0_f32)], params(1));
        assert_eq!(placements[0].height, 100.0);
        assert_eq!(placements[1].height, 100.0);
    }

    #[test]
    fn test_zero_columns_behave_as_one() {
        let placements = compute_positions(&[(1.0_f32, 1.0_f32), (1.0_f32, 1.0_f32)], params(0));
        assert_eq!(placements[1].column, 0);
        assert_eq!(placements[1].y, 110.0);
    }

    #[test]
    fn test_every_item_goes_to_the_then_shortest_column() {
        let items: Vec<(f32, f32)> = (0..200)
            .map(|i| (100.0 + (i * 37 % 250) as f32, 80.0 + (i * 53 % 310) as f32))
            .collect();
        let layout = params(5);
        let placements = compute_positions(&items, layout);

        let mut heights = vec![0.0_f32; 5];
        for p in &placements {
            let min = heights.iter().cloned().fold(f32::INFINITY, f32::min);
            let expected = heights.iter().position(|&h| h == min).unwrap();
            assert_eq!(p.column, expected);
            assert_eq!(p.y, heights[p.column]);

            let before = heights.clone();
            heights[p.column] += p.height + layout.gap;
            assert!(heights.iter().zip(&before).all(|(after, b)| after >= b));
        }

        let expected_total = placements.iter().map(|p| p.y + p.height).fold(0.0, f32::max);
        assert_eq!(total_height(&placements), expected_total);
    }

    #[test]
    fn test_column_count_from_width() {
        assert_eq!(column_count(1200.0, 236.0, 8.0), 4);
        assert_eq!(column_count(244.0, 236.0, 8.0), 1);
        assert_eq!(column_count(100.0, 236.0, 8.0), 1);
        assert_eq!(column_count(1000.0, 0.0, 0.0), 1);
    }

    #[test]
    fn test_content_width() {
        assert_eq!(LayoutParams::new(236.0, 4, 8.0).content_width(), 968.0);
    }
}
