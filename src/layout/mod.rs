pub mod columns;
pub mod grid;
pub mod rows;

use crate::geometry::Rect;
use serde::Deserialize;

pub type LayoutBox = Box<dyn Layout>;

/// How a region's interior is divided among the windows placed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SubLayout {
    #[default]
    Rows,
    Columns,
    Grid,
}

impl SubLayout {
    pub fn new(&self) -> LayoutBox {
        match self {
            Self::Rows => Box::new(rows::RowsLayout),
            Self::Columns => Box::new(columns::ColumnsLayout),
            Self::Grid => Box::new(grid::GridLayout),
        }
    }
}

pub trait Layout {
    /// Splits `area` into `count` rectangles separated by `gap`.
    /// Returns nothing for `count == 0`.
    fn arrange(&self, count: usize, area: Rect, gap: i32) -> Vec<Rect>;
}

/// Sizes of `count` segments sharing `usable` pixels: floor share each, plus
/// one extra pixel for each of the first `usable % count` segments.
pub fn distribute(usable: i32, count: usize) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    let count_i = count as i32;
    let base = usable / count_i;
    let remainder = usable % count_i;
    (0..count_i)
        .map(|index| base + if index < remainder { 1 } else { 0 })
        .collect()
}

/// Pixels left for `count` segments of `length` after `count - 1` gaps,
/// never less than one pixel per segment.
pub(crate) fn usable_length(length: i32, count: usize, gap: i32) -> i32 {
    let count = count as i32;
    (length - (count - 1) * gap).max(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_sums_exactly() {
        for usable in [1, 7, 100, 1059, 1919] {
            for count in 1..=12 {
                if usable < count as i32 {
                    continue;
                }
                let sizes = distribute(usable, count);
                assert_eq!(sizes.len(), count);
                assert_eq!(sizes.iter().sum::<i32>(), usable);
                let max = sizes.iter().max().copied().unwrap_or(0);
                let min = sizes.iter().min().copied().unwrap_or(0);
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn test_distribute_extra_pixels_go_first() {
        assert_eq!(distribute(10, 3), vec![4, 3, 3]);
        assert_eq!(distribute(11, 3), vec![4, 4, 3]);
    }

    #[test]
    fn test_usable_length_floor() {
        assert_eq!(usable_length(100, 3, 10), 80);
        assert_eq!(usable_length(5, 3, 10), 3);
    }

    #[test]
    fn test_sub_layout_solvers() {
        let area = Rect::new(0, 0, 100, 100);
        assert_eq!(
            SubLayout::Rows.new().arrange(2, area, 0),
            vec![Rect::new(0, 0, 100, 50), Rect::new(0, 50, 100, 50)]
        );
        assert_eq!(
            SubLayout::Columns.new().arrange(2, area, 0),
            vec![Rect::new(0, 0, 50, 100), Rect::new(50, 0, 50, 100)]
        );
        assert_eq!(SubLayout::Grid.new().arrange(4, area, 0).len(), 4);
        assert_eq!(SubLayout::default(), SubLayout::Rows);
    }
}
