use super::{Layout, usable_length};
use crate::geometry::Rect;

pub struct GridLayout;

/// Columns and rows for `count` cells: `ceil(sqrt(n))` columns and as many
/// rows as needed to hold the rest.
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut cols = 1;
    while cols * cols < count {
        cols += 1;
    }
    let rows = count.div_ceil(cols);
    (cols, rows)
}

/// Every cell of a `cols` x `rows` grid in row-major order.
///
/// Cells share the floor of the usable size; the last column and last row
/// absorb the remainder so the grid reaches the far edges of `area`.
pub fn grid_cells(area: Rect, cols: usize, rows: usize, gap: i32) -> Vec<Rect> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }

    let usable_width = usable_length(area.width, cols, gap);
    let usable_height = usable_length(area.height, rows, gap);
    let cell_width = usable_width / cols as i32;
    let cell_height = usable_height / rows as i32;
    let last_width = usable_width - cell_width * (cols as i32 - 1);
    let last_height = usable_height - cell_height * (rows as i32 - 1);

    let mut cells = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let x = area.x + col as i32 * (cell_width + gap);
            let y = area.y + row as i32 * (cell_height + gap);
            let width = if col == cols - 1 { last_width } else { cell_width };
            let height = if row == rows - 1 { last_height } else { cell_height };
            cells.push(Rect::new(x, y, width, height));
        }
    }
    cells
}

impl Layout for GridLayout {
    fn arrange(&self, count: usize, area: Rect, gap: i32) -> Vec<Rect> {
        let (cols, rows) = grid_dimensions(count);
        let mut cells = grid_cells(area, cols, rows, gap);
        cells.truncate(count);
        cells
    }
}
