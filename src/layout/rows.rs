use super::{Layout, distribute, usable_length};
use crate::geometry::Rect;

/// Stacks windows top to bottom at full region width.
pub struct RowsLayout;

impl Layout for RowsLayout {
    fn arrange(&self, count: usize, area: Rect, gap: i32) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }

        let usable_height = usable_length(area.height, count, gap);
        let mut y = area.y;

        distribute(usable_height, count)
            .into_iter()
            .map(|height| {
                let rect = Rect::new(area.x, y, area.width, height);
                y += height + gap;
                rect
            })
            .collect()
    }
}
