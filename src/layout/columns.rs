use super::{Layout, distribute, usable_length};
use crate::geometry::Rect;

/// Places windows side by side at full region height.
pub struct ColumnsLayout;

impl Layout for ColumnsLayout {
    fn arrange(&self, count: usize, area: Rect, gap: i32) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }

        let usable_width = usable_length(area.width, count, gap);
        let mut x = area.x;

        distribute(usable_width, count)
            .into_iter()
            .map(|width| {
                let rect = Rect::new(x, area.y, width, area.height);
                x += width + gap;
                rect
            })
            .collect()
    }
}
