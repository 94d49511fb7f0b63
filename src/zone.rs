use crate::geometry::Rect;
use crate::layout::SubLayout;

/// A named region of a monitor, positioned in percent of the monitor's
/// usable rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub x_percent: u32,
    pub y_percent: u32,
    pub width_percent: u32,
    pub height_percent: u32,
    pub layout: SubLayout,
    /// 0 means unlimited.
    pub capacity: usize,
    pub margin: i32,
}

impl Zone {
    pub fn new(name: &str, x: u32, y: u32, width: u32, height: u32, layout: SubLayout) -> Self {
        Self {
            name: name.to_string(),
            x_percent: x,
            y_percent: y,
            width_percent: width,
            height_percent: height,
            layout,
            capacity: 0,
            margin: 0,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn is_full(&self, occupants: usize) -> bool {
        self.capacity != 0 && occupants >= self.capacity
    }
}

fn percent_of(length: i32, percent: u32) -> i32 {
    (length.max(0) as i64 * percent as i64 / 100) as i32
}

/// Pixel rectangle of `zone` on `monitor`.
///
/// The monitor is first inset by the global `margin`, percentages are then
/// applied with floor division, and the zone's own margin is taken off last.
/// The result stays inside the monitor and is at least 1x1.
pub fn zone_rect(monitor: Rect, margin: i32, zone: &Zone) -> Rect {
    let base = monitor.inset(margin);

    let x = base.x + percent_of(base.width, zone.x_percent);
    let y = base.y + percent_of(base.height, zone.y_percent);
    let width = percent_of(base.width, zone.width_percent).min(base.right() - x);
    let height = percent_of(base.height, zone.height_percent).min(base.bottom() - y);

    let mut rect = Rect::new(x, y, width.max(1), height.max(1)).inset(zone.margin);
    rect.x = rect.x.min(base.right() - 1);
    rect.y = rect.y.min(base.bottom() - 1);
    rect
}

/// Equal-width, full-height columns, used when no zones are configured.
pub fn default_zones(columns: usize) -> Vec<Zone> {
    let columns = columns.clamp(1, 3) as u32;
    let width = 100 / columns;
    (0..columns)
        .map(|column| {
            let name = format!("column-{}", column + 1);
            Zone::new(&name, column * width, 0, width, 100, SubLayout::Rows)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONITOR: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_zone_rect_floor_division() {
        let zone = Zone::new("main", 0, 0, 60, 100, SubLayout::Rows);
        let rect = zone_rect(MONITOR, 10, &zone);
        // base is 1900x1060 at (10, 10); 60% of 1900 = 1140
        assert_eq!(rect, Rect::new(10, 10, 1140, 1060));

        let side = Zone::new("side", 60, 33, 40, 33, SubLayout::Rows);
        let rect = zone_rect(MONITOR, 10, &side);
        // 1060 * 33 / 100 = 349.8 -> 349
        assert_eq!(rect, Rect::new(1150, 359, 760, 349));
    }

    #[test]
    fn test_zone_margin_applied_after_percentages() {
        let zone = Zone::new("full", 0, 0, 100, 100, SubLayout::Grid).with_margin(20);
        let rect = zone_rect(MONITOR, 0, &zone);
        assert_eq!(rect, Rect::new(20, 20, 1880, 1040));
    }

    #[test]
    fn test_degenerate_zone_clamps_to_one_pixel() {
        let zone = Zone::new("tiny", 50, 50, 1, 1, SubLayout::Rows).with_margin(40);
        let rect = zone_rect(MONITOR, 0, &zone);
        assert_eq!(rect.width, 1);
        assert_eq!(rect.height, 1);
        assert!(rect.valid);
    }

    #[test]
    fn test_zones_stay_inside_monitor() {
        let monitor = Rect::new(1920, 24, 1280, 999);
        let percents = [0, 1, 17, 33, 50, 66, 99, 100];
        for &x in &percents {
            for &w in &percents {
                if x + w > 100 {
                    continue;
                }
                for margin in [0, 7, 300] {
                    let zone = Zone::new("z", x, 0, w, 100, SubLayout::Columns).with_margin(margin);
                    let rect = zone_rect(monitor, margin, &zone);
                    assert!(rect.x >= monitor.x, "{:?} x={} w={}", rect, x, w);
                    assert!(rect.right() <= monitor.right(), "{:?} x={} w={}", rect, x, w);
                    assert!(rect.width >= 1 && rect.height >= 1);
                }
            }
        }
    }

    #[test]
    fn test_capacity() {
        let zone = Zone::new("z", 0, 0, 100, 100, SubLayout::Rows).with_capacity(2);
        assert!(!zone.is_full(1));
        assert!(zone.is_full(2));
        let unlimited = Zone::new("u", 0, 0, 100, 100, SubLayout::Rows);
        assert!(!unlimited.is_full(10_000));
    }

    #[test]
    fn test_default_zones() {
        let zones = default_zones(3);
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[2].x_percent, 66);
        assert_eq!(default_zones(7).len(), 3);
    }
}
