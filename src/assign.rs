use std::collections::HashMap;

use crate::geometry::Rect;
use crate::zone::Zone;
use x11rb::protocol::xproto::Window;

/// A tileable top-level window and its centre in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedWindow {
    pub window: Window,
    pub center: (i32, i32),
}

impl ManagedWindow {
    pub fn new(window: Window, center: (i32, i32)) -> Self {
        Self { window, center }
    }
}

/// Sticky zone choices made by the user, keyed by client window.
///
/// Entries live until the window is destroyed or the pin is cleared.
#[derive(Debug, Default, Clone)]
pub struct PinTable {
    pins: HashMap<Window, usize>,
}

impl PinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&mut self, window: Window, zone: usize) {
        self.pins.insert(window, zone);
    }

    pub fn unpin(&mut self, window: Window) -> Option<usize> {
        self.pins.remove(&window)
    }

    pub fn zone_for(&self, window: Window) -> Option<usize> {
        self.pins.get(&window).copied()
    }

    /// Drops pins for windows that no longer exist.
    pub fn retain_live(&mut self, live: &[Window]) {
        self.pins.retain(|window, _| live.contains(window));
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

/// First monitor containing the point, or monitor 0 when none does.
pub fn monitor_index_for_point(monitors: &[Rect], x: i32, y: i32) -> usize {
    monitors
        .iter()
        .position(|monitor| monitor.contains_point(x, y))
        .unwrap_or(0)
}

/// Monitor containing the point, or the closest usable one when the point
/// lies in reserved space between or outside them. Used for pointer
/// tracking, where falling back to monitor 0 would jump across screens.
pub fn nearest_monitor_index(monitors: &[Rect], x: i32, y: i32) -> usize {
    if let Some(index) = monitors
        .iter()
        .position(|monitor| monitor.contains_point(x, y))
    {
        return index;
    }

    monitors
        .iter()
        .enumerate()
        .filter(|(_, monitor)| monitor.is_usable())
        .min_by_key(|(_, monitor)| distance_squared(monitor, x, y))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

fn distance_squared(rect: &Rect, x: i32, y: i32) -> i64 {
    let (x, y) = (i64::from(x), i64::from(y));
    let dx = (i64::from(rect.x) - x).max(x - (i64::from(rect.right()) - 1)).max(0);
    let dy = (i64::from(rect.y) - y).max(y - (i64::from(rect.bottom()) - 1)).max(0);
    dx * dx + dy * dy
}

/// Groups windows by monitor. Windows beyond `max_windows` are dropped;
/// relative order inside each group follows `windows`.
pub fn bucket_by_monitor(
    windows: &[ManagedWindow],
    monitors: &[Rect],
    max_windows: usize,
) -> Vec<Vec<Window>> {
    let mut buckets = vec![Vec::new(); monitors.len().max(1)];
    for managed in windows.iter().take(max_windows) {
        let (x, y) = managed.center;
        let index = monitor_index_for_point(monitors, x, y);
        buckets[index].push(managed.window);
    }
    buckets
}

/// Zone a new occupant should join given current occupancy.
///
/// Zones at capacity are skipped. Zones with a capacity are filled before
/// unlimited ones; within each group the least occupied zone wins and ties
/// go to the earliest declared. When every zone is full the last one takes
/// the overflow.
pub fn pick_zone(zones: &[Zone], occupancy: &[usize]) -> usize {
    zones
        .iter()
        .enumerate()
        .filter(|(index, zone)| !zone.is_full(occupancy[*index]))
        .min_by_key(|(index, zone)| (zone.capacity == 0, occupancy[*index], *index))
        .map(|(index, _)| index)
        .unwrap_or(zones.len().saturating_sub(1))
}

/// Distributes `windows` over `zones`, honouring pins whose zone exists and
/// still has room.
pub fn assign_to_zones(windows: &[Window], zones: &[Zone], pins: &PinTable) -> Vec<Vec<Window>> {
    let mut buckets: Vec<Vec<Window>> = vec![Vec::new(); zones.len()];
    if zones.is_empty() {
        return buckets;
    }

    let mut occupancy = vec![0usize; zones.len()];
    for &window in windows {
        let pinned = pins
            .zone_for(window)
            .filter(|&zone| zone < zones.len() && !zones[zone].is_full(occupancy[zone]));

        let index = match pinned {
            Some(zone) => zone,
            None => pick_zone(zones, &occupancy),
        };

        occupancy[index] += 1;
        buckets[index].push(window);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SubLayout;

    fn zones(capacities: &[usize]) -> Vec<Zone> {
        capacities
            .iter()
            .enumerate()
            .map(|(index, &capacity)| {
                Zone::new(&format!("z{}", index), 0, 0, 100, 100, SubLayout::Rows)
                    .with_capacity(capacity)
            })
            .collect()
    }

    #[test]
    fn test_nearest_monitor_across_reserved_strip() {
        // top 30px reserved on both monitors
        let monitors = [Rect::new(0, 30, 1920, 1050), Rect::new(1920, 30, 1920, 1050)];
        assert_eq!(nearest_monitor_index(&monitors, 2880, 0), 1);
        assert_eq!(nearest_monitor_index(&monitors, 100, 0), 0);
        assert_eq!(nearest_monitor_index(&monitors, 2000, 500), 1);
        assert_eq!(nearest_monitor_index(&monitors, 5000, 5000), 1);
    }

    #[test]
    fn test_nearest_monitor_skips_consumed_monitors() {
        let monitors = [Rect::INVALID, Rect::new(1920, 0, 1920, 1080)];
        assert_eq!(nearest_monitor_index(&monitors, 100, 100), 1);
        assert_eq!(nearest_monitor_index(&[Rect::INVALID], 100, 100), 0);
        assert_eq!(nearest_monitor_index(&[], 100, 100), 0);
    }

    #[test]
    fn test_monitor_index_defaults_to_first() {
        let monitors = [Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)];
        assert_eq!(monitor_index_for_point(&monitors, 2000, 500), 1);
        assert_eq!(monitor_index_for_point(&monitors, -50, 500), 0);
        assert_eq!(monitor_index_for_point(&monitors, 5000, 5000), 0);
    }

    #[test]
    fn test_bucket_by_monitor_truncates() {
        let monitors = [Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)];
        let windows = [
            ManagedWindow::new(1, (2500, 400)),
            ManagedWindow::new(2, (100, 100)),
            ManagedWindow::new(3, (3000, 400)),
            ManagedWindow::new(4, (10, 10)),
        ];
        let buckets = bucket_by_monitor(&windows, &monitors, 3);
        assert_eq!(buckets, vec![vec![2], vec![1, 3]]);
    }

    #[test]
    fn test_capped_zone_fills_then_least_occupied() {
        let zones = zones(&[2, 0, 0]);
        let buckets = assign_to_zones(&[1, 2, 3, 4, 5], &zones, &PinTable::new());
        assert_eq!(buckets, vec![vec![1, 2], vec![3, 5], vec![4]]);
    }

    #[test]
    fn test_unlimited_zones_round_robin() {
        let zones = zones(&[0, 0, 0]);
        let buckets = assign_to_zones(&[1, 2, 3, 4, 5, 6, 7], &zones, &PinTable::new());
        assert_eq!(buckets, vec![vec![1, 4, 7], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn test_all_full_overflows_into_last_zone() {
        let zones = zones(&[1, 1]);
        let buckets = assign_to_zones(&[1, 2, 3, 4], &zones, &PinTable::new());
        assert_eq!(buckets, vec![vec![1], vec![2, 3, 4]]);
    }

    #[test]
    fn test_pin_overrides_occupancy() {
        let zones = zones(&[0, 0, 0]);
        let mut pins = PinTable::new();
        pins.pin(1, 2);
        pins.pin(2, 2);
        let buckets = assign_to_zones(&[1, 2, 3], &zones, &pins);
        assert_eq!(buckets, vec![vec![3], vec![], vec![1, 2]]);
    }

    #[test]
    fn test_pin_to_full_or_missing_zone_falls_back() {
        let zones = zones(&[1, 0]);
        let mut pins = PinTable::new();
        pins.pin(1, 0);
        pins.pin(2, 0);
        pins.pin(3, 9);
        let buckets = assign_to_zones(&[1, 2, 3], &zones, &pins);
        assert_eq!(buckets, vec![vec![1], vec![2, 3]]);
    }

    #[test]
    fn test_pin_table_lifecycle() {
        let mut pins = PinTable::new();
        pins.pin(10, 1);
        pins.pin(11, 0);
        assert_eq!(pins.zone_for(10), Some(1));
        pins.retain_live(&[11]);
        assert_eq!(pins.zone_for(10), None);
        assert_eq!(pins.unpin(11), Some(0));
        assert!(pins.is_empty());
    }

    #[test]
    fn test_destroyed_pinned_window_is_forgotten() {
        let mut pins = PinTable::new();
        pins.pin(0x1400003, 2);
        pins.pin(0x1600007, 0);

        // destroy of the client itself, reported through its own structure events
        assert_eq!(pins.unpin(0x1400003), Some(2));
        assert_eq!(pins.zone_for(0x1400003), None);
        assert_eq!(pins.zone_for(0x1600007), Some(0));
        assert_eq!(pins.unpin(0x1400003), None);
        assert_eq!(pins.len(), 1);
    }
}
