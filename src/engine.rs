//! One automatic tiling pass, as a pure function of desktop state.

use crate::Config;
use crate::assign::{ManagedWindow, PinTable, assign_to_zones, bucket_by_monitor};
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::layout::columns::ColumnsLayout;
use crate::layout::rows::RowsLayout;
use crate::monitor::resolve_monitors;
use crate::strut::{Strut, clip_monitors, static_bands};
use crate::zone::{default_zones, zone_rect};
use x11rb::protocol::xproto::Window;

/// Columns used by the built-in layout.
pub const DEFAULT_COLUMNS: usize = 3;

/// Snapshot of everything a layout pass reads from the desktop.
#[derive(Debug, Clone, Default)]
pub struct LayoutInput {
    pub screen: Rect,
    pub work_area: Rect,
    pub physical_monitors: Vec<Rect>,
    /// Reservations declared by dock windows, in enumeration order.
    pub struts: Vec<Strut>,
    pub windows: Vec<ManagedWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub window: Window,
    pub rect: Rect,
}

/// Monitor rectangles with dock reservations and configured bands removed.
pub fn usable_monitors(input: &LayoutInput, config: &Config) -> Vec<Rect> {
    let mut monitors = resolve_monitors(
        input.work_area,
        input.screen,
        &input.physical_monitors,
        config.max_monitors,
    );

    let mut struts = input.struts.clone();
    struts.extend(static_bands(&config.reserve, input.screen));
    clip_monitors(&mut monitors, &struts, input.screen);

    monitors
}

/// Computes a target rectangle for every managed window.
///
/// Windows on a monitor that reservations have consumed completely get no
/// placement. Output is ordered by monitor, then zone, then occupant.
pub fn tile(input: &LayoutInput, config: &Config, pins: &PinTable) -> Vec<Placement> {
    let monitors = usable_monitors(input, config);
    let buckets = bucket_by_monitor(&input.windows, &monitors, config.max_windows);

    tracing::debug!(
        "Tiling {} windows across {} monitors",
        input.windows.len().min(config.max_windows),
        monitors.len()
    );

    let mut placements = Vec::new();
    for (monitor, windows) in monitors.iter().zip(buckets.iter()) {
        if windows.is_empty() {
            continue;
        }
        if !monitor.is_usable() {
            tracing::debug!(
                "Monitor fully reserved, leaving {} windows in place",
                windows.len()
            );
            continue;
        }

        if config.zones.is_empty() {
            placements.extend(tile_columns(*monitor, windows, config, pins));
        } else {
            placements.extend(tile_zones(*monitor, windows, config, pins));
        }
    }
    placements
}

/// Built-in layout: `min(n, 3)` equal columns inside the outer gap, each
/// column stacking its windows as rows.
fn tile_columns(
    monitor: Rect,
    windows: &[Window],
    config: &Config,
    pins: &PinTable,
) -> Vec<Placement> {
    let gap = config.gap;
    let columns = windows.len().min(DEFAULT_COLUMNS);
    let column_rects = ColumnsLayout.arrange(columns, monitor.inset(gap), gap);
    let buckets = assign_to_zones(windows, &default_zones(columns), pins);

    column_rects
        .into_iter()
        .zip(buckets)
        .flat_map(|(column, bucket)| place_bucket(&RowsLayout, column, &bucket, gap))
        .collect()
}

fn tile_zones(
    monitor: Rect,
    windows: &[Window],
    config: &Config,
    pins: &PinTable,
) -> Vec<Placement> {
    let buckets = assign_to_zones(windows, &config.zones, pins);

    config
        .zones
        .iter()
        .zip(buckets)
        .filter(|(_, bucket)| !bucket.is_empty())
        .flat_map(|(zone, bucket)| {
            let area = zone_rect(monitor, config.gap, zone);
            place_bucket(zone.layout.new().as_ref(), area, &bucket, config.gap)
        })
        .collect()
}

fn place_bucket(layout: &dyn Layout, area: Rect, bucket: &[Window], gap: i32) -> Vec<Placement> {
    if bucket.is_empty() {
        return Vec::new();
    }
    layout
        .arrange(bucket.len(), area, gap)
        .into_iter()
        .zip(bucket)
        .map(|(rect, &window)| Placement { window, rect })
        .collect()
}
