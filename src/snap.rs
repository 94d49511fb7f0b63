//! Edge snapping while dragging a window with the pointer.

use crate::Config;
use crate::engine::Placement;
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::layout::columns::ColumnsLayout;
use crate::layout::rows::RowsLayout;
use x11rb::protocol::xproto::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapSettings {
    pub gap: i32,
    pub edge_threshold: i32,
    pub top_band: i32,
}

impl From<&Config> for SnapSettings {
    fn from(config: &Config) -> Self {
        Self {
            gap: config.gap,
            edge_threshold: config.edge_threshold,
            top_band: config.top_band,
        }
    }
}

/// The candidate rectangles of one work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapTargets {
    pub full: Rect,
    pub left: Rect,
    pub right: Rect,
    pub left_top: Rect,
    pub left_bottom: Rect,
    pub right_top: Rect,
    pub right_bottom: Rect,
}

impl SnapTargets {
    pub fn new(area: Rect, gap: i32) -> Self {
        let full = area.inset(gap);
        let halves = ColumnsLayout.arrange(2, full, gap);
        let (left, right) = (halves[0], halves[1]);
        let left_quarters = RowsLayout.arrange(2, left, gap);
        let right_quarters = RowsLayout.arrange(2, right, gap);

        Self {
            full,
            left,
            right,
            left_top: left_quarters[0],
            left_bottom: left_quarters[1],
            right_top: right_quarters[0],
            right_bottom: right_quarters[1],
        }
    }
}

/// Target rectangle implied by a pointer at `(x, y)` over `area`, or
/// [`Rect::INVALID`] when the pointer is away from every trigger edge.
pub fn snap_target(area: Rect, x: i32, y: i32, settings: &SnapSettings) -> Rect {
    if !area.is_usable() {
        return Rect::INVALID;
    }

    let threshold = settings.edge_threshold;
    let near_left = x - area.x <= threshold;
    let near_right = area.right() - 1 - x <= threshold;
    let top_distance = y - area.y;
    let near_top = top_distance <= threshold;
    let near_bottom = area.bottom() - 1 - y <= threshold;

    let targets = SnapTargets::new(area, settings.gap);

    match (near_left, near_right, near_top, near_bottom) {
        (true, _, true, _) => targets.left_top,
        (true, _, _, true) => targets.left_bottom,
        (_, true, true, _) => targets.right_top,
        (_, true, _, true) => targets.right_bottom,
        (true, _, _, _) => targets.left,
        (_, true, _, _) => targets.right,
        _ if top_distance <= threshold.max(settings.top_band) => {
            let third = area.width / 3;
            if x < area.x + third {
                targets.left
            } else if x >= area.x + 2 * third {
                targets.right
            } else {
                targets.full
            }
        }
        _ => Rect::INVALID,
    }
}

/// What the preview should do after a motion sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapUpdate {
    Unchanged,
    Show(Rect),
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { window: Window, current: Rect },
}

impl DragState {
    pub fn begin(&mut self, window: Window) {
        *self = DragState::Dragging {
            window,
            current: Rect::INVALID,
        };
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn window(&self) -> Option<Window> {
        match self {
            DragState::Dragging { window, .. } => Some(*window),
            DragState::Idle => None,
        }
    }

    /// Recomputes the candidate for a pointer sample. Only a changed
    /// candidate produces a preview update.
    pub fn motion(&mut self, area: Rect, x: i32, y: i32, settings: &SnapSettings) -> SnapUpdate {
        let DragState::Dragging { current, .. } = self else {
            return SnapUpdate::Unchanged;
        };

        let candidate = snap_target(area, x, y, settings);
        if candidate == *current {
            return SnapUpdate::Unchanged;
        }
        *current = candidate;

        if candidate.valid {
            SnapUpdate::Show(candidate)
        } else {
            SnapUpdate::Hide
        }
    }

    /// Ends the drag. Yields a placement only when the last candidate was a
    /// real target.
    pub fn release(&mut self) -> Option<Placement> {
        let state = std::mem::take(self);
        match state {
            DragState::Dragging { window, current } if current.valid => Some(Placement {
                window,
                rect: current,
            }),
            _ => None,
        }
    }
}
