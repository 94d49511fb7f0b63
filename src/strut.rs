use crate::config::Reserve;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Space claimed along one screen edge.
///
/// `depth` is measured from the screen edge inward. `start..=end` is the
/// range on the perpendicular axis the claim covers (y for left/right,
/// x for top/bottom), inclusive like `_NET_WM_STRUT_PARTIAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strut {
    pub edge: Edge,
    pub depth: i32,
    pub start: i32,
    pub end: i32,
}

impl Strut {
    /// Decodes a `_NET_WM_STRUT_PARTIAL` (12 values) or legacy
    /// `_NET_WM_STRUT` (4 values) cardinal array. Legacy struts span the
    /// whole screen. Zero-depth sides produce nothing.
    pub fn from_cardinals(values: &[u32], screen: Rect) -> Vec<Strut> {
        if values.len() < 4 {
            return Vec::new();
        }

        let full_y = (screen.y, screen.bottom() - 1);
        let full_x = (screen.x, screen.right() - 1);
        let range = |index: usize, full: (i32, i32)| {
            if values.len() >= 12 {
                (values[index] as i32, values[index + 1] as i32)
            } else {
                full
            }
        };

        let sides = [
            (Edge::Left, values[0], range(4, full_y)),
            (Edge::Right, values[1], range(6, full_y)),
            (Edge::Top, values[2], range(8, full_x)),
            (Edge::Bottom, values[3], range(10, full_x)),
        ];

        sides
            .into_iter()
            .filter(|(_, depth, _)| *depth > 0)
            .map(|(edge, depth, (start, end))| Strut {
                edge,
                depth: depth.min(i32::MAX as u32) as i32,
                start,
                end,
            })
            .collect()
    }

    fn overlaps(&self, from: i32, len: i32) -> bool {
        self.start < from + len && self.end >= from
    }

    /// Removes the reserved strip from `monitor`. Only shrinks; an axis that
    /// would go negative ends at zero and the monitor becomes invalid.
    pub fn clip(&self, monitor: Rect, screen: Rect) -> Rect {
        if !monitor.valid || self.depth <= 0 {
            return monitor;
        }

        let mut clipped = monitor;
        match self.edge {
            Edge::Left => {
                if !self.overlaps(monitor.y, monitor.height) {
                    return monitor;
                }
                let boundary = screen.x + self.depth;
                if monitor.x < boundary {
                    clipped.x = boundary.min(monitor.right());
                    clipped.width = monitor.right() - clipped.x;
                }
            }
            Edge::Right => {
                if !self.overlaps(monitor.y, monitor.height) {
                    return monitor;
                }
                let boundary = screen.right() - self.depth;
                if monitor.right() > boundary {
                    clipped.width = boundary - monitor.x;
                }
            }
            Edge::Top => {
                if !self.overlaps(monitor.x, monitor.width) {
                    return monitor;
                }
                let boundary = screen.y + self.depth;
                if monitor.y < boundary {
                    clipped.y = boundary.min(monitor.bottom());
                    clipped.height = monitor.bottom() - clipped.y;
                }
            }
            Edge::Bottom => {
                if !self.overlaps(monitor.x, monitor.width) {
                    return monitor;
                }
                let boundary = screen.bottom() - self.depth;
                if monitor.bottom() > boundary {
                    clipped.height = boundary - monitor.y;
                }
            }
        }
        clipped.normalized()
    }
}

/// Configured edge bands as full-length struts.
pub fn static_bands(reserve: &Reserve, screen: Rect) -> Vec<Strut> {
    let full_y = (screen.y, screen.bottom() - 1);
    let full_x = (screen.x, screen.right() - 1);

    [
        (Edge::Left, reserve.left, full_y),
        (Edge::Right, reserve.right, full_y),
        (Edge::Top, reserve.top, full_x),
        (Edge::Bottom, reserve.bottom, full_x),
    ]
    .into_iter()
    .filter(|(_, depth, _)| *depth > 0)
    .map(|(edge, depth, (start, end))| Strut {
        edge,
        depth: depth as i32,
        start,
        end,
    })
    .collect()
}

/// Applies every strut to every monitor in order. Discovered docks come
/// first, configured bands after them, so a band only bites where discovery
/// reserved less than it asks for.
pub fn clip_monitors(monitors: &mut [Rect], struts: &[Strut], screen: Rect) {
    for strut in struts {
        for monitor in monitors.iter_mut() {
            *monitor = strut.clip(*monitor, screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 3840, 1080);

    fn left_monitor() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    fn right_monitor() -> Rect {
        Rect::new(1920, 0, 1920, 1080)
    }

    #[test]
    fn test_decode_partial_strut() {
        let values = [0, 0, 30, 0, 0, 0, 0, 0, 0, 1919, 0, 0];
        let struts = Strut::from_cardinals(&values, SCREEN);
        assert_eq!(
            struts,
            vec![Strut {
                edge: Edge::Top,
                depth: 30,
                start: 0,
                end: 1919
            }]
        );
    }

    #[test]
    fn test_decode_legacy_strut_spans_screen() {
        let struts = Strut::from_cardinals(&[0, 0, 0, 40], SCREEN);
        assert_eq!(struts.len(), 1);
        assert_eq!(struts[0].edge, Edge::Bottom);
        assert_eq!((struts[0].start, struts[0].end), (0, 3839));
    }

    #[test]
    fn test_top_panel_only_clips_monitor_it_spans() {
        let strut = Strut {
            edge: Edge::Top,
            depth: 30,
            start: 0,
            end: 1919,
        };
        assert_eq!(
            strut.clip(left_monitor(), SCREEN),
            Rect::new(0, 30, 1920, 1050)
        );
        assert_eq!(strut.clip(right_monitor(), SCREEN), right_monitor());
    }

    #[test]
    fn test_left_dock_does_not_touch_far_monitor() {
        let strut = Strut {
            edge: Edge::Left,
            depth: 64,
            start: 0,
            end: 1079,
        };
        assert_eq!(
            strut.clip(left_monitor(), SCREEN),
            Rect::new(64, 0, 1856, 1080)
        );
        assert_eq!(strut.clip(right_monitor(), SCREEN), right_monitor());
    }

    #[test]
    fn test_right_strut_measured_from_screen_edge() {
        let strut = Strut {
            edge: Edge::Right,
            depth: 100,
            start: 0,
            end: 1079,
        };
        assert_eq!(strut.clip(left_monitor(), SCREEN), left_monitor());
        assert_eq!(
            strut.clip(right_monitor(), SCREEN),
            Rect::new(1920, 0, 1820, 1080)
        );
    }

    #[test]
    fn test_over_clip_clamps_to_zero() {
        let strut = Strut {
            edge: Edge::Bottom,
            depth: 2000,
            start: 0,
            end: 3839,
        };
        let clipped = strut.clip(left_monitor(), SCREEN);
        assert_eq!(clipped.height, 0);
        assert!(!clipped.valid);
    }

    #[test]
    fn test_band_is_floor_under_dock() {
        let screen = Rect::new(0, 0, 1920, 1080);
        let dock = Strut {
            edge: Edge::Top,
            depth: 40,
            start: 0,
            end: 1919,
        };
        let reserve = Reserve {
            top: 24,
            ..Reserve::default()
        };

        let mut struts = vec![dock];
        struts.extend(static_bands(&reserve, screen));

        let mut monitors = [screen];
        clip_monitors(&mut monitors, &struts, screen);
        assert_eq!(monitors[0], Rect::new(0, 40, 1920, 1040));

        let mut monitors = [screen];
        clip_monitors(&mut monitors, &static_bands(&reserve, screen), screen);
        assert_eq!(monitors[0], Rect::new(0, 24, 1920, 1056));
    }

    #[test]
    fn test_clipping_never_grows_area() {
        let struts = [
            Strut {
                edge: Edge::Left,
                depth: 10,
                start: 0,
                end: 1079,
            },
            Strut {
                edge: Edge::Top,
                depth: 5000,
                start: 0,
                end: 3839,
            },
            Strut {
                edge: Edge::Right,
                depth: 300,
                start: 0,
                end: 1079,
            },
        ];
        let original = [left_monitor(), right_monitor()];
        let mut monitors = original;
        for strut in &struts {
            for (index, monitor) in monitors.iter_mut().enumerate() {
                *monitor = strut.clip(*monitor, SCREEN);
                assert!(monitor.area() <= original[index].area());
            }
        }
    }
}
