use crate::errors::FluxError;
use crate::geometry::Rect;
use x11rb::protocol::xinerama::ConnectionExt as _;
use x11rb::rust_connection::RustConnection;

type FluxResult<T> = Result<T, FluxError>;

/// Splits the active desktop's work area into one usable rectangle per
/// physical monitor.
///
/// Each physical monitor is clipped to the work area and dropped if nothing
/// is left. A degenerate work area falls back to `screen`. When no monitor
/// survives, the work area itself becomes the only monitor. Input order is
/// kept; surviving monitors beyond `max_monitors` are ignored.
pub fn resolve_monitors(
    work_area: Rect,
    screen: Rect,
    physical: &[Rect],
    max_monitors: usize,
) -> Vec<Rect> {
    let work_area = if work_area.is_usable() {
        work_area
    } else {
        screen
    };

    let mut monitors: Vec<Rect> = physical
        .iter()
        .map(|monitor| work_area.intersection(monitor))
        .filter(|clipped| clipped.valid)
        .take(max_monitors)
        .collect();

    if monitors.is_empty() {
        monitors.push(work_area);
    }
    monitors
}

/// Physical monitor bounds as reported by Xinerama, in server order.
///
/// Returns an empty list when Xinerama is absent or inactive; the resolver
/// then treats the whole work area as a single monitor.
pub fn detect_physical_monitors(connection: &RustConnection) -> FluxResult<Vec<Rect>> {
    let xinerama_active = connection
        .xinerama_is_active()
        .ok()
        .and_then(|cookie| cookie.reply().ok())
        .is_some_and(|reply| reply.state != 0);

    if !xinerama_active {
        return Ok(Vec::new());
    }

    let reply = connection.xinerama_query_screens()?.reply()?;

    let monitors = reply
        .screen_info
        .iter()
        .filter(|info| info.width > 0 && info.height > 0)
        .map(|info| {
            Rect::new(
                info.x_org as i32,
                info.y_org as i32,
                info.width as i32,
                info.height as i32,
            )
        })
        .collect();

    Ok(monitors)
}
