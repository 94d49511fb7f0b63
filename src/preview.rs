use crate::errors::FluxError;
use crate::geometry::Rect;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

type FluxResult<T> = Result<T, FluxError>;

/// Window size whose border-inclusive extent covers `rect` exactly.
fn inner_size(rect: Rect, border: u32) -> (u32, u32) {
    let border = border.min(i32::MAX as u32 / 2) as i32;
    let width = rect.width.saturating_sub(2 * border).max(1);
    let height = rect.height.saturating_sub(2 * border).max(1);
    (width as u32, height as u32)
}

/// Outline shown over the snap target while a drag is in progress.
///
/// The window is override-redirect so the window manager leaves it alone,
/// and has no background so only its border is drawn.
pub struct Preview {
    window: Option<Window>,
    visible: bool,
    color: u32,
    border: u32,
}

impl Preview {
    pub fn new(color: u32, border: u32) -> Self {
        Self {
            window: None,
            visible: false,
            color,
            border,
        }
    }

    fn ensure_window(&mut self, connection: &RustConnection, root: Window) -> FluxResult<Window> {
        if let Some(window) = self.window {
            return Ok(window);
        }

        let window = connection.generate_id()?;
        connection.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            window,
            root,
            0,
            0,
            1,
            1,
            self.border as u16,
            WindowClass::INPUT_OUTPUT,
            x11rb::COPY_FROM_PARENT,
            &CreateWindowAux::new()
                .override_redirect(1)
                .border_pixel(self.color)
                .background_pixmap(x11rb::NONE),
        )?;

        self.window = Some(window);
        Ok(window)
    }

    pub fn show(&mut self, connection: &RustConnection, root: Window, rect: Rect) -> FluxResult<()> {
        let window = self.ensure_window(connection, root)?;
        let (width, height) = inner_size(rect, self.border);

        connection.configure_window(
            window,
            &ConfigureWindowAux::new()
                .x(rect.x)
                .y(rect.y)
                .width(width)
                .height(height)
                .stack_mode(StackMode::ABOVE),
        )?;

        if !self.visible {
            connection.map_window(window)?;
            self.visible = true;
        }
        connection.flush()?;
        Ok(())
    }

    pub fn hide(&mut self, connection: &RustConnection) -> FluxResult<()> {
        if let (Some(window), true) = (self.window, self.visible) {
            connection.unmap_window(window)?;
            connection.flush()?;
        }
        self.visible = false;
        Ok(())
    }

    pub fn destroy(&mut self, connection: &RustConnection) -> FluxResult<()> {
        if let Some(window) = self.window.take() {
            connection.destroy_window(window)?;
            connection.flush()?;
        }
        self.visible = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_border_fits_inside_target() {
        assert_eq!(inner_size(Rect::new(10, 10, 945, 525), 3), (939, 519));
        assert_eq!(inner_size(Rect::new(0, 0, 4, 4), 3), (1, 1));
        assert_eq!(inner_size(Rect::new(0, 0, 100, 50), 0), (100, 50));
    }

    #[test]
    fn test_new_preview_is_hidden() {
        let preview = Preview::new(0x6dade3, 3);
        assert!(preview.window.is_none());
        assert!(!preview.visible);
    }
}
