use crate::Config;
use crate::assign::{PinTable, nearest_monitor_index};
use crate::desktop::Desktop;
use crate::engine;
use crate::errors::FluxError;
use crate::geometry::Rect;
use crate::keyboard::handlers::bindings_for;
use crate::keyboard::{KeyAction, KeyBinding, grab_bindings, match_key_press};
use crate::preview::Preview;
use crate::snap::{DragState, SnapSettings, SnapUpdate};

use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::ErrorKind;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::*;

type FluxResult<T> = Result<T, FluxError>;

/// Drives the engine from X events. Runs on one thread; every handler
/// finishes before the next event is read.
pub struct Snapper {
    desktop: Desktop,
    config: Config,
    bindings: Vec<KeyBinding>,
    pins: PinTable,
    drag: DragState,
    drag_monitors: Vec<Rect>,
    preview: Preview,
}

impl Snapper {
    pub fn new(config: Config) -> FluxResult<Self> {
        let desktop = Desktop::connect()?;

        desktop
            .connection
            .change_window_attributes(
                desktop.root,
                &ChangeWindowAttributesAux::new()
                    .event_mask(EventMask::SUBSTRUCTURE_NOTIFY | EventMask::KEY_PRESS),
            )?
            .check()?;

        let mut bindings = bindings_for(&config);
        grab_bindings(&desktop.connection, desktop.root, &mut bindings)?;

        let preview = Preview::new(config.preview_color, config.preview_border);

        let snapper = Self {
            desktop,
            config,
            bindings,
            pins: PinTable::new(),
            drag: DragState::Idle,
            drag_monitors: Vec::new(),
            preview,
        };

        if snapper.config.snap_enabled {
            snapper.grab_drag_button()?;
        }
        snapper.desktop.connection.flush()?;

        Ok(snapper)
    }

    fn grab_drag_button(&self) -> FluxResult<()> {
        let caps = u16::from(ModMask::LOCK);
        let num = u16::from(ModMask::M2);
        let base = u16::from(self.config.modkey) & 0x00ff;

        for variant in [0, caps, num, caps | num] {
            let result = self
                .desktop
                .connection
                .grab_button(
                    false,
                    self.desktop.root,
                    EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::POINTER_MOTION,
                    GrabMode::ASYNC,
                    GrabMode::ASYNC,
                    x11rb::NONE,
                    x11rb::NONE,
                    ButtonIndex::from(self.config.drag_button),
                    ModMask::from(base | variant),
                )?
                .check();

            match result {
                Ok(()) => {}
                Err(ReplyError::X11Error(error)) if error.error_kind == ErrorKind::Access => {
                    tracing::warn!("Drag button is grabbed by another client, edge snapping disabled");
                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            }
        }
        tracing::info!("Edge snapping on button {}", self.config.drag_button);
        Ok(())
    }

    pub fn run(&mut self) -> FluxResult<()> {
        tracing::info!(
            "fluxsnap running, {} zones configured",
            self.config.zones.len()
        );

        loop {
            let event = self.desktop.connection.wait_for_event()?;
            if let Err(error) = self.handle_event(event) {
                match error {
                    FluxError::X11(crate::errors::X11Error::ConnectionError(_)) => {
                        return Err(error);
                    }
                    other => tracing::warn!("Event handling failed: {}", other),
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> FluxResult<()> {
        match event {
            Event::KeyPress(event) => {
                if let Some(action) = match_key_press(&event, &self.bindings) {
                    self.handle_key_action(action)?;
                }
            }
            Event::MapNotify(event) => {
                if self.config.tile_on_map
                    && event.event == self.desktop.root
                    && self.desktop.is_normal_window(event.window)
                {
                    tracing::debug!("Window 0x{:x} mapped", event.window);
                    self.tile()?;
                }
            }
            Event::DestroyNotify(event) => {
                if self.pins.unpin(event.window).is_some() {
                    tracing::debug!("Dropped pin for destroyed window 0x{:x}", event.window);
                }
            }
            Event::ButtonPress(event) => {
                if self.config.snap_enabled && event.detail == self.config.drag_button {
                    self.begin_drag(&event)?;
                }
            }
            Event::MotionNotify(event) => {
                if self.drag.is_dragging() {
                    self.drag_motion(event.root_x as i32, event.root_y as i32)?;
                }
            }
            Event::ButtonRelease(event) => {
                if event.detail == self.config.drag_button && self.drag.is_dragging() {
                    self.end_drag()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_action(&mut self, action: KeyAction) -> FluxResult<()> {
        match action {
            KeyAction::Tile => self.tile(),
            KeyAction::PinZone(zone) => {
                let Some(window) = self.desktop.active_window() else {
                    return Ok(());
                };
                let zones = if self.config.zones.is_empty() {
                    engine::DEFAULT_COLUMNS
                } else {
                    self.config.zones.len()
                };
                if zone >= zones {
                    tracing::debug!("Ignoring pin to zone {} of {}", zone + 1, zones);
                    return Ok(());
                }
                tracing::info!("Pinned 0x{:x} to zone {}", window, zone + 1);
                self.pins.pin(window, zone);
                self.desktop.watch_destroy(window)?;
                self.tile()
            }
            KeyAction::ClearPin => {
                let Some(window) = self.desktop.active_window() else {
                    return Ok(());
                };
                if self.pins.unpin(window).is_some() {
                    tracing::info!("Unpinned 0x{:x}", window);
                    self.tile()?;
                }
                Ok(())
            }
        }
    }

    /// One automatic tiling pass over the current desktop.
    pub fn tile(&mut self) -> FluxResult<()> {
        let input = self.desktop.snapshot(self.config.max_windows)?;
        if input.windows.is_empty() {
            return Ok(());
        }

        let live: Vec<Window> = input.windows.iter().map(|managed| managed.window).collect();
        self.pins.retain_live(&live);

        let placements = engine::tile(&input, &self.config, &self.pins);
        tracing::info!("Tiled {} windows", placements.len());
        self.desktop.apply_all(&placements)
    }

    fn begin_drag(&mut self, event: &ButtonPressEvent) -> FluxResult<()> {
        let Some(window) = self.desktop.client_for_frame(event.child) else {
            tracing::debug!("Drag started over 0x{:x}, not a managed window", event.child);
            return Ok(());
        };

        let input = self.desktop.snapshot(0)?;
        self.drag_monitors = engine::usable_monitors(&input, &self.config);
        self.drag.begin(window);
        tracing::debug!("Dragging 0x{:x}", window);

        self.drag_motion(event.root_x as i32, event.root_y as i32)
    }

    fn drag_motion(&mut self, x: i32, y: i32) -> FluxResult<()> {
        let index = nearest_monitor_index(&self.drag_monitors, x, y);
        let area = self
            .drag_monitors
            .get(index)
            .copied()
            .unwrap_or(Rect::INVALID);

        let settings = SnapSettings::from(&self.config);
        match self.drag.motion(area, x, y, &settings) {
            SnapUpdate::Unchanged => {}
            SnapUpdate::Show(rect) => {
                tracing::debug!("Snap target {}", rect);
                if self.config.preview {
                    self.preview
                        .show(&self.desktop.connection, self.desktop.root, rect)?;
                }
            }
            SnapUpdate::Hide => {
                tracing::debug!("Snap target cleared");
                self.preview.hide(&self.desktop.connection)?;
            }
        }
        Ok(())
    }

    fn end_drag(&mut self) -> FluxResult<()> {
        self.preview.hide(&self.desktop.connection)?;
        self.drag_monitors.clear();

        match self.drag.release() {
            Some(placement) => {
                tracing::info!("Snapped 0x{:x} to {}", placement.window, placement.rect);
                self.desktop.apply_all(&[placement])
            }
            None => {
                tracing::debug!("Drag released without a target");
                Ok(())
            }
        }
    }
}

impl Drop for Snapper {
    fn drop(&mut self) {
        let _ = self.preview.destroy(&self.desktop.connection);
    }
}
