//! Everything the engine needs from the X server, and the applier that
//! hands computed rectangles back to the window manager.

use crate::assign::ManagedWindow;
use crate::engine::{LayoutInput, Placement};
use crate::errors::FluxError;
use crate::geometry::Rect;
use crate::monitor::detect_physical_monitors;
use crate::strut::Strut;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

type FluxResult<T> = Result<T, FluxError>;

x11rb::atom_manager! {
    pub AtomCollection: AtomCollectionCookie {
        WM_STATE,
        _NET_WORKAREA,
        _NET_CURRENT_DESKTOP,
        _NET_CLIENT_LIST,
        _NET_ACTIVE_WINDOW,
        _NET_WM_WINDOW_TYPE,
        _NET_WM_WINDOW_TYPE_DOCK,
        _NET_WM_STRUT,
        _NET_WM_STRUT_PARTIAL,
        _NET_MOVERESIZE_WINDOW,
        _NET_WM_STATE,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_MAXIMIZED_VERT,
    }
}

const NET_WM_STATE_REMOVE: u32 = 0;
const SOURCE_PAGER: u32 = 2;
const NORTH_WEST_GRAVITY: u32 = 1;
const MOVERESIZE_ALL: u32 = (1 << 8) | (1 << 9) | (1 << 10) | (1 << 11);

/// Picks `desktop`'s entry from a `_NET_WORKAREA` array and clamps it to
/// the screen. An out-of-range desktop reads entry 0; a missing or empty
/// area yields the whole screen.
pub fn work_area_from_cardinals(areas: &[u32], desktop: usize, screen: Rect) -> Rect {
    let desktops = areas.len() / 4;
    if desktops == 0 {
        return screen;
    }
    let index = if desktop < desktops { desktop * 4 } else { 0 };

    let value = |offset: usize| i32::try_from(areas[index + offset]).unwrap_or(i32::MAX);
    let area = Rect::new(value(0), value(1), value(2), value(3)).intersection(&screen);

    if area.is_usable() { area } else { screen }
}

pub struct Desktop {
    pub connection: RustConnection,
    pub root: Window,
    pub screen: Screen,
    atoms: AtomCollection,
}

impl Desktop {
    pub fn connect() -> FluxResult<Self> {
        let (connection, screen_number) = x11rb::connect(None)?;
        let screen = connection.setup().roots[screen_number].clone();
        let root = screen.root;
        let atoms = AtomCollection::new(&connection)?.reply()?;

        tracing::info!(
            "Connected to screen {} ({}x{})",
            screen_number,
            screen.width_in_pixels,
            screen.height_in_pixels
        );

        Ok(Self {
            connection,
            root,
            screen,
            atoms,
        })
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.screen.width_in_pixels as i32,
            self.screen.height_in_pixels as i32,
        )
    }

    fn cardinals(&self, window: Window, property: Atom) -> FluxResult<Option<Vec<u32>>> {
        let reply = self
            .connection
            .get_property(false, window, property, AtomEnum::CARDINAL, 0, 4096)?
            .reply()?;

        if reply.type_ != u32::from(AtomEnum::CARDINAL) || reply.format != 32 {
            return Ok(None);
        }
        let values: Vec<u32> = match reply.value32() {
            Some(values) => values.collect(),
            None => return Ok(None),
        };
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values))
    }

    fn windows_property(&self, window: Window, property: Atom, kind: AtomEnum) -> Vec<u32> {
        let reply = self
            .connection
            .get_property(false, window, property, kind, 0, 4096)
            .ok()
            .and_then(|cookie| cookie.reply().ok());

        match reply {
            Some(reply) if reply.type_ == u32::from(kind) && reply.format == 32 => reply
                .value32()
                .map(|values| values.collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Work area of the current desktop, or the whole screen when the window
    /// manager does not publish a usable one.
    pub fn work_area(&self) -> FluxResult<Rect> {
        let screen = self.screen_rect();

        let Some(areas) = self.cardinals(self.root, self.atoms._NET_WORKAREA)? else {
            return Ok(screen);
        };
        let desktop = self
            .cardinals(self.root, self.atoms._NET_CURRENT_DESKTOP)?
            .and_then(|values| values.first().copied())
            .unwrap_or(0) as usize;

        Ok(work_area_from_cardinals(&areas, desktop, screen))
    }

    pub fn client_list(&self) -> Vec<Window> {
        self.windows_property(self.root, self.atoms._NET_CLIENT_LIST, AtomEnum::WINDOW)
    }

    pub fn active_window(&self) -> Option<Window> {
        self.windows_property(self.root, self.atoms._NET_ACTIVE_WINDOW, AtomEnum::WINDOW)
            .first()
            .copied()
            .filter(|&window| window != x11rb::NONE)
    }

    fn is_dock(&self, window: Window) -> bool {
        self.windows_property(window, self.atoms._NET_WM_WINDOW_TYPE, AtomEnum::ATOM)
            .contains(&self.atoms._NET_WM_WINDOW_TYPE_DOCK)
    }

    /// Mapped, non-override-redirect, non-dock window with `WM_STATE` set.
    pub fn is_normal_window(&self, window: Window) -> bool {
        let attributes = self
            .connection
            .get_window_attributes(window)
            .ok()
            .and_then(|cookie| cookie.reply().ok());

        let Some(attributes) = attributes else {
            return false;
        };
        if attributes.override_redirect || attributes.map_state != MapState::VIEWABLE {
            return false;
        }
        if self.is_dock(window) {
            return false;
        }

        self.connection
            .get_property(false, window, self.atoms.WM_STATE, AtomEnum::ANY, 0, 0)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .is_some_and(|reply| reply.type_ != x11rb::NONE)
    }

    /// Centre of `window` in root coordinates.
    pub fn window_center(&self, window: Window) -> FluxResult<(i32, i32)> {
        let geometry = self.connection.get_geometry(window)?.reply()?;
        let translated = self
            .connection
            .translate_coordinates(
                window,
                self.root,
                (geometry.width / 2) as i16,
                (geometry.height / 2) as i16,
            )?
            .reply()?;
        Ok((translated.dst_x as i32, translated.dst_y as i32))
    }

    /// Tileable windows in client-list order, at most `max_windows`.
    pub fn managed_windows(&self, max_windows: usize) -> Vec<ManagedWindow> {
        self.client_list()
            .into_iter()
            .filter(|&window| self.is_normal_window(window))
            .take(max_windows)
            .map(|window| {
                let center = self.window_center(window).unwrap_or_else(|error| {
                    tracing::warn!("Cannot locate window 0x{:x}: {}", window, error);
                    (i32::MIN, i32::MIN)
                });
                ManagedWindow::new(window, center)
            })
            .collect()
    }

    /// Reservations declared by top-level windows and managed clients.
    pub fn struts(&self) -> FluxResult<Vec<Strut>> {
        let screen = self.screen_rect();
        let mut candidates = self.connection.query_tree(self.root)?.reply()?.children;
        for client in self.client_list() {
            if !candidates.contains(&client) {
                candidates.push(client);
            }
        }

        let mut struts = Vec::new();
        for window in candidates {
            let partial = self
                .cardinals(window, self.atoms._NET_WM_STRUT_PARTIAL)
                .ok()
                .flatten();
            let values = match partial {
                Some(values) => Some(values),
                None => self.cardinals(window, self.atoms._NET_WM_STRUT).ok().flatten(),
            };
            if let Some(values) = values {
                let declared = Strut::from_cardinals(&values, screen);
                if !declared.is_empty() {
                    tracing::debug!("Window 0x{:x} reserves {:?}", window, declared);
                }
                struts.extend(declared);
            }
        }
        Ok(struts)
    }

    /// Everything one layout pass reads, captured in one go.
    pub fn snapshot(&self, max_windows: usize) -> FluxResult<LayoutInput> {
        Ok(LayoutInput {
            screen: self.screen_rect(),
            work_area: self.work_area()?,
            physical_monitors: detect_physical_monitors(&self.connection)?,
            struts: self.struts()?,
            windows: self.managed_windows(max_windows),
        })
    }

    /// Subscribes to `client`'s own structure events so its `DestroyNotify`
    /// arrives even when a frame sits between it and the root.
    pub fn watch_destroy(&self, client: Window) -> FluxResult<()> {
        self.connection.change_window_attributes(
            client,
            &ChangeWindowAttributesAux::new().event_mask(EventMask::STRUCTURE_NOTIFY),
        )?;
        self.connection.flush()?;
        Ok(())
    }

    /// The reparenting frame around `client`, or the client itself.
    pub fn frame_for_client(&self, client: Window) -> Window {
        match self
            .connection
            .query_tree(client)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
        {
            Some(tree) if tree.parent != x11rb::NONE && tree.parent != self.root => tree.parent,
            _ => client,
        }
    }

    /// Managed client whose frame (or self) is the root child `frame`.
    pub fn client_for_frame(&self, frame: Window) -> Option<Window> {
        if frame == x11rb::NONE {
            return None;
        }
        self.client_list()
            .into_iter()
            .find(|&client| client == frame || self.frame_for_client(client) == frame)
    }

    fn send_root_message(&self, window: Window, message_type: Atom, data: [u32; 5]) -> FluxResult<()> {
        let event = ClientMessageEvent::new(32, window, message_type, data);
        self.connection.send_event(
            false,
            self.root,
            EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
            event,
        )?;
        Ok(())
    }

    /// Asks the window manager to put `placement.window` exactly at
    /// `placement.rect`, dropping any maximized state first.
    pub fn apply(&self, placement: &Placement) -> FluxResult<()> {
        let Placement { window, rect } = *placement;
        if !rect.is_usable() {
            return Ok(());
        }

        self.send_root_message(
            window,
            self.atoms._NET_WM_STATE,
            [
                NET_WM_STATE_REMOVE,
                self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
                self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
                SOURCE_PAGER,
                0,
            ],
        )?;

        self.send_root_message(
            window,
            self.atoms._NET_MOVERESIZE_WINDOW,
            [
                NORTH_WEST_GRAVITY | MOVERESIZE_ALL,
                rect.x as u32,
                rect.y as u32,
                rect.width as u32,
                rect.height as u32,
            ],
        )?;

        let frame = self.frame_for_client(window);
        self.connection.configure_window(
            frame,
            &ConfigureWindowAux::new()
                .x(rect.x)
                .y(rect.y)
                .width(rect.width as u32)
                .height(rect.height as u32),
        )?;

        tracing::debug!("Placed 0x{:x} at {}", window, rect);
        Ok(())
    }

    /// Applies every placement, skipping windows that vanished meanwhile.
    pub fn apply_all(&self, placements: &[Placement]) -> FluxResult<()> {
        for placement in placements {
            if let Err(error) = self.apply(placement) {
                tracing::warn!("Failed to place 0x{:x}: {}", placement.window, error);
            }
        }
        self.connection.flush()?;
        Ok(())
    }
}
