pub mod assign;
pub mod config;
pub mod desktop;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod keyboard;
pub mod layout;
pub mod monitor;
pub mod preview;
pub mod snap;
pub mod snapper;
pub mod strut;
pub mod zone;

use crate::config::Reserve;
use crate::keyboard::keysyms::{self, Keysym};
use crate::zone::Zone;
use x11rb::protocol::xproto::KeyButMask;

/// Upper bound on windows considered in one layout pass.
pub const MAX_MANAGED: usize = 1024;
/// Upper bound on monitors considered in one layout pass.
pub const MAX_MONITORS: usize = 16;

#[derive(Clone, Debug)]
pub struct Config {
    // Trigger
    pub modkey: KeyButMask,
    pub hotkey: Keysym,
    pub hotkey_name: String,
    pub tile_on_map: bool,
    pub pin_keys: bool,

    // Geometry
    pub gap: i32,
    pub reserve: Reserve,
    pub zones: Vec<Zone>,

    // Edge snapping
    pub snap_enabled: bool,
    pub drag_button: u8,
    pub edge_threshold: i32,
    pub top_band: i32,
    pub preview: bool,
    pub preview_color: u32,
    pub preview_border: u32,

    // Limits
    pub max_windows: usize,
    pub max_monitors: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modkey: KeyButMask::MOD4,
            hotkey: keysyms::XK_SPACE,
            hotkey_name: "space".to_string(),
            tile_on_map: true,
            pin_keys: true,
            gap: 10,
            reserve: Reserve::default(),
            zones: Vec::new(),
            snap_enabled: true,
            drag_button: 1,
            edge_threshold: 56,
            top_band: 120,
            preview: true,
            preview_color: 0x6dade3,
            preview_border: 3,
            max_windows: MAX_MANAGED,
            max_monitors: MAX_MONITORS,
        }
    }
}
