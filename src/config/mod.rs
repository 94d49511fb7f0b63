use crate::errors::ConfigError;
use crate::keyboard::keysyms;
use crate::layout::SubLayout;
use crate::zone::Zone;
use serde::Deserialize;
use x11rb::protocol::xproto::KeyButMask;

pub const MAX_GAP: u32 = 300;
pub const MAX_RESERVE: u32 = 4000;
pub const MAX_DISTANCE: u32 = 4000;

#[derive(Debug, Deserialize)]
pub enum ModKey {
    #[serde(alias = "Mod4", alias = "Win")]
    Super,
    #[serde(alias = "Mod1")]
    Alt,
    #[serde(alias = "Ctrl")]
    Control,
    Shift,
}

impl ModKey {
    fn to_keybut_mask(&self) -> KeyButMask {
        match self {
            ModKey::Super => KeyButMask::MOD4,
            ModKey::Alt => KeyButMask::MOD1,
            ModKey::Control => KeyButMask::CONTROL,
            ModKey::Shift => KeyButMask::SHIFT,
        }
    }
}

/// Statically reserved bands along each screen edge, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Reserve {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

#[derive(Debug, Deserialize)]
struct ZoneData {
    name: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    #[serde(default)]
    layout: SubLayout,
    #[serde(default)]
    capacity: usize,
    #[serde(default)]
    margin: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigData {
    modifier: ModKey,
    hotkey: String,
    tile_on_map: bool,
    pin_keys: bool,

    gap: u32,
    reserve: Reserve,
    zones: Vec<ZoneData>,

    snap: bool,
    drag_button: u8,
    edge_threshold: u32,
    top_band: u32,
    preview: bool,
    preview_color: u32,
    preview_border: u32,

    max_windows: usize,
    max_monitors: usize,
}

impl Default for ConfigData {
    fn default() -> Self {
        let defaults = crate::Config::default();
        Self {
            modifier: ModKey::Super,
            hotkey: defaults.hotkey_name,
            tile_on_map: defaults.tile_on_map,
            pin_keys: defaults.pin_keys,
            gap: defaults.gap as u32,
            reserve: defaults.reserve,
            zones: Vec::new(),
            snap: defaults.snap_enabled,
            drag_button: defaults.drag_button,
            edge_threshold: defaults.edge_threshold as u32,
            top_band: defaults.top_band as u32,
            preview: defaults.preview,
            preview_color: defaults.preview_color,
            preview_border: defaults.preview_border,
            max_windows: defaults.max_windows,
            max_monitors: defaults.max_monitors,
        }
    }
}

pub fn parse_config(input: &str) -> Result<crate::Config, ConfigError> {
    let config_data: ConfigData = ron::from_str(input)?;
    config_data_to_config(config_data)
}

fn check_range(field: &str, value: u32, max: u32) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

fn zone_data_to_zone(data: ZoneData) -> Result<Zone, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidZone {
        name: data.name.clone(),
        reason: reason.to_string(),
    };

    if data.name.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if [data.x, data.y, data.width, data.height].iter().any(|&p| p > 100) {
        return Err(invalid("percentages must be between 0 and 100"));
    }
    if data.x + data.width > 100 || data.y + data.height > 100 {
        return Err(invalid("zone extends past the monitor"));
    }
    check_range(&format!("zones[{}].margin", data.name), data.margin, MAX_GAP)?;

    Ok(Zone::new(
        &data.name,
        data.x,
        data.y,
        data.width,
        data.height,
        data.layout,
    )
    .with_capacity(data.capacity)
    .with_margin(data.margin as i32))
}

fn config_data_to_config(data: ConfigData) -> Result<crate::Config, ConfigError> {
    check_range("gap", data.gap, MAX_GAP)?;
    check_range("reserve.left", data.reserve.left, MAX_RESERVE)?;
    check_range("reserve.right", data.reserve.right, MAX_RESERVE)?;
    check_range("reserve.top", data.reserve.top, MAX_RESERVE)?;
    check_range("reserve.bottom", data.reserve.bottom, MAX_RESERVE)?;
    check_range("edge_threshold", data.edge_threshold, MAX_DISTANCE)?;
    check_range("top_band", data.top_band, MAX_DISTANCE)?;
    check_range("preview_border", data.preview_border, MAX_GAP)?;

    if !(1..=5).contains(&data.drag_button) {
        return Err(ConfigError::InvalidButton(data.drag_button));
    }

    let hotkey = keysyms::keysym_from_name(&data.hotkey)
        .ok_or_else(|| ConfigError::UnknownKey(data.hotkey.clone()))?;

    let zones = data
        .zones
        .into_iter()
        .map(zone_data_to_zone)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(crate::Config {
        modkey: data.modifier.to_keybut_mask(),
        hotkey,
        hotkey_name: data.hotkey,
        tile_on_map: data.tile_on_map,
        pin_keys: data.pin_keys,
        gap: data.gap as i32,
        reserve: data.reserve,
        zones,
        snap_enabled: data.snap,
        drag_button: data.drag_button,
        edge_threshold: data.edge_threshold as i32,
        top_band: data.top_band as i32,
        preview: data.preview,
        preview_color: data.preview_color,
        preview_border: data.preview_border,
        max_windows: data.max_windows.max(1),
        max_monitors: data.max_monitors.max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("()").unwrap();
        assert_eq!(config.gap, 10);
        assert_eq!(config.modkey, KeyButMask::MOD4);
        assert_eq!(config.hotkey, keysyms::XK_SPACE);
        assert!(config.zones.is_empty());
        assert_eq!(config.max_windows, crate::MAX_MANAGED);
    }

    #[test]
    fn test_full_config() {
        let input = r#"(
            modifier: Alt,
            hotkey: "t",
            gap: 4,
            edge_threshold: 30,
            top_band: 80,
            reserve: (top: 24),
            zones: [
                (name: "main", x: 0, y: 0, width: 60, height: 100, layout: Columns, capacity: 2),
                (name: "side", x: 60, y: 0, width: 40, height: 100, layout: Grid, margin: 6),
            ],
        )"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.modkey, KeyButMask::MOD1);
        assert_eq!(config.hotkey, 't' as keysyms::Keysym);
        assert_eq!(config.gap, 4);
        assert_eq!(config.reserve.top, 24);
        assert_eq!(config.reserve.left, 0);
        assert_eq!(config.zones.len(), 2);
        assert_eq!(config.zones[0].capacity, 2);
        assert_eq!(config.zones[0].layout, SubLayout::Columns);
        assert_eq!(config.zones[1].margin, 6);
        assert_eq!(config.zones[1].layout, SubLayout::Grid);
    }

    #[test]
    fn test_modifier_aliases() {
        let config = parse_config("(modifier: Win)").unwrap();
        assert_eq!(config.modkey, KeyButMask::MOD4);
        let config = parse_config("(modifier: Ctrl)").unwrap();
        assert_eq!(config.modkey, KeyButMask::CONTROL);
    }

    #[test]
    fn test_gap_out_of_range() {
        let err = parse_config("(gap: 301)").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 301, .. }));
    }

    #[test]
    fn test_reserve_out_of_range() {
        assert!(parse_config("(reserve: (bottom: 4001))").is_err());
        assert!(parse_config("(reserve: (bottom: 4000))").is_ok());
    }

    #[test]
    fn test_zone_escaping_monitor_rejected() {
        let input = r#"(zones: [(name: "wide", x: 50, y: 0, width: 60, height: 100)])"#;
        let err = parse_config(input).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidZone { .. }));
    }

    #[test]
    fn test_unknown_hotkey() {
        let err = parse_config(r#"(hotkey: "hyperspace")"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn test_bad_drag_button() {
        assert!(matches!(
            parse_config("(drag_button: 9)"),
            Err(ConfigError::InvalidButton(9))
        ));
    }

    #[test]
    fn test_template_parses() {
        let template = include_str!("../../templates/config.ron");
        let config = parse_config(template).unwrap();
        assert_eq!(config.zones.len(), 3);
    }
}
