//! Keysyms fluxsnap can bind, and their config names.
//!
//! Printable ASCII keysyms equal their Latin-1 code point, so only the
//! function and cursor keys need a table.

pub type Keysym = u32;

pub const XK_SPACE: Keysym = 0x0020;
pub const XK_0: Keysym = 0x0030;
pub const XK_1: Keysym = 0x0031;
pub const XK_9: Keysym = 0x0039;
pub const XK_A: Keysym = 0x0061;
pub const XK_Z: Keysym = 0x007a;

pub const XK_BACKSPACE: Keysym = 0xff08;
pub const XK_TAB: Keysym = 0xff09;
pub const XK_RETURN: Keysym = 0xff0d;
pub const XK_ESCAPE: Keysym = 0xff1b;
pub const XK_HOME: Keysym = 0xff50;
pub const XK_LEFT: Keysym = 0xff51;
pub const XK_UP: Keysym = 0xff52;
pub const XK_RIGHT: Keysym = 0xff53;
pub const XK_DOWN: Keysym = 0xff54;
pub const XK_PAGE_UP: Keysym = 0xff55;
pub const XK_PAGE_DOWN: Keysym = 0xff56;
pub const XK_END: Keysym = 0xff57;
pub const XK_PRINT: Keysym = 0xff61;
pub const XK_INSERT: Keysym = 0xff63;
pub const XK_F1: Keysym = 0xffbe;
pub const XK_F12: Keysym = 0xffc9;
pub const XK_DELETE: Keysym = 0xffff;

const NAMED_KEYS: &[(&str, Keysym)] = &[
    ("space", XK_SPACE),
    ("return", XK_RETURN),
    ("enter", XK_RETURN),
    ("escape", XK_ESCAPE),
    ("esc", XK_ESCAPE),
    ("tab", XK_TAB),
    ("backspace", XK_BACKSPACE),
    ("delete", XK_DELETE),
    ("del", XK_DELETE),
    ("left", XK_LEFT),
    ("right", XK_RIGHT),
    ("up", XK_UP),
    ("down", XK_DOWN),
    ("home", XK_HOME),
    ("end", XK_END),
    ("prior", XK_PAGE_UP),
    ("pageup", XK_PAGE_UP),
    ("page_up", XK_PAGE_UP),
    ("next", XK_PAGE_DOWN),
    ("pagedown", XK_PAGE_DOWN),
    ("page_down", XK_PAGE_DOWN),
    ("insert", XK_INSERT),
    ("print", XK_PRINT),
    ("minus", '-' as Keysym),
    ("equal", '=' as Keysym),
    ("bracketleft", '[' as Keysym),
    ("bracketright", ']' as Keysym),
    ("semicolon", ';' as Keysym),
    ("apostrophe", '\'' as Keysym),
    ("grave", '`' as Keysym),
    ("backslash", '\\' as Keysym),
    ("comma", ',' as Keysym),
    ("period", '.' as Keysym),
    ("slash", '/' as Keysym),
];

/// Parses a key name from the config: a named key, `f1`..`f12`, or a
/// single printable character. Case-insensitive.
pub fn keysym_from_name(name: &str) -> Option<Keysym> {
    let lower = name.trim().to_lowercase();

    if let Some(&(_, keysym)) = NAMED_KEYS.iter().find(|(key, _)| *key == lower) {
        return Some(keysym);
    }

    let mut chars = lower.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return (ch.is_ascii_graphic()).then_some(ch as Keysym);
    }

    let number: u32 = lower.strip_prefix('f')?.parse().ok()?;
    (1..=12).contains(&number).then(|| XK_F1 + number - 1)
}

pub fn format_keysym(keysym: Keysym) -> String {
    match keysym {
        XK_SPACE => "Space".to_string(),
        XK_RETURN => "Return".to_string(),
        XK_ESCAPE => "Esc".to_string(),
        XK_DELETE => "Del".to_string(),
        XK_F1..=XK_F12 => format!("F{}", keysym - XK_F1 + 1),
        XK_A..=XK_Z => ((keysym as u8) as char).to_ascii_uppercase().to_string(),
        0x21..=0x7e => ((keysym as u8) as char).to_string(),
        _ => NAMED_KEYS
            .iter()
            .find(|(_, sym)| *sym == keysym)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| format!("0x{:x}", keysym)),
    }
}
