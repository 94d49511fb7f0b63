use crate::errors::{FluxError, X11Error};
use crate::keyboard::keysyms::{self, Keysym};
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::ErrorKind;
use x11rb::protocol::xproto::*;

type FluxResult<T> = Result<T, FluxError>;

/// Caps Lock and Num Lock must not change what a binding means.
fn lock_variants() -> [u16; 4] {
    let caps = u16::from(ModMask::LOCK);
    let num = u16::from(ModMask::M2);
    [0, caps, num, caps | num]
}

const MODIFIER_BITS: u16 = 0x00ff;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Tile,
    PinZone(usize),
    ClearPin,
}

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub(crate) modifiers: KeyButMask,
    pub(crate) keysym: Keysym,
    pub(crate) keycode: Keycode,
    pub(crate) action: KeyAction,
    /// A binding that cannot be grabbed aborts startup.
    pub(crate) required: bool,
}

impl KeyBinding {
    pub fn new(modifiers: KeyButMask, keysym: Keysym, action: KeyAction) -> Self {
        Self {
            modifiers,
            keysym,
            keycode: 0,
            action,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        for (mask, name) in [
            (KeyButMask::MOD4, "Super"),
            (KeyButMask::MOD1, "Alt"),
            (KeyButMask::CONTROL, "Ctrl"),
            (KeyButMask::SHIFT, "Shift"),
        ] {
            if self.modifiers.contains(mask) {
                parts.push(name.to_string());
            }
        }
        parts.push(keysyms::format_keysym(self.keysym));
        parts.join("+")
    }
}

/// Bindings derived from the configuration: the tiling hotkey, and when
/// enabled, modifier+Shift+1..9 to pin and modifier+Shift+0 to unpin.
pub fn bindings_for(config: &crate::Config) -> Vec<KeyBinding> {
    let mut bindings =
        vec![KeyBinding::new(config.modkey, config.hotkey, KeyAction::Tile).required()];

    if config.pin_keys {
        let modifiers = config.modkey | KeyButMask::SHIFT;
        for zone in 0..9 {
            bindings.push(KeyBinding::new(
                modifiers,
                keysyms::XK_1 + zone as u32,
                KeyAction::PinZone(zone),
            ));
        }
        bindings.push(KeyBinding::new(modifiers, keysyms::XK_0, KeyAction::ClearPin));
    }
    bindings
}

pub fn keycode_for_keysym(connection: &impl Connection, keysym: Keysym) -> FluxResult<Option<Keycode>> {
    let setup = connection.setup();
    let min_keycode = setup.min_keycode;
    let max_keycode = setup.max_keycode;

    let mapping = connection
        .get_keyboard_mapping(min_keycode, max_keycode - min_keycode + 1)?
        .reply()?;

    let per_keycode = mapping.keysyms_per_keycode as usize;
    if per_keycode == 0 {
        return Ok(None);
    }

    let keycode = mapping
        .keysyms
        .chunks(per_keycode)
        .position(|syms| syms.contains(&keysym))
        .map(|index| min_keycode + index as u8);

    Ok(keycode)
}

fn is_access_error(error: &ReplyError) -> bool {
    matches!(error, ReplyError::X11Error(x11_error) if x11_error.error_kind == ErrorKind::Access)
}

/// Grabs every binding on `root` with each lock-modifier variant.
///
/// Fails with [`X11Error::HotkeyTaken`] if a required binding is already
/// grabbed elsewhere; optional bindings that are taken are skipped.
pub fn grab_bindings(
    connection: &impl Connection,
    root: Window,
    bindings: &mut Vec<KeyBinding>,
) -> FluxResult<()> {
    let mut grabbed = Vec::with_capacity(bindings.len());

    for mut binding in bindings.drain(..) {
        let Some(keycode) = keycode_for_keysym(connection, binding.keysym)? else {
            if binding.required {
                return Err(X11Error::NoKeycode(binding.describe()).into());
            }
            tracing::warn!("No keycode for {}, skipping", binding.describe());
            continue;
        };
        binding.keycode = keycode;

        let base = u16::from(binding.modifiers) & MODIFIER_BITS;
        let mut taken = false;
        for variant in lock_variants() {
            let modifiers = ModMask::from(base | variant);
            let result = connection
                .grab_key(
                    true,
                    root,
                    modifiers,
                    keycode,
                    GrabMode::ASYNC,
                    GrabMode::ASYNC,
                )?
                .check();

            match result {
                Ok(()) => {}
                Err(error) if is_access_error(&error) => taken = true,
                Err(error) => return Err(error.into()),
            }
        }

        if taken {
            if binding.required {
                return Err(X11Error::HotkeyTaken(binding.describe()).into());
            }
            tracing::warn!("{} is grabbed by another client, skipping", binding.describe());
            continue;
        }

        tracing::info!("Bound {} to {:?}", binding.describe(), binding.action);
        grabbed.push(binding);
    }

    *bindings = grabbed;
    Ok(())
}

/// Action bound to a key press, ignoring lock modifiers.
pub fn match_key_press(event: &KeyPressEvent, bindings: &[KeyBinding]) -> Option<KeyAction> {
    let ignored = u16::from(ModMask::LOCK) | u16::from(ModMask::M2);
    let state = u16::from(event.state) & MODIFIER_BITS & !ignored;

    bindings
        .iter()
        .find(|binding| {
            binding.keycode == event.detail
                && u16::from(binding.modifiers) & MODIFIER_BITS == state
        })
        .map(|binding| binding.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press(detail: Keycode, state: KeyButMask) -> KeyPressEvent {
        KeyPressEvent {
            response_type: KEY_PRESS_EVENT,
            detail,
            sequence: 0,
            time: 0,
            root: 1,
            event: 1,
            child: 0,
            root_x: 0,
            root_y: 0,
            event_x: 0,
            event_y: 0,
            state,
            same_screen: true,
        }
    }

    fn bound(modifiers: KeyButMask, keycode: Keycode, action: KeyAction) -> KeyBinding {
        let mut binding = KeyBinding::new(modifiers, keysyms::XK_SPACE, action);
        binding.keycode = keycode;
        binding
    }

    #[test]
    fn test_match_ignores_lock_modifiers() {
        let bindings = [bound(KeyButMask::MOD4, 65, KeyAction::Tile)];

        let plain = key_press(65, KeyButMask::MOD4);
        assert_eq!(match_key_press(&plain, &bindings), Some(KeyAction::Tile));

        let with_locks = key_press(65, KeyButMask::MOD4 | KeyButMask::LOCK | KeyButMask::MOD2);
        assert_eq!(match_key_press(&with_locks, &bindings), Some(KeyAction::Tile));

        let with_button = key_press(65, KeyButMask::MOD4 | KeyButMask::BUTTON1);
        assert_eq!(match_key_press(&with_button, &bindings), Some(KeyAction::Tile));
    }

    #[test]
    fn test_match_requires_exact_modifiers() {
        let bindings = [
            bound(KeyButMask::MOD4, 65, KeyAction::Tile),
            bound(KeyButMask::MOD4 | KeyButMask::SHIFT, 10, KeyAction::PinZone(0)),
        ];
        let shifted = key_press(65, KeyButMask::MOD4 | KeyButMask::SHIFT);
        assert_eq!(match_key_press(&shifted, &bindings), None);

        let pin = key_press(10, KeyButMask::MOD4 | KeyButMask::SHIFT);
        assert_eq!(match_key_press(&pin, &bindings), Some(KeyAction::PinZone(0)));
    }

    #[test]
    fn test_bindings_for_config() {
        let mut config = crate::Config::default();
        let bindings = bindings_for(&config);
        assert_eq!(bindings.len(), 11);
        assert!(bindings[0].required);
        assert_eq!(bindings[0].describe(), "Super+Space");
        assert_eq!(bindings[10].action, KeyAction::ClearPin);

        config.pin_keys = false;
        assert_eq!(bindings_for(&config).len(), 1);
    }
}
