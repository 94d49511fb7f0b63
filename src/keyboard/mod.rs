pub mod handlers;
pub mod keysyms;

pub use handlers::{KeyAction, KeyBinding, grab_bindings, match_key_press};
