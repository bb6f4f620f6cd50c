// Funkeys Key Type
// Represents a single key code from Linux input-event-codes.h

use std::fmt;

/// Represents a single keyboard key code.
///
/// This is a newtype wrapper around u16 for type safety.
/// The numeric values match Linux input-event-codes.h definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const ESC: Key = Key(1);
    pub const ENTER: Key = Key(28);
    pub const LEFT_CTRL: Key = Key(29);
    pub const A: Key = Key(30);
    pub const LEFT_SHIFT: Key = Key(42);
    pub const Z: Key = Key(44);
    pub const SPACE: Key = Key(57);
    pub const CAPSLOCK: Key = Key(58);
    pub const KPENTER: Key = Key(96);
    pub const RIGHT_CTRL: Key = Key(97);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Get the kernel name of this key, if it is one funkeys cares about
    pub fn name(self) -> Option<&'static str> {
        key_name(self.0)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Display name for the key codes that appear in traces.
///
/// Everything else is printed numerically, the same way `evtest` falls back
/// for codes it does not know.
pub fn key_name(code: u16) -> Option<&'static str> {
    let name = match code {
        1 => "KEY_ESC",
        28 => "KEY_ENTER",
        29 => "KEY_LEFTCTRL",
        30 => "KEY_A",
        42 => "KEY_LEFTSHIFT",
        44 => "KEY_Z",
        54 => "KEY_RIGHTSHIFT",
        56 => "KEY_LEFTALT",
        57 => "KEY_SPACE",
        58 => "KEY_CAPSLOCK",
        96 => "KEY_KPENTER",
        97 => "KEY_RIGHTCTRL",
        100 => "KEY_RIGHTALT",
        125 => "KEY_LEFTMETA",
        126 => "KEY_RIGHTMETA",
        _ => return None,
    };
    Some(name)
}
