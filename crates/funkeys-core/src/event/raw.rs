// Funkeys Raw Events
// Device-independent view of a kernel input_event

use std::fmt;

use crate::{Action, Key};

/// SYN_REPORT: terminates a group of events that form one input report
pub const SYN_REPORT: u16 = 0;
/// SYN_DROPPED: the kernel buffer overran and events were lost
pub const SYN_DROPPED: u16 = 3;
/// MSC_SCAN: raw scan code accompanying a key event
pub const MSC_SCAN: u16 = 4;
/// Scan code a USB keyboard reports for Enter (HID usage page 7, usage 0x28)
pub const ENTER_SCAN_CODE: i32 = 458792;

/// Event class, as in the `EV_*` constants of input-event-codes.h
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Sync,
    Key,
    Relative,
    Absolute,
    Misc,
    Led,
    Other(u16),
}

impl EventType {
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0x00 => EventType::Sync,
            0x01 => EventType::Key,
            0x02 => EventType::Relative,
            0x03 => EventType::Absolute,
            0x04 => EventType::Misc,
            0x11 => EventType::Led,
            other => EventType::Other(other),
        }
    }

    pub fn to_raw(self) -> u16 {
        match self {
            EventType::Sync => 0x00,
            EventType::Key => 0x01,
            EventType::Relative => 0x02,
            EventType::Absolute => 0x03,
            EventType::Misc => 0x04,
            EventType::Led => 0x11,
            EventType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Sync => f.write_str("EV_SYN"),
            EventType::Key => f.write_str("EV_KEY"),
            EventType::Relative => f.write_str("EV_REL"),
            EventType::Absolute => f.write_str("EV_ABS"),
            EventType::Misc => f.write_str("EV_MSC"),
            EventType::Led => f.write_str("EV_LED"),
            EventType::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// A single input event: type, code and value.
///
/// Timestamps are not carried; the kernel restamps everything written to
/// uinput anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawEvent {
    pub event_type: EventType,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(event_type: EventType, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// A key event for `key` carrying `action`
    pub fn key(key: Key, action: Action) -> Self {
        Self::new(EventType::Key, key.code(), action.to_i32())
    }

    /// The report boundary marker
    pub fn sync_report() -> Self {
        Self::new(EventType::Sync, SYN_REPORT, 0)
    }

    /// The scan code event real hardware sends alongside an Enter key event
    pub fn enter_scan() -> Self {
        Self::new(EventType::Misc, MSC_SCAN, ENTER_SCAN_CODE)
    }

    pub fn is_key(&self) -> bool {
        self.event_type == EventType::Key
    }

    pub fn is_sync_report(&self) -> bool {
        self.event_type == EventType::Sync && self.code == SYN_REPORT
    }

    pub fn is_sync_dropped(&self) -> bool {
        self.event_type == EventType::Sync && self.code == SYN_DROPPED
    }

    /// Key code of a key event
    pub fn as_key(&self) -> Option<Key> {
        self.is_key().then_some(Key(self.code))
    }

    /// Copy of this event with another code
    pub fn with_code(self, code: u16) -> Self {
        Self { code, ..self }
    }
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type = {}, code = ", self.event_type)?;
        match self.as_key() {
            Some(key) => write!(f, "{}", key)?,
            None => write!(f, "{}", self.code)?,
        }
        write!(f, ", value = {}", self.value)
    }
}

#[cfg(feature = "evdev-device")]
impl From<evdev::InputEvent> for RawEvent {
    fn from(event: evdev::InputEvent) -> Self {
        Self::new(
            EventType::from_raw(event.event_type().0),
            event.code(),
            event.value(),
        )
    }
}

#[cfg(feature = "evdev-device")]
impl From<RawEvent> for evdev::InputEvent {
    fn from(event: RawEvent) -> Self {
        evdev::InputEvent::new(
            evdev::EventType(event.event_type.to_raw()),
            event.code,
            event.value,
        )
    }
}
