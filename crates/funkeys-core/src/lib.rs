// Funkeys Core Library
// Real-time keyboard remapping: CapsLock/LeftCtrl swap, RightCtrl as Enter,
// and Enter as RightCtrl unless it is tapped

pub mod action;
pub mod event;
pub mod input;
pub mod key;
pub mod output;
pub mod settings;
pub mod transform;

pub use action::Action;
pub use event::{Clock, Driver, DriverError, DriverResult, DriverStats, EventBatch, EventType, RawEvent};
pub use input::{EventSource, ReadStatus, SourceError};
pub use key::Key;
pub use output::{EventSink, RecordingSink, SinkError};
pub use settings::{Settings, SettingsError};
pub use transform::{EnterTap, SubstitutionTable, Translator, TAP_WINDOW};

#[cfg(feature = "evdev-device")]
pub use input::EvdevSource;
#[cfg(feature = "evdev-device")]
pub use output::VirtualDevice;
