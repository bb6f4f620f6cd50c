// Funkeys Input Layer
// Event sources and device detection

mod device;
#[cfg_attr(not(feature = "evdev-device"), allow(dead_code))]
mod queue;
mod source;

#[cfg(feature = "evdev-device")]
mod evdev_source;

pub use device::{
    is_keyboard, list_device_paths, list_devices, DeviceCapabilities, DeviceEntry, BY_ID_DIR,
};
pub use source::{EventSource, ReadStatus, SourceError, SourceResult};

#[cfg(feature = "evdev-device")]
pub use evdev_source::EvdevSource;
