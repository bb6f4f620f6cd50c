// Funkeys Input Layer - Device Detection
// Device listing and keyboard capability checks

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Stable symlinks to input devices, named after the hardware
pub const BY_ID_DIR: &str = "/dev/input/by-id";

/// Device capabilities extracted from evdev
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    /// Whether the device supports EV_KEY events
    pub has_ev_key: bool,
    /// List of supported key codes (EV_KEY capability codes)
    pub supported_keys: Vec<u16>,
}

impl DeviceCapabilities {
    /// Create a new DeviceCapabilities struct
    pub fn new(has_ev_key: bool, supported_keys: Vec<u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys,
        }
    }

    /// Create a HashSet from supported keys for O(1) lookups
    pub fn key_set(&self) -> HashSet<u16> {
        self.supported_keys.iter().copied().collect()
    }

    #[cfg(feature = "evdev-device")]
    pub fn from_raw_device(device: &evdev::raw_stream::RawDevice) -> Self {
        let has_ev_key = device
            .supported_events()
            .contains(evdev::EventType::KEY);
        let supported_keys = device
            .supported_keys()
            .map(|keys| keys.iter().map(|key| key.code()).collect())
            .unwrap_or_default();
        Self::new(has_ev_key, supported_keys)
    }
}

// QWERTY row key codes: Q, W, E, R, T, Y
const QWERTY_CODES: &[u16] = &[16, 17, 18, 19, 20, 21];

// Representative A-Z and SPACE codes for keyboard detection
const A_Z_SPACE_CODES: &[u16] = &[57, 30, 44]; // SPACE, A, Z

/// Determine if a device is a keyboard based on its capabilities.
///
/// A device is considered a keyboard if it supports EV_KEY, has the whole
/// QWERTY row and has A, Z and SPACE. The by-id directory lists mice and
/// headset buttons next to keyboards, and this tells them apart.
pub fn is_keyboard(capabilities: &DeviceCapabilities) -> bool {
    if !capabilities.has_ev_key {
        return false;
    }

    let key_set: HashSet<u16> = capabilities.key_set();
    let qwerty_present = QWERTY_CODES.iter().all(|code| key_set.contains(code));
    let az_present = A_Z_SPACE_CODES.iter().all(|code| key_set.contains(code));

    qwerty_present && az_present
}

/// One entry of the device listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    /// Path to pass on the command line
    pub path: PathBuf,
    /// Device name, if the device could be opened
    pub name: Option<String>,
    /// Whether the device looks like a keyboard
    pub is_keyboard: bool,
}

impl DeviceEntry {
    pub fn unprobed(path: PathBuf) -> Self {
        Self {
            path,
            name: None,
            is_keyboard: false,
        }
    }
}

/// Sorted paths of the entries in `dir`
pub fn list_device_paths(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut paths = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

/// List the devices in `dir`, probing each one for its name and keyboard-ness.
///
/// Devices that cannot be opened (usually a permissions problem) are still
/// listed, just without a name.
#[cfg(feature = "evdev-device")]
pub fn list_devices(dir: impl AsRef<Path>) -> io::Result<Vec<DeviceEntry>> {
    let entries = list_device_paths(dir)?
        .into_iter()
        .map(|path| match evdev::raw_stream::RawDevice::open(&path) {
            Ok(device) => {
                let caps = DeviceCapabilities::from_raw_device(&device);
                DeviceEntry {
                    name: device.name().map(str::to_string),
                    is_keyboard: is_keyboard(&caps),
                    path,
                }
            }
            Err(e) => {
                log::debug!("Can't probe {}: {}", path.display(), e);
                DeviceEntry::unprobed(path)
            }
        })
        .collect();
    Ok(entries)
}

#[cfg(not(feature = "evdev-device"))]
pub fn list_devices(dir: impl AsRef<Path>) -> io::Result<Vec<DeviceEntry>> {
    Ok(list_device_paths(dir)?
        .into_iter()
        .map(DeviceEntry::unprobed)
        .collect())
}
