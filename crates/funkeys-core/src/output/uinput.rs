// Funkeys uinput Output Layer
// Virtual clone of the grabbed keyboard

use evdev::raw_stream::RawDevice;
use evdev::uinput::VirtualDeviceBuilder;
use evdev::{AttributeSet, InputEvent, MiscType};

use super::sink::{EventSink, SinkError, SinkResult};
use crate::event::EventBatch;

/// Fallback name when the physical device reports none
const DEFAULT_NAME: &str = "Funkeys (virtual) Keyboard";

/// Virtual uinput device impersonating the physical keyboard
pub struct VirtualDevice {
    device: evdev::uinput::VirtualDevice,
    name: String,
}

impl VirtualDevice {
    /// Clone `source` into a new uinput device.
    ///
    /// The clone copies the name, id and key/misc/relative capabilities, and
    /// always advertises the keys the translator can emit and MSC_SCAN, so
    /// the synthetic Enter sequence is never filtered by the kernel.
    pub fn from_device(source: &RawDevice, name_override: Option<&str>) -> SinkResult<Self> {
        let name = name_override
            .or_else(|| source.name())
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let mut keys = AttributeSet::<evdev::Key>::new();
        if let Some(supported) = source.supported_keys() {
            for key in supported.iter() {
                keys.insert(key);
            }
        }
        for key in [
            evdev::Key::KEY_ENTER,
            evdev::Key::KEY_LEFTCTRL,
            evdev::Key::KEY_CAPSLOCK,
            evdev::Key::KEY_RIGHTCTRL,
        ] {
            keys.insert(key);
        }

        let mut misc = AttributeSet::<MiscType>::new();
        if let Some(supported) = source.misc_properties() {
            for property in supported.iter() {
                misc.insert(property);
            }
        }
        misc.insert(MiscType::MSC_SCAN);

        let mut builder = VirtualDeviceBuilder::new()
            .map_err(SinkError::DeviceCreation)?
            .name(&name)
            .input_id(source.input_id())
            .with_keys(&keys)
            .map_err(SinkError::DeviceCreation)?
            .with_msc(&misc)
            .map_err(SinkError::DeviceCreation)?;

        if let Some(axes) = source.supported_relative_axes() {
            builder = builder
                .with_relative_axes(axes)
                .map_err(SinkError::DeviceCreation)?;
        }

        let device = builder.build().map_err(SinkError::DeviceCreation)?;
        log::info!("Created virtual device '{}'", name);

        Ok(Self { device, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EventSink for VirtualDevice {
    /// `emit` closes every call with its own SYN_REPORT, so the batch is
    /// written one report at a time with the markers stripped.
    fn write_batch(&mut self, batch: &EventBatch) -> SinkResult<()> {
        for report in batch.reports() {
            let events: Vec<InputEvent> = report.iter().copied().map(InputEvent::from).collect();
            self.device.emit(&events)?;
        }
        Ok(())
    }
}
