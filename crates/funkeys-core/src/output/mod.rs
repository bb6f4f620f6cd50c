// Funkeys Output Layer
// Event sinks for translated batches

mod sink;

#[cfg(feature = "evdev-device")]
mod uinput;

pub use sink::{EventSink, RecordingSink, SinkError, SinkResult};

#[cfg(feature = "evdev-device")]
pub use uinput::VirtualDevice;
