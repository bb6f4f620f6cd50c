// Funkeys Input Layer - evdev Source
// Direct evdev reading of a single grabbed keyboard

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use evdev::raw_stream::RawDevice;

use super::device::DeviceCapabilities;
use super::queue::EventQueue;
use super::source::{EventSource, ReadStatus, SourceError, SourceResult};
use crate::event::RawEvent;

/// Physical keyboard read through evdev.
///
/// Events are fetched in whatever chunks the kernel hands over and queued,
/// so callers still see them one at a time and in order.
pub struct EvdevSource {
    device: RawDevice,
    path: PathBuf,
    queue: EventQueue,
    grabbed: bool,
}

impl EvdevSource {
    /// Open the device at `path` without grabbing it
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let device = RawDevice::open(&path).map_err(|source| SourceError::Open {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            device,
            path,
            queue: EventQueue::with_capacity(64),
            grabbed: false,
        })
    }

    /// Take the device exclusively so only the virtual clone reaches the system
    pub fn grab(&mut self) -> SourceResult<()> {
        if self.grabbed {
            return Ok(());
        }
        self.device.grab().map_err(SourceError::Grab)?;
        self.grabbed = true;
        Ok(())
    }

    /// Release the exclusive grab (also done on drop)
    pub fn ungrab(&mut self) {
        if self.grabbed {
            let _ = self.device.ungrab();
            self.grabbed = false;
        }
    }

    /// Device name as reported by the kernel
    pub fn name(&self) -> &str {
        self.device.name().unwrap_or("Unknown")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key capabilities, for the keyboard sanity check
    pub fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities::from_raw_device(&self.device)
    }

    /// The underlying device, used to clone it into a virtual one
    pub fn device(&self) -> &RawDevice {
        &self.device
    }
}

/// Wait for `device` to become readable and queue what it has.
///
/// Returns false when the wait was interrupted or the read would block.
fn fetch_into(device: &mut RawDevice, queue: &mut VecDeque<RawEvent>) -> SourceResult<bool> {
    let mut poll_fd = libc::pollfd {
        fd: device.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };

    // Block indefinitely; input volume is bounded by typing speed
    let poll_result = unsafe { libc::poll(&mut poll_fd, 1, -1) };
    if poll_result < 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() == ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(SourceError::Io(err));
    }

    match device.fetch_events() {
        Ok(events) => {
            queue.extend(events.map(RawEvent::from));
            Ok(!queue.is_empty())
        }
        Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
            Ok(false)
        }
        Err(err) => Err(SourceError::Io(err)),
    }
}

impl EventSource for EvdevSource {
    fn next_event(&mut self) -> SourceResult<ReadStatus> {
        let device = &mut self.device;
        self.queue.next_event(|queue| fetch_into(device, queue))
    }

    fn next_resync_event(&mut self) -> SourceResult<Option<RawEvent>> {
        let device = &mut self.device;
        self.queue.next_resync_event(|queue| fetch_into(device, queue))
    }
}

/// Ungrab on every exit path, including panics, or the keyboard stays dead
impl Drop for EvdevSource {
    fn drop(&mut self) {
        self.ungrab();
    }
}
