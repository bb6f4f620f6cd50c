// Funkeys Input Layer - Event Sources
// Blocking, one-event-at-a-time readers of a physical keyboard

use std::path::PathBuf;

use crate::event::RawEvent;

/// Result type for event source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while reading a device
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Can't open device {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't grab that input device: {0}")]
    Grab(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A finite source (replayed or scripted input) ran out of events
    #[error("Event source exhausted")]
    Exhausted,
}

/// Outcome of a single read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// A regular event
    Success(RawEvent),
    /// Events were dropped; drain `next_resync_event` before reading on
    Sync,
    /// Nothing to read right now (EAGAIN or an interrupted wait)
    Again,
}

/// A readable stream of raw events
pub trait EventSource {
    /// Read the next event, blocking until one is available.
    fn next_event(&mut self) -> SourceResult<ReadStatus>;

    /// Read the next event of a resync burst after `ReadStatus::Sync`.
    ///
    /// Returns `None` once the burst is over and normal reading may resume.
    fn next_resync_event(&mut self) -> SourceResult<Option<RawEvent>>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> SourceResult<ReadStatus> {
        (**self).next_event()
    }

    fn next_resync_event(&mut self) -> SourceResult<Option<RawEvent>> {
        (**self).next_resync_event()
    }
}
