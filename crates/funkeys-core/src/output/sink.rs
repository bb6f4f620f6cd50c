// Funkeys Output Layer - Event Sinks
// Destinations for translated batches

use std::io;

use crate::event::{EventBatch, RawEvent};

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Error types for output operations
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Can't duplicate the input device: {0}")]
    DeviceCreation(#[source] io::Error),

    #[error("Failed to write event: {0}")]
    Write(#[from] io::Error),
}

/// A writable stream of raw events
pub trait EventSink {
    /// Forward one translated batch, in order.
    ///
    /// The batch ends with a sync marker; a failure here is fatal for the
    /// caller since nothing else can be emitted either.
    fn write_batch(&mut self, batch: &EventBatch) -> SinkResult<()>;
}

impl<K: EventSink + ?Sized> EventSink for &mut K {
    fn write_batch(&mut self, batch: &EventBatch) -> SinkResult<()> {
        (**self).write_batch(batch)
    }
}

/// In-memory sink that keeps everything written to it
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<RawEvent>,
    batches: usize,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `batches` batches, then fail every write like a vanished device
    pub fn failing_after(batches: usize) -> Self {
        Self {
            fail_after: Some(batches),
            ..Self::default()
        }
    }

    /// Every event written so far, in order
    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    /// Number of batches accepted
    pub fn batch_count(&self) -> usize {
        self.batches
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.batches = 0;
    }
}

impl EventSink for RecordingSink {
    fn write_batch(&mut self, batch: &EventBatch) -> SinkResult<()> {
        if self.fail_after.is_some_and(|limit| self.batches >= limit) {
            return Err(SinkError::Write(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "virtual device is gone",
            )));
        }
        self.events.extend(batch.iter().copied());
        self.batches += 1;
        Ok(())
    }
}
