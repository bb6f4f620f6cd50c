// Funkeys Output Batches
// Ordered group of events produced for one input event

use smallvec::SmallVec;

use super::raw::RawEvent;

/// Inline capacity of a batch.
///
/// The longest batch the translator produces is the Enter tap sequence
/// (eight events), so batches never spill to the heap.
pub const INLINE_BATCH: usize = 8;

/// Ordered events produced by one `translate` call.
///
/// A finished batch always ends with a SYN_REPORT so the sink can forward it
/// as complete input reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBatch {
    events: SmallVec<[RawEvent; INLINE_BATCH]>,
}

impl EventBatch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self {
            events: SmallVec::new(),
        }
    }

    /// Add an event to the batch
    pub fn push(&mut self, event: RawEvent) {
        self.events.push(event);
    }

    /// Add a report boundary
    pub fn push_sync(&mut self) {
        self.events.push(RawEvent::sync_report());
    }

    /// Terminate the batch with a sync marker unless it already ends with one
    pub fn finish(mut self) -> Self {
        if !self.ends_with_sync() {
            self.push_sync();
        }
        self
    }

    pub fn ends_with_sync(&self) -> bool {
        self.events.last().is_some_and(RawEvent::is_sync_report)
    }

    /// Get the number of events in the batch
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the events
    pub fn iter(&self) -> impl Iterator<Item = &RawEvent> {
        self.events.iter()
    }

    /// Get a reference to the underlying events
    pub fn as_slice(&self) -> &[RawEvent] {
        &self.events
    }

    /// Split into input reports, each without its terminating SYN_REPORT.
    ///
    /// Events after the last sync marker form a final report; a finished
    /// batch never has one.
    pub fn reports(&self) -> impl Iterator<Item = &[RawEvent]> {
        let trailing = !self.ends_with_sync() && !self.is_empty();
        let mut parts: Vec<&[RawEvent]> = self
            .events
            .split(RawEvent::is_sync_report)
            .collect();
        if !trailing {
            // `split` yields an empty tail after the final marker
            parts.pop();
        }
        parts.into_iter()
    }

    /// Consume the batch and return the events
    pub fn into_vec(self) -> Vec<RawEvent> {
        self.events.into_vec()
    }
}

impl AsRef<[RawEvent]> for EventBatch {
    fn as_ref(&self) -> &[RawEvent] {
        &self.events
    }
}

impl FromIterator<RawEvent> for EventBatch {
    fn from_iter<I: IntoIterator<Item = RawEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
