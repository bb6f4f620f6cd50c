// Funkeys Event Loop
// Source -> Translator -> Sink, one event at a time

use std::time::Instant;

use crate::input::{EventSource, ReadStatus, SourceError};
use crate::output::{EventSink, SinkError};
use crate::transform::Translator;

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Fatal conditions that stop the loop
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Time source for the tap window
pub trait Clock {
    fn now(&mut self) -> Instant;
}

/// The monotonic system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// Counters kept by the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Events read and translated
    pub events_read: u64,
    /// Batches handed to the sink
    pub batches_written: u64,
    /// Events skipped while resynchronizing
    pub events_dropped: u64,
    /// Number of SYN_DROPPED conditions seen
    pub resyncs: u64,
}

/// What a single `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An event was translated and a batch of this many events written
    Translated(usize),
    /// The source overran; this many events were skipped
    Resynced(u64),
    /// Nothing was available
    Idle,
}

/// Single-threaded driver tying a source, the translator and a sink together.
///
/// Ordering is strict: a batch is fully written before the next event is
/// read, and nothing runs concurrently.
pub struct Driver<S, K, C = MonotonicClock> {
    source: S,
    sink: K,
    clock: C,
    translator: Translator,
    stats: DriverStats,
}

impl<S: EventSource, K: EventSink> Driver<S, K, MonotonicClock> {
    pub fn new(source: S, sink: K) -> Self {
        Self::with_clock(source, sink, MonotonicClock)
    }
}

impl<S: EventSource, K: EventSink, C: Clock> Driver<S, K, C> {
    /// Create a driver reading time from `clock`
    pub fn with_clock(source: S, sink: K, clock: C) -> Self {
        Self {
            source,
            sink,
            clock,
            translator: Translator::new(),
            stats: DriverStats::default(),
        }
    }

    /// Read one event and forward its translation.
    pub fn step(&mut self) -> DriverResult<Step> {
        match self.source.next_event()? {
            ReadStatus::Success(event) => {
                let now = self.clock.now();
                let batch = self.translator.translate(event, now);
                self.stats.events_read += 1;
                self.sink.write_batch(&batch)?;
                self.stats.batches_written += 1;
                Ok(Step::Translated(batch.len()))
            }
            ReadStatus::Sync => {
                let dropped = self.drain_resync()?;
                Ok(Step::Resynced(dropped))
            }
            ReadStatus::Again => Ok(Step::Idle),
        }
    }

    /// Skip the resync burst without translating it.
    ///
    /// No attempt is made to rebuild key state. The worst case is a lost
    /// Enter tap, which leaves the modifier interpretation in place.
    fn drain_resync(&mut self) -> DriverResult<u64> {
        let mut dropped = 0u64;
        while self.source.next_resync_event()?.is_some() {
            dropped += 1;
        }
        self.stats.resyncs += 1;
        self.stats.events_dropped += dropped;
        log::warn!("Oops, dropped {} events", dropped);
        Ok(dropped)
    }

    /// Run until a fatal error occurs
    pub fn run(&mut self) -> DriverResult<()> {
        loop {
            self.step()?;
        }
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Tear the driver apart, e.g. to inspect a recording sink
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}
