// Funkeys Driver Pipeline Tests
//
// These tests drive the complete loop without hardware:
// scripted source -> Driver -> Translator -> recording sink
//
// Run with: cargo test --test driver_pipeline

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use funkeys_core::event::{Clock, Step};
use funkeys_core::input::{EventSource, ReadStatus, SourceError, SourceResult};
use funkeys_core::{Action, Driver, DriverError, Key, RawEvent, RecordingSink};

/// One scripted read: either an event at a timestamp, or a dropped-events burst
enum Scripted {
    Event(u64, RawEvent),
    Dropped(Vec<RawEvent>),
}

/// Source replaying a script; timestamps are handed to `ScriptClock`
struct ScriptSource {
    script: VecDeque<Scripted>,
    resync: VecDeque<RawEvent>,
    clock_feed: std::rc::Rc<std::cell::RefCell<VecDeque<u64>>>,
}

impl EventSource for ScriptSource {
    fn next_event(&mut self) -> SourceResult<ReadStatus> {
        match self.script.pop_front() {
            Some(Scripted::Event(at, event)) => {
                self.clock_feed.borrow_mut().push_back(at);
                Ok(ReadStatus::Success(event))
            }
            Some(Scripted::Dropped(burst)) => {
                self.resync = burst.into();
                Ok(ReadStatus::Sync)
            }
            None => Err(SourceError::Exhausted),
        }
    }

    fn next_resync_event(&mut self) -> SourceResult<Option<RawEvent>> {
        Ok(self.resync.pop_front())
    }
}

/// Clock that reports the timestamp of the event just read
struct ScriptClock {
    base: Instant,
    feed: std::rc::Rc<std::cell::RefCell<VecDeque<u64>>>,
}

impl Clock for ScriptClock {
    fn now(&mut self) -> Instant {
        let offset = self.feed.borrow_mut().pop_front().unwrap_or(0);
        self.base + Duration::from_millis(offset)
    }
}

fn driver_for(
    script: Vec<Scripted>,
    sink: RecordingSink,
) -> Driver<ScriptSource, RecordingSink, ScriptClock> {
    let feed = std::rc::Rc::new(std::cell::RefCell::new(VecDeque::new()));
    let source = ScriptSource {
        script: script.into(),
        resync: VecDeque::new(),
        clock_feed: feed.clone(),
    };
    let clock = ScriptClock {
        base: Instant::now(),
        feed,
    };
    Driver::with_clock(source, sink, clock)
}

fn key(key: Key, action: Action) -> RawEvent {
    RawEvent::key(key, action)
}

#[test]
fn tap_reaches_sink_in_order() {
    let script = vec![
        Scripted::Event(0, key(Key::ENTER, Action::Press)),
        Scripted::Event(120, key(Key::ENTER, Action::Release)),
    ];
    let mut driver = driver_for(script, RecordingSink::new());

    assert_eq!(driver.step().unwrap(), Step::Translated(2));
    assert_eq!(driver.step().unwrap(), Step::Translated(8));

    let (_, sink) = driver.into_parts();
    assert_eq!(
        sink.events(),
        &[
            key(Key::RIGHT_CTRL, Action::Press),
            RawEvent::sync_report(),
            key(Key::RIGHT_CTRL, Action::Release),
            RawEvent::sync_report(),
            RawEvent::enter_scan(),
            key(Key::ENTER, Action::Press),
            RawEvent::sync_report(),
            RawEvent::enter_scan(),
            key(Key::ENTER, Action::Release),
            RawEvent::sync_report(),
        ]
    );
    assert_eq!(sink.batch_count(), 2);
}

#[test]
fn dropped_release_degrades_to_held_modifier() {
    // The quick release was lost in the overrun; the next release comes late
    let script = vec![
        Scripted::Event(0, key(Key::ENTER, Action::Press)),
        Scripted::Dropped(vec![
            key(Key::ENTER, Action::Release),
            RawEvent::sync_report(),
        ]),
        Scripted::Event(400, key(Key::ENTER, Action::Release)),
    ];
    let mut driver = driver_for(script, RecordingSink::new());

    assert_eq!(driver.step().unwrap(), Step::Translated(2));
    assert_eq!(driver.step().unwrap(), Step::Resynced(2));
    assert_eq!(driver.step().unwrap(), Step::Translated(2));

    let stats = driver.stats();
    assert_eq!(stats.events_read, 2);
    assert_eq!(stats.events_dropped, 2);
    assert_eq!(stats.resyncs, 1);

    assert_eq!(
        driver.sink().events(),
        &[
            key(Key::RIGHT_CTRL, Action::Press),
            RawEvent::sync_report(),
            key(Key::RIGHT_CTRL, Action::Release),
            RawEvent::sync_report(),
        ]
    );
}

#[test]
fn run_ends_only_on_failure() {
    let script = vec![
        Scripted::Event(0, key(Key::CAPSLOCK, Action::Press)),
        Scripted::Event(10, key(Key::CAPSLOCK, Action::Release)),
        Scripted::Dropped(vec![]),
        Scripted::Event(20, key(Key::RIGHT_CTRL, Action::Press)),
    ];
    let mut driver = driver_for(script, RecordingSink::new());

    let err = driver.run().unwrap_err();
    assert!(matches!(err, DriverError::Source(SourceError::Exhausted)));
    assert_eq!(driver.stats().batches_written, 3);
    assert_eq!(driver.stats().resyncs, 1);
    assert_eq!(driver.stats().events_dropped, 0);
}

#[test]
fn sink_failure_is_fatal() {
    let script = vec![
        Scripted::Event(0, key(Key::A, Action::Press)),
        Scripted::Event(10, key(Key::A, Action::Release)),
        Scripted::Event(20, key(Key::Z, Action::Press)),
    ];
    let mut driver = driver_for(script, RecordingSink::failing_after(1));

    let err = driver.run().unwrap_err();
    assert!(matches!(err, DriverError::Sink(_)));
    assert!(err.to_string().contains("Failed to write event"));
    // The third event is never read
    assert_eq!(driver.stats().events_read, 2);
}
