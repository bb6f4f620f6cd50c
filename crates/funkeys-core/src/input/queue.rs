// Funkeys Input Layer - Event Queue
// Buffered reading and SYN_DROPPED bookkeeping, independent of the device

use std::collections::VecDeque;

use super::source::{ReadStatus, SourceResult};
use crate::event::RawEvent;

/// Events fetched from a device, handed out one at a time.
///
/// The device delivers events in chunks through a refill callback, which
/// appends to the queue and reports whether anything arrived. A SYN_DROPPED
/// turns into `ReadStatus::Sync`; the events after it up to and including
/// the next SYN_REPORT form the resync burst.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<RawEvent>,
    resyncing: bool,
}

impl EventQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            resyncing: false,
        }
    }

    /// Check if a resync burst is still being skipped
    #[cfg(test)]
    fn is_resyncing(&self) -> bool {
        self.resyncing
    }

    /// Next event, refilling once when the queue is empty
    pub fn next_event<F>(&mut self, mut refill: F) -> SourceResult<ReadStatus>
    where
        F: FnMut(&mut VecDeque<RawEvent>) -> SourceResult<bool>,
    {
        if self.queue.is_empty() && !refill(&mut self.queue)? {
            return Ok(ReadStatus::Again);
        }

        match self.queue.pop_front() {
            Some(event) if event.is_sync_dropped() => {
                self.resyncing = true;
                Ok(ReadStatus::Sync)
            }
            Some(event) => Ok(ReadStatus::Success(event)),
            None => Ok(ReadStatus::Again),
        }
    }

    /// Next event of the resync burst, or `None` once the closing
    /// SYN_REPORT has been consumed. Refills as often as needed.
    pub fn next_resync_event<F>(&mut self, mut refill: F) -> SourceResult<Option<RawEvent>>
    where
        F: FnMut(&mut VecDeque<RawEvent>) -> SourceResult<bool>,
    {
        while self.resyncing {
            match self.queue.pop_front() {
                Some(event) if event.is_sync_report() => self.resyncing = false,
                Some(event) => return Ok(Some(event)),
                None => {
                    refill(&mut self.queue)?;
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventType, SYN_DROPPED};
    use crate::input::SourceError;
    use crate::{Action, Key};

    fn key(key: Key, action: Action) -> RawEvent {
        RawEvent::key(key, action)
    }

    fn dropped() -> RawEvent {
        RawEvent::new(EventType::Sync, SYN_DROPPED, 0)
    }

    /// Refill callback handing out one scripted chunk per call
    fn chunks(chunks: Vec<Vec<RawEvent>>) -> impl FnMut(&mut VecDeque<RawEvent>) -> SourceResult<bool> {
        let mut chunks = VecDeque::from(chunks);
        move |queue| match chunks.pop_front() {
            Some(chunk) => {
                queue.extend(chunk);
                Ok(!queue.is_empty())
            }
            None => Err(SourceError::Exhausted),
        }
    }

    fn expect_event(status: ReadStatus) -> RawEvent {
        match status {
            ReadStatus::Success(event) => event,
            other => panic!("expected an event, got {:?}", other),
        }
    }

    #[test]
    fn test_events_in_fetch_order() {
        let mut queue = EventQueue::default();
        let mut refill = chunks(vec![vec![
            key(Key::A, Action::Press),
            RawEvent::sync_report(),
            key(Key::A, Action::Release),
        ]]);

        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), key(Key::A, Action::Press));
        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), RawEvent::sync_report());
        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), key(Key::A, Action::Release));
        assert!(matches!(queue.next_event(&mut refill), Err(SourceError::Exhausted)));
    }

    #[test]
    fn test_empty_refill_is_again() {
        let mut queue = EventQueue::default();
        let mut refill = chunks(vec![vec![]]);
        assert!(matches!(queue.next_event(&mut refill).unwrap(), ReadStatus::Again));
    }

    #[test]
    fn test_events_before_drop_are_still_delivered() {
        let mut queue = EventQueue::default();
        let mut refill = chunks(vec![vec![
            key(Key::ENTER, Action::Press),
            RawEvent::sync_report(),
            dropped(),
            key(Key::ENTER, Action::Release),
            RawEvent::sync_report(),
            key(Key::Z, Action::Press),
        ]]);

        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), key(Key::ENTER, Action::Press));
        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), RawEvent::sync_report());
        assert!(!queue.is_resyncing());

        assert!(matches!(queue.next_event(&mut refill).unwrap(), ReadStatus::Sync));
        assert!(queue.is_resyncing());

        // The closing SYN_REPORT is consumed, not returned
        assert_eq!(
            queue.next_resync_event(&mut refill).unwrap(),
            Some(key(Key::ENTER, Action::Release))
        );
        assert_eq!(queue.next_resync_event(&mut refill).unwrap(), None);
        assert!(!queue.is_resyncing());

        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), key(Key::Z, Action::Press));
    }

    #[test]
    fn test_burst_spanning_two_fetches() {
        let mut queue = EventQueue::default();
        let mut refill = chunks(vec![
            vec![dropped(), key(Key::A, Action::Release)],
            vec![key(Key::CAPSLOCK, Action::Release), RawEvent::sync_report(), key(Key::Z, Action::Press)],
        ]);

        assert!(matches!(queue.next_event(&mut refill).unwrap(), ReadStatus::Sync));
        assert_eq!(
            queue.next_resync_event(&mut refill).unwrap(),
            Some(key(Key::A, Action::Release))
        );
        assert_eq!(
            queue.next_resync_event(&mut refill).unwrap(),
            Some(key(Key::CAPSLOCK, Action::Release))
        );
        assert_eq!(queue.next_resync_event(&mut refill).unwrap(), None);

        assert_eq!(expect_event(queue.next_event(&mut refill).unwrap()), key(Key::Z, Action::Press));
    }

    #[test]
    fn test_resync_outside_burst_is_none() {
        let mut queue = EventQueue::default();
        let mut refill = chunks(vec![]);
        assert_eq!(queue.next_resync_event(&mut refill).unwrap(), None);
    }

    #[test]
    fn test_refill_error_during_burst_propagates() {
        let mut queue = EventQueue::default();
        let mut refill = chunks(vec![vec![dropped()]]);

        assert!(matches!(queue.next_event(&mut refill).unwrap(), ReadStatus::Sync));
        assert!(matches!(
            queue.next_resync_event(&mut refill),
            Err(SourceError::Exhausted)
        ));
        assert!(queue.is_resyncing());
    }
}
