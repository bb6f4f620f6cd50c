// Funkeys Translator
// Event-at-a-time rewriting of the physical keyboard stream
//
// Every input event produces one batch that ends in SYN_REPORT:
// - non-key events pass through untouched
// - key events go through the substitution table
// - Enter is sent as its modifier immediately, and a quick uninterrupted
//   release is rewritten into a literal Enter press/release

use std::time::Instant;

use crate::event::{EventBatch, RawEvent};
use crate::transform::enter::{EnterDecision, EnterTap};
use crate::transform::rules::SubstitutionTable;
use crate::{Action, Key};

/// Stateful translator for one input device
#[derive(Debug, Clone, Default)]
pub struct Translator {
    table: SubstitutionTable,
    enter: EnterTap,
}

impl Translator {
    pub fn new() -> Self {
        Self::with_enter_tap(EnterTap::new())
    }

    /// Create a translator around a preconfigured tap tracker
    pub(crate) fn with_enter_tap(enter: EnterTap) -> Self {
        Self {
            table: SubstitutionTable::funkeys(),
            enter,
        }
    }

    /// Translate one input event observed at `now`.
    ///
    /// The returned batch is never empty and always ends with a sync marker.
    pub fn translate(&mut self, event: RawEvent, now: Instant) -> EventBatch {
        let mut batch = EventBatch::new();
        let outgoing = match event.as_key() {
            Some(key) => self.translate_key(key, event, now, &mut batch),
            None => event,
        };
        batch.push(outgoing);
        let batch = batch.finish();

        if log::log_enabled!(log::Level::Trace) {
            let converted: Vec<String> = batch.iter().map(ToString::to_string).collect();
            log::trace!("Received event: {} Converted to: [{}]", event, converted.join("; "));
        }

        batch
    }

    /// Rewrite a key event, pushing any synthetic events that must precede it
    fn translate_key(
        &mut self,
        key: Key,
        event: RawEvent,
        now: Instant,
        batch: &mut EventBatch,
    ) -> RawEvent {
        if key != Key::ENTER {
            if self.enter.interrupt() {
                log::debug!("Enter tap forfeited by {} {}", key, event.value);
            }
            return event.with_code(self.table.apply(key).code());
        }

        let modifier = self.table.apply(Key::ENTER);
        match Action::from_i32(event.value) {
            Some(Action::Press) => {
                self.enter.press(now);
                event.with_code(modifier.code())
            }
            Some(Action::Release) => match self.enter.release(now) {
                EnterDecision::Tap => {
                    log::debug!("Enter tap: replacing {} with KEY_ENTER", modifier);
                    // Let go of the modifier that went out on press
                    batch.push(RawEvent::key(modifier, Action::Release));
                    batch.push_sync();
                    batch.push(RawEvent::enter_scan());
                    batch.push(RawEvent::key(Key::ENTER, Action::Press));
                    batch.push_sync();
                    batch.push(RawEvent::enter_scan());
                    event.with_code(Key::ENTER.code())
                }
                EnterDecision::Forfeit => event.with_code(modifier.code()),
            },
            // Autorepeat keeps both the state and the press anchor
            Some(Action::Repeat) | None => event.with_code(modifier.code()),
        }
    }

    /// Check if an Enter press is still undecided
    pub fn enter_pending(&self) -> bool {
        self.enter.is_pending()
    }

    /// Instant of the fresh Enter press anchoring the tap window
    pub fn last_enter_press(&self) -> Option<Instant> {
        self.enter.last_press()
    }
}
