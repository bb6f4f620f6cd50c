// Funkeys Enter Disambiguation
// Tap-vs-hold state machine for the dual-role Enter key

use std::time::{Duration, Instant};

/// A release must arrive strictly within this long after the press to count
/// as a tap
pub const TAP_WINDOW: Duration = Duration::from_millis(200);

/// Where the current Enter gesture stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnterState {
    /// No undecided Enter press
    #[default]
    Idle,
    /// The press went out as a modifier-down and may still become a tap
    Pending,
}

/// Outcome of an Enter release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterDecision {
    /// Short, uninterrupted press: rewrite the gesture as a literal Enter
    Tap,
    /// Held too long, interrupted, or never pending: the modifier stands
    Forfeit,
}

/// Tap/hold tracking for Enter.
///
/// There is no timer. The decision is taken when the release arrives, by
/// comparing its timestamp against the press that armed the gesture.
#[derive(Debug, Clone)]
pub struct EnterTap {
    state: EnterState,
    /// Most recent fresh press that armed a gesture
    last_press: Option<Instant>,
    window: Duration,
}

impl EnterTap {
    /// Create a tracker with the standard 200ms window
    pub fn new() -> Self {
        Self::with_window(TAP_WINDOW)
    }

    /// Create with a custom window
    pub(crate) fn with_window(window: Duration) -> Self {
        Self {
            state: EnterState::Idle,
            last_press: None,
            window,
        }
    }

    /// A fresh (non-repeat) Enter press.
    ///
    /// Only a press from `Idle` moves the anchor; a second press while a
    /// gesture is already pending keeps the original one.
    pub fn press(&mut self, now: Instant) {
        if self.state == EnterState::Idle {
            self.last_press = Some(now);
        }
        self.state = EnterState::Pending;
    }

    /// An Enter release. Always leaves the tracker idle.
    pub fn release(&mut self, now: Instant) -> EnterDecision {
        let pending = std::mem::take(&mut self.state) == EnterState::Pending;
        let in_window = self
            .last_press
            .is_some_and(|pressed| now.saturating_duration_since(pressed) < self.window);

        if pending && in_window {
            EnterDecision::Tap
        } else {
            EnterDecision::Forfeit
        }
    }

    /// Any other key event. Returns true if a pending gesture was forfeited.
    pub fn interrupt(&mut self) -> bool {
        std::mem::take(&mut self.state) == EnterState::Pending
    }

    pub fn state(&self) -> EnterState {
        self.state
    }

    /// Check if an Enter press is still undecided
    pub fn is_pending(&self) -> bool {
        self.state == EnterState::Pending
    }

    /// Instant of the press anchoring the tap window
    pub fn last_press(&self) -> Option<Instant> {
        self.last_press
    }

    /// Get the tap window
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for EnterTap {
    fn default() -> Self {
        Self::new()
    }
}
