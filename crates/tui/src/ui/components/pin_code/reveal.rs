use std::time::{Duration, Instant};

/// Single-shot, re-armable deadline used for the reveal-before-mask window.
///
/// The timer never runs on its own; the host event loop either polls
/// [`RevealTimer::fire_if_due`] on ticks or sleeps until
/// [`RevealTimer::deadline`]. At most one deadline is pending: arming again
/// replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct RevealTimer {
    deadline: Option<Instant>,
}

impl RevealTimer {
    /// Arm the timer to fire `delay` after `now`.
    ///
    /// Returns `true` when a pending deadline was cancelled in the process.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    /// Drop any pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
