//! Single-shot delayed tasks
//!
//! A `OneShot` fires at most once, the first time it is polled at or after
//! its deadline. Cancelling (explicitly or by dropping the owner) guarantees
//! it never fires. There is no background thread; the owner polls it from
//! its event loop.

use super::time_source::SharedTimeSource;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OneShotState {
    Pending(Instant),
    Fired,
    Cancelled,
}

#[derive(Debug)]
pub struct OneShot {
    clock: SharedTimeSource,
    state: OneShotState,
}

impl OneShot {
    /// Schedule a task `delay` from now on the given clock.
    pub fn after(clock: SharedTimeSource, delay: Duration) -> Self {
        let deadline = clock.now() + delay;
        Self {
            clock,
            state: OneShotState::Pending(deadline),
        }
    }

    /// Returns true exactly once, when the deadline has passed.
    pub fn poll(&mut self) -> bool {
        match self.state {
            OneShotState::Pending(deadline) if self.clock.now() >= deadline => {
                self.state = OneShotState::Fired;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        if matches!(self.state, OneShotState::Pending(_)) {
            self.state = OneShotState::Cancelled;
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, OneShotState::Pending(_))
    }

    /// Time left until the deadline, if still pending.
    pub fn remaining(&self) -> Option<Duration> {
        match self.state {
            OneShotState::Pending(deadline) => {
                Some(deadline.saturating_duration_since(self.clock.now()))
            }
            _ => None,
        }
    }
}
