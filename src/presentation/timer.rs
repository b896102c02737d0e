// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Single-shot auto-advance timer.
//!
//! At most one firing is pending at any time. Arming always cancels the
//! previous firing first, and every firing carries a token so that a
//! firing delivered late for an earlier arm is recognised and dropped.

use std::time::{Duration, Instant};

/// Identifies one arming of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
struct Armed {
    token: TimerToken,
    /// `None` when the deadline lies beyond what `Instant` can represent.
    deadline: Option<Instant>,
}

/// Deadline-based timer polled by the host.
#[derive(Debug, Default)]
pub struct AdvanceTimer {
    issued: u64,
    armed: Option<Armed>,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending firing, then schedule a new one `after` from `now`.
    ///
    /// A delay too long to represent arms a timer that never expires on
    /// its own.
    pub fn arm(&mut self, now: Instant, after: Duration) -> TimerToken {
        self.cancel();
        self.issued += 1;
        let token = TimerToken(self.issued);
        let deadline = now.checked_add(after);
        if deadline.is_none() {
            log::warn!("Timer delay of {:?} is out of range, it will not expire", after);
        }
        self.armed = Some(Armed { token, deadline });
        token
    }

    /// Disarm the timer. Returns the token that was pending, if any.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.armed.take().map(|a| a.token)
    }

    pub fn armed_token(&self) -> Option<TimerToken> {
        self.armed.map(|a| a.token)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.and_then(|a| a.deadline)
    }

    /// The pending token, if its deadline has passed. The timer stays
    /// armed until the firing is claimed.
    pub fn expired(&self, now: Instant) -> Option<TimerToken> {
        match self.armed {
            Some(Armed {
                token,
                deadline: Some(deadline),
            }) if deadline <= now => Some(token),
            _ => None,
        }
    }

    /// Accept a firing delivered from outside. Only the currently armed
    /// token is accepted; the timer is disarmed when it is.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        if self.armed_token() == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = AdvanceTimer::new();
        let token = timer.arm(start, Duration::from_secs(5));

        assert_eq!(timer.expired(start + Duration::from_secs(4)), None);
        assert_eq!(timer.expired(start + Duration::from_secs(5)), Some(token));
        assert!(timer.claim(token));
        assert_eq!(timer.armed_token(), None);
        assert_eq!(timer.expired(start + Duration::from_secs(60)), None);
        assert!(!timer.claim(token));
    }

    #[test]
    fn test_rearm_replaces_pending_firing() {
        let start = Instant::now();
        let mut timer = AdvanceTimer::new();
        let first = timer.arm(start, Duration::from_secs(1));
        let second = timer.arm(start, Duration::from_secs(10));

        assert_ne!(first, second);
        assert_eq!(timer.expired(start + Duration::from_secs(2)), None);
        assert!(!timer.claim(first));
        assert!(timer.claim(second));
        assert_eq!(timer.armed_token(), None);
    }

    #[test]
    fn test_out_of_range_delay_never_expires() {
        let start = Instant::now();
        let mut timer = AdvanceTimer::new();
        let token = timer.arm(start, Duration::MAX);

        assert_eq!(timer.armed_token(), Some(token));
        assert_eq!(timer.deadline(), None);
        assert_eq!(timer.expired(start + Duration::from_secs(86_400)), None);
        assert!(timer.claim(token));
    }

    #[test]
    fn test_cancel_returns_pending_token() {
        let start = Instant::now();
        let mut timer = AdvanceTimer::new();
        assert_eq!(timer.cancel(), None);
        let token = timer.arm(start, Duration::from_secs(1));
        assert_eq!(timer.cancel(), Some(token));
        assert_eq!(timer.deadline(), None);
    }
}
