// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wait tokens a coroutine can suspend on.

use std::cell::Cell;
use std::fmt;

use kiln_core::time::FrameTime;

use super::PredicateHandle;

/// A wait whose completion is decided by polling.
///
/// The scheduler calls [`keep_waiting`](CustomYield::keep_waiting) once per
/// update tick for every coroutine suspended on the token.
pub trait CustomYield {
    /// Returns `true` while the suspended coroutine must stay suspended.
    fn keep_waiting(&self, time: &FrameTime) -> bool;
}

/// Suspends for a number of seconds of scaled time.
///
/// The token is a plain descriptor: each suspension keeps its own countdown,
/// so sharing one instance between coroutines is free of interference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitForSeconds {
    seconds: f32,
}

impl WaitForSeconds {
    /// Creates a wait of `seconds` scaled seconds.
    pub const fn new(seconds: f32) -> Self {
        Self { seconds }
    }

    /// The requested duration.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds
    }
}

/// Suspends for a number of real seconds, unaffected by the time scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitForSecondsRealtime {
    seconds: f32,
}

impl WaitForSecondsRealtime {
    /// Creates a wait of `seconds` unscaled seconds.
    pub const fn new(seconds: f32) -> Self {
        Self { seconds }
    }

    /// The requested duration.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds
    }
}

/// Suspends until the end of the current frame.
#[derive(Debug, Default)]
pub struct WaitForEndOfFrame;

/// Suspends until the next fixed-step tick.
#[derive(Debug, Default)]
pub struct WaitForFixedUpdate;

/// Suspends for up to `timeout` scaled seconds, or until the predicate holds.
///
/// The countdown rearms itself: whenever the token reports completion its
/// remaining time is reset to the full timeout, so the same instance can be
/// waited on again right away.
pub struct WaitForDone {
    timeout: f32,
    remaining: Cell<f32>,
    predicate: PredicateHandle,
}

impl WaitForDone {
    /// Creates a token counting down from `timeout`.
    pub fn new(timeout: f32, predicate: PredicateHandle) -> Self {
        Self {
            timeout,
            remaining: Cell::new(timeout),
            predicate,
        }
    }

    /// The full countdown length.
    #[inline]
    pub fn timeout(&self) -> f32 {
        self.timeout
    }

    /// Time left before the countdown alone completes the wait.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining.get()
    }

    /// The completion predicate.
    #[inline]
    pub fn predicate(&self) -> &PredicateHandle {
        &self.predicate
    }
}

impl CustomYield for WaitForDone {
    fn keep_waiting(&self, time: &FrameTime) -> bool {
        let remaining = self.remaining.get() - time.delta;
        self.remaining.set(remaining);

        // The predicate only runs while the countdown is still going.
        if remaining <= 0.0 || self.predicate.evaluate() {
            self.remaining.set(self.timeout);
            return false;
        }
        true
    }
}

impl fmt::Debug for WaitForDone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitForDone")
            .field("timeout", &self.timeout)
            .field("remaining", &self.remaining.get())
            .field("predicate", &self.predicate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn counting_predicate(result: bool) -> (PredicateHandle, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = PredicateHandle::new(move || {
            counter.set(counter.get() + 1);
            result
        });
        (handle, calls)
    }

    #[test]
    fn test_countdown_completes_once_and_rearms() {
        let token = WaitForDone::new(5.0, PredicateHandle::new(|| false));

        assert!(token.keep_waiting(&FrameTime::uniform(4.9)));
        assert!(token.remaining() > 0.0);

        assert!(!token.keep_waiting(&FrameTime::uniform(0.2)));
        assert_eq!(token.remaining(), 5.0);

        // Rearmed: a fresh countdown starts.
        assert!(token.keep_waiting(&FrameTime::uniform(0.2)));
    }

    #[test]
    fn test_predicate_completes_immediately() {
        let token = WaitForDone::new(100.0, PredicateHandle::new(|| true));
        assert!(!token.keep_waiting(&FrameTime::uniform(0.0)));
        assert_eq!(token.remaining(), 100.0);
    }

    #[test]
    fn test_predicate_skipped_once_countdown_expires() {
        let (predicate, calls) = counting_predicate(false);
        let token = WaitForDone::new(1.0, predicate);

        assert!(token.keep_waiting(&FrameTime::uniform(0.5)));
        assert_eq!(calls.get(), 1);

        assert!(!token.keep_waiting(&FrameTime::uniform(0.5)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_countdown_uses_scaled_delta() {
        let token = WaitForDone::new(1.0, PredicateHandle::new(|| false));
        assert!(token.keep_waiting(&FrameTime::new(0.0, 10.0)));
        assert_eq!(token.remaining(), 1.0);
    }

    #[test]
    fn test_non_positive_timeout_completes_on_first_poll() {
        let (predicate, calls) = counting_predicate(false);
        let token = WaitForDone::new(0.0, predicate);
        assert!(!token.keep_waiting(&FrameTime::uniform(0.0)));
        assert_eq!(calls.get(), 0);
        assert_eq!(token.remaining(), 0.0);
    }
}
