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

use std::fmt;
use std::rc::Rc;

use kiln_core::constants::messages;
use kiln_core::time::FrameTime;

use super::{Coroutine, CoroutineContext, CoroutineState, Yield};
use crate::delays::{CustomYield, DelayCache};

/// Identifies a coroutine started on a [`CoroutineScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoroutineId(u64);

impl fmt::Display for CoroutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coroutine #{}", self.0)
    }
}

/// The loop phase a resume happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Update,
    FixedUpdate,
    EndOfFrame,
}

/// Which delta a countdown consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clock {
    Scaled,
    Unscaled,
}

/// Per-coroutine suspension state.
enum Suspension {
    NextFrame,
    Countdown { remaining: f32, clock: Clock },
    Custom(Rc<dyn CustomYield>),
    EndOfFrame,
    FixedUpdate,
}

impl Suspension {
    /// Advances the suspension by one phase and reports whether it is over.
    fn poll(&mut self, phase: Phase, time: &FrameTime) -> bool {
        match (self, phase) {
            (Suspension::NextFrame, Phase::Update) => true,
            (Suspension::Countdown { remaining, clock }, Phase::Update) => {
                *remaining -= match clock {
                    Clock::Scaled => time.delta,
                    Clock::Unscaled => time.unscaled_delta,
                };
                *remaining <= 0.0
            }
            (Suspension::Custom(token), Phase::Update) => !token.keep_waiting(time),
            (Suspension::EndOfFrame, Phase::EndOfFrame) => true,
            (Suspension::FixedUpdate, Phase::FixedUpdate) => true,
            _ => false,
        }
    }
}

impl From<Yield> for Suspension {
    fn from(wait: Yield) -> Self {
        match wait {
            Yield::NextFrame => Suspension::NextFrame,
            Yield::Seconds(w) => Suspension::Countdown {
                remaining: w.seconds(),
                clock: Clock::Scaled,
            },
            Yield::SecondsRealtime(w) => Suspension::Countdown {
                remaining: w.seconds(),
                clock: Clock::Unscaled,
            },
            Yield::EndOfFrame(_) => Suspension::EndOfFrame,
            Yield::FixedUpdate(_) => Suspension::FixedUpdate,
            Yield::Custom(token) => Suspension::Custom(token),
        }
    }
}

struct Task {
    id: CoroutineId,
    routine: Box<dyn Coroutine>,
    suspension: Suspension,
}

/// Runs coroutines cooperatively from a single game loop.
///
/// Each frame the host calls [`update`](Self::update), optionally
/// [`fixed_update`](Self::fixed_update) once per fixed step, then
/// [`end_of_frame`](Self::end_of_frame). A coroutine is resumed at most once
/// per phase call, so a wait it yields is first evaluated on a later call.
///
/// Stopping a coroutine never touches the tokens it was waiting on: a shared
/// [`WaitForDone`](crate::WaitForDone) keeps whatever countdown it had.
#[derive(Default)]
pub struct CoroutineScheduler {
    tasks: Vec<Task>,
    next_id: u64,
}

impl CoroutineScheduler {
    /// Creates a scheduler with no coroutines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `routine`, running it immediately up to its first suspension.
    ///
    /// A routine that completes during this first run is never stored; the
    /// returned id then reports `false` from [`is_running`](Self::is_running).
    pub fn start<C>(&mut self, routine: C, delays: &mut DelayCache, time: FrameTime) -> CoroutineId
    where
        C: Coroutine + 'static,
    {
        let id = CoroutineId(self.next_id);
        self.next_id += 1;

        let mut routine: Box<dyn Coroutine> = Box::new(routine);
        let mut cx = CoroutineContext { delays, time };
        match routine.resume(&mut cx) {
            CoroutineState::Yielded(wait) => {
                log::debug!("Started {id}, suspended on {wait:?}.");
                self.tasks.push(Task {
                    id,
                    routine,
                    suspension: wait.into(),
                });
            }
            CoroutineState::Complete => log::debug!("Started {id}, completed immediately."),
        }
        id
    }

    /// Drops the coroutine `id`. Returns `false` if it was not running.
    pub fn stop(&mut self, id: CoroutineId) -> bool {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                log::debug!("Stopped {id}.");
                true
            }
            None => {
                let without = format!("a running {id}");
                log::warn!(
                    "{}",
                    messages::attempt_to_call_without("CoroutineScheduler::stop", without)
                );
                false
            }
        }
    }

    /// Drops every coroutine.
    pub fn stop_all(&mut self) {
        log::debug!("Stopping {} coroutine(s).", self.tasks.len());
        self.tasks.clear();
    }

    /// Per-frame phase: next-frame, timed and custom waits.
    pub fn update(&mut self, delays: &mut DelayCache, time: FrameTime) {
        self.run_phase(Phase::Update, delays, time);
    }

    /// Fixed-step phase: resumes coroutines waiting on a fixed update.
    pub fn fixed_update(&mut self, delays: &mut DelayCache, time: FrameTime) {
        self.run_phase(Phase::FixedUpdate, delays, time);
    }

    /// End-of-frame phase: resumes coroutines waiting for the frame to end.
    pub fn end_of_frame(&mut self, delays: &mut DelayCache, time: FrameTime) {
        self.run_phase(Phase::EndOfFrame, delays, time);
    }

    /// Returns `true` while coroutine `id` is suspended in this scheduler.
    pub fn is_running(&self, id: CoroutineId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Number of suspended coroutines.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no coroutine is suspended.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn run_phase(&mut self, phase: Phase, delays: &mut DelayCache, time: FrameTime) {
        self.tasks.retain_mut(|task| {
            if !task.suspension.poll(phase, &time) {
                return true;
            }

            let mut cx = CoroutineContext {
                delays: &mut *delays,
                time,
            };
            match task.routine.resume(&mut cx) {
                CoroutineState::Yielded(wait) => {
                    log::trace!("{} suspended on {wait:?}.", task.id);
                    task.suspension = wait.into();
                    true
                }
                CoroutineState::Complete => {
                    log::trace!("{} completed.", task.id);
                    false
                }
            }
        });
    }
}

impl fmt::Debug for CoroutineScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoroutineScheduler")
            .field("running", &self.tasks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
