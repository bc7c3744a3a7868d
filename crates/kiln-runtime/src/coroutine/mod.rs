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

//! Cooperative coroutines driven once per frame.
//!
//! A coroutine is resumed by the [`CoroutineScheduler`] until it returns
//! [`CoroutineState::Complete`]. Between resumes it stays suspended on the
//! [`Yield`] it returned last.

mod scheduler;

pub use scheduler::{CoroutineId, CoroutineScheduler};

use std::fmt;
use std::rc::Rc;

use kiln_core::time::FrameTime;

use crate::delays::{
    CustomYield, DelayCache, WaitForDone, WaitForEndOfFrame, WaitForFixedUpdate, WaitForSeconds,
    WaitForSecondsRealtime,
};

/// What a coroutine suspends on.
#[derive(Clone)]
pub enum Yield {
    /// Resume on the next update tick.
    NextFrame,
    /// Resume after the given scaled seconds.
    Seconds(Rc<WaitForSeconds>),
    /// Resume after the given unscaled seconds.
    SecondsRealtime(Rc<WaitForSecondsRealtime>),
    /// Resume in the end-of-frame phase.
    EndOfFrame(Rc<WaitForEndOfFrame>),
    /// Resume in the next fixed-update phase.
    FixedUpdate(Rc<WaitForFixedUpdate>),
    /// Resume once the token stops asking to keep waiting.
    Custom(Rc<dyn CustomYield>),
}

impl fmt::Debug for Yield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yield::NextFrame => f.write_str("NextFrame"),
            Yield::Seconds(w) => write!(f, "Seconds({})", w.seconds()),
            Yield::SecondsRealtime(w) => write!(f, "SecondsRealtime({})", w.seconds()),
            Yield::EndOfFrame(_) => f.write_str("EndOfFrame"),
            Yield::FixedUpdate(_) => f.write_str("FixedUpdate"),
            Yield::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl From<Rc<WaitForSeconds>> for Yield {
    fn from(wait: Rc<WaitForSeconds>) -> Self {
        Yield::Seconds(wait)
    }
}

impl From<Rc<WaitForSecondsRealtime>> for Yield {
    fn from(wait: Rc<WaitForSecondsRealtime>) -> Self {
        Yield::SecondsRealtime(wait)
    }
}

impl From<Rc<WaitForEndOfFrame>> for Yield {
    fn from(wait: Rc<WaitForEndOfFrame>) -> Self {
        Yield::EndOfFrame(wait)
    }
}

impl From<Rc<WaitForFixedUpdate>> for Yield {
    fn from(wait: Rc<WaitForFixedUpdate>) -> Self {
        Yield::FixedUpdate(wait)
    }
}

impl From<Rc<WaitForDone>> for Yield {
    fn from(wait: Rc<WaitForDone>) -> Self {
        Yield::Custom(wait)
    }
}

/// The outcome of resuming a coroutine.
#[derive(Debug, Clone)]
pub enum CoroutineState {
    /// Suspended until the wait completes.
    Yielded(Yield),
    /// Finished; the coroutine is dropped.
    Complete,
}

impl CoroutineState {
    /// Shorthand for `CoroutineState::Yielded(wait.into())`.
    #[inline]
    pub fn wait(wait: impl Into<Yield>) -> Self {
        CoroutineState::Yielded(wait.into())
    }
}

/// What a coroutine sees while it runs.
pub struct CoroutineContext<'a> {
    /// The shared delay cache.
    pub delays: &'a mut DelayCache,
    /// Timing of the tick that resumed the coroutine.
    pub time: FrameTime,
}

/// A resumable unit of work.
pub trait Coroutine {
    /// Runs until the next suspension point or completion.
    fn resume(&mut self, cx: &mut CoroutineContext<'_>) -> CoroutineState;
}

/// A [`Coroutine`] backed by a closure. See [`from_fn`].
pub struct FnCoroutine<F>(F);

impl<F> Coroutine for FnCoroutine<F>
where
    F: FnMut(&mut CoroutineContext<'_>) -> CoroutineState,
{
    fn resume(&mut self, cx: &mut CoroutineContext<'_>) -> CoroutineState {
        (self.0)(cx)
    }
}

/// Builds a coroutine from a closure that is called on every resume.
///
/// ```
/// use kiln_runtime::{from_fn, CoroutineScheduler, CoroutineState, DelayCache};
/// use kiln_core::time::FrameTime;
///
/// let mut delays = DelayCache::new();
/// let mut scheduler = CoroutineScheduler::new();
/// let mut step = 0;
/// let id = scheduler.start(
///     from_fn(move |cx| {
///         step += 1;
///         match step {
///             1 => CoroutineState::wait(cx.delays.wait_for_seconds(1.0)),
///             _ => CoroutineState::Complete,
///         }
///     }),
///     &mut delays,
///     FrameTime::default(),
/// );
///
/// scheduler.update(&mut delays, FrameTime::uniform(0.5));
/// assert!(scheduler.is_running(id));
/// scheduler.update(&mut delays, FrameTime::uniform(0.5));
/// assert!(!scheduler.is_running(id));
/// ```
pub fn from_fn<F>(f: F) -> FnCoroutine<F>
where
    F: FnMut(&mut CoroutineContext<'_>) -> CoroutineState,
{
    FnCoroutine(f)
}
