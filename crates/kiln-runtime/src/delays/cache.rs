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

use std::collections::HashMap;
use std::rc::Rc;

use super::key::{PredicateKey, SecondsKey};
use super::{
    PredicateHandle, WaitForDone, WaitForEndOfFrame, WaitForFixedUpdate, WaitForSeconds,
    WaitForSecondsRealtime,
};
use crate::config::DelayCacheConfig;

/// Memoizes wait tokens so identical requests share one allocation.
///
/// Entries are created on the first request for a key and live as long as
/// the cache. Construct one at application start and hand it to whatever
/// needs waits; the [`CoroutineScheduler`](crate::CoroutineScheduler) passes
/// it to every coroutine it resumes.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use kiln_runtime::DelayCache;
///
/// let mut delays = DelayCache::new();
/// let a = delays.wait_for_seconds(0.5);
/// let b = delays.wait_for_seconds(0.5);
/// assert!(Rc::ptr_eq(&a, &b));
/// ```
#[derive(Debug)]
pub struct DelayCache {
    end_of_frame: Rc<WaitForEndOfFrame>,
    fixed_update: Rc<WaitForFixedUpdate>,
    seconds: HashMap<SecondsKey, Rc<WaitForSeconds>>,
    realtime: HashMap<SecondsKey, Rc<WaitForSecondsRealtime>>,
    done: HashMap<PredicateKey, Rc<WaitForDone>>,
}

impl DelayCache {
    /// Creates an empty cache with the default table capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&DelayCacheConfig::default())
    }

    /// Creates an empty cache sized by `config`.
    #[must_use]
    pub fn with_config(config: &DelayCacheConfig) -> Self {
        let capacity = config.initial_capacity;
        log::debug!("DelayCache initialized with capacity {capacity}.");
        Self {
            end_of_frame: Rc::new(WaitForEndOfFrame),
            fixed_update: Rc::new(WaitForFixedUpdate),
            seconds: HashMap::with_capacity(capacity),
            realtime: HashMap::with_capacity(capacity),
            done: HashMap::with_capacity(capacity),
        }
    }

    /// The shared end-of-frame token. Always the same instance.
    #[inline]
    pub fn end_of_frame(&self) -> Rc<WaitForEndOfFrame> {
        Rc::clone(&self.end_of_frame)
    }

    /// The shared fixed-update token. Always the same instance.
    #[inline]
    pub fn fixed_update(&self) -> Rc<WaitForFixedUpdate> {
        Rc::clone(&self.fixed_update)
    }

    /// Returns the cached scaled-time wait for `seconds`, creating it on first use.
    ///
    /// Zero, negative and non-finite durations are accepted as given; how
    /// they elapse is up to whoever polls the token.
    pub fn wait_for_seconds(&mut self, seconds: f32) -> Rc<WaitForSeconds> {
        let token = self.seconds.entry(SecondsKey(seconds)).or_insert_with(|| {
            log::trace!("DelayCache miss: WaitForSeconds({seconds}).");
            Rc::new(WaitForSeconds::new(seconds))
        });
        Rc::clone(token)
    }

    /// Returns the cached unscaled wait for `seconds`, creating it on first use.
    pub fn wait_for_seconds_unscaled(&mut self, seconds: f32) -> Rc<WaitForSecondsRealtime> {
        let token = self.realtime.entry(SecondsKey(seconds)).or_insert_with(|| {
            log::trace!("DelayCache miss: WaitForSecondsRealtime({seconds}).");
            Rc::new(WaitForSecondsRealtime::new(seconds))
        });
        Rc::clone(token)
    }

    /// Returns the cached [`WaitForDone`] for `(seconds, predicate)`, creating
    /// it on first use.
    ///
    /// The predicate is matched by identity: pass clones of one
    /// [`PredicateHandle`] to share a token.
    pub fn wait_for_done(&mut self, seconds: f32, predicate: &PredicateHandle) -> Rc<WaitForDone> {
        let key = PredicateKey {
            seconds: SecondsKey(seconds),
            predicate: predicate.clone(),
        };
        let token = self.done.entry(key).or_insert_with(|| {
            log::trace!("DelayCache miss: WaitForDone({seconds}, {predicate:?}).");
            Rc::new(WaitForDone::new(seconds, predicate.clone()))
        });
        Rc::clone(token)
    }

    /// Number of cached scaled-time waits.
    #[inline]
    pub fn seconds_len(&self) -> usize {
        self.seconds.len()
    }

    /// Number of cached unscaled waits.
    #[inline]
    pub fn unscaled_len(&self) -> usize {
        self.realtime.len()
    }

    /// Number of cached predicate waits.
    #[inline]
    pub fn predicate_len(&self) -> usize {
        self.done.len()
    }
}

impl Default for DelayCache {
    fn default() -> Self {
        Self::new()
    }
}
