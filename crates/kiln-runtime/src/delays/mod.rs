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

//! Reusable wait tokens and the cache that hands them out.
//!
//! Asking the [`DelayCache`] twice for "wait 0.5 seconds" returns the same
//! [`Rc<WaitForSeconds>`](WaitForSeconds) both times instead of allocating a
//! fresh token. The same holds for unscaled waits and for
//! [`WaitForDone`] tokens keyed by a duration and a [`PredicateHandle`].
//!
//! Equal requests alias: two coroutines waiting on the same `WaitForDone`
//! share its countdown.

mod cache;
mod key;
mod token;

pub use cache::DelayCache;
pub use key::PredicateHandle;
pub use token::{
    CustomYield, WaitForDone, WaitForEndOfFrame, WaitForFixedUpdate, WaitForSeconds,
    WaitForSecondsRealtime,
};
