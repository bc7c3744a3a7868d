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

//! # Kiln Runtime
//!
//! Cooperative frame-driven runtime pieces: the [`DelayCache`] of reusable
//! wait tokens and the [`CoroutineScheduler`] that polls them.
//!
//! Everything here is single-threaded. Tokens are shared through [`Rc`](std::rc::Rc)
//! and the scheduler is meant to be driven from one game loop.

#![warn(missing_docs)]

pub mod config;
pub mod coroutine;
pub mod delays;

pub use config::{ConfigError, DelayCacheConfig, RuntimeConfig};
pub use coroutine::{
    from_fn, Coroutine, CoroutineContext, CoroutineId, CoroutineScheduler, CoroutineState, Yield,
};
pub use delays::{
    CustomYield, DelayCache, PredicateHandle, WaitForDone, WaitForEndOfFrame, WaitForFixedUpdate,
    WaitForSeconds, WaitForSecondsRealtime,
};
