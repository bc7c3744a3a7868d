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

//! Frame timing: the per-tick elapsed times consumed by coroutines and
//! gameplay code, and the clock that produces them.

mod clock;

pub use clock::FrameClock;

use crate::constants::time::{DEFAULT_FIXED_TIMESTEP, DEFAULT_FRAME_RATE, DEFAULT_TIME_SCALE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Elapsed time for a single scheduling tick, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Time since the previous tick, multiplied by the clock's time scale.
    pub delta: f32,
    /// Time since the previous tick, ignoring the time scale.
    pub unscaled_delta: f32,
    /// Length of one fixed simulation step.
    pub fixed_delta: f32,
}

impl FrameTime {
    /// Creates a frame time with the default fixed step.
    pub const fn new(delta: f32, unscaled_delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta,
            fixed_delta: DEFAULT_FIXED_TIMESTEP,
        }
    }

    /// Creates a frame time where scaled and unscaled deltas are equal.
    pub const fn uniform(delta: f32) -> Self {
        Self::new(delta, delta)
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

/// Configuration of the [`FrameClock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Multiplier applied to real elapsed time. `0.0` pauses scaled time.
    pub time_scale: f32,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Length of one fixed simulation step, in seconds.
    pub fixed_timestep: f32,
}

impl TimeConfig {
    /// Checks that every value is usable by a [`FrameClock`].
    pub fn validate(&self) -> Result<(), TimeError> {
        validate_time_scale(self.time_scale)?;
        if self.frame_rate == 0 {
            return Err(TimeError::ZeroFrameRate);
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(TimeError::InvalidFixedTimestep(self.fixed_timestep));
        }
        Ok(())
    }

    /// The wall-clock duration of one frame at [`frame_rate`](Self::frame_rate).
    pub fn target_frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            frame_rate: DEFAULT_FRAME_RATE,
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
        }
    }
}

/// Errors raised by invalid time configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimeError {
    /// Time scales must be finite and non-negative.
    #[error("time scale must be finite and non-negative, got {0}")]
    NegativeTimeScale(f32),
    /// The fixed step must be finite and strictly positive.
    #[error("fixed timestep must be finite and positive, got {0}")]
    InvalidFixedTimestep(f32),
    /// A frame rate of zero has no frame duration.
    #[error("frame rate must be at least 1")]
    ZeroFrameRate,
}

pub(crate) fn validate_time_scale(scale: f32) -> Result<(), TimeError> {
    if scale.is_finite() && scale >= 0.0 {
        Ok(())
    } else {
        Err(TimeError::NegativeTimeScale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TimeConfig::default();
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.frame_rate, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = TimeConfig {
            time_scale: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(TimeError::NegativeTimeScale(-1.0)));

        config.time_scale = 1.0;
        config.frame_rate = 0;
        assert_eq!(config.validate(), Err(TimeError::ZeroFrameRate));

        config.frame_rate = 60;
        config.fixed_timestep = 0.0;
        assert_eq!(config.validate(), Err(TimeError::InvalidFixedTimestep(0.0)));
    }

    #[test]
    fn test_target_frame_duration() {
        let config = TimeConfig {
            frame_rate: 50,
            ..Default::default()
        };
        assert_eq!(config.target_frame_duration(), Duration::from_millis(20));
    }
}
