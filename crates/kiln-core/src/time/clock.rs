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

use std::time::{Duration, Instant};

use super::{validate_time_scale, FrameTime, TimeConfig, TimeError};
use crate::constants::messages;

/// Accumulates scaled and unscaled time across frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    time_scale: f32,
    fixed_timestep: f32,
    time: f64,
    unscaled_time: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Creates a clock starting now.
    /// ## Arguments
    /// * `config` - Time scale and fixed step to start with. Validated first.
    /// ## Returns
    /// The clock, or the validation error of `config`.
    pub fn new(config: &TimeConfig) -> Result<Self, TimeError> {
        config.validate()?;
        Ok(Self {
            last_tick: Instant::now(),
            time_scale: config.time_scale,
            fixed_timestep: config.fixed_timestep,
            time: 0.0,
            unscaled_time: 0.0,
            frame_count: 0,
        })
    }

    /// Samples the monotonic clock and advances by the real time since the
    /// previous tick (or since creation).
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let step = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(step)
    }

    /// Advances by a known step instead of sampling the clock.
    pub fn advance(&mut self, step: Duration) -> FrameTime {
        let unscaled_delta = step.as_secs_f32();
        let delta = unscaled_delta * self.time_scale;
        self.time += f64::from(delta);
        self.unscaled_time += f64::from(unscaled_delta);
        self.frame_count += 1;
        FrameTime {
            delta,
            unscaled_delta,
            fixed_delta: self.fixed_timestep,
        }
    }

    /// The current time scale.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Changes the time scale used by subsequent ticks.
    ///
    /// Negative or non-finite scales are rejected and the previous scale kept.
    pub fn set_time_scale(&mut self, scale: f32) -> Result<(), TimeError> {
        if let Err(e) = validate_time_scale(scale) {
            log::warn!(
                "{}",
                messages::attempt_to_call_without("FrameClock::set_time_scale", "a valid scale")
            );
            return Err(e);
        }
        self.time_scale = scale;
        Ok(())
    }

    /// Scaled seconds accumulated since creation.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Real seconds accumulated since creation.
    #[inline]
    pub fn unscaled_time(&self) -> f64 {
        self.unscaled_time
    }

    /// Number of ticks so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns `true` once strictly more than `interval` scaled seconds have
    /// passed since the timestamp `since` (taken from [`time`](Self::time)).
    #[inline]
    pub fn has_elapsed(&self, since: f64, interval: f64) -> bool {
        self.time - since > interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    fn clock() -> FrameClock {
        FrameClock::new(&TimeConfig::default()).expect("default config is valid")
    }

    #[test]
    fn clock_rejects_invalid_config() {
        let config = TimeConfig {
            time_scale: f32::NAN,
            ..Default::default()
        };
        assert!(FrameClock::new(&config).is_err());
    }

    #[test]
    fn clock_advance_applies_time_scale() {
        let mut clock = clock();
        clock.set_time_scale(0.5).unwrap();

        let frame = clock.advance(Duration::from_millis(100));
        assert_relative_eq!(frame.unscaled_delta, 0.1);
        assert_relative_eq!(frame.delta, 0.05);
        assert_relative_eq!(frame.fixed_delta, 0.02);
        assert_relative_eq!(clock.time(), 0.05, epsilon = 1e-6);
        assert_relative_eq!(clock.unscaled_time(), 0.1, epsilon = 1e-6);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn clock_paused_scale_freezes_scaled_time() {
        let mut clock = clock();
        clock.set_time_scale(0.0).unwrap();
        let frame = clock.advance(Duration::from_secs(1));
        assert_eq!(frame.delta, 0.0);
        assert_eq!(frame.unscaled_delta, 1.0);
        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn clock_keeps_scale_on_rejection() {
        let mut clock = clock();
        assert_eq!(
            clock.set_time_scale(-2.0),
            Err(TimeError::NegativeTimeScale(-2.0))
        );
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn clock_tick_measures_real_time() {
        let mut clock = clock();
        thread::sleep(Duration::from_millis(20));
        let frame = clock.tick();
        assert!(frame.unscaled_delta >= 0.02, "tick measured {frame:?}");
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn clock_has_elapsed_is_strict() {
        let mut clock = clock();
        let since = clock.time();
        clock.advance(Duration::from_secs(1));
        assert!(!clock.has_elapsed(since, 1.0));
        assert!(clock.has_elapsed(since, 0.5));
    }
}
