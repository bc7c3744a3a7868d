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

//! Horizontal acceleration, friction-style deceleration and jump impulses.
//!
//! All functions take the frame's scaled delta time explicitly so they can be
//! driven from any update phase.

use crate::math::Vec2;

/// Speeds with a magnitude below this are snapped to zero by [`decelerate`].
pub const STOP_THRESHOLD: f32 = 0.01;

/// Horizontal travel direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards positive X.
    #[default]
    Right,
    /// Towards negative X.
    Left,
}

/// Returns `speed` accelerated towards `max` in `direction`.
///
/// Within `[-max, max]` the speed grows by `max * accel * dt` per call and
/// snaps to the limit once it reaches it. Beyond the limit, a speed already
/// past `max` in the travel direction is clamped back to it, while a speed
/// past the opposite limit is turned around with a stronger
/// `max² * accel * dt` term.
pub fn accelerate(speed: f32, max: f32, accel: f32, direction: Direction, dt: f32) -> f32 {
    if speed.abs() > max {
        return match (speed > max, direction) {
            (true, Direction::Right) => max,
            (true, Direction::Left) => speed - max * max * accel * dt,
            (false, Direction::Left) => -max,
            (false, Direction::Right) => speed + max * max * accel * dt,
        };
    }

    match direction {
        Direction::Right if speed < max => speed + max * accel * dt,
        Direction::Right => max,
        Direction::Left if speed > -max => speed - max * accel * dt,
        Direction::Left => -max,
    }
}

/// Returns `speed` reduced proportionally by `decel * dt`, or exactly zero
/// once its magnitude drops under [`STOP_THRESHOLD`].
pub fn decelerate(speed: f32, decel: f32, dt: f32) -> f32 {
    if speed.abs() < STOP_THRESHOLD {
        0.0
    } else {
        speed - speed * decel * dt
    }
}

/// A 2D body that can receive velocity changes and impulses.
pub trait Body2D {
    /// Current linear velocity.
    fn velocity(&self) -> Vec2;
    /// Overwrites the linear velocity.
    fn set_velocity(&mut self, velocity: Vec2);
    /// Applies an instantaneous impulse.
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Makes `body` jump: vertical velocity is cancelled first so the impulse is
/// not affected by a fall in progress, then `jump_speed` is applied upwards.
pub fn jump<B: Body2D + ?Sized>(body: &mut B, jump_speed: f32) {
    let velocity = body.velocity();
    body.set_velocity(Vec2::new(velocity.x, 0.0));
    body.apply_impulse(Vec2::new(0.0, jump_speed));
}

/// A point mass integrating impulses into its velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass2D {
    /// Current linear velocity.
    pub velocity: Vec2,
    /// Mass in kilograms. Must be positive.
    pub mass: f32,
}

impl PointMass2D {
    /// Creates a body at rest with the given mass.
    pub fn new(mass: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass,
        }
    }
}

impl Default for PointMass2D {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Body2D for PointMass2D {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity = self.velocity + impulse * (1.0 / self.mass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accelerate_within_limits() {
        assert_relative_eq!(accelerate(0.0, 10.0, 2.0, Direction::Right, 0.1), 2.0);
        assert_relative_eq!(accelerate(0.0, 10.0, 2.0, Direction::Left, 0.1), -2.0);
        assert_eq!(accelerate(10.0, 10.0, 2.0, Direction::Right, 0.1), 10.0);
        assert_eq!(accelerate(-10.0, 10.0, 2.0, Direction::Left, 0.1), -10.0);
    }

    #[test]
    fn test_accelerate_clamps_overspeed_in_travel_direction() {
        assert_eq!(accelerate(15.0, 10.0, 2.0, Direction::Right, 0.1), 10.0);
        assert_eq!(accelerate(-15.0, 10.0, 2.0, Direction::Left, 0.1), -10.0);
    }

    #[test]
    fn test_accelerate_turns_around_overspeed() {
        // 15 - 10 * 10 * 2 * 0.01
        assert_relative_eq!(accelerate(15.0, 10.0, 2.0, Direction::Left, 0.01), 13.0);
        assert_relative_eq!(accelerate(-15.0, 10.0, 2.0, Direction::Right, 0.01), -13.0);
    }

    #[test]
    fn test_decelerate() {
        assert_relative_eq!(decelerate(10.0, 0.5, 0.2), 9.0);
        assert_relative_eq!(decelerate(-10.0, 0.5, 0.2), -9.0);
        assert_eq!(decelerate(0.009, 0.5, 0.2), 0.0);
        assert_eq!(decelerate(-0.009, 0.5, 0.2), 0.0);
    }

    #[test]
    fn test_jump_cancels_vertical_velocity() {
        let mut body = PointMass2D::new(2.0);
        body.velocity = Vec2::new(3.0, -20.0);
        jump(&mut body, 8.0);
        assert_eq!(body.velocity, Vec2::new(3.0, 4.0));
    }
}
