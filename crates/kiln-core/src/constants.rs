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

//! Engine-wide constants and diagnostic message builders.

/// Time-related defaults.
pub mod time {
    /// A time scale that runs the simulation at half speed.
    pub const HALF_TIME_SCALE: f32 = 0.5;
    /// The time scale the clock starts with.
    pub const DEFAULT_TIME_SCALE: f32 = 1.0;
    /// The target number of frames per second.
    pub const DEFAULT_FRAME_RATE: u32 = 120;
    /// The default fixed simulation step, in seconds.
    pub const DEFAULT_FIXED_TIMESTEP: f32 = 0.02;
}

/// Player movement tuning values.
pub mod movement {
    /// Force applied while climbing.
    pub const CLIMB_FORCE: f32 = 30.0;
    /// Force applied when dropping through a platform.
    pub const DROP_FORCE: f32 = 12.0;
    /// Speed under which a moving character is considered idle.
    pub const MINIMUM_SPEED_BEFORE_IDLE: f32 = 2.5;
}

/// Physics defaults.
pub mod physics {
    /// Half of [`DEFAULT_GRAVITY`].
    pub const HALF_GRAVITY: f32 = 4.9;
    /// Standard gravity, in m/s².
    pub const DEFAULT_GRAVITY: f32 = 9.8;

    /// Defaults for 2D rigid bodies.
    pub mod rigidbody2d {
        /// Linear drag.
        pub const DRAG: f32 = 1.0;
        /// Angular drag.
        pub const ANGULAR_DRAG: f32 = 0.05;
    }
}

/// Prefixes and default literals for values stored as tagged strings
/// (e.g. `f0`, `b False`, `v(0, 0)`).
pub mod value_type {
    /// Tag for `f32` values.
    pub const FLOAT_PREFIX: char = 'f';
    /// Tag for string values.
    pub const STRING_PREFIX: char = 's';
    /// Tag for integer values.
    pub const INTEGER_PREFIX: char = 'i';
    /// Tag for boolean values.
    pub const BOOLEAN_PREFIX: char = 'b';
    /// Tag for [`Vec2`](crate::math::Vec2) values.
    pub const VECTOR2_PREFIX: char = 'v';

    /// Default literal for floats.
    pub const FLOAT_DEFAULT: &str = "0";
    /// Default literal for strings.
    pub const STRING_DEFAULT: &str = "";
    /// Default literal for integers.
    pub const INTEGER_DEFAULT: &str = "0";
    /// Default literal for booleans.
    pub const BOOLEAN_DEFAULT: &str = "False";
    /// Default literal for 2D vectors, parseable by `Vec2::from_str`.
    pub const VECTOR2_DEFAULT: &str = "(0, 0)";
}

/// Builders for recurring warning messages.
pub mod messages {
    use std::fmt::Display;

    /// `"Attempt to call {method}"`.
    pub fn attempt_to_call(method: &str) -> String {
        format!("Attempt to call {method}")
    }

    /// `"Attempt to call {method} without {without}"`.
    pub fn attempt_to_call_without(method: &str, without: impl Display) -> String {
        format!("{} without {without}", attempt_to_call(method))
    }
}
