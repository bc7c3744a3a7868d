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

//! Provides 2D and 3D vector types, range checks and text parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseFloatError;
use std::ops::{Add, Mul};
use std::str::FromStr;

// --- Vec2 ---

/// A 2-dimensional vector with `f32` components.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Vec2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new `Vec2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns `true` if `other` lies strictly closer than `range`.
    ///
    /// Points further than `range` on either axis are rejected before the
    /// squared distance is computed.
    pub fn in_range(self, other: Self, range: f32) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        if dx.abs() > range || dy.abs() > range {
            return false;
        }
        range * range > dx * dx + dy * dy
    }

    /// Integer variant of [`in_range`](Self::in_range).
    ///
    /// Axis offsets are truncated toward zero before squaring, so this is
    /// cheaper and more permissive than the precise check.
    pub fn in_range_coarse(self, other: Self, range: i32) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let limit = range as f32;
        if dx.abs() > limit || dy.abs() > limit {
            return false;
        }
        // Each truncated offset may reach 2^31, so the squared sum needs i128.
        let (dx, dy, range) = (dx as i128, dy as i128, range as i128);
        range * range > dx * dx + dy * dy
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Vec3> for Vec2 {
    /// Projects onto the XY plane, dropping `z`.
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An error returned when a string cannot be parsed into a [`Vec2`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseVectorError {
    /// The text was not wrapped in parentheses.
    #[error("vector literal must be wrapped in parentheses, got '{0}'")]
    MissingParentheses(String),
    /// The literal did not contain exactly two comma-separated components.
    #[error("expected 2 components, found {0}")]
    ComponentCount(usize),
    /// A component was not a valid floating-point number.
    #[error("invalid vector component '{component}': {source}")]
    InvalidComponent {
        /// The offending component text.
        component: String,
        /// The underlying float parse error.
        source: ParseFloatError,
    },
}

impl FromStr for Vec2 {
    type Err = ParseVectorError;

    /// Parses the `"(x, y)"` form produced by the `Display` impl.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseVectorError::MissingParentheses(trimmed.to_string()))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(ParseVectorError::ComponentCount(parts.len()));
        }

        let parse = |component: &str| {
            component
                .parse::<f32>()
                .map_err(|source| ParseVectorError::InvalidComponent {
                    component: component.to_string(),
                    source,
                })
        };

        Ok(Self::new(parse(parts[0])?, parse(parts[1])?))
    }
}

// --- Vec3 ---

/// A 3-dimensional vector with `f32` components.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// [`Vec2::in_range`] on the XY projection of both points.
    #[inline]
    pub fn in_range(self, other: Self, range: f32) -> bool {
        Vec2::from(self).in_range(other.into(), range)
    }

    /// [`Vec2::in_range_coarse`] on the XY projection of both points.
    #[inline]
    pub fn in_range_coarse(self, other: Self, range: i32) -> bool {
        Vec2::from(self).in_range_coarse(other.into(), range)
    }
}

impl From<Vec2> for Vec3 {
    #[inline]
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y, 0.0)
    }
}
