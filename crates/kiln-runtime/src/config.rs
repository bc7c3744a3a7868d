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

//! Runtime configuration, loadable from RON.

use kiln_core::time::{TimeConfig, TimeError};
use serde::{Deserialize, Serialize};

/// Sizing of the [`DelayCache`](crate::DelayCache) tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayCacheConfig {
    /// Number of entries each table reserves up front.
    pub initial_capacity: usize,
}

impl Default for DelayCacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 100,
        }
    }
}

/// Top-level runtime configuration.
///
/// Every field is optional in the RON source; omitted values fall back to
/// their defaults.
///
/// ```
/// use kiln_runtime::RuntimeConfig;
///
/// let config = RuntimeConfig::from_ron("(time: (time_scale: 0.5))").unwrap();
/// assert_eq!(config.time.time_scale, 0.5);
/// assert_eq!(config.delays.initial_capacity, 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Frame clock settings.
    pub time: TimeConfig,
    /// Delay cache settings.
    pub delays: DelayCacheConfig,
}

impl RuntimeConfig {
    /// Parses and validates a configuration from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time.validate()?;
        Ok(())
    }
}

/// Errors raised while loading a [`RuntimeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The text is not valid RON for this structure.
    #[error("failed to parse runtime configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The time section holds an unusable value.
    #[error("invalid time configuration: {0}")]
    Time(#[from] TimeError),
}
