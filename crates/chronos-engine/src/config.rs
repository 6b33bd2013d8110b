//! TOML-based engine configuration.
//!
//! ```toml
//! default_timezone = "America/New_York"
//! max_suggestions = 5
//! max_tool_calls = 3
//!
//! [work_hours]
//! start = 9
//! end = 17
//! ```
//!
//! Every field is optional; missing fields take the values of
//! [`EngineConfig::default`].

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::WorkHours;
use crate::time::parse_timezone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timezone used when a request does not name one.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    /// How many ranked slots an availability answer returns.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Tool calls allowed per user request.
    #[serde(default = "default_max_tool_calls")]
    pub max_tool_calls: usize,
    /// Work hours applied when a request does not supply its own.
    #[serde(default)]
    pub work_hours: Option<WorkHours>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_max_suggestions() -> usize {
    5
}

fn default_max_tool_calls() -> usize {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
            max_suggestions: default_max_suggestions(),
            max_tool_calls: default_max_tool_calls(),
            work_hours: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    /// Returns `EngineError::Config` for malformed TOML, and
    /// `EngineError::InvalidTimezone` / `EngineError::InvalidWorkHours` for
    /// values that parse but are out of range.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    /// Returns `EngineError::Io` if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        parse_timezone(&self.default_timezone)?;
        if let Some(hours) = &self.work_hours {
            hours.validate()?;
        }
        Ok(())
    }

    /// The parsed default timezone.
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.default_timezone)
    }
}
