//! Error types for the engine's boundary layers.
//!
//! The reasoning core (free/busy, conflicts, slots) cannot fail. Errors only
//! arise where untrusted input crosses into the engine: tool-call payloads,
//! provider event payloads, timezone labels, and configuration files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime '{input}': {message}")]
    InvalidDateTime { input: String, message: String },

    /// `time_min` was after `time_max`.
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    /// A provider event had neither `dateTime` nor `date` on one of its edges.
    #[error("Event '{event_id}' is missing its {edge} time")]
    MissingTime { event_id: String, edge: &'static str },

    #[error("Invalid work hours {start}-{end}: hours must be within 0-23")]
    InvalidWorkHours { start: u32, end: u32 },

    #[error("Tool budget exceeded: at most {limit} tool calls per request")]
    ToolBudgetExceeded { limit: usize },

    #[error("Calendar provider error: {0}")]
    Provider(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
