//! # chronos-engine
//!
//! Interval-based calendar reasoning for a calendar assistant.
//!
//! The engine answers the questions an LLM cannot reliably answer by inference:
//! when is the user free, which events collide, and which meeting slots fit
//! best. Every core operation is a deterministic, side-effect-free function of
//! an event list and a time window.
//!
//! ## Modules
//!
//! - [`freebusy`] — Partition a window into free and busy blocks
//! - [`conflict`] — Group overlapping events
//! - [`slots`] — Find and rank candidate meeting slots
//! - [`time`] — Relative-date phrases and timezone-aware formatting
//! - [`event`] — Shared value types
//! - [`normalize`] — Google Calendar payloads → engine events
//! - [`tools`] — Tagged tool calls, calendar providers, and the tool runner
//! - [`chat`] — Message parts and tool steps
//! - [`config`] — TOML configuration
//! - [`error`] — Error types

pub mod chat;
pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod normalize;
pub mod slots;
pub mod time;
pub mod tools;

pub use config::EngineConfig;
pub use conflict::{find_conflicts, has_overlap};
pub use error::{EngineError, Result};
pub use event::{
    Attendee, CalendarEvent, ConflictGroup, DateRange, FreeBusyBlock, TimeSlot, WorkHours,
};
pub use freebusy::compute_free_busy;
pub use normalize::normalize_google_events;
pub use slots::{find_available_slots, score_slot};
pub use time::{parse_relative_date, parse_timezone};
pub use tools::{CalendarProvider, StaticProvider, ToolCall, ToolOutput, ToolRunner};
