//! Core types for the pass tracker library
//!
//! This module defines the records produced by the parser and the errors that can
//! occur while building them. Records are plain values: they are rebuilt from the
//! source on every refresh and never mutated afterwards.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the tracker (one local wall clock, no time zones)
pub type Timestamp = NaiveDateTime;

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// A single scheduled pass, parsed from one line of the record source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRecord {
    /// Calendar year of the pass
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Day of month
    pub day: u32,
    /// Station designator, passed through verbatim
    pub station: String,
    /// Pass code, passed through verbatim
    pub code: String,
    /// Instant the pass begins
    pub start: Timestamp,
    /// Instant the pass ends
    pub end: Timestamp,
    /// Start time token exactly as it appeared in the source
    pub start_token: String,
    /// End time token exactly as it appeared in the source
    pub end_token: String,
    /// Year, month and day tokens exactly as they appeared in the source
    pub(crate) date_tokens: [String; 3],
}

impl PassRecord {
    /// Date label in `day-month-year` order, using the source tokens verbatim
    pub fn formatted_date(&self) -> String {
        let [year, month, day] = &self.date_tokens;
        format!("{}-{}-{}", day, month, year)
    }

    /// Where this pass sits relative to `now`
    ///
    /// Both window bounds are inclusive: a pass starting exactly at `now` is
    /// ongoing, and so is one ending exactly at `now`.
    pub fn phase_at(&self, now: Timestamp) -> PassPhase {
        if self.start <= now && now <= self.end {
            PassPhase::Ongoing
        } else if self.start > now {
            PassPhase::Upcoming
        } else {
            PassPhase::Past
        }
    }

    /// The display row for this pass
    pub fn to_row(&self) -> PassRow {
        PassRow {
            date: self.formatted_date(),
            station: self.station.clone(),
            code: self.code.clone(),
            start: self.start_token.clone(),
            end: self.end_token.clone(),
        }
    }
}

/// Temporal relationship between a pass and a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassPhase {
    /// The window contains the reference instant
    Ongoing,
    /// The pass starts strictly after the reference instant
    Upcoming,
    /// The pass ended before the reference instant
    Past,
}

/// Five-column row handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRow {
    pub date: String,
    pub station: String,
    pub code: String,
    pub start: String,
    pub end: String,
}

/// Reasons a single source line is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Expected at least 7 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("Invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Malformed time token: {token:?}")]
    InvalidTimeToken { token: String },

    #[error("No such date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Time out of range: {token:?}")]
    InvalidTime { token: String },

    #[error("Pass ends before it starts: {start} > {end}")]
    InvertedWindow { start: String, end: String },

    #[error("Line is not valid UTF-8 (bad byte at offset {offset})")]
    InvalidEncoding { offset: usize },
}

/// Errors that can occur while loading a record source
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}
