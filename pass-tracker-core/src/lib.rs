//! Pass Tracker Core Library
//!
//! A stateless library that reads a flat schedule of passes (scheduled,
//! time-bounded occurrences) and classifies them against a reference instant.
//!
//! # Architecture
//!
//! This library is intentionally minimal:
//! - Parses record lines into typed passes, dropping malformed lines
//! - Splits passes into ongoing and upcoming relative to "now"
//! - Orders and caps the upcoming passes and derives a countdown to the next one
//!
//! The library does NOT:
//! - Schedule refreshes or own a clock
//! - Render anything
//! - Keep state between calls
//!
//! Display loops and terminal output live in the application layer (pass-tracker-cli).
//!
//! # Example Usage
//!
//! ```
//! use pass_tracker_core::{classify, parse_lines};
//! use chrono::NaiveDate;
//!
//! let records = parse_lines([
//!     "2024 06 15 SD1 ALPHA 10:00:00 10:10:00",
//!     "2024 06 15 SD1 BRAVO 12:00:00 12:10:00",
//!     "not a record",
//! ]);
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 5, 0)
//!     .unwrap();
//! let result = classify(&records, now);
//!
//! assert_eq!(result.ongoing[0].code, "ALPHA");
//! assert_eq!(result.upcoming[0].code, "BRAVO");
//! assert_eq!(result.countdown.to_string(), "01:55:00");
//! ```

// Public modules
pub mod classifier;
pub mod config;
pub mod parser;
pub mod tracker;
pub mod types;

// Re-export main types for convenience
pub use classifier::{classify, classify_with, Classification, Countdown};
pub use config::{ClassifierConfig, DEFAULT_UPCOMING_LIMIT};
pub use parser::{
    load_source, parse_bytes, parse_line, parse_lines, parse_lines_with_report, read_source,
    ParseReport,
};
pub use tracker::PassTracker;
pub use types::{PassPhase, PassRecord, PassRow, RecordError, Result, Timestamp, TrackerError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
