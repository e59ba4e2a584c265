//! Main tracker API
//!
//! [`PassTracker`] is what a display loop calls once per tick: it re-reads the
//! record source, parses it and classifies the result against the given instant.
//! Nothing is cached between ticks, so edits to the source show up on the next one.

use crate::classifier::{classify_with, Classification};
use crate::config::ClassifierConfig;
use crate::parser::{load_source, read_source, ParseReport};
use crate::types::{Result, Timestamp};
use std::path::{Path, PathBuf};

/// Entry point for per-tick classification of a record source
#[derive(Debug, Clone)]
pub struct PassTracker {
    source: PathBuf,
    config: ClassifierConfig,
}

impl PassTracker {
    /// Create a tracker for the given record source
    ///
    /// # Example
    /// ```no_run
    /// use pass_tracker_core::PassTracker;
    ///
    /// let tracker = PassTracker::new("sd1.txt");
    /// let now = chrono::Local::now().naive_local();
    /// let result = tracker.refresh(now);
    /// println!("Next pass in: {}", result.countdown);
    /// ```
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            config: ClassifierConfig::default(),
        }
    }

    /// Builder method: replace the classifier configuration
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Read, parse and classify the source against `now`
    ///
    /// A missing source classifies as empty.
    pub fn refresh(&self, now: Timestamp) -> Classification {
        let records = read_source(&self.source);
        classify_with(&records, now, &self.config)
    }

    /// Parse the source without classifying, surfacing I/O errors and dropped lines
    pub fn inspect(&self) -> Result<ParseReport> {
        load_source(&self.source)
    }
}
