//! Classifier configuration types
//!
//! The classifier only needs to know how many upcoming passes to keep. Everything
//! else (source location, refresh interval, output format) belongs to the driver.

use serde::{Deserialize, Serialize};

/// Default number of upcoming passes returned per refresh
pub const DEFAULT_UPCOMING_LIMIT: usize = 6;

/// Configuration for the temporal classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum number of upcoming passes kept after sorting
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl ClassifierConfig {
    /// Create a new classifier configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the upcoming pass limit
    pub fn with_upcoming_limit(mut self, limit: usize) -> Self {
        self.upcoming_limit = limit;
        self
    }
}
