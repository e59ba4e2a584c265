//! Temporal classifier
//!
//! Splits parsed passes into the ones happening now and the ones still to come,
//! and works out how long until the next one starts. Classification is a pure
//! function of the records and the reference instant.

use crate::config::ClassifierConfig;
use crate::types::{PassPhase, PassRecord, PassRow, Timestamp};
use std::fmt;

/// Time remaining until the nearest upcoming pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Whole hours, minutes and seconds left
    Remaining { hours: i64, minutes: i64, seconds: i64 },
    /// The nearest pass has reached its start instant
    StartingNow,
    /// Nothing is scheduled after the reference instant
    NoUpcoming,
}

impl Countdown {
    /// Countdown from `now` to `start`
    ///
    /// Sub-second remainders are truncated, so a pass half a second away reads
    /// `00:00:00` rather than "starting now".
    pub fn until(start: Timestamp, now: Timestamp) -> Self {
        let delta = start - now;
        if delta <= chrono::Duration::zero() {
            return Countdown::StartingNow;
        }

        let total = delta.num_seconds();
        Countdown::Remaining {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Countdown to the first pass in `upcoming`, if any
    fn to_next(upcoming: &[PassRecord], now: Timestamp) -> Self {
        match upcoming.first() {
            Some(next) => Countdown::until(next.start, now),
            None => Countdown::NoUpcoming,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining {
                hours,
                minutes,
                seconds,
            } => write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds),
            Countdown::StartingNow => write!(f, "Starting Now!"),
            Countdown::NoUpcoming => write!(f, "No Upcoming Passes"),
        }
    }
}

/// Result of classifying one set of records against one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Passes whose window contains the reference instant, in source order
    pub ongoing: Vec<PassRecord>,
    /// Nearest future passes, ascending by start, capped
    pub upcoming: Vec<PassRecord>,
    /// Countdown to the first entry of `upcoming`
    pub countdown: Countdown,
}

impl Classification {
    /// The nearest upcoming pass
    pub fn next_pass(&self) -> Option<&PassRecord> {
        self.upcoming.first()
    }

    /// Recompute the countdown for a later render instant
    pub fn countdown_at(&self, now: Timestamp) -> Countdown {
        Countdown::to_next(&self.upcoming, now)
    }

    pub fn ongoing_rows(&self) -> Vec<PassRow> {
        self.ongoing.iter().map(PassRecord::to_row).collect()
    }

    pub fn upcoming_rows(&self) -> Vec<PassRow> {
        self.upcoming.iter().map(PassRecord::to_row).collect()
    }
}

/// Classify records against `now` with the default upcoming limit
pub fn classify(records: &[PassRecord], now: Timestamp) -> Classification {
    classify_with(records, now, &ClassifierConfig::default())
}

/// Classify records against `now`
pub fn classify_with(
    records: &[PassRecord],
    now: Timestamp,
    config: &ClassifierConfig,
) -> Classification {
    let mut ongoing = Vec::new();
    let mut upcoming = Vec::new();

    for record in records {
        match record.phase_at(now) {
            PassPhase::Ongoing => ongoing.push(record.clone()),
            PassPhase::Upcoming => upcoming.push(record.clone()),
            PassPhase::Past => {}
        }
    }

    // Stable: equal start instants keep their source order
    upcoming.sort_by_key(|record| record.start);
    upcoming.truncate(config.upcoming_limit);

    let countdown = Countdown::to_next(&upcoming, now);

    log::trace!(
        "Classified {} passes at {}: {} ongoing, {} upcoming",
        records.len(),
        now,
        ongoing.len(),
        upcoming.len()
    );

    Classification {
        ongoing,
        upcoming,
        countdown,
    }
}
