//! Wall clock sources for the display loop

use chrono::Local;
use pass_tracker_core::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Local wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant (used by `--now`)
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Parse a `--now` value (`YYYY-MM-DDTHH:MM:SS`, a space also works)
pub fn parse_instant(value: &str) -> Result<Timestamp, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| Timestamp::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM:SS, got {:?}", value))
}
