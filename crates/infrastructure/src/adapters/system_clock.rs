//! Wall-clock adapter for collection timestamps.

use chrono::{DateTime, Utc};
use workbench_application::ports::Clock;

/// Reads the current UTC time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
