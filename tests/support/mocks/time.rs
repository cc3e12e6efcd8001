// tests/support/mocks/time.rs
use chrono::{DateTime, TimeZone, Utc};
use office_activity_tracker::application::ports::time::Clock;

/// Wednesday 6 March 2024, 10:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap()
}

#[derive(Clone, Debug, Default)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}
