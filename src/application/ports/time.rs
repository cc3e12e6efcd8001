use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The office's wall-clock zone. Calendar-date filters and presets are
/// interpreted in it.
#[derive(Debug, Clone, Copy)]
pub struct OfficeTime {
    offset: FixedOffset,
}

impl OfficeTime {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }
}

impl Default for OfficeTime {
    fn default() -> Self {
        Self::utc()
    }
}
