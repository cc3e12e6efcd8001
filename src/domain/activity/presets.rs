//! Named date ranges offered as one-click filters.

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePreset {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 6] = [
        DateRangePreset::Today,
        DateRangePreset::Yesterday,
        DateRangePreset::ThisWeek,
        DateRangePreset::LastWeek,
        DateRangePreset::ThisMonth,
        DateRangePreset::LastMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRangePreset::Today => "today",
            DateRangePreset::Yesterday => "yesterday",
            DateRangePreset::ThisWeek => "this_week",
            DateRangePreset::LastWeek => "last_week",
            DateRangePreset::ThisMonth => "this_month",
            DateRangePreset::LastMonth => "last_month",
        }
    }

    /// Weeks run Monday to Sunday.
    pub fn resolve(&self, today: NaiveDate) -> DomainResult<DateRange> {
        let out_of_range = || DomainError::validation("date out of range");
        let day_before = |d: NaiveDate| d.checked_sub_days(Days::new(1)).ok_or_else(out_of_range);

        let week_start = today
            .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
            .ok_or_else(out_of_range)?;
        let month_start = today.with_day(1).ok_or_else(out_of_range)?;

        let range = match self {
            DateRangePreset::Today => DateRange {
                from: today,
                to: today,
            },
            DateRangePreset::Yesterday => {
                let yesterday = day_before(today)?;
                DateRange {
                    from: yesterday,
                    to: yesterday,
                }
            }
            DateRangePreset::ThisWeek => DateRange {
                from: week_start,
                to: week_start
                    .checked_add_days(Days::new(6))
                    .ok_or_else(out_of_range)?,
            },
            DateRangePreset::LastWeek => DateRange {
                from: week_start
                    .checked_sub_days(Days::new(7))
                    .ok_or_else(out_of_range)?,
                to: day_before(week_start)?,
            },
            DateRangePreset::ThisMonth => DateRange {
                from: month_start,
                to: month_start
                    .checked_add_months(Months::new(1))
                    .ok_or_else(out_of_range)
                    .and_then(day_before)?,
            },
            DateRangePreset::LastMonth => DateRange {
                from: month_start
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(out_of_range)?,
                to: day_before(month_start)?,
            },
        };
        Ok(range)
    }
}

impl fmt::Display for DateRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRangePreset {
    type Err = DomainError;

    /// Accepts `this_week`, `this-week` and `ThisWeek` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        DateRangePreset::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str().replace('_', "") == key)
            .ok_or_else(|| DomainError::Validation(format!("unknown date range preset '{s}'")))
    }
}
