use chrono::{Datelike, NaiveDate};

/// Calendar features derived from a naive date. No timezone handling:
/// an input date is treated as a plain calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// Weekday index, Monday = 0 through Sunday = 6.
    pub day_of_week: u32,
    /// Month number, 1-12.
    pub month: u32,
    /// ISO 8601 week number.
    pub week_of_year: u32,
    /// 1 when the weekday is Saturday or Sunday, otherwise 0.
    pub is_weekend: u32,
}

pub fn calendar_features(date: NaiveDate) -> CalendarFeatures {
    let day_of_week = date.weekday().num_days_from_monday();
    CalendarFeatures {
        day_of_week,
        month: date.month(),
        week_of_year: date.iso_week().week(),
        is_weekend: u32::from(day_of_week >= 5),
    }
}
