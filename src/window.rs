//! Previous-working-day window math.
//!
//! All boundaries are UTC midnights; the interval is half-open `[start, end)`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the working day before `now`: Mondays report the
    /// preceding Friday, every other weekday reports the day before.
    pub fn previous_working_day(now: DateTime<Utc>) -> Self {
        let days_back = if now.weekday() == Weekday::Mon { 3 } else { 1 };
        Self::for_date(now.date_naive() - Duration::days(days_back))
    }

    /// Window covering one explicit calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Window bounds formatted for JQL date comparisons.
    pub fn jql_bounds(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d %H:%M").to_string(),
            self.end.format("%Y-%m-%d %H:%M").to_string(),
        )
    }
}
