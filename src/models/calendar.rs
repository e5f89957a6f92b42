//! Monthly query window used by the jersey awards.

use chrono::{Datelike, Days, Months, NaiveDate};
use thiserror::Error;

/// Number of days, counted back from the last day of the month, that make up
/// the closing week.
pub const CLOSING_WEEK_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Year {0} is out of range")]
    InvalidYear(i32),
}

/// A calendar month, e.g. March 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    month: u32,
    year: i32,
}

impl MonthWindow {
    pub fn new(month: u32, year: i32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        // Both ends of the month must be representable.
        let first = NaiveDate::from_ymd_opt(year, month, 1);
        if first.and_then(|d| d.checked_add_months(Months::new(1))).is_none() {
            return Err(CalendarError::InvalidYear(year));
        }
        Ok(Self { month, year })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Inclusive range of the last seven days of the month.
    pub fn closing_week(&self) -> (NaiveDate, NaiveDate) {
        let last = self.last_day();
        let start_day = last.day().saturating_sub(CLOSING_WEEK_DAYS - 1).max(1);
        let start = last.with_day(start_day).unwrap_or(last);
        (start, last)
    }

    /// Whether a month/year pair falls in this window.
    pub fn matches(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

impl std::fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_month_out_of_range() {
        assert_eq!(MonthWindow::new(0, 2025), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(MonthWindow::new(13, 2025), Err(CalendarError::InvalidMonth(13)));
        assert!(MonthWindow::new(12, 2025).is_ok());
    }

    #[test]
    fn test_rejects_years_at_the_edge_of_the_calendar() {
        assert_eq!(
            MonthWindow::new(12, i32::MAX),
            Err(CalendarError::InvalidYear(i32::MAX))
        );
        assert_eq!(
            MonthWindow::new(1, i32::MIN),
            Err(CalendarError::InvalidYear(i32::MIN))
        );

        let last = NaiveDate::MAX;
        assert!(MonthWindow::new(last.month(), last.year()).is_err());
        let window = MonthWindow::new(last.month() - 1, last.year()).unwrap();
        assert!(window.last_day() < last);
    }

    #[test]
    fn test_first_and_last_day() {
        let feb = MonthWindow::new(2, 2024).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));

        let dec = MonthWindow::new(12, 2025).unwrap();
        assert_eq!(dec.last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_closing_week_is_last_seven_days() {
        let march = MonthWindow::new(3, 2025).unwrap();
        assert_eq!(march.closing_week(), (date(2025, 3, 25), date(2025, 3, 31)));

        let feb = MonthWindow::new(2, 2025).unwrap();
        assert_eq!(feb.closing_week(), (date(2025, 2, 22), date(2025, 2, 28)));
    }

    #[test]
    fn test_closing_week_spans_one_to_seven_days() {
        for month in 1..=12 {
            let window = MonthWindow::new(month, 2024).unwrap();
            let (start, end) = window.closing_week();
            let days = (end - start).num_days() + 1;
            assert!((1..=7).contains(&days), "{} spans {} days", window, days);
            assert!(start >= window.first_day());
        }
    }

    #[test]
    fn test_containing() {
        let window = MonthWindow::containing(date(2025, 7, 19));
        assert_eq!(window.month(), 7);
        assert_eq!(window.year(), 2025);
        assert!(window.matches(7, 2025));
        assert!(!window.matches(7, 2024));
        assert_eq!(window.to_string(), "2025-07");
    }
}
