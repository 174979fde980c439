//! Date range for filtering events.

use chrono::{Datelike, Days, NaiveDate};

/// Closed date range `[from, to]` used when querying events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// The default calendar view: the current month plus the next one.
    pub fn dual_month(today: NaiveDate) -> Self {
        let from = first_of_month(today);
        let to = first_of_month(add_months(from, 2)) - Days::new(1);
        DateRange { from, to }
    }

    /// Parse CLI date arguments into a DateRange.
    /// Missing bounds fall back to the dual-month view around `today`.
    pub fn from_args(
        from: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, String> {
        let default = Self::dual_month(today);

        let from = match from {
            Some(s) => parse_date(s)?,
            None => default.from,
        };
        let to = match to {
            Some(s) => parse_date(s)?,
            None => default.to.max(from),
        };

        if to < from {
            return Err(format!("Range end {to} is before range start {from}"));
        }

        Ok(DateRange { from, to })
    }

    /// The calendar years this range touches, in order.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.from.year()..=self.to.year()
    }
}

/// Parse YYYY-MM-DD
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(chrono::Months::new(months))
        .unwrap_or(date)
}
