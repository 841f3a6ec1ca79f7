//! Shared traits, calendar utilities, and the inclusive date span.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Classifies a signed amount as money coming in or going out.
///
/// Zero counts as income, matching the sign convention used by the
/// period filters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlowKind {
    Income,
    Expense,
}

impl FlowKind {
    /// Returns the flow classification of a signed amount.
    pub fn of(amount: f64) -> Self {
        if amount >= 0.0 {
            FlowKind::Income
        } else {
            FlowKind::Expense
        }
    }

    /// Applies this flow's sign to an entered magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            FlowKind::Income => magnitude.abs(),
            FlowKind::Expense => -magnitude.abs(),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowKind::Income => "Income",
            FlowKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Shifts a date by whole months, clamping the day to the target
/// month's length (Jan 31 + 1 month lands on the last day of
/// February). Returns `None` when the result falls outside the
/// representable calendar range.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day)
}

/// Shifts a date by whole weeks. Returns `None` on calendar overflow.
pub fn shift_weeks(date: NaiveDate, weeks: i32) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::weeks(weeks as i64))
}

/// Returns the number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

/// True when both dates fall in the same month of the same year.
pub fn same_calendar_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Raised when a span's endpoints are out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateSpanError {
    #[error("span end {end} precedes start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// A date range inclusive of both endpoints.
///
/// A single-day span (`start == end`) is valid. Occurrences landing
/// exactly on either endpoint belong to the span, so consecutive
/// anchored-month windows share their anchor day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Builds a span, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateSpanError> {
        if end < start {
            return Err(DateSpanError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// The open-ended span from `start` to the calendar horizon.
    pub fn from_date(start: NaiveDate) -> Self {
        Self {
            start,
            end: NaiveDate::MAX,
        }
    }

    /// True when `date` lies within the span, endpoints included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Builds the default reporting window for `reference`: from the
    /// anchor day of its month to the same day of the next month. The
    /// anchor day is clamped to each month's length.
    pub fn anchored_month(reference: NaiveDate, anchor_day: u32) -> Option<Self> {
        let year = reference.year();
        let month = reference.month();
        let day = anchor_day.clamp(1, days_in_month(year, month));
        let start = NaiveDate::from_ymd_opt(year, month, day)?;
        let end = shift_month(start, 1)?;
        Some(Self { start, end })
    }

    /// Moves both endpoints by whole months, preserving day-of-month
    /// clamping. Used for previous/next period navigation.
    pub fn shift_months(&self, months: i32) -> Option<Self> {
        let start = shift_month(self.start, months)?;
        let end = shift_month(self.end, months)?;
        Some(Self { start, end })
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ..= {}", self.start, self.end)
    }
}
