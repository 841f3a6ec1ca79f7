//! Transaction entities, recurrence rules, and amount resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{same_calendar_month, shift_month, shift_weeks, FlowKind, Identifiable};

/// Step size between consecutive occurrences of a recurring transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Cadence {
    Monthly,
    Weekly,
}

impl Cadence {
    /// Returns the next occurrence date after `from`, or `None` when
    /// the calendar cannot represent it.
    pub fn next_date(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Cadence::Monthly => shift_month(from, 1),
            Cadence::Weekly => shift_weeks(from, 1),
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Cadence::Monthly => "Monthly",
            Cadence::Weekly => "Weekly",
        };
        f.write_str(label)
    }
}

/// Caps the number of occurrences a recurring transaction produces.
///
/// `Bounded(n)` counts every schedule step starting from the
/// transaction's start date, whether or not the step falls inside the
/// window being generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum InstallmentLimit {
    Bounded(u32),
    #[default]
    Unbounded,
}

impl InstallmentLimit {
    /// The cap as a count, `None` when open-ended.
    pub fn cap(self) -> Option<u32> {
        match self {
            InstallmentLimit::Bounded(count) => Some(count),
            InstallmentLimit::Unbounded => None,
        }
    }
}

/// Recurrence rule attached to a transaction.
///
/// `end_date` bounds the transaction's lifetime independently of the
/// installment cap. Window generation ignores it; callers wanting the
/// full lifetime pass it as the span end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recurrence {
    pub cadence: Cadence,
    #[serde(default)]
    pub installments: InstallmentLimit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            installments: InstallmentLimit::Unbounded,
            end_date: None,
        }
    }

    pub fn with_installments(mut self, count: u32) -> Self {
        self.installments = InstallmentLimit::Bounded(count);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// A planned cash flow: one-off, or the anchor of a recurring series.
///
/// `base_amount` is signed (negative = expense). `start_date` is the
/// first occurrence; without a recurrence rule it is the only one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub base_amount: f64,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl Transaction {
    pub fn new(title: impl Into<String>, base_amount: f64, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            base_amount,
            start_date,
            category_id: None,
            account_id: None,
            recurrence: None,
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// The flow direction of the base amount.
    pub fn flow(&self) -> FlowKind {
        FlowKind::of(self.base_amount)
    }

    /// Resolves the effective amount for an occurrence on `date`.
    ///
    /// Adjustments belonging to other transactions are ignored. The
    /// matching set is ordered by `start_date` ascending (stable, so
    /// equal starts keep insertion order), then:
    /// 1. the first one-time adjustment in the same calendar month as
    ///    `date` wins;
    /// 2. otherwise the latest permanent adjustment starting on or
    ///    before `date` wins;
    /// 3. otherwise the base amount applies.
    pub fn amount_on(&self, adjustments: &[Adjustment], date: NaiveDate) -> f64 {
        let mut applicable: Vec<&Adjustment> = adjustments
            .iter()
            .filter(|adjustment| adjustment.transaction_id == self.id)
            .collect();
        applicable.sort_by_key(|adjustment| adjustment.start_date);

        if let Some(one_time) = applicable
            .iter()
            .find(|a| !a.is_permanent && same_calendar_month(a.start_date, date))
        {
            return one_time.amount;
        }
        if let Some(permanent) = applicable
            .iter()
            .rev()
            .find(|a| a.is_permanent && a.start_date <= date)
        {
            return permanent.amount;
        }
        self.base_amount
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// A time-scoped override of a transaction's amount.
///
/// Permanent adjustments apply from `start_date` onward until a later
/// permanent adjustment supersedes them; one-time adjustments apply
/// only to occurrences in the same calendar month as `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub start_date: NaiveDate,
    pub amount: f64,
    pub is_permanent: bool,
}

impl Adjustment {
    pub fn new(
        transaction_id: Uuid,
        start_date: NaiveDate,
        amount: f64,
        is_permanent: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            start_date,
            amount,
            is_permanent,
        }
    }
}

impl Identifiable for Adjustment {
    fn id(&self) -> Uuid {
        self.id
    }
}
