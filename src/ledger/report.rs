//! Period reports: filtered occurrence rows and balance totals.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{DateSpan, FlowKind, Transaction};
use crate::ledger::ledger::Ledger;
use crate::ledger::schedule::{installment_label, occurrences_in_span, InstallmentLabel};

/// Row filters for a period report. `None` keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccurrenceFilter {
    pub flow: Option<FlowKind>,
    pub category_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
}

impl OccurrenceFilter {
    /// True when an occurrence of `txn` with `amount` passes every
    /// active filter. The flow check looks at the occurrence amount,
    /// not the base amount, so an adjustment can move an occurrence
    /// across the income/expense line.
    fn keeps(&self, txn: &Transaction, amount: f64) -> bool {
        if let Some(flow) = self.flow {
            if FlowKind::of(amount) != flow {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if txn.category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(account_id) = self.account_id {
            if txn.account_id != Some(account_id) {
                return false;
            }
        }
        true
    }
}

/// One row of a period report.
#[derive(Debug, Clone)]
pub struct PeriodOccurrence {
    pub transaction: Transaction,
    pub date: NaiveDate,
    pub amount: f64,
    pub installment: Option<InstallmentLabel>,
}

/// Occurrence rows and balances for one reporting window.
#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub span: DateSpan,
    pub occurrences: Vec<PeriodOccurrence>,
    /// Sum of the amounts of the kept rows.
    pub real_balance: f64,
    /// Sum of every estimate dated inside the span, across all
    /// categories, ignoring the row filters.
    pub estimated_balance: f64,
    pub total_balance: f64,
}

/// Builds the report for `span`: expands every transaction, applies
/// the filters, sorts rows by date descending (ties broken by
/// transaction id ascending), and totals the balances.
pub fn period_report(ledger: &Ledger, span: DateSpan, filter: &OccurrenceFilter) -> PeriodReport {
    let mut occurrences = Vec::new();
    for txn in &ledger.transactions {
        for occurrence in occurrences_in_span(txn, &ledger.adjustments, span) {
            if !filter.keeps(txn, occurrence.amount) {
                continue;
            }
            let installment = installment_label(txn, &ledger.adjustments, occurrence.date);
            occurrences.push(PeriodOccurrence {
                transaction: txn.clone(),
                date: occurrence.date,
                amount: occurrence.amount,
                installment,
            });
        }
    }
    occurrences.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.transaction.id.cmp(&b.transaction.id))
    });

    let real_balance: f64 = occurrences.iter().map(|row| row.amount).sum();
    let estimated_balance: f64 = ledger
        .estimates
        .iter()
        .filter(|estimate| span.contains(estimate.date))
        .map(|estimate| estimate.amount)
        .sum();

    PeriodReport {
        span,
        occurrences,
        real_balance,
        estimated_balance,
        total_balance: real_balance + estimated_balance,
    }
}
