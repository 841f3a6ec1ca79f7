//! Read-side queries: period reports and per-transaction detail data.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::core::errors::{Result, TrackerError};
use crate::domain::{estimate_for_month, DateSpan};
use crate::ledger::{
    installment_label, occurrences_in_span, period_report, InstallmentLabel, Ledger, Occurrence,
    OccurrenceFilter, PeriodReport,
};

/// Read-only queries over a ledger.
pub struct ReportService;

impl ReportService {
    /// Builds the occurrence report for `span` under `filter`.
    pub fn period(ledger: &Ledger, span: DateSpan, filter: &OccurrenceFilter) -> PeriodReport {
        period_report(ledger, span, filter)
    }

    /// The default reporting window around `reference`, anchored on
    /// the configured day of month.
    pub fn default_window(reference: NaiveDate, anchor_day: u32) -> Result<DateSpan> {
        DateSpan::anchored_month(reference, anchor_day).ok_or_else(|| {
            TrackerError::Validation(format!("no reporting window for {reference}"))
        })
    }

    /// The raw dated amounts one transaction produces within `span`.
    pub fn transaction_occurrences(
        ledger: &Ledger,
        id: Uuid,
        span: DateSpan,
    ) -> Result<Vec<Occurrence>> {
        let txn = ledger
            .transaction(id)
            .ok_or(TrackerError::TransactionNotFound(id))?;
        Ok(occurrences_in_span(txn, &ledger.adjustments, span))
    }

    /// The installment label of the occurrence falling on `date`, if
    /// the transaction is a capped series and such an occurrence
    /// exists.
    pub fn installment_for(
        ledger: &Ledger,
        id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<InstallmentLabel>> {
        let txn = ledger
            .transaction(id)
            .ok_or(TrackerError::TransactionNotFound(id))?;
        Ok(installment_label(txn, &ledger.adjustments, date))
    }

    /// The estimate of the transaction's category for the month of
    /// `date`. `None` when the transaction is uncategorized or no
    /// estimate is recorded for that month.
    pub fn monthly_estimate(ledger: &Ledger, id: Uuid, date: NaiveDate) -> Result<Option<f64>> {
        let txn = ledger
            .transaction(id)
            .ok_or(TrackerError::TransactionNotFound(id))?;
        let category_id = match txn.category_id {
            Some(category_id) => category_id,
            None => return Ok(None),
        };
        Ok(estimate_for_month(
            &ledger.estimates,
            category_id,
            date.month(),
            date.year(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cadence, Category, CategoryEstimate, Recurrence, Transaction};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn unknown_transactions_are_reported() {
        let ledger = Ledger::new("personal");
        let ghost = Uuid::new_v4();
        let span = DateSpan::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert!(matches!(
            ReportService::transaction_occurrences(&ledger, ghost, span),
            Err(TrackerError::TransactionNotFound(id)) if id == ghost
        ));
        assert!(matches!(
            ReportService::monthly_estimate(&ledger, ghost, date(2024, 1, 1)),
            Err(TrackerError::TransactionNotFound(_))
        ));
    }

    #[test]
    fn detail_occurrences_match_the_engine() {
        let mut ledger = Ledger::new("personal");
        let gym = ledger.add_transaction(
            Transaction::new("Gym", -40.0, date(2024, 1, 5))
                .with_recurrence(Recurrence::new(Cadence::Monthly)),
        );

        let span = DateSpan::new(date(2024, 2, 1), date(2024, 4, 30)).unwrap();
        let occurrences =
            ReportService::transaction_occurrences(&ledger, gym, span).expect("occurrences");
        let dates: Vec<NaiveDate> = occurrences.iter().map(|occ| occ.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 5), date(2024, 3, 5), date(2024, 4, 5)]
        );
    }

    #[test]
    fn monthly_estimate_follows_the_category_link() {
        let mut ledger = Ledger::new("personal");
        let food = ledger.add_category(Category::new("Food"));
        ledger.add_estimate(CategoryEstimate::new(food, date(2024, 5, 1), -400.0));

        let categorized = ledger.add_transaction(
            Transaction::new("Groceries", -80.0, date(2024, 5, 3)).with_category(food),
        );
        let uncategorized =
            ledger.add_transaction(Transaction::new("Fuel", -50.0, date(2024, 5, 4)));

        assert_eq!(
            ReportService::monthly_estimate(&ledger, categorized, date(2024, 5, 20)).unwrap(),
            Some(-400.0)
        );
        assert_eq!(
            ReportService::monthly_estimate(&ledger, categorized, date(2024, 6, 20)).unwrap(),
            None
        );
        assert_eq!(
            ReportService::monthly_estimate(&ledger, uncategorized, date(2024, 5, 20)).unwrap(),
            None
        );
    }

    #[test]
    fn default_window_uses_the_anchor_day() {
        let window = ReportService::default_window(date(2024, 5, 20), 12).expect("window");
        assert_eq!(window.start, date(2024, 5, 12));
        assert_eq!(window.end, date(2024, 6, 12));
    }
}
