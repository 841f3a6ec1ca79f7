//! Occurrence generation for one-off and recurring transactions.

use std::fmt;

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{Adjustment, DateSpan, InstallmentLimit, Transaction};

/// Hard cap on schedule steps per transaction walk.
pub const MAX_OCCURRENCES: usize = 1024;

/// A dated cash flow produced by a transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Expands a transaction into its occurrences within `span`.
///
/// A non-recurring transaction yields at most one occurrence, at its
/// start date. A recurring one is walked step by step from the start
/// date; every step consumes the installment cap, including steps that
/// fall before the span begins, so a later window sees only whatever
/// remains of a capped series. The rule's `end_date` is not consulted
/// here; lifetime callers pass it as the span end.
///
/// The walk stops when the cap is exhausted, when the span end is
/// passed, or when the calendar cannot produce a next date (logged,
/// never an error). Amounts are resolved per occurrence date.
pub fn occurrences_in_span(
    txn: &Transaction,
    adjustments: &[Adjustment],
    span: DateSpan,
) -> Vec<Occurrence> {
    let rule = match &txn.recurrence {
        Some(rule) => rule,
        None => {
            if span.contains(txn.start_date) {
                return vec![Occurrence {
                    date: txn.start_date,
                    amount: txn.amount_on(adjustments, txn.start_date),
                }];
            }
            return Vec::new();
        }
    };

    let cap = rule
        .installments
        .cap()
        .map(|count| count as usize)
        .unwrap_or(usize::MAX);
    let mut occurrences = Vec::new();
    let mut current = txn.start_date;
    let mut steps = 0usize;

    while steps < cap && current <= span.end {
        if steps >= MAX_OCCURRENCES {
            warn!(
                transaction = %txn.id,
                "occurrence walk truncated after {} steps",
                MAX_OCCURRENCES
            );
            break;
        }
        if current >= span.start {
            occurrences.push(Occurrence {
                date: current,
                amount: txn.amount_on(adjustments, current),
            });
        }
        current = match rule.cadence.next_date(current) {
            Some(next) => next,
            None => {
                warn!(
                    transaction = %txn.id,
                    "schedule stopped: no calendar date after {}",
                    current
                );
                break;
            }
        };
        steps += 1;
    }

    occurrences
}

/// Expands the full lifetime of a transaction: from its start date to
/// its rule's end date, or to the calendar horizon when open-ended.
pub fn lifetime_occurrences(txn: &Transaction, adjustments: &[Adjustment]) -> Vec<Occurrence> {
    let span = match txn.recurrence.as_ref().and_then(|rule| rule.end_date) {
        Some(end) if end >= txn.start_date => DateSpan {
            start: txn.start_date,
            end,
        },
        Some(_) => return Vec::new(),
        None => DateSpan::from_date(txn.start_date),
    };
    occurrences_in_span(txn, adjustments, span)
}

/// Position of one occurrence within a capped series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentLabel {
    pub position: u32,
    pub total: u32,
}

impl fmt::Display for InstallmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.position, self.total)
    }
}

/// Labels the occurrence of `txn` falling on `date` with its 1-based
/// position in the capped series. Returns `None` for one-off or
/// open-ended transactions, and for dates on which no occurrence of
/// the lifetime sequence falls.
pub fn installment_label(
    txn: &Transaction,
    adjustments: &[Adjustment],
    date: NaiveDate,
) -> Option<InstallmentLabel> {
    let rule = txn.recurrence.as_ref()?;
    let total = match rule.installments {
        InstallmentLimit::Bounded(count) => count,
        InstallmentLimit::Unbounded => return None,
    };
    let position = lifetime_occurrences(txn, adjustments)
        .iter()
        .position(|occurrence| occurrence.date == date)? as u32
        + 1;
    Some(InstallmentLabel { position, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::domain::{Cadence, Recurrence};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn span(start: NaiveDate, end: NaiveDate) -> DateSpan {
        DateSpan::new(start, end).unwrap()
    }

    fn dates(occurrences: &[Occurrence]) -> Vec<NaiveDate> {
        occurrences.iter().map(|occurrence| occurrence.date).collect()
    }

    #[test]
    fn one_off_appears_only_inside_the_span() {
        let txn = Transaction::new("Concert", -120.0, date(2024, 6, 15));

        let inside = occurrences_in_span(&txn, &[], span(date(2024, 6, 1), date(2024, 6, 30)));
        assert_eq!(dates(&inside), vec![date(2024, 6, 15)]);
        assert_eq!(inside[0].amount, -120.0);

        let outside = occurrences_in_span(&txn, &[], span(date(2024, 7, 1), date(2024, 7, 31)));
        assert!(outside.is_empty());
    }

    #[test]
    fn one_off_on_a_span_endpoint_is_included() {
        let txn = Transaction::new("Concert", -120.0, date(2024, 6, 15));
        let on_start = occurrences_in_span(&txn, &[], span(date(2024, 6, 15), date(2024, 6, 30)));
        let on_end = occurrences_in_span(&txn, &[], span(date(2024, 6, 1), date(2024, 6, 15)));
        assert_eq!(on_start.len(), 1);
        assert_eq!(on_end.len(), 1);
    }

    #[test]
    fn capped_monthly_series_ends_after_its_installments() {
        let txn = Transaction::new("Laptop", -500.0, date(2024, 1, 10)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_installments(3),
        );

        let all = occurrences_in_span(&txn, &[], span(date(2024, 1, 1), date(2024, 12, 31)));
        assert_eq!(
            dates(&all),
            vec![date(2024, 1, 10), date(2024, 2, 10), date(2024, 3, 10)]
        );
    }

    #[test]
    fn steps_before_the_span_still_consume_installments() {
        let txn = Transaction::new("Laptop", -500.0, date(2024, 1, 10)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_installments(3),
        );

        let tail = occurrences_in_span(&txn, &[], span(date(2024, 3, 1), date(2024, 12, 31)));
        assert_eq!(dates(&tail), vec![date(2024, 3, 10)]);

        let past = occurrences_in_span(&txn, &[], span(date(2024, 5, 1), date(2024, 12, 31)));
        assert!(past.is_empty());
    }

    #[test]
    fn weekly_series_steps_by_seven_days() {
        let txn = Transaction::new("Cleaning", -60.0, date(2024, 2, 23))
            .with_recurrence(Recurrence::new(Cadence::Weekly));

        let window = occurrences_in_span(&txn, &[], span(date(2024, 2, 23), date(2024, 3, 8)));
        assert_eq!(
            dates(&window),
            vec![date(2024, 2, 23), date(2024, 3, 1), date(2024, 3, 8)]
        );
    }

    #[test]
    fn monthly_walk_keeps_the_clamped_day() {
        // Stepping happens from the previous occurrence, so the day
        // stays clamped once a short month is crossed.
        let txn = Transaction::new("Rent", -1000.0, date(2024, 1, 31))
            .with_recurrence(Recurrence::new(Cadence::Monthly));

        let window = occurrences_in_span(&txn, &[], span(date(2024, 1, 1), date(2024, 4, 30)));
        assert_eq!(
            dates(&window),
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 29), date(2024, 4, 29)]
        );
    }

    #[test]
    fn walk_stops_cleanly_at_the_calendar_horizon() {
        let start = NaiveDate::MAX - Duration::days(10);
        let txn = Transaction::new("Horizon", -45.0, start)
            .with_recurrence(Recurrence::new(Cadence::Weekly));

        // One step still fits before the horizon; the next cannot be
        // represented, so the walk ends there without an error.
        let window = occurrences_in_span(&txn, &[], span(start, NaiveDate::MAX));
        assert_eq!(dates(&window), vec![start, start + Duration::days(7)]);
    }

    #[test]
    fn monthly_walk_starting_at_the_horizon_emits_once() {
        let txn = Transaction::new("Horizon", -45.0, NaiveDate::MAX)
            .with_recurrence(Recurrence::new(Cadence::Monthly));

        let window = occurrences_in_span(&txn, &[], span(NaiveDate::MAX, NaiveDate::MAX));
        assert_eq!(dates(&window), vec![NaiveDate::MAX]);
    }

    #[test]
    fn generation_is_idempotent() {
        let txn = Transaction::new("Gym", -40.0, date(2024, 1, 5)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_installments(12),
        );
        let window = span(date(2024, 3, 1), date(2024, 8, 31));

        let first = occurrences_in_span(&txn, &[], window);
        let second = occurrences_in_span(&txn, &[], window);
        assert_eq!(first, second);
    }

    #[test]
    fn occurrence_amounts_follow_adjustments() {
        let txn = Transaction::new("Streaming", -30.0, date(2024, 1, 10))
            .with_recurrence(Recurrence::new(Cadence::Monthly));
        let adjustments = vec![
            Adjustment::new(txn.id, date(2024, 3, 1), -35.0, true),
            Adjustment::new(txn.id, date(2024, 4, 3), -10.0, false),
        ];

        let window = occurrences_in_span(
            &txn,
            &adjustments,
            span(date(2024, 2, 1), date(2024, 5, 29)),
        );
        let amounts: Vec<f64> = window.iter().map(|occurrence| occurrence.amount).collect();
        assert_eq!(amounts, vec![-30.0, -35.0, -10.0, -35.0]);
    }

    #[test]
    fn lifetime_stops_at_the_end_date() {
        let txn = Transaction::new("Lease", -900.0, date(2024, 1, 1)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_end_date(date(2024, 4, 1)),
        );

        let lifetime = lifetime_occurrences(&txn, &[]);
        assert_eq!(
            dates(&lifetime),
            vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1), date(2024, 4, 1)]
        );
    }

    #[test]
    fn lifetime_is_empty_when_end_precedes_start() {
        let txn = Transaction::new("Lease", -900.0, date(2024, 5, 1)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_end_date(date(2024, 4, 1)),
        );
        assert!(lifetime_occurrences(&txn, &[]).is_empty());
    }

    #[test]
    fn open_ended_lifetime_is_truncated_by_the_guard() {
        let txn = Transaction::new("Forever", -1.0, date(2024, 1, 1))
            .with_recurrence(Recurrence::new(Cadence::Monthly));
        assert_eq!(lifetime_occurrences(&txn, &[]).len(), MAX_OCCURRENCES);
    }

    #[test]
    fn labels_capped_occurrences_by_lifetime_position() {
        let txn = Transaction::new("Laptop", -500.0, date(2024, 1, 10)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_installments(3),
        );

        let label = installment_label(&txn, &[], date(2024, 2, 10)).expect("label");
        assert_eq!(label, InstallmentLabel { position: 2, total: 3 });
        assert_eq!(label.to_string(), "2/3");
        assert_eq!(
            installment_label(&txn, &[], date(2024, 3, 10)).map(|l| l.position),
            Some(3)
        );
    }

    #[test]
    fn no_label_without_a_bounded_series() {
        let one_off = Transaction::new("Concert", -120.0, date(2024, 6, 15));
        assert_eq!(installment_label(&one_off, &[], date(2024, 6, 15)), None);

        let open_ended = Transaction::new("Gym", -40.0, date(2024, 1, 5))
            .with_recurrence(Recurrence::new(Cadence::Monthly));
        assert_eq!(installment_label(&open_ended, &[], date(2024, 2, 5)), None);
    }

    #[test]
    fn no_label_for_a_date_between_occurrences() {
        let txn = Transaction::new("Laptop", -500.0, date(2024, 1, 10)).with_recurrence(
            Recurrence::new(Cadence::Monthly).with_installments(3),
        );
        assert_eq!(installment_label(&txn, &[], date(2024, 2, 11)), None);
    }
}
