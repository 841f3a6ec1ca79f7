//! The ledger aggregate and the occurrence engine built on it.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod report;
pub mod schedule;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use report::{period_report, OccurrenceFilter, PeriodOccurrence, PeriodReport};
pub use schedule::{
    installment_label, lifetime_occurrences, occurrences_in_span, InstallmentLabel, Occurrence,
    MAX_OCCURRENCES,
};
