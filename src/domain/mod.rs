//! Pure data types shared across the crate.

pub mod account;
pub mod category;
pub mod common;
pub mod transaction;

pub use account::Account;
pub use category::{estimate_for_month, Category, CategoryEstimate};
pub use common::{
    days_in_month, same_calendar_month, shift_month, shift_weeks, DateSpan, DateSpanError,
    FlowKind, Identifiable, NamedEntity,
};
pub use transaction::{Adjustment, Cadence, InstallmentLimit, Recurrence, Transaction};
