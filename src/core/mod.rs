//! Unified errors and the validated service layer.

pub mod errors;
pub mod services;

pub use errors::{Result, TrackerError};
pub use services::{AccountService, CategoryService, ReportService, TransactionService};
