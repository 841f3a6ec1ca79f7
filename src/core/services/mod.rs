//! Validated operations over the ledger aggregate.

pub mod account_service;
pub mod category_service;
pub mod report_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use category_service::CategoryService;
pub use report_service::ReportService;
pub use transaction_service::TransactionService;
