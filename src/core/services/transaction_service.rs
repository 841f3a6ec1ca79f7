//! Validated mutations for transactions and their adjustments.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::errors::{Result, TrackerError};
use crate::domain::{Adjustment, InstallmentLimit, Transaction};
use crate::ledger::Ledger;

/// Provides validated mutations for [`Transaction`] entities.
pub struct TransactionService;

impl TransactionService {
    /// Adds a transaction after validating its fields and references.
    pub fn add(ledger: &mut Ledger, transaction: Transaction) -> Result<Uuid> {
        Self::validate(ledger, &transaction)?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Removes a transaction together with its adjustments.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if ledger.remove_transaction(id) {
            Ok(())
        } else {
            Err(TrackerError::TransactionNotFound(id))
        }
    }

    /// Sets or clears the lifetime end of a recurring transaction.
    ///
    /// An end date before the start date is accepted; the lifetime
    /// sequence is simply empty then.
    pub fn set_end_date(ledger: &mut Ledger, id: Uuid, end_date: Option<NaiveDate>) -> Result<()> {
        let txn = ledger
            .transaction_mut(id)
            .ok_or(TrackerError::TransactionNotFound(id))?;
        let rule = txn
            .recurrence
            .as_mut()
            .ok_or_else(|| TrackerError::Validation("transaction does not recur".into()))?;
        rule.end_date = end_date;
        ledger.touch();
        Ok(())
    }

    /// Records an amount adjustment from an entered magnitude. The
    /// stored amount takes the sign of the transaction's base amount,
    /// so an expense stays an expense whatever sign was typed.
    pub fn record_adjustment(
        ledger: &mut Ledger,
        transaction_id: Uuid,
        start_date: NaiveDate,
        magnitude: f64,
        is_permanent: bool,
    ) -> Result<Uuid> {
        if magnitude.abs() < f64::EPSILON {
            return Err(TrackerError::Validation(
                "adjustment amount must not be zero".into(),
            ));
        }
        let txn = ledger
            .transaction(transaction_id)
            .ok_or(TrackerError::TransactionNotFound(transaction_id))?;
        let amount = txn.flow().signed(magnitude);
        Ok(ledger.add_adjustment(Adjustment::new(
            transaction_id,
            start_date,
            amount,
            is_permanent,
        )))
    }

    pub fn remove_adjustment(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if ledger.remove_adjustment(id) {
            Ok(())
        } else {
            Err(TrackerError::AdjustmentNotFound(id))
        }
    }

    fn validate(ledger: &Ledger, txn: &Transaction) -> Result<()> {
        if txn.title.trim().is_empty() {
            return Err(TrackerError::Validation(
                "transaction title must not be empty".into(),
            ));
        }
        if txn.base_amount.abs() < f64::EPSILON {
            return Err(TrackerError::Validation(
                "transaction amount must not be zero".into(),
            ));
        }
        if let Some(rule) = &txn.recurrence {
            if rule.installments == InstallmentLimit::Bounded(0) {
                return Err(TrackerError::Validation(
                    "installment count must be positive".into(),
                ));
            }
        }
        if let Some(category_id) = txn.category_id {
            if ledger.category(category_id).is_none() {
                return Err(TrackerError::CategoryNotFound(category_id));
            }
        }
        if let Some(account_id) = txn.account_id {
            if ledger.account(account_id).is_none() {
                return Err(TrackerError::AccountNotFound(account_id));
            }
        }
        Ok(())
    }
}
