//! Validated mutations for accounts.

use uuid::Uuid;

use crate::core::errors::{Result, TrackerError};
use crate::domain::Account;
use crate::ledger::Ledger;

/// Provides validated mutations for [`Account`] entities.
pub struct AccountService;

impl AccountService {
    /// Adds an account after validating its name.
    pub fn add(ledger: &mut Ledger, account: Account) -> Result<Uuid> {
        Self::validate_name(ledger, None, &account.name)?;
        Ok(ledger.add_account(account))
    }

    /// Renames an existing account.
    pub fn rename(ledger: &mut Ledger, id: Uuid, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        Self::validate_name(ledger, Some(id), &name)?;
        let account = ledger
            .account_mut(id)
            .ok_or(TrackerError::AccountNotFound(id))?;
        account.name = name;
        ledger.touch();
        Ok(())
    }

    /// Removes an account. Transactions that referenced it keep
    /// existing without an account.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if ledger.remove_account(id) {
            Ok(())
        } else {
            Err(TrackerError::AccountNotFound(id))
        }
    }

    fn validate_name(ledger: &Ledger, exclude: Option<Uuid>, candidate: &str) -> Result<()> {
        if candidate.trim().is_empty() {
            return Err(TrackerError::Validation(
                "account name must not be empty".into(),
            ));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = ledger.accounts.iter().any(|account| {
            let name = account.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(TrackerError::Validation(format!(
                "account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
