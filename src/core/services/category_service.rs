//! Validated mutations for categories and their estimates.

use uuid::Uuid;

use crate::core::errors::{Result, TrackerError};
use crate::domain::{Category, CategoryEstimate};
use crate::ledger::Ledger;

/// Provides validated mutations for [`Category`] entities.
pub struct CategoryService;

impl CategoryService {
    /// Adds a category after validating its name.
    pub fn add(ledger: &mut Ledger, category: Category) -> Result<Uuid> {
        Self::validate_name(ledger, None, &category.name)?;
        Ok(ledger.add_category(category))
    }

    /// Renames an existing category.
    pub fn rename(ledger: &mut Ledger, id: Uuid, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        Self::validate_name(ledger, Some(id), &name)?;
        let category = ledger
            .category_mut(id)
            .ok_or(TrackerError::CategoryNotFound(id))?;
        category.name = name;
        ledger.touch();
        Ok(())
    }

    /// Removes a category. Its estimates are swept and transactions
    /// that referenced it become uncategorized.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if ledger.remove_category(id) {
            Ok(())
        } else {
            Err(TrackerError::CategoryNotFound(id))
        }
    }

    /// Adds a monthly estimate after validating its owner and amount.
    pub fn add_estimate(ledger: &mut Ledger, estimate: CategoryEstimate) -> Result<Uuid> {
        if ledger.category(estimate.category_id).is_none() {
            return Err(TrackerError::CategoryNotFound(estimate.category_id));
        }
        if estimate.amount.abs() < f64::EPSILON {
            return Err(TrackerError::Validation(
                "estimate amount must not be zero".into(),
            ));
        }
        Ok(ledger.add_estimate(estimate))
    }

    pub fn remove_estimate(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if ledger.remove_estimate(id) {
            Ok(())
        } else {
            Err(TrackerError::EstimateNotFound(id))
        }
    }

    fn validate_name(ledger: &Ledger, exclude: Option<Uuid>, candidate: &str) -> Result<()> {
        if candidate.trim().is_empty() {
            return Err(TrackerError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = ledger.categories.iter().any(|category| {
            let name = category.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(TrackerError::Validation(format!(
                "category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
