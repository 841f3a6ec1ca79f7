//! The in-memory aggregate owning every tracked record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Account, Adjustment, Category, CategoryEstimate, Identifiable, NamedEntity, Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Flat arenas for every entity, with child records pointing at their
/// owner by id. Removals keep the arenas consistent: owned children
/// are swept, references from surviving records are cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub estimates: Vec<CategoryEstimate>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transactions: Vec::new(),
            adjustments: Vec::new(),
            categories: Vec::new(),
            estimates: Vec::new(),
            accounts: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_adjustment(&mut self, adjustment: Adjustment) -> Uuid {
        let id = adjustment.id;
        self.adjustments.push(adjustment);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_estimate(&mut self, estimate: CategoryEstimate) -> Uuid {
        let id = estimate.id;
        self.estimates.push(estimate);
        self.touch();
        id
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        find_by_id(&self.accounts, id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    /// The adjustments owned by a transaction, in insertion order.
    pub fn adjustments_for(&self, transaction_id: Uuid) -> Vec<&Adjustment> {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.transaction_id == transaction_id)
            .collect()
    }

    /// The estimates owned by a category, in insertion order.
    pub fn estimates_for(&self, category_id: Uuid) -> Vec<&CategoryEstimate> {
        self.estimates
            .iter()
            .filter(|estimate| estimate.category_id == category_id)
            .collect()
    }

    /// Categories sorted case-insensitively by name, for pick-lists.
    pub fn categories_by_name(&self) -> Vec<&Category> {
        sorted_by_name(&self.categories)
    }

    /// Accounts sorted case-insensitively by name, for pick-lists.
    pub fn accounts_by_name(&self) -> Vec<&Account> {
        sorted_by_name(&self.accounts)
    }

    /// Removes a transaction and sweeps its adjustments.
    pub fn remove_transaction(&mut self, id: Uuid) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        if self.transactions.len() == before {
            return false;
        }
        self.adjustments
            .retain(|adjustment| adjustment.transaction_id != id);
        self.touch();
        true
    }

    pub fn remove_adjustment(&mut self, id: Uuid) -> bool {
        let before = self.adjustments.len();
        self.adjustments.retain(|adjustment| adjustment.id != id);
        let removed = self.adjustments.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Removes a category, sweeps its estimates, and clears the
    /// category reference on transactions that pointed at it.
    pub fn remove_category(&mut self, id: Uuid) -> bool {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        if self.categories.len() == before {
            return false;
        }
        self.estimates
            .retain(|estimate| estimate.category_id != id);
        for txn in &mut self.transactions {
            if txn.category_id == Some(id) {
                txn.category_id = None;
            }
        }
        self.touch();
        true
    }

    pub fn remove_estimate(&mut self, id: Uuid) -> bool {
        let before = self.estimates.len();
        self.estimates.retain(|estimate| estimate.id != id);
        let removed = self.estimates.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Removes an account and clears the account reference on
    /// transactions that pointed at it.
    pub fn remove_account(&mut self, id: Uuid) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|account| account.id != id);
        if self.accounts.len() == before {
            return false;
        }
        for txn in &mut self.transactions {
            if txn.account_id == Some(id) {
                txn.account_id = None;
            }
        }
        self.touch();
        true
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn sorted_by_name<T: NamedEntity>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase()));
    sorted
}
