//! Persistence trait and the JSON backend.

pub mod json_backend;

use std::path::Path;

use crate::{core::errors::Result, ledger::Ledger};

/// Abstraction over persistence backends capable of storing ledgers.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn list(&self) -> Result<Vec<String>>;
    fn delete(&self, name: &str) -> Result<()>;

    /// Ad-hoc file operations. Default implementations forward to the
    /// JSON helpers.
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        json_backend::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        json_backend::load_ledger_from_path(path)
    }
}

pub use json_backend::JsonStorage;
