//! JSON snapshot storage with atomic writes.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, error};

use crate::core::errors::{Result, TrackerError};
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};

use super::StorageBackend;

const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each ledger as a pretty-printed JSON snapshot under a root
/// directory, one file per ledger.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Opens a storage root, creating it if necessary. `None` picks the
    /// platform data directory.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_root);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the snapshot path for a ledger name.
    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        if let Err(err) = save_ledger_to_path(ledger, &path) {
            error!(ledger = %name, "failed to save ledger: {err}");
            return Err(err);
        }
        debug!(ledger = %name, path = %path.display(), "ledger saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        load_ledger_from_path(&self.ledger_path(name))
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(TrackerError::Storage(format!("ledger `{name}` not found")));
        }
        fs::remove_file(&path)?;
        Ok(())
    }
}

/// Writes a ledger snapshot atomically by staging it to a temporary
/// file and renaming it into place.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a ledger snapshot, rejecting files written by a newer schema.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(TrackerError::Storage(format!(
            "ledger `{}` uses schema version {}, this build supports up to {}",
            path.display(),
            ledger.schema_version,
            CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(ledger)
}

fn default_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tracker")
        .join("ledgers")
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
