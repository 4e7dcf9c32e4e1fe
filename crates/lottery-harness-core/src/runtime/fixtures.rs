// crates/lottery-harness-core/src/runtime/fixtures.rs
// ============================================================================
// Module: Fixture Store
// Description: Canned response payloads keyed by contract name.
// Purpose: Serve fixture-mode invocations without touching the network.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The store maps a [`ContractName`] to one literal JSON payload. Lookups hand
//! out clones, so a caller mutating a returned payload never affects later
//! lookups. Fixture directories are read fail-closed: oversized files and
//! invalid JSON abort the load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::core::ContractName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a single fixture file.
pub const MAX_FIXTURE_BYTES: u64 = 1024 * 1024;

/// File extension for fixture files.
const FIXTURE_EXTENSION: &str = "json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fixture store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// No fixture is registered under the key.
    #[error("unknown fixture: {0}")]
    Unknown(String),
    /// A fixture is already registered under the key.
    #[error("duplicate fixture: {0}")]
    Duplicate(String),
    /// Fixture file could not be read.
    #[error("fixture io error: {0}")]
    Io(String),
    /// Fixture file is oversized or not valid JSON.
    #[error("invalid fixture: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// In-memory fixture payloads keyed by contract name.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    /// Payloads by contract name.
    entries: BTreeMap<ContractName, Value>,
}

impl FixtureStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payload under a new key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Duplicate`] when the key is already present.
    pub fn register(
        &mut self,
        key: impl Into<ContractName>,
        payload: Value,
    ) -> Result<(), FixtureError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(FixtureError::Duplicate(key.to_string()));
        }
        self.entries.insert(key, payload);
        Ok(())
    }

    /// Inserts or replaces a payload.
    pub fn upsert(&mut self, key: impl Into<ContractName>, payload: Value) {
        self.entries.insert(key.into(), payload);
    }

    /// Returns a copy of the payload registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Unknown`] when the key is absent.
    pub fn lookup(&self, key: &ContractName) -> Result<Value, FixtureError> {
        self.entries.get(key).cloned().ok_or_else(|| FixtureError::Unknown(key.to_string()))
    }

    /// Returns true when a payload is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &ContractName) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &ContractName> {
        self.entries.keys()
    }

    /// Returns the number of registered fixtures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no fixture is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads every `*.json` file in `dir`, keyed by file stem.
    ///
    /// Loaded payloads replace existing entries with the same key. Files are
    /// read in sorted path order. Returns the number of files loaded.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] when the directory or a file cannot be
    /// read and [`FixtureError::Invalid`] when a file exceeds
    /// [`MAX_FIXTURE_BYTES`] or is not valid JSON.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, FixtureError> {
        let entries = fs::read_dir(dir)
            .map_err(|err| FixtureError::Io(format!("{}: {err}", dir.display())))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| FixtureError::Io(err.to_string()))?;
            let path = entry.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(FIXTURE_EXTENSION)
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in &paths {
            loaded.push(read_fixture(path)?);
        }
        let count = loaded.len();
        for (key, payload) in loaded {
            self.upsert(key, payload);
        }
        Ok(count)
    }
}

/// Reads one fixture file into its key and payload.
fn read_fixture(path: &Path) -> Result<(ContractName, Value), FixtureError> {
    let key = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| FixtureError::Invalid(format!("{}: invalid file name", path.display())))?;
    let size = fs::metadata(path)
        .map_err(|err| FixtureError::Io(format!("{}: {err}", path.display())))?
        .len();
    if size > MAX_FIXTURE_BYTES {
        return Err(FixtureError::Invalid(format!(
            "{}: {size} bytes exceeds limit of {MAX_FIXTURE_BYTES}",
            path.display()
        )));
    }
    let bytes =
        fs::read(path).map_err(|err| FixtureError::Io(format!("{}: {err}", path.display())))?;
    let payload = serde_json::from_slice(&bytes)
        .map_err(|err| FixtureError::Invalid(format!("{}: {err}", path.display())))?;
    Ok((ContractName::new(key), payload))
}
