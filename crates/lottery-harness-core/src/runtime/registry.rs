// crates/lottery-harness-core/src/runtime/registry.rs
// ============================================================================
// Module: Contract Schema Registry
// Description: Named contract schemas and payload validation.
// Purpose: Resolve contract names to schemas and collect violations.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The registry owns every [`ContractSchema`] a suite may reference. An
//! unknown name is a configuration error, not a validation failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::core::ContractName;
use crate::core::ContractSchema;
use crate::core::Violation;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract registry errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No schema is registered under the name.
    #[error("unknown contract schema: {0}")]
    UnknownSchema(String),
    /// A schema is already registered under the name.
    #[error("duplicate contract schema: {0}")]
    Duplicate(String),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Contract schemas keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    /// Schemas by contract name.
    schemas: BTreeMap<ContractName, ContractSchema>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the name is taken.
    pub fn register(&mut self, schema: ContractSchema) -> Result<(), RegistryError> {
        if self.schemas.contains_key(&schema.name) {
            return Err(RegistryError::Duplicate(schema.name.to_string()));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Returns the schema registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSchema`] when the name is absent.
    pub fn get(&self, name: &ContractName) -> Result<&ContractSchema, RegistryError> {
        self.schemas.get(name).ok_or_else(|| RegistryError::UnknownSchema(name.to_string()))
    }

    /// Validates a payload against the named schema.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSchema`] when the name is absent.
    pub fn validate(
        &self,
        name: &ContractName,
        payload: &Value,
    ) -> Result<Vec<Violation>, RegistryError> {
        Ok(self.get(name)?.validate(payload))
    }

    /// Iterates schemas in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ContractSchema> {
        self.schemas.values()
    }

    /// Returns the number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true when no schema is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
