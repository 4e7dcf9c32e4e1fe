// crates/lottery-harness-contract/src/lib.rs
// ============================================================================
// Module: Lottery Harness Contract Library
// Description: Lottery endpoints, schemas, fixtures, and scenarios.
// Purpose: Bind the generic harness to the lottery service contract.
// Dependencies: lottery-harness-config, lottery-harness-core, serde_json
// ============================================================================

//! ## Overview
//! The contract library is the single source of truth for what the lottery
//! service must return. A [`LotteryCatalog`] bundles the status table, the
//! endpoint descriptors, the schema registry, the fixture store, and the
//! scenario suite, all derived from one [`StatusCatalog`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod endpoints;
pub mod fixtures;
pub mod schemas;
pub mod status;
pub mod suite;

// ============================================================================
// SECTION: Imports
// ============================================================================

use lottery_harness_config::StatusCodesConfig;
use lottery_harness_core::ContractRegistry;
use lottery_harness_core::FixtureError;
use lottery_harness_core::FixtureStore;
use lottery_harness_core::RegistryError;
use lottery_harness_core::Suite;
use thiserror::Error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use endpoints::LotteryEndpoints;
pub use status::LotteryStatus;
pub use status::StatusCatalog;
pub use status::StatusEntry;
pub use suite::lottery_suite;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while assembling the lottery contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Status catalog is inconsistent.
    #[error("status catalog error: {0}")]
    Catalog(String),
    /// Schema registration failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Fixture registration failed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Everything needed to run the lottery suite in either mode.
#[derive(Debug, Clone)]
pub struct LotteryCatalog {
    /// Status codes and messages.
    status: StatusCatalog,
    /// Endpoint descriptors.
    endpoints: LotteryEndpoints,
    /// Contract schemas.
    registry: ContractRegistry,
    /// Built-in fixtures.
    fixtures: FixtureStore,
}

impl LotteryCatalog {
    /// Builds the catalog from a status table.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the status table is inconsistent or a
    /// schema or fixture cannot be registered.
    pub fn new(status: StatusCatalog) -> Result<Self, ContractError> {
        status.validate()?;
        let registry = schemas::lottery_registry(&status)?;
        let fixtures = fixtures::lottery_fixtures(&status)?;
        Ok(Self {
            status,
            endpoints: LotteryEndpoints::new(),
            registry,
            fixtures,
        })
    }

    /// Builds the catalog from configured status overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the overrides produce colliding codes.
    pub fn from_config(config: &StatusCodesConfig) -> Result<Self, ContractError> {
        Self::new(StatusCatalog::from_config(config)?)
    }

    /// Returns the status table.
    #[must_use]
    pub const fn status(&self) -> &StatusCatalog {
        &self.status
    }

    /// Returns the endpoint descriptors.
    #[must_use]
    pub const fn endpoints(&self) -> &LotteryEndpoints {
        &self.endpoints
    }

    /// Returns the schema registry.
    #[must_use]
    pub const fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Returns the built-in fixtures.
    #[must_use]
    pub const fn fixtures(&self) -> &FixtureStore {
        &self.fixtures
    }

    /// Builds the full scenario suite.
    #[must_use]
    pub fn suite(&self) -> Suite {
        lottery_suite(&self.endpoints)
    }
}
