// crates/lottery-harness-contract/src/status.rs
// ============================================================================
// Module: Status Catalog
// Description: Envelope status codes and messages for the lottery service.
// Purpose: Single table of domain codes shared by schemas and fixtures.
// Dependencies: lottery-harness-config, serde
// ============================================================================

//! ## Overview
//! The lottery service reports every outcome inside an HTTP 200 envelope of
//! `{code, message, data?}`. The [`StatusCatalog`] holds the success code, the
//! two success messages, and one code/message pair per [`LotteryStatus`].
//! Configuration may override any entry; codes must stay distinct so each
//! envelope maps back to exactly one contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use lottery_harness_config::StatusCodesConfig;
use lottery_harness_config::StatusEntryConfig;
use serde::Serialize;

use crate::ContractError;
use crate::schemas;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default success code.
pub const DEFAULT_SUCCESS_CODE: i64 = 200;
/// Default success message for fetch endpoints.
pub const DEFAULT_FETCH_SUCCESS_MESSAGE: &str = "取得成功";
/// Default success message for update endpoints.
pub const DEFAULT_UPDATE_SUCCESS_MESSAGE: &str = "更新成功";

// ============================================================================
// SECTION: Status Kinds
// ============================================================================

/// Domain error kinds reported in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryStatus {
    /// Credential missing or wrong.
    AccessTokenError,
    /// Required parameter missing.
    QueryRequiredError,
    /// Parameter present with the wrong type or range.
    InputValueInvalidError,
    /// Member holds no discount.
    MemberNoDiscountError,
}

impl LotteryStatus {
    /// All error kinds in catalog order.
    pub const ALL: [Self; 4] = [
        Self::AccessTokenError,
        Self::QueryRequiredError,
        Self::InputValueInvalidError,
        Self::MemberNoDiscountError,
    ];

    /// Returns the config key for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessTokenError => "access_token_error",
            Self::QueryRequiredError => "query_required_error",
            Self::InputValueInvalidError => "input_value_invalid_error",
            Self::MemberNoDiscountError => "member_no_discount_error",
        }
    }

    /// Returns the contract name asserted for this kind.
    #[must_use]
    pub const fn contract(self) -> &'static str {
        match self {
            Self::AccessTokenError => schemas::ACCESS_TOKEN_ERROR,
            Self::QueryRequiredError => schemas::QUERY_REQUIRED_ERROR,
            Self::InputValueInvalidError => schemas::INPUT_VALUE_INVALID_ERROR,
            Self::MemberNoDiscountError => schemas::MEMBER_NO_DISCOUNT_ERROR,
        }
    }

    /// Built-in code and message.
    fn default_entry(self) -> StatusEntry {
        let (code, message) = match self {
            Self::AccessTokenError => (1001, "存取權杖錯誤"),
            Self::QueryRequiredError => (1002, "缺少必要參數"),
            Self::InputValueInvalidError => (1003, "輸入值無效"),
            Self::MemberNoDiscountError => (1004, "此會員沒有折扣"),
        };
        StatusEntry::new(code, message)
    }

    /// Selects the override for this kind.
    const fn override_in(self, config: &StatusCodesConfig) -> Option<&StatusEntryConfig> {
        match self {
            Self::AccessTokenError => config.access_token_error.as_ref(),
            Self::QueryRequiredError => config.query_required_error.as_ref(),
            Self::InputValueInvalidError => config.input_value_invalid_error.as_ref(),
            Self::MemberNoDiscountError => config.member_no_discount_error.as_ref(),
        }
    }
}

impl fmt::Display for LotteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// An envelope code and message pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Envelope code.
    pub code: i64,
    /// Envelope message.
    pub message: String,
}

impl StatusEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Status code and message table for the lottery envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCatalog {
    /// Success code.
    success: i64,
    /// Success message for fetch endpoints.
    fetch_success_message: String,
    /// Success message for update endpoints.
    update_success_message: String,
    /// Error entries keyed by kind.
    errors: BTreeMap<LotteryStatus, StatusEntry>,
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self {
            success: DEFAULT_SUCCESS_CODE,
            fetch_success_message: DEFAULT_FETCH_SUCCESS_MESSAGE.to_string(),
            update_success_message: DEFAULT_UPDATE_SUCCESS_MESSAGE.to_string(),
            errors: LotteryStatus::ALL.iter().map(|kind| (*kind, kind.default_entry())).collect(),
        }
    }
}

impl StatusCatalog {
    /// Builds a catalog from the defaults with `config` overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Catalog`] when two entries share a code.
    pub fn from_config(config: &StatusCodesConfig) -> Result<Self, ContractError> {
        let mut catalog = Self::default();
        if let Some(code) = config.success {
            catalog.success = code;
        }
        if let Some(message) = &config.fetch_success_message {
            catalog.fetch_success_message.clone_from(message);
        }
        if let Some(message) = &config.update_success_message {
            catalog.update_success_message.clone_from(message);
        }
        for kind in LotteryStatus::ALL {
            if let Some(entry) = kind.override_in(config) {
                catalog.errors.insert(kind, StatusEntry::new(entry.code, entry.message.clone()));
            }
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks that every code is distinct.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Catalog`] naming the colliding entries.
    pub fn validate(&self) -> Result<(), ContractError> {
        let mut seen: BTreeMap<i64, &str> = BTreeMap::new();
        seen.insert(self.success, "success");
        for (kind, entry) in &self.errors {
            if let Some(previous) = seen.insert(entry.code, kind.as_str()) {
                return Err(ContractError::Catalog(format!(
                    "status code {} used by both {previous} and {kind}",
                    entry.code
                )));
            }
        }
        Ok(())
    }

    /// Returns the success code.
    #[must_use]
    pub const fn success(&self) -> i64 {
        self.success
    }

    /// Returns the fetch success message.
    #[must_use]
    pub fn fetch_success_message(&self) -> &str {
        &self.fetch_success_message
    }

    /// Returns the update success message.
    #[must_use]
    pub fn update_success_message(&self) -> &str {
        &self.update_success_message
    }

    /// Returns the entry for an error kind.
    #[must_use]
    pub fn entry(&self, kind: LotteryStatus) -> StatusEntry {
        self.errors.get(&kind).cloned().unwrap_or_else(|| kind.default_entry())
    }

    /// Finds the error kind reporting `code`.
    #[must_use]
    pub fn kind_for_code(&self, code: i64) -> Option<LotteryStatus> {
        self.errors.iter().find(|(_, entry)| entry.code == code).map(|(kind, _)| *kind)
    }
}
