// crates/lottery-harness-config/src/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed overrides for harness configuration.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration. Set-but-empty values, invalid UTF-8, and
//! malformed numbers or booleans fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::ConfigError;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys read by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Config file path override.
    ConfigPath,
    /// Base URL of the service under test.
    ApiEndpoint,
    /// Bearer credential for authenticated endpoints.
    AccessToken,
    /// Fixture mode switch (`true`/`false` or `1`/`0`).
    UseMockData,
    /// Request timeout in milliseconds (positive integer).
    TimeoutMs,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "LOTTERY_HARNESS_CONFIG",
            Self::ApiEndpoint => "LOTTERY_HARNESS_API_ENDPOINT",
            Self::AccessToken => "LOTTERY_HARNESS_ACCESS_TOKEN",
            Self::UseMockData => "LOTTERY_HARNESS_USE_MOCK_DATA",
            Self::TimeoutMs => "LOTTERY_HARNESS_TIMEOUT_MS",
        }
    }
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Typed overrides derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvOverrides {
    /// Base URL override.
    pub api_endpoint: Option<String>,
    /// Bearer credential override.
    pub access_token: Option<String>,
    /// Fixture mode override.
    pub use_mock_data: Option<bool>,
    /// Timeout override in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl EnvOverrides {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is not valid UTF-8, is
    /// empty, or fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(read_env_strict)
    }

    /// Reads overrides through a custom lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is empty or fails to
    /// parse, or when the lookup itself fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let read = |key: HarnessEnv| read_nonempty(&lookup, key.as_str());
        let use_mock_data = read(HarnessEnv::UseMockData)?
            .map(|raw| parse_bool(HarnessEnv::UseMockData.as_str(), &raw))
            .transpose()?;
        let timeout_ms = read(HarnessEnv::TimeoutMs)?
            .map(|raw| parse_timeout_ms(HarnessEnv::TimeoutMs.as_str(), &raw))
            .transpose()?;
        Ok(Self {
            api_endpoint: read(HarnessEnv::ApiEndpoint)?,
            access_token: read(HarnessEnv::AccessToken)?,
            use_mock_data,
            timeout_ms,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads a variable through `lookup` and rejects empty values.
fn read_nonempty<F>(lookup: &F, name: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<Option<String>, ConfigError>,
{
    match lookup(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses `true`/`false`/`1`/`0` (case-insensitive).
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for any other value.
pub fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::Invalid(format!("{name} must be true/false or 1/0"))),
    }
}

/// Parses a positive timeout in milliseconds.
fn parse_timeout_ms(name: &str, raw: &str) -> Result<u64, ConfigError> {
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a positive integer")))?;
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(value)
}
