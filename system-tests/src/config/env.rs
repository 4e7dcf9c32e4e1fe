// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. Without a target URL the
//! system tests only talk to their in-process stub service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional base URL of a deployed lottery service.
    TargetUrl,
    /// Credential for the deployed service.
    AccessToken,
    /// Optional request timeout override in milliseconds (positive integer).
    TimeoutMs,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TargetUrl => "LOTTERY_SYSTEM_TEST_TARGET_URL",
            Self::AccessToken => "LOTTERY_SYSTEM_TEST_ACCESS_TOKEN",
            Self::TimeoutMs => "LOTTERY_SYSTEM_TEST_TIMEOUT_MS",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Deployed service to run the live suite against.
    pub target_url: Option<String>,
    /// Credential for the deployed service.
    pub access_token: Option<String>,
    /// Request timeout override.
    pub timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation.
    pub fn load() -> Result<Self, String> {
        Self::load_from(read_env_strict)
    }

    /// Loads configuration through a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is empty, fails validation, or when a
    /// target URL is set without a credential.
    pub fn load_from<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Result<Option<String>, String>,
    {
        let read = |key: SystemTestEnv| read_nonempty(&lookup, key.as_str());
        let target_url = read(SystemTestEnv::TargetUrl)?;
        let access_token = read(SystemTestEnv::AccessToken)?;
        let timeout = read(SystemTestEnv::TimeoutMs)?
            .map(|value| parse_timeout_ms(SystemTestEnv::TimeoutMs.as_str(), &value))
            .transpose()?;
        if target_url.is_some() && access_token.is_none() {
            return Err(format!(
                "{} is required when {} is set",
                SystemTestEnv::AccessToken.as_str(),
                SystemTestEnv::TargetUrl.as_str()
            ));
        }
        Ok(Self {
            target_url,
            access_token,
            timeout,
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
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads a variable through `lookup` and rejects empty values.
fn read_nonempty<F>(lookup: &F, name: &str) -> Result<Option<String>, String>
where
    F: Fn(&str) -> Result<Option<String>, String>,
{
    match lookup(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive timeout in milliseconds.
fn parse_timeout_ms(name: &str, raw: &str) -> Result<Duration, String> {
    let millis: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of milliseconds"))?;
    if millis == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_millis(millis))
}
