// crates/lottery-harness-config/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: Configuration loading and validation for the lottery harness.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits,
//! then overlaid with environment overrides and validated. A missing file at
//! the default location means built-in defaults; a missing file anywhere else
//! is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::env::EnvOverrides;
use crate::env::HarnessEnv;
use crate::env::read_env_strict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "lottery-harness.toml";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default base URL of the service under test.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Upper bound for the request timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 300_000;
/// Default response body limit in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Default user agent sent by the live transport.
pub const DEFAULT_USER_AGENT: &str = "lottery-harness/0.1";

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Live target settings.
    #[serde(default)]
    pub target: TargetConfig,
    /// Mode selection.
    #[serde(default)]
    pub mode: ModeConfig,
    /// Fixture source settings.
    #[serde(default)]
    pub fixtures: FixturesConfig,
    /// Run audit sink settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Status catalog overrides.
    #[serde(default)]
    pub status_codes: StatusCodesConfig,
}

/// Live target settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Base URL all endpoint paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer credential for authenticated endpoints.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent header for live requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum accepted response body size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl TargetConfig {
    /// Validates target settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(self.base_url.trim()).map_err(|err| {
            ConfigError::Invalid(format!("target.base_url is not a valid url: {err}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "target.base_url must use http or https".to_string(),
            ));
        }
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "target.timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("target.user_agent must be non-empty".to_string()));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(
                "target.max_response_bytes must be greater than zero".to_string(),
            ));
        }
        if let Some(token) = &self.access_token
            && token.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "target.access_token must be non-empty when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mode selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeConfig {
    /// Serve canned payloads instead of calling the live service.
    #[serde(default)]
    pub use_fixtures: bool,
}

/// Fixture source settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixturesConfig {
    /// Directory of `<contract>.json` files layered over the built-in set.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Run audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard audit events.
    None,
}

/// Run audit sink settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Output path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => {
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            _ => Ok(()),
        }
    }
}

/// A status code and message pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusEntryConfig {
    /// Envelope code.
    pub code: i64,
    /// Envelope message.
    pub message: String,
}

/// Status catalog overrides. Unset entries keep the built-in values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusCodesConfig {
    /// Success envelope code.
    #[serde(default)]
    pub success: Option<i64>,
    /// Success message for fetch endpoints.
    #[serde(default)]
    pub fetch_success_message: Option<String>,
    /// Success message for update endpoints.
    #[serde(default)]
    pub update_success_message: Option<String>,
    /// Invalid or missing credential.
    #[serde(default)]
    pub access_token_error: Option<StatusEntryConfig>,
    /// Missing required parameter.
    #[serde(default)]
    pub query_required_error: Option<StatusEntryConfig>,
    /// Parameter with the wrong type or range.
    #[serde(default)]
    pub input_value_invalid_error: Option<StatusEntryConfig>,
    /// Member holds no discount.
    #[serde(default)]
    pub member_no_discount_error: Option<StatusEntryConfig>,
}

impl StatusCodesConfig {
    /// Validates that every overridden message is non-empty.
    fn validate(&self) -> Result<(), ConfigError> {
        let messages = [
            ("status_codes.fetch_success_message", self.fetch_success_message.as_deref()),
            ("status_codes.update_success_message", self.update_success_message.as_deref()),
        ];
        for (field, message) in messages {
            if let Some(message) = message
                && message.trim().is_empty()
            {
                return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
            }
        }
        let entries = [
            ("status_codes.access_token_error", &self.access_token_error),
            ("status_codes.query_required_error", &self.query_required_error),
            ("status_codes.input_value_invalid_error", &self.input_value_invalid_error),
            ("status_codes.member_no_discount_error", &self.member_no_discount_error),
        ];
        for (field, entry) in entries {
            if let Some(entry) = entry
                && entry.message.trim().is_empty()
            {
                return Err(ConfigError::Invalid(format!("{field}.message must be non-empty")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Source Resolution
// ============================================================================

/// Where the configuration file path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path passed by the caller.
    Explicit(PathBuf),
    /// Path read from `LOTTERY_HARNESS_CONFIG`.
    Env(PathBuf),
    /// Default filename in the working directory.
    Default(PathBuf),
}

impl ConfigSource {
    /// Resolves the config path: explicit, then environment, then default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the environment path is empty or
    /// too long.
    pub fn resolve(
        explicit: Option<&Path>,
        env_value: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Ok(Self::Explicit(path.to_path_buf()));
        }
        if let Some(env_path) = env_value {
            let name = HarnessEnv::ConfigPath.as_str();
            if env_path.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
            if env_path.len() > MAX_TOTAL_PATH_LENGTH {
                return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
            }
            return Ok(Self::Env(PathBuf::from(env_path)));
        }
        Ok(Self::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
    }

    /// Returns the resolved path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Env(path) | Self::Default(path) => path,
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl HarnessConfig {
    /// Loads configuration using the default resolution rules, applies
    /// environment overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading, override parsing, or validation
    /// fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = read_env_strict(HarnessEnv::ConfigPath.as_str())?;
        let source = ConfigSource::resolve(path, env_path)?;
        let mut config = Self::read_from(&source)?;
        config.apply_overrides(&EnvOverrides::from_env()?);
        config.validate()?;
        Ok(config)
    }

    /// Reads the file named by `source` without overrides or validation.
    ///
    /// A missing file at the default location yields built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn read_from(source: &ConfigSource) -> Result<Self, ConfigError> {
        let path = source.path();
        if matches!(source, ConfigSource::Default(_)) && !path.exists() {
            return Ok(Self::default());
        }
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays environment overrides onto this configuration.
    pub fn apply_overrides(&mut self, overrides: &EnvOverrides) {
        if let Some(endpoint) = &overrides.api_endpoint {
            self.target.base_url.clone_from(endpoint);
        }
        if let Some(token) = &overrides.access_token {
            self.target.access_token = Some(token.clone());
        }
        if let Some(use_fixtures) = overrides.use_mock_data {
            self.mode.use_fixtures = use_fixtures;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.target.timeout_ms = timeout_ms;
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.validate()?;
        self.audit.validate()?;
        self.status_codes.validate()?;
        if let Some(dir) = &self.fixtures.dir {
            validate_path_string("fixtures.dir", &dir.to_string_lossy())?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default base URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Default response body limit.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}
