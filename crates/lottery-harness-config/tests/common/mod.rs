// crates/lottery-harness-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for lottery-harness-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use lottery_harness_config::ConfigError;
use lottery_harness_config::HarnessConfig;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `HarnessConfig` without validation.
pub fn config_from_toml(toml_str: &str) -> Result<HarnessConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<HarnessConfig, toml::de::Error> {
    config_from_toml("")
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write_config(
    dir: &tempfile::TempDir,
    name: &str,
    contents: &[u8],
) -> Result<PathBuf, String> {
    let path = dir.path().join(name);
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok(path)
}
