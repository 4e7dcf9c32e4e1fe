// crates/lottery-harness-cli/src/harness.rs
// ============================================================================
// Module: Harness Assembly
// Description: Builds runners, fixtures, and audit sinks from configuration.
// Purpose: Keep the command handlers free of wiring details.
// Dependencies: lottery-harness-config, lottery-harness-contract, lottery-harness-http
// ============================================================================

//! ## Overview
//! A [`Harness`] owns the validated configuration and the lottery catalog and
//! produces one [`ScenarioRunner`] per requested mode. Live runners talk to
//! the configured base URL through [`ReqwestTransport`]; fixture runners serve
//! the built-in fixtures layered with the optional fixture directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use lottery_harness_config::AuditSinkKind;
use lottery_harness_config::HarnessConfig;
use lottery_harness_contract::LotteryCatalog;
use lottery_harness_core::FileRunAuditSink;
use lottery_harness_core::FixtureStore;
use lottery_harness_core::HarnessMode;
use lottery_harness_core::ModeSelector;
use lottery_harness_core::NoopRunAuditSink;
use lottery_harness_core::RequestInvoker;
use lottery_harness_core::RunAuditSink;
use lottery_harness_core::ScenarioRunner;
use lottery_harness_core::StderrRunAuditSink;
use lottery_harness_http::HttpTransportConfig;
use lottery_harness_http::ReqwestTransport;

use crate::CliError;
use crate::CliResult;

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Configured harness ready to build runners.
pub(crate) struct Harness {
    /// Validated configuration.
    config: HarnessConfig,
    /// Lottery catalog built from the configured status table.
    catalog: LotteryCatalog,
    /// Sink shared by every runner.
    audit: Arc<dyn RunAuditSink>,
}

impl Harness {
    /// Builds the harness from a validated configuration.
    pub(crate) fn new(config: HarnessConfig) -> CliResult<Self> {
        let catalog = LotteryCatalog::from_config(&config.status_codes)
            .map_err(|err| CliError::new(format!("contract error: {err}")))?;
        let audit = audit_sink(&config)?;
        Ok(Self {
            config,
            catalog,
            audit,
        })
    }

    /// Returns the lottery catalog.
    pub(crate) const fn catalog(&self) -> &LotteryCatalog {
        &self.catalog
    }

    /// Mode used when the command line does not choose one.
    pub(crate) const fn default_mode(&self) -> HarnessMode {
        if self.config.mode.use_fixtures { HarnessMode::Fixture } else { HarnessMode::Live }
    }

    /// Builds a runner for `mode`.
    pub(crate) fn runner(&self, mode: HarnessMode) -> CliResult<ScenarioRunner> {
        let selector = match mode {
            HarnessMode::Fixture => ModeSelector::fixture(Arc::new(self.fixture_store()?)),
            HarnessMode::Live => ModeSelector::live(Arc::new(self.invoker()?)),
        };
        Ok(ScenarioRunner::new(selector, Arc::new(self.catalog.registry().clone()))
            .with_audit_sink(Arc::clone(&self.audit)))
    }

    /// Built-in fixtures layered with the configured directory.
    pub(crate) fn fixture_store(&self) -> CliResult<FixtureStore> {
        let mut store = self.catalog.fixtures().clone();
        if let Some(dir) = &self.config.fixtures.dir {
            store.load_dir(dir).map_err(|err| {
                CliError::new(format!("fixture load failed ({}): {err}", dir.display()))
            })?;
        }
        Ok(store)
    }

    /// Live invoker for the configured target.
    fn invoker(&self) -> CliResult<RequestInvoker> {
        let target = &self.config.target;
        let transport = ReqwestTransport::new(HttpTransportConfig {
            timeout_ms: target.timeout_ms,
            max_response_bytes: target.max_response_bytes,
            user_agent: target.user_agent.clone(),
        })
        .map_err(|err| CliError::new(format!("transport setup failed: {err}")))?;
        Ok(RequestInvoker::new(
            target.base_url.clone(),
            target.access_token.clone(),
            Arc::new(transport),
        ))
    }
}

/// Selects the run audit sink.
fn audit_sink(config: &HarnessConfig) -> CliResult<Arc<dyn RunAuditSink>> {
    match (config.audit.sink, &config.audit.path) {
        (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrRunAuditSink)),
        (AuditSinkKind::None, _) => Ok(Arc::new(NoopRunAuditSink)),
        (AuditSinkKind::File, Some(path)) => {
            let sink = FileRunAuditSink::new(path).map_err(|err| {
                CliError::new(format!("audit log open failed ({}): {err}", path.display()))
            })?;
            Ok(Arc::new(sink))
        }
        (AuditSinkKind::File, None) => {
            Err(CliError::new("audit.path is required for the file sink".to_string()))
        }
    }
}
