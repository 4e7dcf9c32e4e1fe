// crates/lottery-harness-core/src/runtime/mode.rs
// ============================================================================
// Module: Mode Selector
// Description: Routes scenarios to the fixture store or the live invoker.
// Purpose: Keep the live/fixture decision explicit and injected.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A [`ModeSelector`] is built for exactly one [`HarnessMode`] and never
//! consults process state. Fixture mode looks up the store by the scenario's
//! expected contract and attaches the request the scenario would have sent,
//! so request-echo checks apply in both modes. Live mode delegates to the
//! [`RequestInvoker`]. Two
//! selectors in different modes can run side by side.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::HarnessMode;
use crate::core::InvocationResult;
use crate::core::InvocationSource;
use crate::core::Scenario;
use crate::runtime::fixtures::FixtureStore;
use crate::runtime::invoker::RequestInvoker;
use crate::runtime::invoker::resolve_request;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Response source behind a selector.
#[derive(Clone)]
enum Backend {
    /// Canned payloads.
    Fixture(Arc<FixtureStore>),
    /// Live requests.
    Live(Arc<RequestInvoker>),
}

/// Routes scenario resolution by harness mode.
#[derive(Clone)]
pub struct ModeSelector {
    /// Selected response source.
    backend: Backend,
}

impl ModeSelector {
    /// Creates a fixture-mode selector.
    #[must_use]
    pub const fn fixture(fixtures: Arc<FixtureStore>) -> Self {
        Self {
            backend: Backend::Fixture(fixtures),
        }
    }

    /// Creates a live-mode selector.
    #[must_use]
    pub const fn live(invoker: Arc<RequestInvoker>) -> Self {
        Self {
            backend: Backend::Live(invoker),
        }
    }

    /// Returns the selected mode.
    #[must_use]
    pub const fn mode(&self) -> HarnessMode {
        match self.backend {
            Backend::Fixture(_) => HarnessMode::Fixture,
            Backend::Live(_) => HarnessMode::Live,
        }
    }

    /// Returns the fixture store in fixture mode.
    #[must_use]
    pub fn fixtures(&self) -> Option<&FixtureStore> {
        match &self.backend {
            Backend::Fixture(store) => Some(store),
            Backend::Live(_) => None,
        }
    }

    /// Resolves a scenario into an invocation result.
    ///
    /// A missing fixture degrades into a failed result; suites are checked
    /// for missing fixtures before they run.
    #[must_use]
    pub fn resolve(&self, scenario: &Scenario) -> InvocationResult {
        match &self.backend {
            Backend::Fixture(store) => {
                let request = resolve_request(scenario.endpoint(), scenario.overrides());
                match store.lookup(scenario.expected_contract()) {
                    Ok(payload) => InvocationResult::fixture(payload, request),
                    Err(err) => InvocationResult::failed(
                        InvocationSource::Fixture,
                        err.to_string(),
                        Some(request),
                    ),
                }
            }
            Backend::Live(invoker) => invoker.invoke(scenario.endpoint(), scenario.overrides()),
        }
    }
}
