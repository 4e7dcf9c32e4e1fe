// crates/lottery-harness-cli/src/main.rs
// ============================================================================
// Module: Lottery Harness CLI Entry Point
// Description: Command dispatcher for listing, checking, and running the suite.
// Purpose: Run the lottery contract suite live, from fixtures, or both.
// Dependencies: clap, lottery-harness-config, lottery-harness-contract, serde_json
// ============================================================================

//! ## Overview
//! `lottery-harness` loads `lottery-harness.toml` (or `--config`), applies the
//! `LOTTERY_HARNESS_*` environment overrides, and drives the lottery suite.
//! `run --mode both` runs the suite twice and reports scenarios whose verdict
//! or envelope code differs between the live service and the fixtures. Any
//! failed scenario, divergence, or configuration error exits non-zero.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod harness;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use lottery_harness_config::HarnessConfig;
use lottery_harness_core::HarnessMode;
use lottery_harness_core::ModeDivergence;
use lottery_harness_core::Suite;
use lottery_harness_core::SuiteReport;
use lottery_harness_core::divergences;
use serde::Serialize;
use thiserror::Error;

use crate::harness::Harness;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Lottery harness CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lottery-harness", about = "Contract tests for the lottery API.")]
struct Cli {
    /// Config file path (defaults to `LOTTERY_HARNESS_CONFIG` or `lottery-harness.toml`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the scenarios of the suite.
    List(ListCommand),
    /// Validate configuration and suite wiring without sending requests.
    Check(CheckCommand),
    /// Run the suite and report every assertion.
    Run(RunCommand),
}

/// Arguments for `list`.
#[derive(clap::Args, Debug)]
struct ListCommand {
    /// Only list scenarios whose id starts with this prefix.
    #[arg(long, value_name = "PREFIX")]
    scenario: Option<String>,
}

/// Arguments for `check`.
#[derive(clap::Args, Debug)]
struct CheckCommand {
    /// Mode to check (defaults to the configured mode).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

/// Arguments for `run`.
#[derive(clap::Args, Debug)]
struct RunCommand {
    /// Mode to run (defaults to the configured mode).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Only run scenarios whose id starts with this prefix.
    #[arg(long, value_name = "PREFIX")]
    scenario: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Mode selection on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ModeArg {
    /// Call the live service.
    Live,
    /// Serve canned fixtures.
    Fixture,
    /// Run live and fixture, then compare.
    Both,
}

impl ModeArg {
    /// Expands the selection into concrete modes, live first.
    fn modes(self) -> Vec<HarnessMode> {
        match self {
            Self::Live => vec![HarnessMode::Live],
            Self::Fixture => vec![HarnessMode::Fixture],
            Self::Both => vec![HarnessMode::Live, HarnessMode::Fixture],
        }
    }
}

/// Output formats for `run`.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable reports.
    Text,
    /// One JSON document with every suite report.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches the selected command.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = HarnessConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let harness = Harness::new(config)?;
    match cli.command {
        Commands::List(command) => command_list(&harness, &command),
        Commands::Check(command) => command_check(&harness, &command),
        Commands::Run(command) => command_run(&harness, &command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `list`.
fn command_list(harness: &Harness, command: &ListCommand) -> CliResult<ExitCode> {
    let suite = select_suite(harness, command.scenario.as_deref())?;
    for scenario in suite.iter() {
        let line = format!(
            "{}\t{}\t{}\t{}",
            scenario.id(),
            scenario.endpoint().label(),
            scenario.expected_contract(),
            scenario.description()
        );
        write_stdout_line(&line).map_err(|err| output_error("stdout", &err))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `check`.
fn command_check(harness: &Harness, command: &CheckCommand) -> CliResult<ExitCode> {
    let suite = harness.catalog().suite();
    let selection = command.mode.map_or_else(|| vec![harness.default_mode()], ModeArg::modes);
    for mode in selection {
        let runner = harness.runner(mode)?;
        runner
            .check_suite(&suite)
            .map_err(|err| CliError::new(format!("suite check failed [{mode}]: {err}")))?;
        let line = format!("suite {} ok [{mode}]: {} scenarios", suite.name(), suite.len());
        write_stdout_line(&line).map_err(|err| output_error("stdout", &err))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `run`.
fn command_run(harness: &Harness, command: &RunCommand) -> CliResult<ExitCode> {
    let suite = select_suite(harness, command.scenario.as_deref())?;
    let selection = command.mode.map_or_else(|| vec![harness.default_mode()], ModeArg::modes);
    let mut reports = Vec::with_capacity(selection.len());
    for mode in selection {
        let runner = harness.runner(mode)?;
        let report = runner
            .run_suite(&suite)
            .map_err(|err| CliError::new(format!("suite run failed [{mode}]: {err}")))?;
        reports.push(report);
    }
    let outcome = RunOutcome::new(reports);
    match command.format {
        OutputFormat::Text => write_text(&outcome)?,
        OutputFormat::Json => write_json(&outcome)?,
    }
    Ok(if outcome.succeeded() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Returns the suite, filtered by an optional id prefix.
fn select_suite(harness: &Harness, prefix: Option<&str>) -> CliResult<Suite> {
    let suite = harness.catalog().suite();
    let Some(prefix) = prefix else {
        return Ok(suite);
    };
    let filtered = suite.filter_prefix(prefix);
    if filtered.is_empty() {
        return Err(CliError::new(format!("no scenario matches prefix {prefix}")));
    }
    Ok(filtered)
}

// ============================================================================
// SECTION: Run Outcome
// ============================================================================

/// Reports from one `run` invocation.
#[derive(Debug, Serialize)]
struct RunOutcome {
    /// One report per mode, live first.
    reports: Vec<SuiteReport>,
    /// Scenarios that disagree between live and fixture runs.
    divergences: Vec<ModeDivergence>,
}

impl RunOutcome {
    /// Collects reports and compares them when both modes ran.
    fn new(reports: Vec<SuiteReport>) -> Self {
        let live = reports.iter().find(|report| report.mode == HarnessMode::Live);
        let fixture = reports.iter().find(|report| report.mode == HarnessMode::Fixture);
        let divergences = match (live, fixture) {
            (Some(live), Some(fixture)) => divergences(live, fixture),
            _ => Vec::new(),
        };
        Self {
            reports,
            divergences,
        }
    }

    /// True when every scenario passed and no divergence was found.
    fn succeeded(&self) -> bool {
        self.divergences.is_empty() && self.reports.iter().all(SuiteReport::all_passed)
    }
}

/// Writes human-readable reports.
fn write_text(outcome: &RunOutcome) -> CliResult<()> {
    for suite in &outcome.reports {
        for report in &suite.reports {
            write_stdout_line(&report.to_string()).map_err(|err| output_error("stdout", &err))?;
        }
        let summary = format!(
            "suite {} [{}]: {} passed, {} failed",
            suite.suite, suite.mode, suite.passed, suite.failed
        );
        write_stdout_line(&summary).map_err(|err| output_error("stdout", &err))?;
    }
    for divergence in &outcome.divergences {
        write_stdout_line(&format!("DIVERGENCE {divergence}"))
            .map_err(|err| output_error("stdout", &err))?;
    }
    Ok(())
}

/// Writes the outcome as one pretty JSON document.
fn write_json(outcome: &RunOutcome) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(outcome)
        .map_err(|err| CliError::new(format!("json output failed: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| output_error("stdout", &err))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write {stream}: {error}"))
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
