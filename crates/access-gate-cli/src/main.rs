// crates/access-gate-cli/src/main.rs
// ============================================================================
// Module: Access Gate CLI Entry Point
// Description: Command dispatcher for serving and querying the access engine.
// Purpose: Provide a safe CLI for resolution, filtering, and gate checks.
// Dependencies: clap, access-gate-core, access-gate-directory, access-gate-server
// ============================================================================

//! ## Overview
//! The Access Gate CLI serves the HTTP surface and runs one-shot directory
//! queries: `serve` starts the server, `resolve` looks up a principal,
//! `filter` projects a record file down to the visible subset, and `check`
//! evaluates the permission gate. All commands load the same TOML
//! configuration and apply the directory environment overrides before
//! validation.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use access_gate_config::AccessGateConfig;
use access_gate_config::StoreMode;
use access_gate_core::AccessState;
use access_gate_core::GateCriteria;
use access_gate_core::GateOutcome;
use access_gate_core::RecordAction;
use access_gate_core::SafetyRecord;
use access_gate_core::evaluate;
use access_gate_core::filter_by_scope;
use access_gate_directory::DirectoryResolver;
use access_gate_directory::StderrAuditSink;
use access_gate_server::AccessGateServer;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration file path.
const DEFAULT_CONFIG_PATH: &str = "access-gate.toml";

/// Maximum size of record input files.
const MAX_RECORDS_FILE_BYTES: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "access-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Access Gate HTTP server.
    Serve(ServeCommand),
    /// Resolve a principal through the directory tier chain.
    Resolve(ResolveCommand),
    /// Filter a record file down to the subset visible to a principal.
    Filter(FilterCommand),
    /// Evaluate the permission gate for a principal.
    Check(CheckCommand),
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to access-gate.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `resolve` command.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Optional config file path (defaults to access-gate.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Principal email to resolve.
    #[arg(value_name = "EMAIL")]
    email: String,
}

/// Configuration for the `filter` command.
#[derive(Args, Debug)]
struct FilterCommand {
    /// Optional config file path (defaults to access-gate.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Principal email whose scope filters the records.
    #[arg(long, value_name = "EMAIL")]
    email: String,
    /// Path to a JSON array of records.
    #[arg(long, value_name = "PATH")]
    records: PathBuf,
}

/// Configuration for the `check` command.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Optional config file path (defaults to access-gate.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Principal email to check.
    #[arg(long, value_name = "EMAIL")]
    email: String,
    /// Permission flag name that must be set.
    #[arg(long, value_name = "FLAG")]
    permission: Option<String>,
    /// Maximum numeric level (passes when the user level is at most this).
    #[arg(long, value_name = "LEVEL")]
    level: Option<i64>,
    /// Target hierarchy path checked with the scope rule.
    #[arg(long, value_name = "PATH")]
    hierarchy: Option<String>,
    /// Role group the user must belong to.
    #[arg(long, value_name = "GROUP")]
    group: Option<String>,
    /// Path to a JSON record checked by the record/action rule.
    #[arg(long, value_name = "PATH", requires = "action")]
    record: Option<PathBuf>,
    /// Action checked against the record (unrecognized actions deny).
    #[arg(long, value_name = "ACTION", requires = "record")]
    action: Option<String>,
    /// Combine criteria with AND instead of the default OR.
    #[arg(long, action = ArgAction::SetTrue)]
    require_all: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a user-facing message.
#[derive(Debug)]
struct CliError {
    /// User-facing error message.
    message: String,
}

impl CliError {
    /// Creates a new CLI error.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("access-gate {version}"))
            .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        write_stderr_line("access-gate: no command given; try --help")
            .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
        return Ok(ExitCode::FAILURE);
    };
    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Resolve(command) => command_resolve(&command),
        Commands::Filter(command) => command_filter(&command),
        Commands::Check(command) => command_check(&command),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    if config.stores.mode == StoreMode::Memory {
        write_stderr_line(
            "access-gate: WARNING: serving with empty in-memory stores; every lookup will miss",
        )
        .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
    }
    let server =
        AccessGateServer::from_config(config).map_err(|err| CliError::new(err.to_string()))?;
    server.serve().await.map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Executes the `resolve` command.
fn command_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let resolver = build_resolver(command.config.as_deref())?;
    let resolution =
        resolver.resolve(&command.email).map_err(|err| CliError::new(err.to_string()))?;
    let rendered = serde_json::to_string_pretty(&resolution)
        .map_err(|err| CliError::new(format!("serialization failed: {err}")))?;
    write_stdout_line(&rendered)
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    if resolution.found() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

// ============================================================================
// SECTION: Filter Command
// ============================================================================

/// Executes the `filter` command.
fn command_filter(command: &FilterCommand) -> CliResult<ExitCode> {
    let resolver = build_resolver(command.config.as_deref())?;
    let resolution =
        resolver.resolve(&command.email).map_err(|err| CliError::new(err.to_string()))?;
    let Some(user) = resolution.user else {
        return Err(CliError::new(format!("user not found: {}", command.email)));
    };
    let records: Vec<SafetyRecord> = read_json_file(&command.records)?;
    let visible = filter_by_scope(records, Some(&user));
    let rendered = serde_json::to_string_pretty(&visible)
        .map_err(|err| CliError::new(format!("serialization failed: {err}")))?;
    write_stdout_line(&rendered)
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check` command.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let resolver = build_resolver(command.config.as_deref())?;
    let resolution =
        resolver.resolve(&command.email).map_err(|err| CliError::new(err.to_string()))?;
    let record: Option<SafetyRecord> = match &command.record {
        Some(path) => Some(read_json_file(path)?),
        None => None,
    };
    let state = AccessState::complete(resolution.user);
    let outcome = check_outcome(&state, command, record.as_ref());
    let rendered = serde_json::to_string(&serde_json::json!({"outcome": outcome.as_str()}))
        .map_err(|err| CliError::new(format!("serialization failed: {err}")))?;
    write_stdout_line(&rendered)
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    if outcome.is_allowed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Evaluates the gate for a `check` invocation.
///
/// An unrecognized action label denies without consulting the other
/// criteria, matching the gate's fail-closed action contract.
fn check_outcome(
    state: &AccessState,
    command: &CheckCommand,
    record: Option<&SafetyRecord>,
) -> GateOutcome {
    let action = match &command.action {
        Some(label) => match RecordAction::parse(label) {
            Some(action) => Some(action),
            None => return GateOutcome::Deny,
        },
        None => None,
    };
    let criteria = GateCriteria {
        permission: command.permission.as_deref(),
        level: command.level,
        hierarchy: command.hierarchy.as_deref(),
        group: command.group.as_deref(),
        record,
        action,
        require_all: command.require_all,
    };
    evaluate(state, &criteria)
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Loads, overlays, and validates the configuration.
fn load_config(path: Option<&Path>) -> CliResult<AccessGateConfig> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let mut config =
        AccessGateConfig::from_toml_path(path).map_err(|err| CliError::new(err.to_string()))?;
    config.apply_env_overrides();
    config.validate().map_err(|err| CliError::new(err.to_string()))?;
    Ok(config)
}

/// Builds a resolver from the configuration.
fn build_resolver(path: Option<&Path>) -> CliResult<DirectoryResolver> {
    let config = load_config(path)?;
    DirectoryResolver::from_config(&config, Arc::new(StderrAuditSink))
        .map_err(|err| CliError::new(err.to_string()))
}

/// Reads and parses a JSON input file with a hard size cap.
fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> CliResult<T> {
    let metadata = std::fs::metadata(path)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))?;
    if metadata.len() > MAX_RECORDS_FILE_BYTES {
        return Err(CliError::new(format!("{}: input file too large", path.display())));
    }
    let bytes = std::fs::read(path)
        .map_err(|err| CliError::new(format!("{}: {err}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("{}: invalid json: {err}", path.display())))
}

/// Writes one line to stdout.
fn write_stdout_line(line: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")
}

/// Writes one line to stderr.
fn write_stderr_line(line: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr().lock();
    writeln!(stderr, "{line}")
}

/// Reports an error on stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("access-gate: error: {message}"));
    ExitCode::FAILURE
}
