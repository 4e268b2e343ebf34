// crates/aiact-cli/src/main.rs
// ============================================================================
// Module: Aiact CLI Entry Point
// Description: Command dispatcher for the aiact MCP server and offline checks.
// Purpose: Provide a safe, localized CLI for server and compliance workflows.
// Dependencies: aiact-config, aiact-core, aiact-mcp, aiact-plugins, clap, tokio
// ============================================================================

//! ## Overview
//! The aiact CLI starts the MCP server and runs the compliance checks
//! offline against JSON input. All user-facing strings are routed through
//! the i18n catalog to prepare for future localization. Inputs are untrusted
//! and size-limited before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use aiact_cli::i18n::Locale;
use aiact_cli::i18n::set_locale;
use aiact_cli::t;
use aiact_config::AiactConfig;
use aiact_config::ServerTransport;
use aiact_core::classify;
use aiact_core::classify::SystemProfile;
use aiact_core::prohibited::ProhibitedPracticeFlags;
use aiact_core::prohibited::check_prohibited_practices;
use aiact_core::roles::OrganizationProfile;
use aiact_core::roles::determine_roles;
use aiact_mcp::NoopMetrics;
use aiact_mcp::build_server_state;
use aiact_mcp::run_stdio;
use aiact_mcp::serve_http;
use aiact_plugins::PluginContext;
use aiact_plugins::PluginRegistry;
use aiact_plugins::load_builtin_plugins;
use aiact_scan::ScanClient;
use aiact_scan::ScanRequest;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a JSON input payload, in bytes.
const MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Input read budget; one byte over the limit to detect oversized input.
const MAX_INPUT_READ: u64 = 1024 * 1024 + 1;
/// Maximum size of an input file reported by metadata, in bytes.
const MAX_INPUT_FILE_BYTES: u64 = 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "AIACT_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "aiact", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `AIACT_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the aiact MCP server.
    Serve(ServeCommand),
    /// Classify an AI system risk level from a system profile.
    Classify(InputCommand),
    /// Determine EU AI Act roles from an organization profile.
    Roles(InputCommand),
    /// Check practice flags against the Article 5 prohibitions.
    Prohibited(InputCommand),
    /// Scan text for prompt injection via the scoring service.
    Scan(ScanCommand),
    /// List the plugins the server would load.
    Plugins(RegistryCommand),
    /// List the tools the server would expose.
    Tools(RegistryCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// CLI language selection argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
    /// English.
    En,
    /// French.
    Fr,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Fr => Self::Fr,
        }
    }
}

/// CLI transport selection argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransportArg {
    /// Content-Length framed stdio.
    Stdio,
    /// JSON-RPC over HTTP.
    Http,
}

impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
        }
    }
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Transport override.
    #[arg(long, value_enum, value_name = "TRANSPORT")]
    transport: Option<TransportArg>,
    /// HTTP bind address override.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Arguments for commands that read one JSON input.
#[derive(Args, Debug)]
struct InputCommand {
    /// Path to the JSON input; stdin when omitted.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
struct ScanCommand {
    /// Text to analyze.
    text: String,
    /// Flagging threshold override.
    #[arg(long, value_name = "SCORE")]
    threshold: Option<f64>,
    /// Correlation tag echoed back in the report.
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for commands that inspect the plugin registry.
#[derive(Args, Debug)]
struct RegistryCommand {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Supported config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
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
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Classify(command) => command_classify(&command),
        Commands::Roles(command) => command_roles(&command),
        Commands::Prohibited(command) => command_prohibited(&command),
        Commands::Scan(command) => command_scan(&command),
        Commands::Plugins(command) => command_plugins(&command),
        Commands::Tools(command) => command_tools(&command),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = AiactConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if let Some(transport) = command.transport {
        config.server.transport = transport.into();
    }
    if let Some(bind) = command.bind {
        config.server.bind = bind;
    }

    let scan = Arc::new(
        ScanClient::new(config.scan.clone())
            .map_err(|err| CliError::new(t!("scan.client_failed", error = err)))?,
    );
    let registry = Arc::new(load_registry(&scan, &config.plugins.disabled)?);
    let state = Arc::new(build_server_state(
        registry,
        scan,
        &config.server,
        Arc::new(NoopMetrics),
    ));

    match config.server.transport {
        ServerTransport::Stdio => {
            write_stderr_line(&t!("serve.stdio"))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            let worker_state = Arc::clone(&state);
            tokio::task::spawn_blocking(move || run_stdio(&worker_state))
                .await
                .map_err(|err| CliError::new(t!("serve.failed", error = err)))?
                .map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
        }
        ServerTransport::Http => {
            write_stderr_line(&t!("serve.listening", bind = config.server.bind))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            serve_http(state, &config.server.bind)
                .await
                .map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads the builtin plugins, reporting skips and failures on stderr.
fn load_registry(scan: &Arc<ScanClient>, disabled: &[String]) -> CliResult<PluginRegistry> {
    let context = PluginContext {
        scan: Arc::clone(scan),
    };
    let mut registry = PluginRegistry::new();
    let report = load_builtin_plugins(&mut registry, &context, disabled);
    for plugin in &report.skipped {
        write_stderr_line(&t!("serve.plugin.skipped", plugin = plugin))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    for failure in &report.failures {
        write_stderr_line(&t!(
            "serve.plugin.failed",
            plugin = failure.plugin,
            reason = failure.reason
        ))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    if report.loaded.is_empty() {
        return Err(CliError::new(t!("serve.no_plugins")));
    }
    Ok(registry)
}

// ============================================================================
// SECTION: Offline Check Commands
// ============================================================================

/// Executes the `classify` command.
fn command_classify(command: &InputCommand) -> CliResult<ExitCode> {
    let profile: SystemProfile =
        read_json_input(command.input.as_deref(), &t!("input.kind.system_profile"))?;
    write_pretty_json(&classify::classify(&profile))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `roles` command.
fn command_roles(command: &InputCommand) -> CliResult<ExitCode> {
    let profile: OrganizationProfile =
        read_json_input(command.input.as_deref(), &t!("input.kind.organization_profile"))?;
    write_pretty_json(&determine_roles(&profile))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `prohibited` command.
fn command_prohibited(command: &InputCommand) -> CliResult<ExitCode> {
    let flags: ProhibitedPracticeFlags =
        read_json_input(command.input.as_deref(), &t!("input.kind.practice_flags"))?;
    write_pretty_json(&check_prohibited_practices(&flags))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `scan` command.
fn command_scan(command: &ScanCommand) -> CliResult<ExitCode> {
    let config = AiactConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let client = ScanClient::new(config.scan)
        .map_err(|err| CliError::new(t!("scan.client_failed", error = err)))?;
    let request = ScanRequest {
        text: command.text.clone(),
        threshold: command.threshold,
        tag: command.tag.clone(),
    };
    write_pretty_json(&client.analyze(&request))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Registry Commands
// ============================================================================

/// Executes the `plugins` command.
fn command_plugins(command: &RegistryCommand) -> CliResult<ExitCode> {
    let registry = inspect_registry(command.config.as_deref())?;
    let plugins = registry.plugins();
    if plugins.is_empty() {
        write_stdout_line(&t!("plugins.list.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("plugins.list.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for plugin in plugins {
        write_stdout_line(&t!(
            "plugins.list.entry",
            name = plugin.name,
            description = plugin.description,
            tools = plugin.tools.len(),
            resources = plugin.resources.len()
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `tools` command.
fn command_tools(command: &RegistryCommand) -> CliResult<ExitCode> {
    let registry = inspect_registry(command.config.as_deref())?;
    write_stdout_line(&t!("tools.list.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for definition in registry.tool_definitions() {
        write_stdout_line(&t!(
            "tools.list.entry",
            name = definition.name,
            description = definition.description
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Builds the registry the server would load for the given configuration.
fn inspect_registry(config: Option<&Path>) -> CliResult<PluginRegistry> {
    let config = AiactConfig::load(config)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let scan = Arc::new(
        ScanClient::new(config.scan)
            .map_err(|err| CliError::new(t!("scan.client_failed", error = err)))?,
    );
    load_registry(&scan, &config.plugins.disabled)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = AiactConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads and parses one size-limited JSON input from a file or stdin.
fn read_json_input<T: DeserializeOwned>(path: Option<&Path>, kind: &str) -> CliResult<T> {
    let raw = read_limited_input(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| CliError::new(t!("input.parse_failed", kind = kind, error = err)))
}

/// Reads input text from a file or stdin, enforcing the size limit.
fn read_limited_input(path: Option<&Path>) -> CliResult<String> {
    if let Some(path) = path {
        let metadata = std::fs::metadata(path).map_err(|err| {
            CliError::new(t!("input.read_failed", path = path.display(), error = err))
        })?;
        if metadata.len() > MAX_INPUT_FILE_BYTES {
            return Err(CliError::new(t!(
                "input.too_large",
                size = metadata.len(),
                limit = MAX_INPUT_BYTES
            )));
        }
        return std::fs::read_to_string(path).map_err(|err| {
            CliError::new(t!("input.read_failed", path = path.display(), error = err))
        });
    }
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .take(MAX_INPUT_READ)
        .read_to_string(&mut input)
        .map_err(|err| CliError::new(t!("input.stdin_failed", error = err)))?;
    if input.len() > MAX_INPUT_BYTES {
        return Err(CliError::new(t!(
            "input.too_large",
            size = input.len(),
            limit = MAX_INPUT_BYTES
        )));
    }
    Ok(input)
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Writes a value to stdout as pretty-printed JSON.
fn write_pretty_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
