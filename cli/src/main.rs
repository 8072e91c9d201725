//! CLI entrypoint for insight-bridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use insight_bridge_application::{
    NoToolAuditLog, PreferenceStore, ToolAuditLog, ToolGateway, ToolRegistry,
};
use insight_bridge_domain::{
    OutputFormat, ToolContext, ToolOrigin, ToolPolicyDecision, ToolRequest,
};
use insight_bridge_infrastructure::{
    BaselineToolActivator, CompositeActivator, ConfigLoader, FileConfig, FilePreferenceStore,
    HeadlessWorkbench, IdeToolActivator, InMemoryPreferenceStore, JsonlToolAuditLog,
    ServiceToolRegistry, Severity, ToolPolicyStore,
};
use insight_bridge_presentation::{
    ChannelConfirmationHandler, Cli, Command, ManualRunAction, OutputFormatter, PolicyAction,
    TerminalConfirmationDialog, formatter_for,
};
use serde_json::{Map, Value};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Everything a command needs, built once from config and flags
struct App {
    context: ToolContext,
    registry: Arc<dyn ToolRegistry>,
    policies: Arc<ToolPolicyStore>,
    audit_log: Arc<dyn ToolAuditLog>,
    formatter: Box<dyn OutputFormatter>,
}

impl App {
    fn gateway(&self) -> ToolGateway {
        ToolGateway::new(self.registry.clone())
            .with_policy_evaluator(self.policies.clone())
            .with_audit_log(self.audit_log.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when -v is absent
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!(field = %issue.field, "{}", issue.message),
            Severity::Error => bail!("{}", issue.message),
        }
    }

    let app = build_app(&cli, &config)?;
    info!(
        workspace = ?app.context.workspace_root,
        project = ?app.context.active_project,
        "Starting insight-bridge"
    );

    match command {
        Command::Tools { all } => {
            let gateway = app.gateway();
            let entries: Vec<_> = gateway
                .list_tools_with_policy(&app.context)
                .into_iter()
                .filter(|(_, policy)| all || *policy != ToolPolicyDecision::Never)
                .collect();
            println!("{}", app.formatter.format_catalog(&entries));
            Ok(ExitCode::SUCCESS)
        }
        Command::Describe { tool_id } => {
            let Some(tool) = app.registry.resolve_best_tool(&tool_id, &app.context) else {
                bail!("Tool not found: {}", tool_id);
            };
            let descriptor = tool.describe();
            let policy = app.gateway().evaluate_policy(&descriptor, ToolOrigin::Ai);
            println!("{}", app.formatter.format_descriptor(&descriptor, policy));
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            tool_id,
            args,
            origin,
            call_id,
        } => run_tool(&app, tool_id, args, origin.into(), call_id).await,
        Command::Policy { action } => {
            match action {
                PolicyAction::Show => {}
                PolicyAction::Set { tool_id, policy } => {
                    warn_if_unknown(&app, &tool_id);
                    app.policies.set_policy(&tool_id, Some(policy.into()));
                }
                PolicyAction::Clear { tool_id } => {
                    app.policies.set_policy(&tool_id, None);
                }
            }
            println!("{}", app.formatter.format_policies(&app.policies.overrides()));
            Ok(ExitCode::SUCCESS)
        }
        Command::ManualRun { action } => {
            match action {
                ManualRunAction::Enable => app.policies.set_manual_execution_enabled(true),
                ManualRunAction::Disable => app.policies.set_manual_execution_enabled(false),
                ManualRunAction::Status => {}
            }
            let state = if app.policies.is_manual_execution_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            println!("Manual tool execution is {}", state);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_app(cli: &Cli, config: &FileConfig) -> Result<App> {
    // Output format: CLI flag > config file > default
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color {
        colored::control::set_override(false);
    }

    let root = match cli.workspace.clone().or_else(|| config.workspace.resolved_root()) {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    if !root.is_dir() {
        bail!("Workspace root is not a directory: {}", root.display());
    }
    let root = std::fs::canonicalize(&root)
        .with_context(|| format!("Failed to resolve workspace root {}", root.display()))?;

    let mut context = ToolContext::new().with_workspace_root(root);
    if let Some(project) = cli
        .project
        .clone()
        .or_else(|| config.workspace.active_project.clone())
        .filter(|p| !p.trim().is_empty())
    {
        context = context.with_active_project(project);
    }

    let preferences: Arc<dyn PreferenceStore> = if cli.no_config {
        Arc::new(InMemoryPreferenceStore::new())
    } else {
        let path = config
            .preferences
            .path
            .clone()
            .or_else(FilePreferenceStore::default_path)
            .context("No preference file location available")?;
        Arc::new(FilePreferenceStore::open(&path).with_context(|| {
            format!("Failed to open preference file {}", path.display())
        })?)
    };

    let mut activator = CompositeActivator::new();
    if config.tools.baseline {
        activator = activator.with(Arc::new(BaselineToolActivator::new()));
    }
    if config.tools.ide {
        activator = activator.with(Arc::new(IdeToolActivator::new(Arc::new(
            HeadlessWorkbench::new(),
        ))));
    }
    let registry = ServiceToolRegistry::new().with_activator(Arc::new(activator));

    let audit_log: Arc<dyn ToolAuditLog> = match config
        .tools
        .audit_log
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .and_then(JsonlToolAuditLog::new)
    {
        Some(log) => Arc::new(log),
        None => Arc::new(NoToolAuditLog),
    };

    Ok(App {
        context,
        registry: Arc::new(registry),
        policies: Arc::new(ToolPolicyStore::new(preferences)),
        audit_log,
        formatter: formatter_for(format),
    })
}

fn warn_if_unknown(app: &App, tool_id: &str) {
    if app
        .registry
        .resolve_best_tool(tool_id, &app.context)
        .is_none()
    {
        warn!(tool = tool_id, "Storing policy for a tool that is not registered");
    }
}

fn parse_arguments(args: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = args.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw).context("--args is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("--args must be a JSON object, got: {}", other),
    }
}

fn default_call_id(origin: ToolOrigin) -> String {
    let prefix = match origin {
        ToolOrigin::User => "manual",
        ToolOrigin::Ai => "cli",
    };
    format!("{}-{}", prefix, chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f"))
}

async fn run_tool(
    app: &App,
    tool_id: String,
    args: Option<String>,
    origin: ToolOrigin,
    call_id: Option<String>,
) -> Result<ExitCode> {
    if origin == ToolOrigin::User && !app.policies.is_manual_execution_enabled() {
        bail!(
            "Manual tool execution is disabled. Enable it with `insight-bridge manual-run enable`."
        );
    }

    let arguments = parse_arguments(args.as_deref())?;
    let call_id = call_id.unwrap_or_else(|| default_call_id(origin));
    let request = ToolRequest::with_arguments(tool_id, &arguments, origin, Some(call_id));

    // The gateway runs on a worker task; this task owns the terminal
    let (handler, questions) = ChannelConfirmationHandler::channel();
    let gateway = app.gateway().with_confirmation_handler(Arc::new(handler));
    let context = app.context.clone();

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling tool");
            interrupt.cancel();
        }
    });

    let worker = tokio::spawn(async move {
        gateway
            .execute_tool_with_cancel(&request, &context, cancel)
            .await
    });

    // Returns once the worker drops the gateway and with it the handler
    TerminalConfirmationDialog::new().serve(questions).await;
    let result = worker.await.context("Tool worker failed")?;

    println!("{}", app.formatter.format_result(&result));
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
