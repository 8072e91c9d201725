//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use insight_bridge_domain::{OutputFormat, ToolOrigin, ToolPolicyDecision};
use std::path::PathBuf;

/// Output format on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Human-readable output
    Text,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Who is calling the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OriginArg {
    /// Agent-initiated, subject to policy and confirmation
    Ai,
    /// Manual run, pre-trusted
    User,
}

impl From<OriginArg> for ToolOrigin {
    fn from(arg: OriginArg) -> Self {
        match arg {
            OriginArg::Ai => ToolOrigin::Ai,
            OriginArg::User => ToolOrigin::User,
        }
    }
}

/// Policy value on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Always,
    Ask,
    Never,
}

impl From<PolicyArg> for ToolPolicyDecision {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Always => ToolPolicyDecision::Always,
            PolicyArg::Ask => ToolPolicyDecision::Ask,
            PolicyArg::Never => ToolPolicyDecision::Never,
        }
    }
}

/// CLI arguments for insight-bridge
#[derive(Parser, Debug)]
#[command(name = "insight-bridge")]
#[command(author, version, about = "Policy-gated tool gateway for AI-driven IDE actions")]
#[command(long_about = r#"
insight-bridge exposes workspace and IDE tools to AI agents behind a
per-tool trust policy (ALWAYS / ASK / NEVER).

AI calls to tools that are not SAFE ask for confirmation on the terminal.
Answers can be remembered, which stores a policy override.

Configuration files are loaded from (in priority order):
1. INSIGHT_BRIDGE_* environment variables
2. --config <path>          Explicit config file
3. ./insight-bridge.toml    Project-level config
4. ~/.config/insight-bridge/config.toml   Global config

Example:
  insight-bridge tools
  insight-bridge run workspace.searchText --args '{"query": "CALL MYPROG"}'
  insight-bridge policy set ide.openFile always
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Workspace root directory
    #[arg(short, long, value_name = "DIR", global = true)]
    pub workspace: Option<PathBuf>,

    /// Active project name
    #[arg(long, value_name = "NAME", global = true)]
    pub project: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List tools advertised to AI callers, with their policy
    Tools {
        /// Include tools whose policy is NEVER
        #[arg(long)]
        all: bool,
    },

    /// Show a tool's descriptor, schemas and example arguments
    Describe {
        /// Tool id, e.g. workspace.readFile
        tool_id: String,
    },

    /// Run a tool through the gateway
    Run {
        /// Tool id, e.g. workspace.readFile
        tool_id: String,

        /// Arguments as a JSON object
        #[arg(short, long, value_name = "JSON")]
        args: Option<String>,

        /// Caller origin
        #[arg(long, value_enum, default_value = "ai")]
        origin: OriginArg,

        /// Correlation id recorded in the audit log
        #[arg(long, value_name = "ID")]
        call_id: Option<String>,
    },

    /// Show or change stored tool policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },

    /// Enable or disable manual (user-origin) tool runs
    ManualRun {
        #[command(subcommand)]
        action: ManualRunAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PolicyAction {
    /// List stored policy overrides
    Show,
    /// Store a policy override for a tool
    Set {
        tool_id: String,
        #[arg(value_enum)]
        policy: PolicyArg,
    },
    /// Remove a tool's policy override
    Clear { tool_id: String },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualRunAction {
    Enable,
    Disable,
    Status,
}
