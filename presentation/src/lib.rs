//! Presentation layer for insight-bridge
//!
//! This crate contains CLI definitions, the terminal confirmation dialog
//! and output formatters.

pub mod cli;
pub mod confirmation;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ManualRunAction, OriginArg, OutputArg, PolicyAction, PolicyArg,
};
pub use confirmation::{
    ChannelConfirmationHandler, ConfirmationChoice, ConfirmationRequest,
    TerminalConfirmationDialog,
};
pub use output::{ConsoleFormatter, JsonFormatter, OutputFormatter, formatter_for};
