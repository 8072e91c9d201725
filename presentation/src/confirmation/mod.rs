//! Confirmation handshake between the gateway and the terminal
//!
//! The gateway runs on a worker task; the terminal belongs to the main task.
//! [`ChannelConfirmationHandler`] carries each question across, and
//! [`TerminalConfirmationDialog`] answers it on the main task.
//!
//! ```text
//! worker task                               main task
//! ToolGateway ── ChannelConfirmationHandler ──mpsc──▶ TerminalConfirmationDialog
//!     ▲                                                    │ prompt + read
//!     └─────────────────── oneshot ◀──────────────────────┘ ToolUserDecision
//! ```

mod channel;
mod dialog;

pub use channel::{ChannelConfirmationHandler, ConfirmationRequest};
pub use dialog::{ConfirmationChoice, TerminalConfirmationDialog};
