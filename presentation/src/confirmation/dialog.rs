//! Terminal confirmation dialog
//!
//! # User Interface
//!
//! ```text
//! ── Tool confirmation ─────────────────────────────────────
//! The AI wants to run the following tool:
//!
//!   Open file (ide.openFile)
//!   Opens a workspace file in the IDE
//!
//! Arguments:
//!   - file: /target-platform/pom.xml
//!   - line: 1
//!
//!   [1] Allow once   [2] Always allow   [3] Deny   [4] Never allow
//!
//! tool-confirm>
//! ```
//!
//! | Input | Aliases | Decision |
//! |-------|---------|----------|
//! | `1` | `allow`, `a`, `y` | allow once |
//! | `2` | `always` | allow, remember ALWAYS |
//! | `3` | `deny`, `d`, `n` | deny once |
//! | `4` | `never` | deny, remember NEVER |
//!
//! Empty or unknown input asks again. End of input denies once.

use colored::Colorize;
use insight_bridge_domain::core::string::one_line;
use insight_bridge_domain::{ToolDescriptor, ToolRequest, ToolUserDecision};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

use super::channel::ConfirmationRequest;

const ARGUMENT_PREVIEW_LEN: usize = 120;

/// One of the four dialog buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationChoice {
    AllowOnce,
    AllowAlways,
    DenyOnce,
    DenyNever,
}

impl ConfirmationChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "allow" | "a" | "y" | "yes" => Some(ConfirmationChoice::AllowOnce),
            "2" | "always" => Some(ConfirmationChoice::AllowAlways),
            "3" | "deny" | "d" | "n" | "no" => Some(ConfirmationChoice::DenyOnce),
            "4" | "never" => Some(ConfirmationChoice::DenyNever),
            _ => None,
        }
    }

    pub fn decision(self) -> ToolUserDecision {
        match self {
            ConfirmationChoice::AllowOnce => ToolUserDecision::allow_once(),
            ConfirmationChoice::AllowAlways => ToolUserDecision::allow_and_remember_always(),
            ConfirmationChoice::DenyOnce => ToolUserDecision::deny_once(),
            ConfirmationChoice::DenyNever => ToolUserDecision::deny_and_remember_never(),
        }
    }
}

/// Terminal dialog answering [`ConfirmationRequest`]s
pub struct TerminalConfirmationDialog;

impl TerminalConfirmationDialog {
    pub fn new() -> Self {
        Self
    }

    /// Dialog text: the tool, its description and the call arguments
    pub fn render_message(descriptor: &ToolDescriptor, request: &ToolRequest) -> String {
        let mut message = String::new();
        message.push_str(&format!(
            "{}\n",
            format!("── Tool confirmation {}", "─".repeat(37)).yellow().bold()
        ));
        message.push_str("The AI wants to run the following tool:\n\n");
        message.push_str(&format!(
            "  {} ({})\n",
            descriptor.display_name.bold(),
            descriptor.id.cyan()
        ));
        if !descriptor.description.is_empty() {
            message.push_str(&format!("  {}\n", descriptor.description.dimmed()));
        }

        message.push_str(&format!("\n{}\n", "Arguments:".cyan().bold()));
        if request.arguments().is_empty() {
            message.push_str("  (none)\n");
        }
        for (key, value) in request.arguments() {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            message.push_str(&format!(
                "  - {}: {}\n",
                key,
                one_line(&text, ARGUMENT_PREVIEW_LEN)
            ));
        }

        message.push_str(&format!(
            "\n  {} Allow once   {} Always allow   {} Deny   {} Never allow\n",
            "[1]".green(),
            "[2]".green().bold(),
            "[3]".red(),
            "[4]".red().bold()
        ));
        message
    }

    /// Show the dialog on `output` and read answers from `input`
    pub fn ask<R: BufRead, W: Write>(
        &self,
        descriptor: &ToolDescriptor,
        request: &ToolRequest,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<ToolUserDecision> {
        writeln!(output)?;
        write!(output, "{}", Self::render_message(descriptor, request))?;

        loop {
            write!(output, "\n{} ", "tool-confirm>".magenta().bold())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(ToolUserDecision::deny_once());
            }

            match ConfirmationChoice::parse(&line) {
                Some(choice) => {
                    let decision = choice.decision();
                    if decision.is_allowed() {
                        writeln!(output, "{}", "✓ Allowed".green())?;
                    } else {
                        writeln!(output, "{}", "✗ Denied".red())?;
                    }
                    return Ok(decision);
                }
                None if line.trim().is_empty() => continue,
                None => {
                    writeln!(
                        output,
                        "Unknown answer: {}. Choose 1, 2, 3 or 4.",
                        line.trim().red()
                    )?;
                }
            }
        }
    }

    /// Ask on the process terminal; any I/O failure denies once
    pub fn ask_terminal(
        &self,
        descriptor: &ToolDescriptor,
        request: &ToolRequest,
    ) -> ToolUserDecision {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stderr();
        self.ask(descriptor, request, &mut input, &mut output)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Confirmation dialog failed, denying");
                ToolUserDecision::deny_once()
            })
    }

    /// Answer requests until every sender is gone
    pub async fn serve(self, mut requests: mpsc::UnboundedReceiver<ConfirmationRequest>) {
        while let Some(question) = requests.recv().await {
            let ConfirmationRequest {
                descriptor,
                request,
                reply,
            } = question;

            let dialog = TerminalConfirmationDialog::new();
            let decision = tokio::task::spawn_blocking(move || {
                dialog.ask_terminal(&descriptor, &request)
            })
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Confirmation task failed, denying");
                ToolUserDecision::deny_once()
            });

            if reply.send(decision).is_err() {
                tracing::debug!("Confirmation answer arrived after the caller gave up");
            }
        }
    }
}

impl Default for TerminalConfirmationDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_bridge_domain::{ToolCapability, ToolRiskLevel};
    use std::io::Cursor;

    fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "ide.openFile",
            "Open file",
            ToolCapability::Read,
            ToolRiskLevel::Caution,
        )
        .with_description("Opens a workspace file in the IDE")
    }

    fn ask(answers: &str) -> (ToolUserDecision, String) {
        colored::control::set_override(false);
        let request = ToolRequest::new("ide.openFile")
            .with_arg("file", "/target-platform/pom.xml")
            .with_arg("line", 1);
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let decision = TerminalConfirmationDialog::new()
            .ask(&descriptor(), &request, &mut input, &mut output)
            .unwrap();
        (decision, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_message_lists_tool_and_arguments() {
        let (_, output) = ask("1\n");
        assert!(output.contains("The AI wants to run the following tool:"));
        assert!(output.contains("Open file (ide.openFile)"));
        assert!(output.contains("Opens a workspace file in the IDE"));
        assert!(output.contains("- file: /target-platform/pom.xml"));
        assert!(output.contains("- line: 1"));
    }

    #[test]
    fn test_each_choice() {
        assert_eq!(ask("1\n").0, ToolUserDecision::allow_once());
        assert_eq!(ask("always\n").0, ToolUserDecision::allow_and_remember_always());
        assert_eq!(ask("3\n").0, ToolUserDecision::deny_once());
        assert_eq!(ask("never\n").0, ToolUserDecision::deny_and_remember_never());
    }

    #[test]
    fn test_unknown_answer_asks_again() {
        let (decision, output) = ask("maybe\n\n2\n");
        assert_eq!(decision, ToolUserDecision::allow_and_remember_always());
        assert!(output.contains("Unknown answer: maybe"));
    }

    #[test]
    fn test_end_of_input_denies() {
        assert_eq!(ask("").0, ToolUserDecision::deny_once());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(ConfirmationChoice::parse(" Y "), Some(ConfirmationChoice::AllowOnce));
        assert_eq!(ConfirmationChoice::parse("4"), Some(ConfirmationChoice::DenyNever));
        assert_eq!(ConfirmationChoice::parse("later"), None);
    }
}
