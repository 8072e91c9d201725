//! Output formatter trait

use insight_bridge_domain::{OutputFormat, ToolDescriptor, ToolPolicyDecision, ToolResult};

use super::console::ConsoleFormatter;
use super::json::JsonFormatter;

/// A tool paired with its effective policy for AI callers
pub type CatalogEntry = (ToolDescriptor, ToolPolicyDecision);

/// Trait for formatting gateway output
pub trait OutputFormatter {
    /// Tool catalog, grouped by category
    fn format_catalog(&self, entries: &[CatalogEntry]) -> String;

    /// One tool in full: descriptor, schemas, example arguments
    fn format_descriptor(
        &self,
        descriptor: &ToolDescriptor,
        policy: ToolPolicyDecision,
    ) -> String;

    /// Outcome of a gateway call
    fn format_result(&self, result: &ToolResult) -> String;

    /// Stored policy overrides
    fn format_policies(&self, overrides: &[(String, ToolPolicyDecision)]) -> String;
}

/// Formatter for the chosen output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
