//! Console output formatter for tool catalogs and results

use crate::output::formatter::{CatalogEntry, OutputFormatter};
use colored::{ColoredString, Colorize};
use insight_bridge_domain::core::string::truncate;
use insight_bridge_domain::{
    ToolDescriptor, ToolPolicyDecision, ToolResult, ToolRiskLevel, ToolSchema, ToolStatus,
};

const PAYLOAD_PREVIEW_LEN: usize = 4000;

/// Formats gateway output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn policy_label(policy: ToolPolicyDecision) -> ColoredString {
        match policy {
            ToolPolicyDecision::Always => policy.as_str().green(),
            ToolPolicyDecision::Ask => policy.as_str().yellow(),
            ToolPolicyDecision::Never => policy.as_str().red(),
        }
    }

    fn risk_label(risk: ToolRiskLevel) -> ColoredString {
        match risk {
            ToolRiskLevel::Safe => risk.as_str().green(),
            ToolRiskLevel::Caution => risk.as_str().yellow(),
            ToolRiskLevel::Dangerous => risk.as_str().red().bold(),
        }
    }

    fn schema(title: &str, schema: &ToolSchema) -> String {
        let mut output = format!("\n{}", format!("{}:", title).cyan().bold());
        if !schema.hint.is_empty() {
            output.push_str(&format!(" {}", schema.hint.dimmed()));
        }
        output.push('\n');
        if schema.fields.is_empty() {
            output.push_str("  (none)\n");
        }
        for (name, description) in &schema.fields {
            output.push_str(&format!("  {:<16} {}\n", name.yellow(), description));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "No tools available".yellow());
        }

        let mut output = Self::header("Tools");
        output.push('\n');

        let mut current_category: Option<&str> = None;
        for (descriptor, policy) in entries {
            let category = if descriptor.category.is_empty() {
                "Other"
            } else {
                descriptor.category.as_str()
            };
            if current_category != Some(category) {
                output.push_str(&Self::section_header(category));
                current_category = Some(category);
            }
            output.push_str(&format!(
                "  {:<24} {:<28} {:<9} {}\n",
                descriptor.id.bold(),
                descriptor.display_name,
                Self::risk_label(descriptor.risk_level),
                Self::policy_label(*policy)
            ));
        }
        output
    }

    fn format_descriptor(
        &self,
        descriptor: &ToolDescriptor,
        policy: ToolPolicyDecision,
    ) -> String {
        let mut output = Self::header(&descriptor.display_name);
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Id:".cyan().bold(), descriptor.id));
        if !descriptor.description.is_empty() {
            output.push_str(&format!("{}\n", descriptor.description));
        }
        output.push_str(&format!(
            "{} {}   {} {}   {} {}   {} {}\n",
            "Category:".cyan().bold(),
            descriptor.category,
            "Capability:".cyan().bold(),
            descriptor.capability,
            "Risk:".cyan().bold(),
            Self::risk_label(descriptor.risk_level),
            "AI policy:".cyan().bold(),
            Self::policy_label(policy)
        ));
        output.push_str(&Self::schema("Input", &descriptor.input_schema));
        output.push_str(&Self::schema("Output", &descriptor.output_schema));
        if let Some(example) = &descriptor.example_arguments {
            output.push_str(&format!("\n{}\n  {}\n", "Example:".cyan().bold(), example));
        }
        output
    }

    fn format_result(&self, result: &ToolResult) -> String {
        let status = match result.status {
            ToolStatus::Ok => "✓ OK".green().bold(),
            ToolStatus::Denied => "✗ DENIED".yellow().bold(),
            ToolStatus::Error => "✗ ERROR".red().bold(),
        };
        let mut output = format!("{} {}\n", status, result.summary);

        if let Some(diagnostics) = &result.diagnostics {
            output.push_str(&format!("  {}\n", diagnostics.dimmed()));
        }
        if !result.payload.is_empty() {
            let payload = serde_json::to_string_pretty(&result.payload)
                .unwrap_or_else(|_| "{}".to_string());
            output.push_str(&truncate(&payload, PAYLOAD_PREVIEW_LEN));
            output.push('\n');
        }
        output
    }

    fn format_policies(&self, overrides: &[(String, ToolPolicyDecision)]) -> String {
        if overrides.is_empty() {
            return format!("{}\n", "No stored policies; risk defaults apply".dimmed());
        }
        let mut output = Self::section_header("Stored policies");
        for (id, policy) in overrides {
            output.push_str(&format!("  {:<28} {}\n", id, Self::policy_label(*policy)));
        }
        output
    }
}
