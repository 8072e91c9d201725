//! JSON output: one pretty-printed document per command

use insight_bridge_domain::{ToolDescriptor, ToolPolicyDecision, ToolResult};
use serde_json::{Value, json};

use super::formatter::{CatalogEntry, OutputFormatter};

pub struct JsonFormatter;

impl JsonFormatter {
    fn descriptor_value(descriptor: &ToolDescriptor, policy: ToolPolicyDecision) -> Value {
        let mut value = serde_json::to_value(descriptor).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut value {
            map.insert("policy".to_string(), json!(policy));
        }
        value
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        let tools: Vec<Value> = entries
            .iter()
            .map(|(descriptor, policy)| Self::descriptor_value(descriptor, *policy))
            .collect();
        Self::pretty(&Value::Array(tools))
    }

    fn format_descriptor(
        &self,
        descriptor: &ToolDescriptor,
        policy: ToolPolicyDecision,
    ) -> String {
        Self::pretty(&Self::descriptor_value(descriptor, policy))
    }

    fn format_result(&self, result: &ToolResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_policies(&self, overrides: &[(String, ToolPolicyDecision)]) -> String {
        let map: serde_json::Map<String, Value> = overrides
            .iter()
            .map(|(id, policy)| (id.clone(), json!(policy)))
            .collect();
        Self::pretty(&Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_bridge_domain::{ToolCapability, ToolRiskLevel};

    #[test]
    fn test_catalog_carries_policy() {
        let descriptor = ToolDescriptor::new(
            "workspace.readFile",
            "Read workspace file",
            ToolCapability::Read,
            ToolRiskLevel::Safe,
        );
        let text = JsonFormatter.format_catalog(&[(descriptor, ToolPolicyDecision::Always)]);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["id"], "workspace.readFile");
        assert_eq!(value[0]["policy"], "ALWAYS");
        assert_eq!(value[0]["risk_level"], "SAFE");
    }

    #[test]
    fn test_result_round_trips() {
        let result = ToolResult::error("Failed to read: /a", Some("denied".to_string()));
        let value: Value = serde_json::from_str(&JsonFormatter.format_result(&result)).unwrap();
        assert_eq!(value["status"], "ERROR");
        assert_eq!(value["diagnostics"], "denied");
    }
}
