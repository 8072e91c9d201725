//! Tool domain entities
//!
//! Descriptors and requests: the metadata a tool publishes about itself and
//! the immutable invocation a caller hands to the gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What kind of effect a tool has on the IDE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolCapability {
    /// Reads workspace or editor state
    Read,
    /// Modifies files or editor contents
    Write,
    /// Runs processes or builds
    Execute,
    /// Moves the user around the IDE (opening editors, revealing views)
    Navigate,
}

impl ToolCapability {
    pub fn as_str(&self) -> &str {
        match self {
            ToolCapability::Read => "READ",
            ToolCapability::Write => "WRITE",
            ToolCapability::Execute => "EXECUTE",
            ToolCapability::Navigate => "NAVIGATE",
        }
    }
}

impl std::fmt::Display for ToolCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk level declared by a tool
///
/// Only [`ToolRiskLevel::Safe`] tools run for an AI caller without a
/// confirmation, unless a stored override says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolRiskLevel {
    Safe,
    Caution,
    Dangerous,
}

impl ToolRiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ToolRiskLevel::Safe => "SAFE",
            ToolRiskLevel::Caution => "CAUTION",
            ToolRiskLevel::Dangerous => "DANGEROUS",
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, ToolRiskLevel::Safe)
    }
}

impl std::fmt::Display for ToolRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loose description of a tool's input or output shape
///
/// A hint line plus an ordered list of field name to field description.
/// It is meant for humans and for an AI planner, not for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub hint: String,
    pub fields: Vec<(String, String)>,
}

impl ToolSchema {
    /// Schema with no hint and no fields
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(hint: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.fields.push((name.into(), description.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hint.is_empty() && self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.as_str())
    }
}

/// Immutable metadata a tool publishes through `Tool::describe`
///
/// Used for display (menus, catalogs) and for policy defaulting via
/// [`ToolDescriptor::risk_level`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    pub capability: ToolCapability,
    pub risk_level: ToolRiskLevel,
    #[serde(default)]
    pub input_schema: ToolSchema,
    #[serde(default)]
    pub output_schema: ToolSchema,
    /// Example arguments as JSON text, shown to planners and in `describe`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_arguments: Option<String>,
}

impl ToolDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        capability: ToolCapability,
        risk_level: ToolRiskLevel,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            category: String::new(),
            capability,
            risk_level,
            input_schema: ToolSchema::none(),
            output_schema: ToolSchema::none(),
            example_arguments: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_input_schema(mut self, schema: ToolSchema) -> Self {
        self.input_schema = schema;
        self
    }

    pub fn with_output_schema(mut self, schema: ToolSchema) -> Self {
        self.output_schema = schema;
        self
    }

    pub fn with_example_arguments(mut self, json: impl Into<String>) -> Self {
        self.example_arguments = Some(json.into());
        self
    }

    /// Sort key used by catalogs: category, then display name, case-insensitive.
    /// The id breaks ties so equal names still list in a fixed order.
    pub fn sort_key(&self) -> (String, String, String) {
        (
            self.category.to_lowercase(),
            self.display_name.to_lowercase(),
            self.id.clone(),
        )
    }
}

/// Who asked for a tool to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolOrigin {
    /// A human, through a menu or the CLI. Pre-trusted.
    User,
    /// An AI agent. Subject to policy and confirmation.
    #[default]
    Ai,
}

impl ToolOrigin {
    pub fn as_str(&self) -> &str {
        match self {
            ToolOrigin::User => "USER",
            ToolOrigin::Ai => "AI",
        }
    }
}

impl std::fmt::Display for ToolOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(ToolOrigin::User),
            "ai" => Ok(ToolOrigin::Ai),
            other => Err(format!("Unknown tool origin: {}", other)),
        }
    }
}

/// An invocation of a tool
///
/// Arguments keep their insertion order and cannot be changed once the
/// request exists; the builder methods consume `self` and are meant to be
/// used only while constructing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    tool_id: String,
    arguments: Map<String, Value>,
    #[serde(default)]
    origin: ToolOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    call_id: Option<String>,
}

impl ToolRequest {
    pub fn new(tool_id: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            arguments: Map::new(),
            origin: ToolOrigin::default(),
            call_id: None,
        }
    }

    /// Build a request from an existing argument map (copied)
    pub fn with_arguments(
        tool_id: impl Into<String>,
        arguments: &Map<String, Value>,
        origin: ToolOrigin,
        call_id: Option<String>,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            arguments: arguments.clone(),
            origin,
            call_id,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_origin(mut self, origin: ToolOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    pub fn origin(&self) -> ToolOrigin {
        self.origin
    }

    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }

    /// Get an argument as a string. Numbers and booleans are stringified;
    /// null, arrays and objects yield `None`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.arguments.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Get a non-blank string argument
    pub fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get_string(key).filter(|s| !s.trim().is_empty())
    }

    /// Get an integer argument, accepting numbers and numeric strings
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.arguments.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_i64_or(&self, key: &str, default: i64) -> i64 {
        self.get_i64(key).unwrap_or(default)
    }

    /// Get a boolean argument, accepting `true`/`false` strings
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.arguments.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Get a list of strings. A single string is treated as a one-element list.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.arguments.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}
