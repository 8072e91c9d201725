//! Tool registry port
//!
//! The gateway never holds on to a tool between calls: it asks the registry
//! for the best implementation on every invocation, so registrations and
//! ranking changes take effect immediately.
//!
//! # Contract
//!
//! - One descriptor per distinct tool id
//! - Only tools whose `supports(context)` is true
//! - Highest ranking wins when several tools share an id
//! - Catalog order: category, then display name, case-insensitive ascending
//! - Lookup failures degrade to "no tools", never to an error

use std::sync::Arc;

use insight_bridge_domain::{Tool, ToolContext, ToolDescriptor};

/// Port for discovering tools
pub trait ToolRegistry: Send + Sync {
    /// Descriptors of every supported tool, best implementation per id
    fn list_all_tools(&self, context: &ToolContext) -> Vec<ToolDescriptor>;

    /// Best supported implementation for `tool_id`, if any
    fn resolve_best_tool(&self, tool_id: &str, context: &ToolContext) -> Option<Arc<dyn Tool>>;
}
