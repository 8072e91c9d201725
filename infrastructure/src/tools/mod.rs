//! Tool implementations and the tool registry
//!
//! ```text
//! ServiceToolRegistry
//!   ├── BaselineToolActivator ── workspace.readFile
//!   │                           workspace.findFiles
//!   │                           workspace.searchText
//!   └── IdeToolActivator ─────── ide.openFile
//!                               ide.selection.get
//! ```
//!
//! Activators run whenever a lookup finds the registry empty. Tools
//! registered later with a higher ranking replace the baseline ones.

pub mod ide;
pub mod workspace;

mod registry;

pub use ide::IdeToolActivator;
pub use registry::{
    ActivationError, BASELINE_RANKING, ServiceToolRegistry, ToolActivator, ToolRegistration,
};
pub use workspace::BaselineToolActivator;

use std::sync::Arc;

/// Runs several activators in order; a failing one does not stop the rest
pub struct CompositeActivator {
    activators: Vec<Arc<dyn ToolActivator>>,
}

impl CompositeActivator {
    pub fn new() -> Self {
        Self {
            activators: Vec::new(),
        }
    }

    pub fn with(mut self, activator: Arc<dyn ToolActivator>) -> Self {
        self.activators.push(activator);
        self
    }
}

impl Default for CompositeActivator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolActivator for CompositeActivator {
    fn name(&self) -> &str {
        "composite"
    }

    fn activate(&self, registry: &ServiceToolRegistry) -> Result<(), ActivationError> {
        let mut failures = Vec::new();
        for activator in &self.activators {
            if let Err(e) = activator.activate(registry) {
                tracing::warn!(activator = activator.name(), error = %e, "Tool activator failed");
                failures.push(format!("{}: {}", activator.name(), e));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ActivationError::Failed(failures.join("; ")))
        }
    }
}
