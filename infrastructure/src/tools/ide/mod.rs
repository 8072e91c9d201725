//! IDE tools
//!
//! Tools that drive the workbench window through the [`Workbench`] port.
//! They are category "IDE", risk CAUTION, and only supported while a
//! window is attached.

mod open_file;
mod selection;

pub use open_file::{OPEN_FILE, OpenFileTool};
pub use selection::{GET_SELECTION, GetSelectionTool};

use std::sync::Arc;

use insight_bridge_application::Workbench;

use super::registry::{ActivationError, BASELINE_RANKING, ServiceToolRegistry, ToolActivator};

pub const IDE_CATEGORY: &str = "IDE";

/// Registers the IDE tools against one workbench
pub struct IdeToolActivator {
    workbench: Arc<dyn Workbench>,
}

impl IdeToolActivator {
    pub fn new(workbench: Arc<dyn Workbench>) -> Self {
        Self { workbench }
    }
}

impl ToolActivator for IdeToolActivator {
    fn name(&self) -> &str {
        "ide"
    }

    fn activate(&self, registry: &ServiceToolRegistry) -> Result<(), ActivationError> {
        registry.register(
            Arc::new(OpenFileTool::new(self.workbench.clone())),
            BASELINE_RANKING,
        );
        registry.register(
            Arc::new(GetSelectionTool::new(self.workbench.clone())),
            BASELINE_RANKING,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbench::HeadlessWorkbench;
    use insight_bridge_application::ToolRegistry;
    use insight_bridge_domain::ToolContext;

    #[test]
    fn test_ide_tools_follow_attachment() {
        let ctx = ToolContext::new();

        let attached = ServiceToolRegistry::new().with_activator(Arc::new(IdeToolActivator::new(
            Arc::new(HeadlessWorkbench::new()),
        )));
        let ids: Vec<String> = attached
            .list_all_tools(&ctx)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![GET_SELECTION, OPEN_FILE]);

        let detached = ServiceToolRegistry::new().with_activator(Arc::new(IdeToolActivator::new(
            Arc::new(HeadlessWorkbench::detached()),
        )));
        assert!(detached.list_all_tools(&ctx).is_empty());
    }
}
