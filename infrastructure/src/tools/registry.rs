//! Service Tool Registry
//!
//! The [`ServiceToolRegistry`] is an explicit service directory for [`Tool`]
//! implementations. Any component may register a tool at runtime with a
//! ranking; lookups re-read the directory every time, so registrations and
//! removals take effect on the next call without a restart.
//!
//! # Usage
//!
//! ```ignore
//! use insight_bridge_infrastructure::tools::{ServiceToolRegistry, BaselineToolActivator};
//!
//! let registry = ServiceToolRegistry::new()
//!     .with_activator(Arc::new(BaselineToolActivator::new()));
//!
//! // An enhanced implementation overrides the baseline one
//! let handle = registry.register(Arc::new(FastReadFile), 100);
//!
//! let tool = registry.resolve_best_tool("workspace.readFile", &ctx);
//!
//! // Back to the baseline implementation
//! registry.unregister(&handle);
//! ```
//!
//! # Ranking
//!
//! | Source | Ranking | Use Case |
//! |--------|---------|----------|
//! | Enhanced providers | > 0 | Replace a built-in tool |
//! | Baseline tools | 0 | Always available |
//!
//! Highest ranking wins per tool id. On equal ranking the tool registered
//! first wins, so repeated lookups agree with each other.
//!
//! # Lazy Activation
//!
//! Every lookup that finds the directory empty runs the [`ToolActivator`]
//! (if one is configured) and looks again. Activation is serialized: a
//! concurrent lookup waits for it and then sees the activated tools.
//! Activator failures and lock poisoning degrade to "no tools".

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use insight_bridge_application::ports::tool_registry::ToolRegistry;
use insight_bridge_domain::{Tool, ToolContext, ToolDescriptor};
use thiserror::Error;

/// Ranking of the baseline workspace and IDE tools
pub const BASELINE_RANKING: i32 = 0;

/// Error raised by a [`ToolActivator`]
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("Activation failed: {0}")]
    Failed(String),
}

/// Registers a known set of tools into a registry on demand
pub trait ToolActivator: Send + Sync {
    fn name(&self) -> &str;

    fn activate(&self, registry: &ServiceToolRegistry) -> Result<(), ActivationError>;
}

/// Handle returned by [`ServiceToolRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolRegistration {
    sequence: u64,
}

#[derive(Clone)]
struct Registration {
    sequence: u64,
    ranking: i32,
    tool: Arc<dyn Tool>,
}

impl Registration {
    /// Higher ranking first, then earlier registration
    fn outranks(&self, other: &Registration) -> bool {
        (self.ranking, std::cmp::Reverse(self.sequence))
            > (other.ranking, std::cmp::Reverse(other.sequence))
    }
}

/// Re-queried tool directory
pub struct ServiceToolRegistry {
    registrations: RwLock<Vec<Registration>>,
    next_sequence: AtomicU64,
    activator: RwLock<Option<Arc<dyn ToolActivator>>>,
    /// Held while an activator runs
    activation: Mutex<()>,
}

impl ServiceToolRegistry {
    /// Create a new, independent registry
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(Vec::new()),
            next_sequence: AtomicU64::new(1),
            activator: RwLock::new(None),
            activation: Mutex::new(()),
        }
    }

    pub fn with_activator(self, activator: Arc<dyn ToolActivator>) -> Self {
        self.set_activator(activator);
        self
    }

    /// Install the activator tried when the directory is found empty
    pub fn set_activator(&self, activator: Arc<dyn ToolActivator>) {
        match self.activator.write() {
            Ok(mut slot) => *slot = Some(activator),
            Err(_) => tracing::warn!("Tool activator lock poisoned, activator not installed"),
        }
    }

    pub fn register(&self, tool: Arc<dyn Tool>, ranking: i32) -> ToolRegistration {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(tool = tool.id(), ranking, sequence, "Registered tool");

        match self.registrations.write() {
            Ok(mut registrations) => registrations.push(Registration {
                sequence,
                ranking,
                tool,
            }),
            Err(_) => tracing::warn!(sequence, "Tool registry lock poisoned, registration dropped"),
        }
        ToolRegistration { sequence }
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn unregister(&self, registration: &ToolRegistration) -> bool {
        let Ok(mut registrations) = self.registrations.write() else {
            tracing::warn!("Tool registry lock poisoned, unregister skipped");
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.sequence != registration.sequence);
        let removed = registrations.len() != before;
        if removed {
            tracing::debug!(sequence = registration.sequence, "Unregistered tool");
        }
        removed
    }

    /// Number of registrations, whatever their ids
    pub fn len(&self) -> usize {
        self.registrations.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_snapshot(&self) -> Vec<Registration> {
        match self.registrations.read() {
            Ok(registrations) => registrations.clone(),
            Err(_) => {
                tracing::warn!("Tool registry lock poisoned, treating as empty");
                Vec::new()
            }
        }
    }

    fn snapshot(&self) -> Vec<Registration> {
        let snapshot = self.read_snapshot();
        if !snapshot.is_empty() {
            return snapshot;
        }

        let activator = match self.activator.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        let Some(activator) = activator else {
            return snapshot;
        };

        let Ok(_guard) = self.activation.lock() else {
            tracing::warn!("Tool activation lock poisoned, treating as empty");
            return snapshot;
        };
        // Another lookup may have activated while we waited
        let snapshot = self.read_snapshot();
        if !snapshot.is_empty() {
            return snapshot;
        }

        tracing::debug!(activator = activator.name(), "No tools registered, activating baseline");
        if let Err(e) = activator.activate(self) {
            tracing::warn!(
                activator = activator.name(),
                error = %e,
                "Failed to activate baseline tools"
            );
        }
        self.read_snapshot()
    }

    /// Best supporting registration per tool id
    fn best_per_id(&self, context: &ToolContext) -> HashMap<String, Registration> {
        let mut best: HashMap<String, Registration> = HashMap::new();
        for registration in self.snapshot() {
            if !registration.tool.supports(context) {
                continue;
            }
            let id = registration.tool.id().to_string();
            match best.get(&id) {
                Some(current) if !registration.outranks(current) => {
                    tracing::trace!(
                        tool = %id,
                        ranking = registration.ranking,
                        "Tool shadowed by higher ranked registration"
                    );
                }
                _ => {
                    best.insert(id, registration);
                }
            }
        }
        best
    }
}

impl Default for ServiceToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry for ServiceToolRegistry {
    fn list_all_tools(&self, context: &ToolContext) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> = self
            .best_per_id(context)
            .into_values()
            .map(|r| r.tool.describe())
            .collect();
        descriptors.sort_by_key(|d| d.sort_key());
        descriptors
    }

    fn resolve_best_tool(&self, tool_id: &str, context: &ToolContext) -> Option<Arc<dyn Tool>> {
        self.snapshot()
            .into_iter()
            .filter(|r| r.tool.id() == tool_id && r.tool.supports(context))
            .fold(None::<Registration>, |best, candidate| match best {
                Some(current) if !candidate.outranks(&current) => Some(current),
                _ => Some(candidate),
            })
            .map(|r| r.tool)
    }
}
