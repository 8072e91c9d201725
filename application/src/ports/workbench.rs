//! Workbench port
//!
//! The slice of an IDE window the IDE tools need: open an editor at a
//! location, and read what the user currently has selected.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where to open an editor. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorLocation {
    /// Portable workspace path
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl EditorLocation {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: Option<u32>, column: Option<u32>) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

/// A text range selected in an editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub file: Option<String>,
    pub offset: usize,
    pub length: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

/// Current selection in the workbench
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkbenchSelection {
    #[default]
    None,
    /// Items picked in a tree view, as portable paths or labels
    Structured(Vec<String>),
    Text(TextSelection),
}

#[derive(Debug, Clone, Error)]
pub enum WorkbenchError {
    #[error("No active workbench window")]
    NoActiveWindow,
    #[error("{0}")]
    Failed(String),
}

/// Port for IDE window interaction
#[async_trait]
pub trait Workbench: Send + Sync {
    /// Whether a window is attached (IDE tools are unsupported otherwise)
    fn is_attached(&self) -> bool;

    async fn open_editor(&self, location: &EditorLocation) -> Result<(), WorkbenchError>;

    async fn selection(&self) -> Result<WorkbenchSelection, WorkbenchError>;
}
