//! Output format value object

use serde::{Deserialize, Serialize};

/// How results and catalogs are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, colored when the terminal allows it
    #[default]
    Text,
    /// One JSON document per command
    Json,
}
