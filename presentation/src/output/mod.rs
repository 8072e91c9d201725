//! Output formatting for catalogs, descriptors and results

pub mod console;
pub mod formatter;
pub mod json;

pub use console::ConsoleFormatter;
pub use formatter::{CatalogEntry, OutputFormatter, formatter_for};
pub use json::JsonFormatter;
