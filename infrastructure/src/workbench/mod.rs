//! Workbench adapters
//!
//! - [`HeadlessWorkbench`]: in-memory window state for running IDE tools
//!   outside an IDE

mod headless;

pub use headless::HeadlessWorkbench;
