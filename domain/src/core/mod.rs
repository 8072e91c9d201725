//! Core domain concepts shared across subdomains.
//!
//! - [`error::DomainError`] for workspace path errors
//! - [`string`] helpers for display truncation

pub mod error;
pub mod string;
