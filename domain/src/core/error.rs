//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No workspace root is available")]
    NoWorkspace,

    #[error("Path is outside the workspace: {0}")]
    PathOutsideWorkspace(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::NoWorkspace.to_string(),
            "No workspace root is available"
        );
        assert_eq!(
            DomainError::PathOutsideWorkspace("../x".to_string()).to_string(),
            "Path is outside the workspace: ../x"
        );
    }
}
