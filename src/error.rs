//! Error types for fallible engine and pipeline operations.

use thiserror::Error;

/// Result type alias using [`TuiError`].
pub type Result<T> = std::result::Result<T, TuiError>;

/// Errors surfaced by mounting, rendering, and component-tree mutation.
#[derive(Debug, Error)]
pub enum TuiError {
    /// A terminal write, flush, or raw-mode transition failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A reparent was rejected because the parent (or child) index is not
    /// currently allocated.
    #[error("invalid hierarchy: child {child} cannot be attached to parent {parent}")]
    InvalidHierarchy { child: usize, parent: usize },

    /// `mount()` was called while a previous `MountHandle` was still active.
    #[error("application is already mounted")]
    AlreadyMounted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hierarchy_message_names_both_indices() {
        let err = TuiError::InvalidHierarchy { child: 3, parent: 7 };
        assert_eq!(
            err.to_string(),
            "invalid hierarchy: child 3 cannot be attached to parent 7"
        );
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "broken pipe");
        let err: TuiError = io_err.into();
        assert!(matches!(err, TuiError::Io(_)));
    }

    #[test]
    fn already_mounted_message() {
        assert_eq!(
            TuiError::AlreadyMounted.to_string(),
            "application is already mounted"
        );
    }
}
