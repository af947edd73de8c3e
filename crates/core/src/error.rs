//! Error types for Verdant table writes.

use crate::write::WriteKind;
use core::fmt;

/// Result type alias for Verdant operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Reasons a table write can fail.
///
/// These are expected outcomes, not faults. Contract violations such as
/// updating a key that was never inserted panic instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An insertion found its primary key already present.
    DuplicateKey,
    /// A removal named a primary key that is not present.
    KeyNotFound,
    /// An attached index refused the write during the prepare phase.
    Rejected {
        /// Registration position of the refusing index.
        index: usize,
        /// The write that was refused.
        kind: WriteKind,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "Duplicate primary key"),
            Error::KeyNotFound => write!(f, "Primary key not found"),
            Error::Rejected { index, kind } => {
                write!(f, "Index {} rejected {}", index, kind)
            }
        }
    }
}

impl Error {
    /// Creates an index rejection error.
    pub fn rejected(index: usize, kind: WriteKind) -> Self {
        Error::Rejected { index, kind }
    }

    /// Returns true if an attached index refused the write.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        assert!(Error::DuplicateKey.to_string().contains("Duplicate"));
        assert!(Error::KeyNotFound.to_string().contains("not found"));

        let err = Error::rejected(2, WriteKind::Update);
        assert_eq!(err.to_string(), "Index 2 rejected update");
    }

    #[test]
    fn test_error_constructors() {
        match Error::rejected(1, WriteKind::Insertion) {
            Error::Rejected { index, kind } => {
                assert_eq!(index, 1);
                assert_eq!(kind, WriteKind::Insertion);
            }
            _ => panic!("Wrong error type"),
        }
        assert!(!Error::DuplicateKey.is_rejection());
    }
}
