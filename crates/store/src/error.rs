//! Error types for the tlaloc-store crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the tlaloc-store crate.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem error while reading or writing a table file.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A table file exists but its contents are malformed.
    #[error("malformed table file {path}: {reason}")]
    Malformed {
        /// The file involved.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// CSV encoding or decoding failure.
    #[error("CSV error on {path}: {source}")]
    Csv {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed() {
        let e = StoreError::Malformed {
            path: PathBuf::from("ct.csv"),
            reason: "negative count".to_string(),
        };
        assert_eq!(e.to_string(), "malformed table file ct.csv: negative count");
    }

    #[test]
    fn display_io() {
        let e = StoreError::Io {
            path: PathBuf::from("ct.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().starts_with("I/O error on ct.csv"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<StoreError>();
    }
}
