//! Error types for kegg-enzyme

use thiserror::Error;

/// Result type alias for kegg-enzyme operations
pub type Result<T> = std::result::Result<T, KeggError>;

/// Error types that can occur while reading or writing enzyme records
#[derive(Debug, Error)]
pub enum KeggError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record text does not conform to the enzyme flat-file grammar
    #[error("Malformed record at line {line}: {msg}")]
    MalformedRecord {
        /// Line number within the record text (0 when not tied to a line)
        line: usize,
        /// Error message
        msg: String,
    },

    /// A grouped field (PATHWAY, GENES, DISEASE, MOTIF, STRUCTURES, DBLINKS)
    /// received its sub-events out of order or was left unfinished
    #[error("Incomplete {field} group: {msg}")]
    IncompleteGroup {
        /// Record field the group belongs to
        field: &'static str,
        /// Error message
        msg: String,
    },

    /// A structurally invalid record was handed to the writer
    #[error("Invalid record: {msg}")]
    InvalidRecord {
        /// Error message
        msg: String,
    },
}
