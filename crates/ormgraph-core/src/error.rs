//! Core error types.

use thiserror::Error;

/// Boxed source error produced by an external schema reader.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or updating the model graph.
#[derive(Debug, Error)]
pub enum Error {
    /// A foreign key references a table that is not part of the model.
    #[error("no referenced table '{referenced_table}' for foreign key '{foreign_key}' of '{table}'")]
    ReferencedEntityNotFound {
        /// Name of the foreign key.
        foreign_key: String,
        /// Table owning the foreign key.
        table: String,
        /// Table the foreign key points to.
        referenced_table: String,
    },

    /// An entity treated as a join table does not have exactly two foreign keys.
    #[error("entity '{table}' (join table) has {foreign_key_count} foreign key(s) (2 expected)")]
    InvalidJoinTableShape {
        /// Join table name.
        table: String,
        /// Number of foreign keys actually found.
        foreign_key_count: usize,
    },

    /// An entity named by a change record is not held by the model.
    #[error("entity not found: {table}")]
    EntityNotFound {
        /// Table name that was looked up.
        table: String,
    },

    /// A change record is internally inconsistent.
    #[error("invalid change on '{table}': {reason}")]
    InvalidChange {
        /// Table the change refers to.
        table: String,
        /// What is wrong with the record.
        reason: String,
    },

    /// The external schema reader failed.
    #[error("schema acquisition failed during {operation} of '{table}': {source}")]
    Acquisition {
        /// Table being read when the failure happened.
        table: String,
        /// Operation being performed.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Wrap an external schema-access failure with table and operation context.
    pub fn acquisition(
        table: impl Into<String>,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Acquisition {
            table: table.into(),
            operation,
            source: source.into(),
        }
    }

    /// Check if this error signals a broken model invariant rather than a
    /// failed lookup.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidJoinTableShape { .. } | Error::InvalidChange { .. }
        )
    }
}
