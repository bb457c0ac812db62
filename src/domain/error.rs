//! Typed errors for the contract cases callers are expected to branch on.
//!
//! Everything else in the domain layer reports failures as
//! `anyhow::Error` with context, the same way validation errors do; these
//! variants exist because the public contract distinguishes them: a stale
//! reference (NotFound) must be signaled, a destructive action without
//! confirmation must be refused, and an empty report must not produce a
//! header-only file.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// An update referenced an id that is no longer in its collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A destructive action was requested without explicit confirmation.
    #[error("destructive action requires explicit confirmation")]
    ConfirmationRequired,

    /// A report was requested over an empty record set.
    #[error("nothing to export")]
    NothingToExport,
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            kind,
            id: id.into(),
        }
    }
}
