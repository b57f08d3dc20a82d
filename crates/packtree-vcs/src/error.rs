//! Error types for VCS operations

use thiserror::Error;

/// Result type for VCS operations
pub type Result<T> = std::result::Result<T, VcsError>;

/// Errors that can occur while reading snapshots out of the repository
#[derive(Debug, Error)]
pub enum VcsError {
    /// Git repository error
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Repository not found
    #[error("Repository not found at path: {path}")]
    RepositoryNotFound { path: String },

    /// A revision that does not resolve to a commit
    #[error("Unknown revision: {reference}")]
    UnknownRevision { reference: String },

    /// The manifest file is absent from the revision's tree
    #[error("No {file} found at revision {reference}")]
    ManifestNotFound { reference: String, file: String },

    /// The manifest file at the revision could not be parsed
    #[error("Could not parse manifest at revision {reference}: {source}")]
    ManifestParse {
        reference: String,
        #[source]
        source: packtree_core::ManifestError,
    },
}
