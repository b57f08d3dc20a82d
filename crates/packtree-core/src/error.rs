//! Error types for manifest handling

use thiserror::Error;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Fatal manifest errors
///
/// Any of these aborts a validation run. Recoverable issues (stale versions,
/// missing dependencies, wrong ordering) are reported as findings instead.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Version string that does not parse as `MAJOR.MINOR.PATCH[.<suffix>]`
    #[error("Malformed version number {version:?} for package {package}")]
    MalformedVersion { package: String, version: String },

    /// Version string without a marker the check requires
    #[error("Version {version:?} for package {package} is missing the required {marker} marker")]
    MissingVersionMarker {
        package: String,
        version: String,
        marker: &'static str,
    },

    /// Dependency that is neither a project package nor a listed alias
    #[error("Package {package} depends on {dependency}, which is neither a project package nor a listed alias")]
    UnknownDependency {
        package: String,
        dependency: String,
    },

    /// Package name that does not exist in the manifest
    #[error("Package {package} not found in the manifest")]
    UnknownPackage { package: String },

    /// Two manifest entries sharing one package name
    #[error("Duplicate package {package} in the manifest")]
    DuplicatePackage { package: String },

    /// The manifest file could not be parsed at all
    #[error("Could not parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}
