//! Packtree core data model
//!
//! This crate provides the in-memory representation of a multi-package
//! project manifest and the version comparison rules shared by all
//! validators, including:
//! - The ordered package directory list and dependency references
//! - The package alias table with managed-package classification
//! - Suffix-aware, numeric version comparison (`NEXT`/`LATEST` markers)
//! - The fatal error tier of manifest validation

pub mod error;
pub mod manifest;
pub mod version;

pub use error::{ManifestError, Result};
pub use manifest::{
    AliasTable, DependencyRef, Manifest, PackageDescriptor, MANAGED_ID_PREFIX, MANIFEST_FILE,
};
pub use version::{Version, VersionSuffix};
