//! Packtree validation pipeline
//!
//! Four checks run against a shared manifest snapshot for every changed
//! package, in a fixed order:
//! 1. version-update: the package's own version advanced past the baseline
//! 2. missing-dependency: one-hop transitive closure of the dependency list
//! 3. order: canonical dependency order and package self-position
//! 4. dependency-version: declared versions match the authoritative ones
//!
//! Each check returns findings and may correct the package's dependency
//! list in place; the caller receives both. Fatal manifest errors abort the
//! whole run, while findings accumulate and the run continues.

pub mod dep_version;
pub mod missing_deps;
pub mod order;
pub mod report;
pub mod runner;
pub mod types;
pub mod version_update;

pub use dep_version::check_dep_version;
pub use missing_deps::check_missing_deps;
pub use order::{apply_order, check_order, ideal_order};
pub use report::{PackageReport, RunReport};
pub use runner::{validate_package, validate_packages, CheckSet};
pub use types::{CheckProcess, Finding, ManifestPair};
pub use version_update::check_version_update;
