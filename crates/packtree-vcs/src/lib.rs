//! Packtree VCS integration
//!
//! This crate is the version-control collaborator of the validation core.
//! Its whole contract is "produce two manifest snapshots and a set of
//! changed file paths":
//! - the baseline manifest parsed out of a target revision's tree
//! - the file paths changed between the merge base of target/source and the
//!   source revision, with rename detection
//! - the set of packages a change set puts in scope for validation

pub mod changes;
pub mod error;
pub mod repo;

pub use changes::{changed_packages, ChangedFile, VALIDATE_STAGE};
pub use error::{Result, VcsError};
pub use repo::ProjectRepo;
