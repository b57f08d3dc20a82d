//! Changed-package detection
//!
//! Maps a file-level change set onto the packages of the current manifest.

use std::path::{Path, PathBuf};

use packtree_core::Manifest;
use tracing::{debug, trace};

/// Stage name consumed by change detection; exempt packages skip validation
pub const VALIDATE_STAGE: &str = "validate";

/// A file path touched between the baseline and the source revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Previous path when the change is a rename
    pub renamed_from: Option<PathBuf>,
}

impl ChangedFile {
    /// A plain change at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            renamed_from: None,
        }
    }

    /// A rename from `from` to `path`
    pub fn renamed(path: impl Into<PathBuf>, from: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            renamed_from: Some(from.into()),
        }
    }

    /// Whether the change touches the given package root
    fn touches(&self, root: &Path) -> bool {
        self.path.starts_with(root)
            || self
                .renamed_from
                .as_deref()
                .is_some_and(|p| p.starts_with(root))
    }

    /// Whether a rename event references the package by name
    fn rename_mentions(&self, name: &str) -> bool {
        self.renamed_from.as_deref().is_some_and(|from| {
            path_contains(&self.path, name) || path_contains(from, name)
        })
    }
}

fn path_contains(path: &Path, name: &str) -> bool {
    path.to_string_lossy().contains(name)
}

/// Names of packages considered in scope for a validation run
///
/// A package is changed iff a changed path falls under its root, or a rename
/// event references the package name. Packages exempt from the validate
/// stage are skipped.
pub fn changed_packages(manifest: &Manifest, changes: &[ChangedFile]) -> Vec<String> {
    let mut names = Vec::new();
    for pck in &manifest.package_directories {
        if pck.ignored_on(VALIDATE_STAGE) {
            trace!(
                "Package {} is exempt from the validate stage, skipping",
                pck.name
            );
            continue;
        }
        let root = Path::new(&pck.path);
        if changes
            .iter()
            .any(|change| change.touches(root) || change.rename_mentions(&pck.name))
        {
            names.push(pck.name.clone());
        }
    }
    debug!("{} of {} packages changed", names.len(), manifest.package_directories.len());
    names
}
