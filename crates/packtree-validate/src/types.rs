//! Finding types and shared validation inputs

use std::fmt;

use packtree_core::{AliasTable, PackageDescriptor};
use serde::{Deserialize, Serialize};

/// The check that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckProcess {
    /// The package's own version did not advance past the baseline
    VersionUpdate,
    /// A transitively-required package is missing from the dependency list
    MissingDependency,
    /// A dependency sits at the wrong position in the dependency list
    DependencyOrder,
    /// The package itself sits above one of its dependencies in the manifest
    PackageOrder,
    /// A declared dependency version is stale
    DependencyVersion,
}

impl CheckProcess {
    /// All five categories, in reporting order
    pub const ALL: [CheckProcess; 5] = [
        CheckProcess::VersionUpdate,
        CheckProcess::MissingDependency,
        CheckProcess::PackageOrder,
        CheckProcess::DependencyOrder,
        CheckProcess::DependencyVersion,
    ];

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            CheckProcess::VersionUpdate => "Package tree version",
            CheckProcess::MissingDependency => "Package tree missing dependencies",
            CheckProcess::PackageOrder => "Package tree order",
            CheckProcess::DependencyOrder => "Package tree dependencies order",
            CheckProcess::DependencyVersion => "Package tree dependencies version",
        }
    }
}

impl fmt::Display for CheckProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single validation issue
///
/// Findings are pure output; they never feed back into later checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The check that produced this finding
    pub process: CheckProcess,
    /// The package the finding is about
    pub package: String,
    /// Human-readable description of the issue
    pub message: String,
}

impl Finding {
    /// Create a finding
    pub fn new(
        process: CheckProcess,
        package: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            process,
            package: package.into(),
            message: message.into(),
        }
    }
}

/// Shared inputs for one validation run
///
/// Validators borrow the pair for the duration of one check and may mutate
/// the target package's dependency list; the baseline list is never mutated.
#[derive(Clone, Copy)]
pub struct ManifestPair<'a> {
    /// Current package directory list, the canonical reference order
    pub current: &'a [PackageDescriptor],
    /// Package directory list from the target revision
    pub baseline: &'a [PackageDescriptor],
    /// Alias table, taken from the current manifest only
    pub aliases: &'a AliasTable,
}

impl<'a> ManifestPair<'a> {
    /// Bundle the two snapshots and the alias table
    pub fn new(
        current: &'a [PackageDescriptor],
        baseline: &'a [PackageDescriptor],
        aliases: &'a AliasTable,
    ) -> Self {
        Self {
            current,
            baseline,
            aliases,
        }
    }

    /// Look up a package in the current list
    pub fn current_package(&self, name: &str) -> Option<&'a PackageDescriptor> {
        self.current.iter().find(|p| p.name == name)
    }

    /// Look up a package in the baseline list
    pub fn baseline_package(&self, name: &str) -> Option<&'a PackageDescriptor> {
        self.baseline.iter().find(|p| p.name == name)
    }

    /// Top-to-bottom position of a package in the current directory list
    pub fn position(&self, name: &str) -> Option<usize> {
        self.current.iter().position(|p| p.name == name)
    }
}
