//! Aggregated validation results
//!
//! The run report is an explicit result object owned by the caller; the
//! validators keep no state of their own between runs.

use packtree_core::PackageDescriptor;

use crate::types::{CheckProcess, Finding};

/// Outcome of one package's pass through the validator pipeline
#[derive(Debug, Clone)]
pub struct PackageReport {
    /// The corrected descriptor, dependencies rewritten in place
    pub package: PackageDescriptor,
    /// Findings accumulated by the selected checks
    pub findings: Vec<Finding>,
}

impl PackageReport {
    /// Whether any check produced a finding for this package
    pub fn failed(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Whether a specific check produced a finding
    pub fn failed_check(&self, process: CheckProcess) -> bool {
        self.findings.iter().any(|f| f.process == process)
    }

    /// Findings of a specific check
    pub fn findings_for(&self, process: CheckProcess) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.process == process)
    }
}

/// Aggregated outcome of a validation run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One report per validated package, in input order
    pub packages: Vec<PackageReport>,
}

impl RunReport {
    /// Whether the run produced at least one finding anywhere
    ///
    /// Individual checks are independent; a run fails as a whole when any
    /// package has any finding.
    pub fn failed(&self) -> bool {
        self.packages.iter().any(PackageReport::failed)
    }

    /// Reports of packages that have at least one finding
    pub fn packages_with_findings(&self) -> impl Iterator<Item = &PackageReport> {
        self.packages.iter().filter(|p| p.failed())
    }

    /// Every finding across all packages
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.packages.iter().flat_map(|p| p.findings.iter())
    }

    /// Total number of findings
    pub fn finding_count(&self) -> usize {
        self.packages.iter().map(|p| p.findings.len()).sum()
    }
}
