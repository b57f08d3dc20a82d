//! Drives the validator pipeline across changed packages

use packtree_core::{PackageDescriptor, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::dep_version::check_dep_version;
use crate::missing_deps::check_missing_deps;
use crate::order::check_order;
use crate::report::{PackageReport, RunReport};
use crate::types::ManifestPair;
use crate::version_update::check_version_update;

/// Which checks a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSet {
    pub version_update: bool,
    pub missing_deps: bool,
    pub order: bool,
    pub dep_version: bool,
}

impl CheckSet {
    /// All four checks
    pub fn all() -> Self {
        Self {
            version_update: true,
            missing_deps: true,
            order: true,
            dep_version: true,
        }
    }

    /// Whether no check is selected
    pub fn is_empty(&self) -> bool {
        !(self.version_update || self.missing_deps || self.order || self.dep_version)
    }
}

impl Default for CheckSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Run the selected checks for one package
///
/// The checks execute in a fixed order because each assumes the manifest
/// shape left by the previous one: version-update, missing-dependency,
/// order, dependency-version. The descriptor is owned by this call and
/// returned corrected. Checks that resolve dependencies through the alias
/// table are skipped for packages without an alias entry (source packages).
pub fn validate_package(
    pair: ManifestPair<'_>,
    mut pck: PackageDescriptor,
    checks: CheckSet,
) -> Result<PackageReport> {
    let mut findings = Vec::new();

    if checks.version_update {
        findings.extend(check_version_update(pair, &mut pck)?);
    }

    let aliased = pair.aliases.contains(&pck.name);
    if aliased {
        if checks.missing_deps {
            findings.extend(check_missing_deps(pair, &mut pck)?);
        }
        if checks.order {
            findings.extend(check_order(pair, &mut pck)?);
        }
        if checks.dep_version {
            findings.extend(check_dep_version(pair, &mut pck)?);
        }
    } else if checks.missing_deps || checks.order || checks.dep_version {
        warn!(
            "No alias entry for package {}, skipping dependency checks",
            pck.name
        );
    }

    debug!(
        "Validated package {} with {} finding(s)",
        pck.name,
        findings.len()
    );
    Ok(PackageReport {
        package: pck,
        findings,
    })
}

/// Validate every target package against the shared manifest pair
///
/// Packages are independent of each other, so the fan-out is parallel; each
/// worker exclusively owns its descriptor for the duration of its checks.
/// The first fatal error aborts the whole run.
pub fn validate_packages(
    pair: ManifestPair<'_>,
    targets: Vec<PackageDescriptor>,
    checks: CheckSet,
) -> Result<RunReport> {
    let packages = targets
        .into_par_iter()
        .map(|pck| validate_package(pair, pck, checks))
        .collect::<Result<Vec<_>>>()?;
    Ok(RunReport { packages })
}
