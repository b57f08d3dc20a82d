//! Missing-dependency check
//!
//! If package P depends on Q, and Q depends on R, then P transitively needs
//! R declared on its own dependency list. Only one hop is considered: the
//! manifest is tree-shaped, and deeper transitivity is assumed satisfied by
//! Q's own entry.

use packtree_core::{DependencyRef, PackageDescriptor, Result};
use tracing::debug;

use crate::types::{CheckProcess, Finding, ManifestPair};

/// Rewrite a `.NEXT` version string to its `.LATEST` form
fn next_to_latest(raw: &str) -> String {
    match raw.strip_suffix(".NEXT") {
        Some(base) => format!("{base}.LATEST"),
        None => raw.to_string(),
    }
}

/// Check that every dependency-of-a-dependency is declared on the package
///
/// For each indirect dependency, the most authoritative version wins: the
/// current package list's own version with `.NEXT` rewritten to `.LATEST`,
/// falling back to the version declared on the intermediate entry. The
/// required set deduplicates by name with last-writer-wins on the version
/// (a documented tie-break, not conflict detection). Gaps are reported and
/// the synthesized entries appended to the dependency list in place.
pub fn check_missing_deps(
    pair: ManifestPair<'_>,
    pck: &mut PackageDescriptor,
) -> Result<Vec<Finding>> {
    if pck.dependencies.is_empty() {
        debug!("Package {} has no dependencies, nothing to check", pck.name);
        return Ok(Vec::new());
    }
    debug!("Checking missing dependencies for package {}", pck.name);

    // Required set keyed by name: first-seen position, last-seen version.
    let mut required: Vec<(String, Option<String>)> = Vec::new();
    for dep in &pck.dependencies {
        let Some(source) = pair.current_package(&dep.name) else {
            continue;
        };
        for indirect in &source.dependencies {
            let resolved = match pair
                .current_package(&indirect.name)
                .and_then(|p| p.version_number.as_deref())
            {
                Some(authoritative) => Some(next_to_latest(authoritative)),
                None => indirect.version_number.clone(),
            };
            match required.iter_mut().find(|(name, _)| *name == indirect.name) {
                Some(entry) => entry.1 = resolved,
                None => required.push((indirect.name.clone(), resolved)),
            }
        }
    }

    let mut findings = Vec::new();
    for (name, version) in required {
        if pck.depends_on(&name) {
            continue;
        }
        findings.push(Finding::new(
            CheckProcess::MissingDependency,
            &pck.name,
            format!("Please add package {name} to the dependencies"),
        ));
        pck.dependencies.push(DependencyRef {
            name,
            version_number: version,
        });
    }
    Ok(findings)
}
