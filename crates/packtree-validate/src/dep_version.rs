//! Dependency-version check
//!
//! Every declared dependency version must match the referenced package's
//! authoritative version in the current package list.

use std::cmp::Ordering;
use std::collections::HashMap;

use packtree_core::{ManifestError, PackageDescriptor, Result, Version, VersionSuffix};
use tracing::debug;

use crate::types::{CheckProcess, Finding, ManifestPair};

/// Check declared dependency versions against the authoritative versions
///
/// The marker preconditions are part of the manifest contract and violations
/// are fatal rather than findings: declared dependency versions must carry
/// `.LATEST`, and the referenced package's own version must carry `.NEXT`.
/// Any numeric difference, higher or lower, is reported and the declared
/// version rewritten to `<authoritative>.LATEST` in place.
pub fn check_dep_version(
    pair: ManifestPair<'_>,
    pck: &mut PackageDescriptor,
) -> Result<Vec<Finding>> {
    if pck.dependencies.is_empty() {
        debug!("Package {} has no dependencies, nothing to check", pck.name);
        return Ok(Vec::new());
    }
    debug!("Checking dependency versions for package {}", pck.name);

    let mut authoritative: HashMap<String, Version> = HashMap::new();
    for dep in &pck.dependencies {
        let Some(source) = pair.current_package(&dep.name) else {
            continue;
        };
        let Some(raw) = source.version_number.as_deref() else {
            continue;
        };
        let version = Version::parse(raw).ok_or_else(|| ManifestError::MalformedVersion {
            package: source.name.clone(),
            version: raw.to_string(),
        })?;
        if !version.has_marker(VersionSuffix::Next) {
            return Err(ManifestError::MissingVersionMarker {
                package: source.name.clone(),
                version: raw.to_string(),
                marker: "NEXT",
            });
        }
        authoritative.insert(dep.name.clone(), version);
    }

    let mut findings = Vec::new();
    for dep in &mut pck.dependencies {
        let Some(raw) = dep.version_number.as_deref() else {
            continue;
        };
        let declared = Version::parse(raw).ok_or_else(|| ManifestError::MalformedVersion {
            package: dep.name.clone(),
            version: raw.to_string(),
        })?;
        if !declared.has_marker(VersionSuffix::Latest) {
            return Err(ManifestError::MissingVersionMarker {
                package: dep.name.clone(),
                version: raw.to_string(),
                marker: "LATEST",
            });
        }
        let Some(required) = authoritative.get(&dep.name) else {
            continue;
        };
        if required.numeric_cmp(&declared) != Ordering::Equal {
            let corrected = required.to_latest();
            findings.push(Finding::new(
                CheckProcess::DependencyVersion,
                &pck.name,
                format!(
                    "Dependent package {} needs version {}. Please update the version to {corrected}",
                    dep.name,
                    required.base()
                ),
            ));
            dep.version_number = Some(corrected.to_string());
        }
    }
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use packtree_core::{AliasTable, DependencyRef};

    use super::*;

    fn current_with_x(version: &str) -> Vec<PackageDescriptor> {
        vec![
            PackageDescriptor::new("x", "src/x").with_version(version),
            PackageDescriptor::new("p", "src/p").with_version("1.0.0.NEXT"),
        ]
    }

    #[test]
    fn stale_declared_version_is_rewritten() {
        let aliases = AliasTable::default();
        let current = current_with_x("1.1.0.NEXT");
        let mut pck = current[1]
            .clone()
            .with_dependencies(vec![DependencyRef::versioned("x", "1.0.0.LATEST")]);

        let findings =
            check_dep_version(ManifestPair::new(&current, &[], &aliases), &mut pck).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].process, CheckProcess::DependencyVersion);
        assert_eq!(
            pck.dependencies[0].version_number.as_deref(),
            Some("1.1.0.LATEST")
        );
    }

    #[test]
    fn higher_declared_version_is_also_rewritten() {
        let aliases = AliasTable::default();
        let current = current_with_x("1.1.0.NEXT");
        let mut pck = current[1]
            .clone()
            .with_dependencies(vec![DependencyRef::versioned("x", "2.0.0.LATEST")]);

        let findings =
            check_dep_version(ManifestPair::new(&current, &[], &aliases), &mut pck).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(
            pck.dependencies[0].version_number.as_deref(),
            Some("1.1.0.LATEST")
        );
    }

    #[test]
    fn matching_version_passes() {
        let aliases = AliasTable::default();
        let current = current_with_x("1.1.0.NEXT");
        let mut pck = current[1]
            .clone()
            .with_dependencies(vec![DependencyRef::versioned("x", "1.1.0.LATEST")]);

        let findings =
            check_dep_version(ManifestPair::new(&current, &[], &aliases), &mut pck).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn declared_version_without_latest_marker_is_fatal() {
        let aliases = AliasTable::default();
        let current = current_with_x("1.1.0.NEXT");
        let mut pck = current[1]
            .clone()
            .with_dependencies(vec![DependencyRef::versioned("x", "1.1.0.NEXT")]);

        let err =
            check_dep_version(ManifestPair::new(&current, &[], &aliases), &mut pck).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingVersionMarker { marker: "LATEST", .. }
        ));
    }

    #[test]
    fn authoritative_version_without_next_marker_is_fatal() {
        let aliases = AliasTable::default();
        let current = current_with_x("1.1.0.LATEST");
        let mut pck = current[1]
            .clone()
            .with_dependencies(vec![DependencyRef::versioned("x", "1.1.0.LATEST")]);

        let err =
            check_dep_version(ManifestPair::new(&current, &[], &aliases), &mut pck).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingVersionMarker { marker: "NEXT", package, .. } if package == "x"
        ));
    }

    #[test]
    fn dependencies_outside_the_manifest_are_ignored() {
        let aliases = AliasTable::default();
        let current = vec![PackageDescriptor::new("p", "src/p").with_version("1.0.0.NEXT")];
        let mut pck = current[0]
            .clone()
            .with_dependencies(vec![DependencyRef::versioned("managed", "4.0.0.LATEST")]);

        let findings =
            check_dep_version(ManifestPair::new(&current, &[], &aliases), &mut pck).unwrap();
        assert!(findings.is_empty());
        assert_eq!(
            pck.dependencies[0].version_number.as_deref(),
            Some("4.0.0.LATEST")
        );
    }
}
