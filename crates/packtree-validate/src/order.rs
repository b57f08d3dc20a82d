//! Order check
//!
//! Two independent ordering invariants:
//! - the dependency list of a package follows the canonical order (managed
//!   packages first, then manifest top-to-bottom order), and is rewritten
//!   into it;
//! - the package itself sits below all of its dependencies in the package
//!   directory list, which is never rewritten.

use std::collections::HashMap;

use packtree_core::{AliasTable, DependencyRef, ManifestError, PackageDescriptor, Result};
use tracing::debug;

use crate::types::{CheckProcess, Finding, ManifestPair};

/// Rank base for managed dependencies
///
/// Managed packages sort ahead of the 1-based manifest positions used for
/// unmanaged ones.
const MANAGED_RANK_BASE: i64 = -15;

/// Compute the canonical order of a dependency list
///
/// Managed dependencies come first, ranked by alias declaration order;
/// unmanaged dependencies follow, ranked by their position in the full
/// package directory list. The sort is stable: equal ranks keep their
/// first-encountered order. A dependency that is neither a project package
/// nor a listed alias is a fatal error.
pub fn ideal_order(
    owner: &str,
    deps: &[DependencyRef],
    aliases: &AliasTable,
    manifest_order: &[PackageDescriptor],
) -> Result<Vec<String>> {
    let mut managed_rank: HashMap<&str, i64> = HashMap::new();
    for (offset, name) in aliases.managed().enumerate() {
        managed_rank.insert(name, MANAGED_RANK_BASE + offset as i64);
    }

    let mut ranked: Vec<(i64, &str)> = Vec::with_capacity(deps.len());
    for dep in deps {
        let rank = if let Some(rank) = managed_rank.get(dep.name.as_str()) {
            *rank
        } else if let Some(position) = manifest_order.iter().position(|p| p.name == dep.name) {
            position as i64 + 1
        } else {
            return Err(ManifestError::UnknownDependency {
                package: owner.to_string(),
                dependency: dep.name.clone(),
            });
        };
        ranked.push((rank, dep.name.as_str()));
    }
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, name)| name.to_string()).collect())
}

/// Rewrite the package's dependency list into the given order
///
/// Entries keep their version annotation; only positions change.
pub fn apply_order(pck: &mut PackageDescriptor, order: &[String]) {
    let mut reordered = Vec::with_capacity(pck.dependencies.len());
    for name in order {
        if let Some(position) = pck.dependencies.iter().position(|d| &d.name == name) {
            reordered.push(pck.dependencies[position].clone());
        }
    }
    pck.dependencies = reordered;
}

/// Check both ordering invariants and correct the dependency list in place
pub fn check_order(pair: ManifestPair<'_>, pck: &mut PackageDescriptor) -> Result<Vec<Finding>> {
    if pck.dependencies.is_empty() {
        debug!("Package {} has no dependencies, nothing to order", pck.name);
        return Ok(Vec::new());
    }
    debug!("Checking order for package {}", pck.name);

    let order = ideal_order(&pck.name, &pck.dependencies, pair.aliases, pair.current)?;

    let mut findings = Vec::new();
    for (index, name) in order.iter().enumerate() {
        let new_position = index + 1;
        let Some(current_position) = pck
            .dependencies
            .iter()
            .position(|d| &d.name == name)
            .map(|p| p + 1)
        else {
            continue;
        };
        if new_position < current_position {
            let message = match index.checked_sub(1).map(|i| order[i].as_str()) {
                Some(ahead) => format!(
                    "Package {name} has the wrong order position. Current position is {current_position}, new position is {new_position}. Please put it behind package {ahead}"
                ),
                None => format!(
                    "Package {name} has the wrong order position. Current position is {current_position}, new position is {new_position}. Please put it at the top of the dependencies"
                ),
            };
            findings.push(Finding::new(CheckProcess::DependencyOrder, &pck.name, message));
        }
    }
    apply_order(pck, &order);

    // The package itself must come after all of its (corrected)
    // dependencies in the package directory list. The directory list is not
    // something this check is allowed to rewrite.
    let own_position =
        pair.position(&pck.name)
            .ok_or_else(|| ManifestError::UnknownPackage {
                package: pck.name.clone(),
            })?;
    for dep in &pck.dependencies {
        if let Some(dep_position) = pair.position(&dep.name) {
            if dep_position > own_position {
                findings.push(Finding::new(
                    CheckProcess::PackageOrder,
                    &pck.name,
                    format!(
                        "Please move package {} behind its dependency {}",
                        pck.name, dep.name
                    ),
                ));
            }
        }
    }
    Ok(findings)
}
