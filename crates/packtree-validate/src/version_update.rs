//! Version-update check
//!
//! A changed package must advance its own version past the baseline.

use std::cmp::Ordering;

use packtree_core::{ManifestError, PackageDescriptor, Result, Version};
use tracing::debug;

use crate::types::{CheckProcess, Finding, ManifestPair};

/// Check that the package's version advanced past the baseline
///
/// When the current version (marker stripped) is not strictly greater than
/// the baseline's, one finding is emitted and the working descriptor's
/// version is replaced with a suggested successor: the baseline triple with
/// the minor component bumped and the `.NEXT` marker re-appended. The
/// suggestion only affects the rendered snippet; nothing is persisted.
/// Packages absent from the baseline are new and produce no finding.
pub fn check_version_update(
    pair: ManifestPair<'_>,
    pck: &mut PackageDescriptor,
) -> Result<Vec<Finding>> {
    debug!("Checking version update for package {}", pck.name);

    let Some(baseline) = pair.baseline_package(&pck.name) else {
        return Ok(Vec::new());
    };
    let Some(baseline_raw) = baseline.version_number.as_deref() else {
        return Ok(Vec::new());
    };
    let baseline_version =
        Version::parse(baseline_raw).ok_or_else(|| ManifestError::MalformedVersion {
            package: baseline.name.clone(),
            version: baseline_raw.to_string(),
        })?;
    let current_version = pck.version()?;

    if current_version.numeric_cmp(&baseline_version) == Ordering::Greater {
        return Ok(Vec::new());
    }

    let suggested = baseline_version.bump_minor();
    let current_raw = pck.version_number.as_deref().unwrap_or_default();
    let finding = Finding::new(
        CheckProcess::VersionUpdate,
        &pck.name,
        format!(
            "Package version without change. Please update version {current_raw} (suggested {suggested})"
        ),
    );
    pck.version_number = Some(suggested.to_string());
    Ok(vec![finding])
}
