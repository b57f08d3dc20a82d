//! Orchestrates a validation run
//!
//! Load the working-tree manifest, fetch the baseline manifest from the
//! target revision, detect changed packages, drive the validator pipeline,
//! and render the outcome.

use std::fs;

use anyhow::{bail, Context};
use packtree_core::{Manifest, ManifestError, MANIFEST_FILE};
use packtree_validate::{validate_packages, ManifestPair, RunReport};
use packtree_vcs::{changed_packages, ProjectRepo};
use tracing::debug;

use crate::cli::Args;
use crate::output::OutputStyle;

/// Special source package that is never validated
const UNPACKAGED_SOURCE: &str = "force-app";

/// Run the static checks described by the command-line arguments
pub fn execute(args: &Args) -> anyhow::Result<()> {
    let style = OutputStyle::default();
    println!(
        "{}",
        style.header("Static checks on the project manifest")
    );

    let checks = args.checks();
    if checks.is_empty() {
        println!(
            "{}",
            style.warning(
                "No checks selected. Pass --all or any of --versionupdate, --missingdeps, --order, --depsversion"
            )
        );
        return Ok(());
    }

    let repo = ProjectRepo::discover(&args.project_dir)?;
    let manifest_path = repo.root_path().join(MANIFEST_FILE);
    let text = fs::read_to_string(&manifest_path)
        .with_context(|| format!("read {}", manifest_path.display()))?;
    let current = Manifest::from_json(&text)?;
    let baseline = repo.manifest_at(&args.target)?;
    debug!(
        "Loaded {} current and {} baseline package(s)",
        current.package_directories.len(),
        baseline.package_directories.len()
    );

    let targets = select_targets(args, &style, &repo, &current)?;
    if targets.is_empty() {
        println!(
            "{}",
            style.success("Found no packages with changes. Process finished without validation")
        );
        return Ok(());
    }

    println!("{}", style.header("Packages in scope:"));
    for pck in &targets {
        println!("  {}", style.info(&pck.name));
    }

    let pair = ManifestPair::new(
        &current.package_directories,
        &baseline.package_directories,
        &current.package_aliases,
    );
    let report = validate_packages(pair, targets, checks)?;

    if report.failed() {
        render_failures(&style, &report);
        bail!(
            "static checks found {} issue(s). Apply the corrected snippets to {MANIFEST_FILE} and rerun",
            report.finding_count()
        );
    }

    println!(
        "{}",
        style.success("Static checks finished without findings")
    );
    Ok(())
}

/// Packages in scope for this run: a single selected package, or the
/// changed set between the target and source revisions
fn select_targets(
    args: &Args,
    style: &OutputStyle,
    repo: &ProjectRepo,
    current: &Manifest,
) -> anyhow::Result<Vec<packtree_core::PackageDescriptor>> {
    if let Some(name) = &args.package {
        let pck = current.package(name).ok_or_else(|| ManifestError::UnknownPackage {
            package: name.clone(),
        })?;
        return Ok(vec![pck.clone()]);
    }

    println!("{}", style.header("Search for package changes"));
    let changes = repo.changed_files(&args.target, &args.source)?;
    let mut changed = changed_packages(current, &changes);

    let mut saw_unpackaged = false;
    if let Some(position) = changed.iter().position(|n| n == UNPACKAGED_SOURCE) {
        println!(
            "{}",
            style.warning(&format!(
                "No validation for the special source package {UNPACKAGED_SOURCE}"
            ))
        );
        changed.remove(position);
        saw_unpackaged = true;
    }

    if changed.is_empty() && saw_unpackaged {
        bail!(
            "the change set only touches {UNPACKAGED_SOURCE}, which is not part of the deployment; \
             move the changes into a package"
        );
    }

    Ok(changed
        .iter()
        .filter_map(|name| current.package(name))
        .cloned()
        .collect())
}

fn render_failures(style: &OutputStyle, report: &RunReport) {
    println!();
    println!(
        "{}",
        style.error("Static checks found issues. Check the corrected package snippets below")
    );
    for pck in report.packages_with_findings() {
        println!();
        println!("{}", style.header(&format!("Package: {}", pck.package.name)));
        print!("{}", style.check_summary(pck));
        println!("{}", style.header("Corrected package snippet:"));
        println!("{}", style.code(&style.snippet(pck)));
    }
}
