//! Command-line surface

use std::path::PathBuf;

use clap::Parser;
use packtree_validate::CheckSet;

/// Static checks on the project manifest against a target branch
#[derive(Debug, Parser)]
#[command(
    name = "packtree",
    version,
    about = "Validates and auto-corrects the dependency manifest of a multi-package project"
)]
pub struct Args {
    /// Baseline revision to compare against
    #[arg(short, long, default_value = "origin/main")]
    pub target: String,

    /// Source revision for the change set
    #[arg(short, long, default_value = "HEAD")]
    pub source: String,

    /// Check that changed packages bumped their version
    #[arg(short = 'v', long)]
    pub versionupdate: bool,

    /// Check for missing transitive dependencies
    #[arg(short, long)]
    pub missingdeps: bool,

    /// Check dependency order and package position
    #[arg(short, long)]
    pub order: bool,

    /// Check declared dependency versions
    #[arg(short, long)]
    pub depsversion: bool,

    /// Run all checks
    #[arg(short, long)]
    pub all: bool,

    /// Validate a single package regardless of the change set
    #[arg(short, long)]
    pub package: Option<String>,

    /// Project directory containing the manifest
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,
}

impl Args {
    /// Map the check flags onto a check set
    pub fn checks(&self) -> CheckSet {
        if self.all {
            return CheckSet::all();
        }
        CheckSet {
            version_update: self.versionupdate,
            missing_deps: self.missingdeps,
            order: self.order,
            dep_version: self.depsversion,
        }
    }
}
