//! Output formatting and styling

use colored::Colorize;
use packtree_validate::{CheckProcess, PackageReport};

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputStyle {
    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format section header
    pub fn header(&self, msg: &str) -> String {
        if self.use_colors {
            msg.bold().to_string()
        } else {
            msg.to_string()
        }
    }

    /// Format a code block
    pub fn code(&self, code: &str) -> String {
        if self.use_colors {
            code.cyan().to_string()
        } else {
            code.to_string()
        }
    }

    /// Render the per-check summary for one package report
    ///
    /// One line per check category: a pass mark, or the check's findings.
    pub fn check_summary(&self, report: &PackageReport) -> String {
        let mut out = String::new();
        for process in CheckProcess::ALL {
            if report.failed_check(process) {
                out.push_str(&format!("  {}\n", self.error(process.label())));
                for finding in report.findings_for(process) {
                    out.push_str(&format!("      {}\n", finding.message));
                }
            } else {
                out.push_str(&format!("  {}\n", self.success(process.label())));
            }
        }
        out
    }

    /// Render the corrected package snippet for the manifest file
    pub fn snippet(&self, report: &PackageReport) -> String {
        serde_json::to_string_pretty(&report.package).unwrap_or_default()
    }
}

/// Print an error message to stderr
pub fn print_error(msg: &str) {
    eprintln!("{}", OutputStyle::default().error(msg));
}

#[cfg(test)]
mod tests {
    use packtree_core::PackageDescriptor;
    use packtree_validate::Finding;

    use super::*;

    fn plain() -> OutputStyle {
        OutputStyle { use_colors: false }
    }

    #[test]
    fn summary_lists_every_check_category() {
        let report = PackageReport {
            package: PackageDescriptor::new("core", "src/core"),
            findings: vec![Finding::new(
                CheckProcess::VersionUpdate,
                "core",
                "Please update version 1.0.0.NEXT (suggested 1.1.0.NEXT)",
            )],
        };
        let summary = plain().check_summary(&report);
        assert!(summary.contains("✗ Package tree version"));
        assert!(summary.contains("suggested 1.1.0.NEXT"));
        assert!(summary.contains("✓ Package tree order"));
        assert!(summary.contains("✓ Package tree dependencies version"));
    }

    #[test]
    fn snippet_uses_wire_field_names() {
        let report = PackageReport {
            package: PackageDescriptor::new("core", "src/core").with_version("1.1.0.NEXT"),
            findings: vec![],
        };
        let snippet = plain().snippet(&report);
        assert!(snippet.contains("\"package\": \"core\""));
        assert!(snippet.contains("\"versionNumber\": \"1.1.0.NEXT\""));
    }
}
