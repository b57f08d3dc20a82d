//! End-to-end pipeline tests over parsed manifests

use packtree_core::Manifest;
use packtree_validate::{validate_packages, CheckProcess, CheckSet, ManifestPair};

const CURRENT: &str = r#"{
    "packageDirectories": [
        {
            "path": "src/packages/framework",
            "package": "framework",
            "versionNumber": "1.4.0.NEXT"
        },
        {
            "path": "src/packages/core-crm",
            "package": "core-crm",
            "versionNumber": "2.1.0.NEXT",
            "dependencies": [
                {"package": "sales", "versionNumber": "1.2.0.LATEST"},
                {"package": "Marketing Tools"},
                {"package": "framework", "versionNumber": "1.3.0.LATEST"}
            ]
        },
        {
            "path": "src/packages/sales",
            "package": "sales",
            "versionNumber": "1.2.0.NEXT",
            "dependencies": [
                {"package": "framework", "versionNumber": "1.4.0.LATEST"}
            ]
        }
    ],
    "packageAliases": {
        "Marketing Tools": "04t000000000001AAA",
        "framework": "0Ho000000000001AAA",
        "core-crm": "0Ho000000000002AAA",
        "sales": "0Ho000000000003AAA"
    }
}"#;

const BASELINE: &str = r#"{
    "packageDirectories": [
        {
            "path": "src/packages/framework",
            "package": "framework",
            "versionNumber": "1.4.0.NEXT"
        },
        {
            "path": "src/packages/core-crm",
            "package": "core-crm",
            "versionNumber": "2.1.0.NEXT"
        },
        {
            "path": "src/packages/sales",
            "package": "sales",
            "versionNumber": "1.1.0.NEXT"
        }
    ]
}"#;

#[test]
fn full_run_over_a_changed_package() {
    let current = Manifest::from_json(CURRENT).unwrap();
    let baseline = Manifest::from_json(BASELINE).unwrap();
    let pair = ManifestPair::new(
        &current.package_directories,
        &baseline.package_directories,
        &current.package_aliases,
    );

    let target = current.package("core-crm").unwrap().clone();
    let report = validate_packages(pair, vec![target], CheckSet::all()).unwrap();

    assert!(report.failed());
    let core = &report.packages[0];

    // version unchanged against baseline: finding plus minor-bump suggestion
    assert!(core.failed_check(CheckProcess::VersionUpdate));
    assert_eq!(core.package.version_number.as_deref(), Some("2.2.0.NEXT"));

    // corrected order: managed alias first, then manifest top-to-bottom
    let names: Vec<&str> = core
        .package
        .dependencies
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, ["Marketing Tools", "framework", "sales"]);
    assert!(core.failed_check(CheckProcess::DependencyOrder));

    // stale framework requirement rewritten to the authoritative version
    let framework = core
        .package
        .dependencies
        .iter()
        .find(|d| d.name == "framework")
        .unwrap();
    assert_eq!(framework.version_number.as_deref(), Some("1.4.0.LATEST"));
    assert!(core.failed_check(CheckProcess::DependencyVersion));

    // sales sits below core-crm in the directory list
    assert!(core.failed_check(CheckProcess::PackageOrder));
    assert!(core
        .findings_for(CheckProcess::PackageOrder)
        .any(|f| f.message.contains("sales")));
}

#[test]
fn corrected_manifest_validates_clean() {
    let current = Manifest::from_json(CURRENT).unwrap();
    let baseline = Manifest::from_json(BASELINE).unwrap();
    let pair = ManifestPair::new(
        &current.package_directories,
        &baseline.package_directories,
        &current.package_aliases,
    );

    let target = current.package("core-crm").unwrap().clone();
    let first = validate_packages(pair, vec![target], CheckSet::all()).unwrap();

    // Re-run the order and dependency-version checks on the corrected
    // descriptor: the auto-correction must be a fixed point.
    let corrected = first.packages[0].package.clone();
    let checks = CheckSet {
        version_update: false,
        missing_deps: true,
        order: true,
        dep_version: true,
    };
    let second = validate_packages(pair, vec![corrected.clone()], checks).unwrap();
    assert!(!second.failed());
    assert_eq!(second.packages[0].package, corrected);
}

#[test]
fn multiple_packages_validate_independently() {
    let current = Manifest::from_json(CURRENT).unwrap();
    let baseline = Manifest::from_json(BASELINE).unwrap();
    let pair = ManifestPair::new(
        &current.package_directories,
        &baseline.package_directories,
        &current.package_aliases,
    );

    let targets = vec![
        current.package("framework").unwrap().clone(),
        current.package("core-crm").unwrap().clone(),
        current.package("sales").unwrap().clone(),
    ];
    let report = validate_packages(pair, targets, CheckSet::all()).unwrap();

    // framework did not change its version either, and sales did; one
    // package's findings never block another's checks
    let framework = &report.packages[0];
    let sales = &report.packages[2];
    assert!(framework.failed_check(CheckProcess::VersionUpdate));
    assert!(!sales.failed_check(CheckProcess::VersionUpdate));
}
