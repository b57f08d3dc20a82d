//! Wire-format contract tests for the manifest model

use packtree_core::{DependencyRef, Manifest, PackageDescriptor};

const SAMPLE: &str = r#"{
    "packageDirectories": [
        {
            "path": "src/packages/framework",
            "package": "framework",
            "versionName": "Framework",
            "versionNumber": "1.4.0.NEXT",
            "default": false
        },
        {
            "path": "src/packages/core-crm",
            "package": "core-crm",
            "versionNumber": "2.1.0.NEXT",
            "default": false,
            "dependencies": [
                {"package": "Marketing Tools", "versionNumber": "1.7.0.LATEST"},
                {"package": "framework", "versionNumber": "1.4.0.LATEST"}
            ],
            "ignoreOnStage": ["build"]
        },
        {
            "path": "force-app",
            "package": "force-app",
            "default": true
        }
    ],
    "namespace": "",
    "sfdcLoginUrl": "https://login.salesforce.com",
    "sourceApiVersion": "57.0",
    "packageAliases": {
        "Marketing Tools": "04t000000000001AAA",
        "framework": "0Ho000000000001AAA",
        "core-crm": "0Ho000000000002AAA"
    }
}"#;

#[test]
fn parses_the_project_manifest_shape() {
    let manifest = Manifest::from_json(SAMPLE).unwrap();

    assert_eq!(manifest.package_directories.len(), 3);
    assert_eq!(manifest.position("framework"), Some(0));
    assert_eq!(manifest.position("core-crm"), Some(1));

    let core = manifest.package("core-crm").unwrap();
    assert_eq!(core.path, "src/packages/core-crm");
    assert_eq!(core.version_number.as_deref(), Some("2.1.0.NEXT"));
    assert!(core.ignored_on("build"));
    assert!(!core.ignored_on("validate"));
    assert_eq!(core.dependencies.len(), 2);
    assert_eq!(core.dependencies[0].name, "Marketing Tools");
    assert_eq!(
        core.dependencies[0].version_number.as_deref(),
        Some("1.7.0.LATEST")
    );

    assert!(manifest.package_aliases.is_managed("Marketing Tools"));
    assert!(!manifest.package_aliases.is_managed("framework"));
    assert!(manifest.package_aliases.contains("core-crm"));
}

#[test]
fn descriptor_serializes_with_wire_field_names() {
    let pck = PackageDescriptor::new("core-crm", "src/packages/core-crm")
        .with_version("2.1.0.NEXT")
        .with_dependencies(vec![DependencyRef::versioned("framework", "1.4.0.LATEST")]);

    let json = serde_json::to_value(&pck).unwrap();
    assert_eq!(json["package"], "core-crm");
    assert_eq!(json["versionNumber"], "2.1.0.NEXT");
    assert_eq!(json["dependencies"][0]["package"], "framework");
    assert_eq!(json["dependencies"][0]["versionNumber"], "1.4.0.LATEST");
    // absent optionals stay off the wire
    assert!(json.get("versionName").is_none());
    assert!(json.get("ignoreOnStage").is_none());
}

#[test]
fn snippet_round_trip_preserves_dependency_order() {
    let manifest = Manifest::from_json(SAMPLE).unwrap();
    let core = manifest.package("core-crm").unwrap().clone();

    let text = serde_json::to_string_pretty(&core).unwrap();
    let back: PackageDescriptor = serde_json::from_str(&text).unwrap();
    assert_eq!(back, core);
}
