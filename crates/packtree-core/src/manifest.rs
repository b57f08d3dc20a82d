//! In-memory representation of a project manifest
//!
//! A manifest is the ordered package directory list plus the package alias
//! table, as parsed from the project's `sfdx-project.json`. The top-to-bottom
//! sequence of the package list is the canonical reference order for the
//! order validator, and the declaration order of the alias table ranks
//! managed packages, so both orders are preserved on deserialization.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ManifestError, Result};
use crate::version::Version;

/// File name of the project manifest inside the repository root
pub const MANIFEST_FILE: &str = "sfdx-project.json";

/// Alias identifiers with this prefix denote managed packages
pub const MANAGED_ID_PREFIX: &str = "04";

/// A dependency declared on a package directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRef {
    /// Name of the package depended on
    #[serde(rename = "package")]
    pub name: String,
    /// Declared version requirement, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,
}

impl DependencyRef {
    /// Create a dependency without a version requirement
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_number: None,
        }
    }

    /// Create a dependency with a version requirement
    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_number: Some(version.into()),
        }
    }
}

/// One entry of the manifest's package directory list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    /// Unique package name within the manifest
    #[serde(rename = "package")]
    pub name: String,
    /// Filesystem location of the package root, relative to the project root
    pub path: String,
    /// Optional display label, untouched by validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    /// Authoritative version, `MAJOR.MINOR.PATCH.<suffix>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,
    #[serde(
        rename = "default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_default: Option<bool>,
    /// Ordered dependency list; order is input and output of validation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyRef>,
    /// Stage names this package is exempt from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_on_stage: Vec<String>,
}

impl PackageDescriptor {
    /// Create a descriptor with just a name and path
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            version_name: None,
            version_number: None,
            is_default: None,
            dependencies: Vec::new(),
            ignore_on_stage: Vec::new(),
        }
    }

    /// Set the authoritative version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_number = Some(version.into());
        self
    }

    /// Set the dependency list
    pub fn with_dependencies(mut self, dependencies: Vec<DependencyRef>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Parsed authoritative version, named after this package on failure
    pub fn version(&self) -> Result<Version> {
        let raw = self
            .version_number
            .as_deref()
            .ok_or_else(|| ManifestError::MalformedVersion {
                package: self.name.clone(),
                version: String::from("<missing>"),
            })?;
        Version::parse(raw).ok_or_else(|| ManifestError::MalformedVersion {
            package: self.name.clone(),
            version: raw.to_string(),
        })
    }

    /// Whether the dependency list already names `name`
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep.name == name)
    }

    /// Whether this package is exempt from the given stage
    pub fn ignored_on(&self, stage: &str) -> bool {
        self.ignore_on_stage.iter().any(|s| s == stage)
    }
}

/// The manifest's `packageAliases` object
///
/// JSON object order is preserved: the declaration order of managed aliases
/// is their canonical precedence in the order validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has an entry for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// The identifier aliased by `name`, if any
    pub fn id(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.as_str())
    }

    /// Whether `name` aliases a managed package (`04` identifier prefix)
    pub fn is_managed(&self, name: &str) -> bool {
        self.id(name)
            .is_some_and(|id| id.starts_with(MANAGED_ID_PREFIX))
    }

    /// Insert an alias; an existing entry keeps its position, only the
    /// identifier is replaced
    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        let name = name.into();
        let id = id.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = id,
            None => self.entries.push((name, id)),
        }
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), id.as_str()))
    }

    /// Names of managed aliases in declaration order
    pub fn managed(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, id)| id.starts_with(MANAGED_ID_PREFIX))
            .map(|(n, _)| n.as_str())
    }
}

impl FromIterator<(String, String)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = AliasTable::default();
        for (name, id) in iter {
            table.insert(name, id);
        }
        table
    }
}

impl Serialize for AliasTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, id) in &self.entries {
            map.serialize_entry(name, id)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AliasVisitor;

        impl<'de> Visitor<'de> for AliasVisitor {
            type Value = AliasTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of package names to alias identifiers")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut table = AliasTable::default();
                while let Some((name, id)) = access.next_entry::<String, String>()? {
                    table.insert(name, id);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(AliasVisitor)
    }
}

/// A parsed project manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Ordered package directory list; the sequence is the canonical
    /// reference order
    #[serde(default)]
    pub package_directories: Vec<PackageDescriptor>,
    /// Alias table, taken from the current manifest only
    #[serde(default, skip_serializing_if = "AliasTable::is_empty")]
    pub package_aliases: AliasTable,
}

impl Manifest {
    /// Parse manifest JSON and enforce package-name uniqueness
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(text)?;
        let mut seen = HashSet::new();
        for pck in &manifest.package_directories {
            if !seen.insert(pck.name.as_str()) {
                return Err(ManifestError::DuplicatePackage {
                    package: pck.name.clone(),
                });
            }
        }
        Ok(manifest)
    }

    /// Look up a package by name
    pub fn package(&self, name: &str) -> Option<&PackageDescriptor> {
        self.package_directories.iter().find(|p| p.name == name)
    }

    /// Top-to-bottom position of a package in the directory list
    pub fn position(&self, name: &str) -> Option<usize> {
        self.package_directories.iter().position(|p| p.name == name)
    }
}
