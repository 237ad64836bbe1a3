use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::UserError;
use crate::package::Package;
use crate::version::Version;

/// All published snapshots of a single package, keyed by version string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub packages: BTreeMap<String, Package>,
}

/// A mapping from package name to its published, immutable snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    #[serde(default)]
    pub namespaces: BTreeMap<String, Namespace>,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespaces: BTreeMap::new(),
        }
    }

    /// Publish a snapshot. The package is cloned on the way in so later
    /// mutation of the caller's copy cannot change the index entry.
    pub fn add(&mut self, package: &Package) -> Result<(), UserError> {
        let name = package.info.name.clone();
        let version_str = package.info.version.to_string();
        let namespace = self
            .namespaces
            .entry(name.clone())
            .or_insert_with(|| Namespace {
                name: name.clone(),
                packages: BTreeMap::new(),
            });
        if namespace.packages.contains_key(&version_str) {
            return Err(UserError::DuplicateVersion {
                name,
                version: package.info.version,
                index: self.name.clone(),
            });
        }
        namespace.packages.insert(version_str, package.clone());
        Ok(())
    }

    /// Remove one published version. The namespace goes with its last
    /// version.
    pub fn remove(&mut self, name: &str, version: Version) -> Result<(), UserError> {
        let Some(namespace) = self.namespaces.get_mut(name) else {
            return Err(UserError::PackageNotFound {
                name: name.to_string(),
                index: self.name.clone(),
            });
        };
        if namespace.packages.remove(&version.to_string()).is_none() {
            return Err(UserError::VersionNotFound {
                name: name.to_string(),
                version,
                index: self.name.clone(),
            });
        }
        if namespace.packages.is_empty() {
            self.namespaces.remove(name);
        }
        Ok(())
    }

    fn namespace(&self, name: &str) -> Result<&Namespace, UserError> {
        self.namespaces
            .get(name)
            .ok_or_else(|| UserError::PackageNotFound {
                name: name.to_string(),
                index: self.name.clone(),
            })
    }

    pub fn get(&self, name: &str, version: Version) -> Result<&Package, UserError> {
        let namespace = self.namespace(name)?;
        namespace
            .packages
            .get(&version.to_string())
            .ok_or_else(|| UserError::VersionNotFound {
                name: name.to_string(),
                version,
                index: self.name.clone(),
            })
    }

    pub fn get_latest(&self, name: &str) -> Result<&Package, UserError> {
        let namespace = self.namespace(name)?;
        namespace
            .packages
            .values()
            .max_by_key(|package| package.info.version)
            .ok_or_else(|| UserError::PackageNotFound {
                name: name.to_string(),
                index: self.name.clone(),
            })
    }

    /// Published snapshots of `name`, highest version first.
    pub fn list_versions_sorted(&self, name: &str) -> Result<Vec<&Package>, UserError> {
        let namespace = self.namespace(name)?;
        let mut packages: Vec<&Package> = namespace.packages.values().collect();
        packages.sort_by(|a, b| b.info.version.cmp(&a.info.version));
        Ok(packages)
    }

    pub fn has(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }
}
