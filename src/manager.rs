//! The package lifecycle: every user-facing operation, built on the
//! differ, the solver, and the index. This is the only layer that turns
//! errors into terminal output (via [`commands`](crate::commands)) and the
//! only layer that touches the filesystem.

use std::fs;
use std::path::Path;

use crate::differ::{Change, Differ};
use crate::errors::{Error, UserError};
use crate::index::Index;
use crate::package::{Dependency, Package};
use crate::printer::{Printer, count_noun};
use crate::solver::Solver;
use crate::version::Version;

#[derive(Debug)]
pub struct Manager {
    printer: Printer,
}

impl Manager {
    pub fn new(printer: Printer) -> Self {
        Self { printer }
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    pub fn init(
        &self,
        package_filepath: &Path,
        name: &str,
        description: Option<String>,
    ) -> Result<(), Error> {
        self.printer
            .print_message(&format!("Initializing package {name}..."));
        if package_filepath.exists() {
            return Err(UserError::AlreadyExists {
                path: package_filepath.to_path_buf(),
            }
            .into());
        }
        let mut package = Package::new(name, Version::default(), vec![]);
        package.info.description = description;
        self.save_package(&package, package_filepath)?;
        self.printer.print_success(&format!(
            "Initialized {name} with package file at {}",
            package_filepath.display()
        ));
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn info(
        &self,
        package: &Package,
        index: &Index,
        version: Option<Version>,
        show_deps: bool,
        show_lock: bool,
        show_members: bool,
    ) -> Result<(), Error> {
        let shown = match version {
            Some(version) if version != package.info.version => {
                index.get(&package.info.name, version)?
            }
            _ => package,
        };
        self.printer
            .print_package(shown, show_deps, show_lock, show_members);
        Ok(())
    }

    pub fn add(
        &self,
        package: &mut Package,
        dep_name: &str,
        index: &Index,
        version: Option<Version>,
    ) -> Result<(), Error> {
        self.printer.print_message(&format!(
            "Adding dependency {dep_name} to package {}...",
            package.info.name
        ));
        if let Some(existing) = package.dependencies.get(dep_name) {
            if version.is_none() || version == Some(existing.version) {
                return Err(UserError::AlreadyDependency {
                    dependency: dep_name.to_string(),
                    package: package.info.name.clone(),
                }
                .into());
            }
        }
        let version = match version {
            Some(version) => version,
            None => index.get_latest(dep_name)?.info.version,
        };
        package.dependencies.add(Dependency::new(dep_name, version));
        self.printer.print_success(&format!(
            "Added {dep_name}~={version} to {}",
            package.info.name
        ));
        Ok(())
    }

    pub fn remove(&self, package: &mut Package, dep_name: &str) -> Result<(), Error> {
        self.printer.print_message(&format!(
            "Removing dependency {dep_name} from package {}...",
            package.info.name
        ));
        match package.dependencies.remove(dep_name) {
            Some(dependency) => {
                self.printer.print_success(&format!(
                    "Removed {} from {}",
                    dependency.name, package.info.name
                ));
                Ok(())
            }
            None => Err(UserError::NotDependency {
                dependency: dep_name.to_string(),
                package: package.info.name.clone(),
            }
            .into()),
        }
    }

    pub fn lock(&self, package: &mut Package, index: &Index) -> Result<(), Error> {
        self.printer
            .print_message(&format!("Locking package {}...", package.info.name));
        self.resolve_lock(package, index)
    }

    pub fn update(&self, package: &mut Package, index: &Index) -> Result<(), Error> {
        self.printer.print_message(&format!(
            "Updating dependencies for {}...",
            package.info.name
        ));
        self.resolve_lock(package, index)
    }

    fn resolve_lock(&self, package: &mut Package, index: &Index) -> Result<(), Error> {
        self.printer.print_info(&format!(
            "Checking {} against index {}",
            count_noun(
                package.dependencies.len(),
                "direct dependency",
                "direct dependencies"
            ),
            index.name
        ));
        // Surface missing direct dependencies as NotFound before the
        // search can mistake them for an unsolvable configuration.
        for dependency in package.dependencies.iter() {
            index.get(&dependency.name, dependency.version)?;
        }
        let new_lock = Solver::new(index).solve(package)?;
        for pin in new_lock.iter() {
            let parent = new_lock.parent_of(&pin.name).unwrap_or("?");
            let source = new_lock.source_of(&pin.name).unwrap_or("?");
            self.printer
                .print_debug(&format!("Pinned {pin} from {source} via {parent}"));
        }
        let old_lock = package.lock.take();
        self.printer.print_lock_diff(old_lock.as_ref(), &new_lock);
        package.lock = Some(new_lock);
        Ok(())
    }

    pub fn unlock(&self, package: &mut Package) -> Result<(), Error> {
        self.printer
            .print_message(&format!("Unlocking package {}...", package.info.name));
        let Some(lock) = package.lock.take() else {
            return Err(UserError::NoLock {
                package: package.info.name.clone(),
            }
            .into());
        };
        self.printer.print_success(&format!(
            "Unlocked {} with {}",
            package.info.name,
            count_noun(lock.len(), "dependency", "dependencies")
        ));
        Ok(())
    }

    pub fn check(
        &self,
        package: &Package,
        index: &Index,
        version: Option<Version>,
    ) -> Result<(), Error> {
        self.printer
            .print_message(&format!("Checking package {}...", package.info.name));
        let reference = self.reference_package(package, index, version)?;
        let changes = Differ::new().diff(reference, package)?;
        let breaks: Vec<&Change> = changes.iter().filter(|change| change.is_breaking()).collect();
        if breaks.is_empty() {
            self.printer.print_success("No compatibility breaks found");
        } else {
            self.printer.print_breaks(&breaks, reference);
        }
        Ok(())
    }

    pub fn diff(
        &self,
        package: &Package,
        index: &Index,
        version: Option<Version>,
    ) -> Result<(), Error> {
        self.printer
            .print_message(&format!("Diffing package {}...", package.info.name));
        let reference = self.reference_package(package, index, version)?;
        let changes = Differ::new().diff(reference, package)?;
        if changes.is_empty() {
            self.printer.print_success("No changes found");
        } else {
            self.printer.print_changes(&changes, reference);
        }
        Ok(())
    }

    fn reference_package<'i>(
        &self,
        package: &Package,
        index: &'i Index,
        version: Option<Version>,
    ) -> Result<&'i Package, UserError> {
        match version {
            Some(version) => index.get(&package.info.name, version),
            None => index.get_latest(&package.info.name),
        }
    }

    pub fn publish(
        &self,
        package: &mut Package,
        index: &mut Index,
        interactive: bool,
        major: bool,
    ) -> Result<(), Error> {
        self.printer.print_message(&format!(
            "Publishing package {} to index {}...",
            package.info.name, index.name
        ));
        if package.lock.is_none() {
            return Err(UserError::NoLock {
                package: package.info.name.clone(),
            }
            .into());
        }
        validate_package_name(&package.info.name)?;

        let candidate_version = match index.get_latest(&package.info.name) {
            Ok(latest) => {
                let latest_version = latest.info.version;
                self.printer.print_message(&format!(
                    "The latest published version of {} is {latest_version}",
                    package.info.name
                ));
                let changes = Differ::new().diff(latest, package)?;
                let breaks: Vec<&Change> =
                    changes.iter().filter(|change| change.is_breaking()).collect();
                if !breaks.is_empty() {
                    self.printer.print_breaks(&breaks, latest);
                    let candidate = latest_version.next_major();
                    self.printer.print_warning(&format!(
                        "Will increment the major version to {candidate}"
                    ));
                    candidate
                } else if major {
                    let candidate = latest_version.next_major();
                    self.printer.print_message(&format!(
                        "Major flag set. Will increment the major version to {candidate}"
                    ));
                    candidate
                } else {
                    let candidate = latest_version.next_minor();
                    self.printer.print_message(&format!(
                        "Will increment the minor version to {candidate}"
                    ));
                    candidate
                }
            }
            Err(UserError::PackageNotFound { .. }) => {
                self.printer.print_message(&format!(
                    "Package {} has not been published yet. The initial version will be set automatically to {}",
                    package.info.name,
                    Version::default()
                ));
                Version::default()
            }
            Err(err) => return Err(err.into()),
        };

        if interactive {
            let proceed = self
                .printer
                .confirm("Proceed to publish?")
                .map_err(UserError::Input)?;
            if !proceed {
                self.printer.print_success("Aborted publishing");
                return Ok(());
            }
        }

        self.set_version(package, candidate_version);
        index.add(package)?;
        self.printer.print_success(&format!(
            "Published {} version {candidate_version} to index {}",
            package.info.name, index.name
        ));
        Ok(())
    }

    pub fn yank(
        &self,
        package: &Package,
        version: Version,
        index: &mut Index,
    ) -> Result<(), Error> {
        self.printer
            .print_message(&format!("Yanking package {}...", package.info.name));
        index.remove(&package.info.name, version)?;
        self.printer.print_success(&format!(
            "Yanked {} version {version} from index {}",
            package.info.name, index.name
        ));
        Ok(())
    }

    pub fn set_version(&self, package: &mut Package, version: Version) {
        self.printer.print_message(&format!(
            "Setting version of package {} to {version}...",
            package.info.name
        ));
        package.info.version = version;
        self.printer.print_success(&format!(
            "Set version of {} to {version}",
            package.info.name
        ));
    }

    pub fn index_info(
        &self,
        index: &Index,
        package_name: Option<&str>,
        show_versions: bool,
    ) -> Result<(), Error> {
        if let Some(name) = package_name {
            if !index.has(name) {
                return Err(UserError::PackageNotFound {
                    name: name.to_string(),
                    index: index.name.clone(),
                }
                .into());
            }
        }
        self.printer.print_index(index, package_name, show_versions);
        Ok(())
    }

    pub fn load_package(&self, path: &Path) -> Result<Package, Error> {
        if !path.exists() {
            return Err(UserError::PackageFileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let contents = fs::read_to_string(path).map_err(|source| UserError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let package = serde_json::from_str(&contents).map_err(|source| UserError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(package)
    }

    pub fn save_package(&self, package: &Package, path: &Path) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(package).map_err(|source| UserError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| UserError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn load_index(&self, path: &Path) -> Result<Index, Error> {
        if !path.exists() {
            return Err(UserError::IndexFileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let contents = fs::read_to_string(path).map_err(|source| UserError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index = serde_json::from_str(&contents).map_err(|source| UserError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(index)
    }

    pub fn save_index(&self, index: &Index, path: &Path) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(index).map_err(|source| UserError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| UserError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

/// A package name is a non-empty run of lowercase letters and hyphens that
/// neither starts nor ends with a hyphen.
fn validate_package_name(name: &str) -> Result<(), UserError> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase() || b == b'-') {
        return Err(UserError::BadName(
            "Package name must be lowercase and can only contain letters and hyphens".to_string(),
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(UserError::BadName(
            "Package name cannot start or end with a hyphen".to_string(),
        ));
    }
    Ok(())
}
