use std::path::PathBuf;

use thiserror::Error;

use crate::version::Version;

/// Errors caused by user input or the state of the package/index files.
/// These are reported as a single styled message and a non-zero exit code.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid version string: {0}")]
    BadVersion(String),
    #[error("{0}")]
    BadName(String),
    #[error("Package {name} not found in the provided index: {index}")]
    PackageNotFound { name: String, index: String },
    #[error("Package {name}=={version} not found in the provided index: {index}")]
    VersionNotFound {
        name: String,
        version: Version,
        index: String,
    },
    #[error("Dependency {name} not found in index {index}")]
    DependencyNotFound { name: String, index: String },
    #[error("Package {name}=={version} already exists in provided index: {index}")]
    DuplicateVersion {
        name: String,
        version: Version,
        index: String,
    },
    #[error("{dependency} is already a dependency of {package}")]
    AlreadyDependency {
        dependency: String,
        package: String,
    },
    #[error("{dependency} is not a dependency of {package}, unable to remove it")]
    NotDependency {
        dependency: String,
        package: String,
    },
    #[error("Package file already exists at {}", .path.display())]
    AlreadyExists { path: PathBuf },
    #[error("No lock found for package {package}")]
    NoLock { package: String },
    #[error("Failed to solve package dependencies, no valid configuration found")]
    NoSolution,
    #[error("Package file not found at {}", .path.display())]
    PackageFileNotFound { path: PathBuf },
    #[error("Index file not found at {}", .path.display())]
    IndexFileNotFound { path: PathBuf },
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to read console input: {0}")]
    Input(#[source] dialoguer::Error),
}

/// An invariant violation inside the differ or the interface model.
/// Surfaced as a full report under --debug and as an opaque failure otherwise.
#[derive(Debug, Error)]
#[error("Internal error: {0}")]
pub struct InternalError(pub String);

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}
