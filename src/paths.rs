//! Resolution of the package and index file locations.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::errors::UserError;

pub const PACKAGE_FILENAME: &str = "package.json";
pub const INDEX_ENV_VAR: &str = "MYXA_INDEX";

/// The package file is read from the current working directory.
pub fn package_filepath() -> PathBuf {
    PathBuf::from(PACKAGE_FILENAME)
}

/// The index file location: `MYXA_INDEX` if set, otherwise a per-user
/// default under the system temp directory (created on demand).
pub fn index_filepath() -> Result<PathBuf, UserError> {
    if let Some(path) = env::var_os(INDEX_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let dir = env::temp_dir().join("myxa");
    fs::create_dir_all(&dir).map_err(|source| UserError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir.join("index.json"))
}
