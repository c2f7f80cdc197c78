use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use xvs_types::VariableMap;

use crate::error::{SyncError, SyncResult};

/// Load the local variables file.
///
/// The path must exist and must not be a directory; each is reported as its
/// own error before the content is read.
pub fn load(path: &Path) -> SyncResult<VariableMap> {
    tracing::debug!("input file is '{}'", path.display());

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == IoErrorKind::NotFound => {
            return Err(SyncError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(SyncError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if metadata.is_dir() {
        return Err(SyncError::NotAFile(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let vars = VariableMap::from_yaml_str(&text).map_err(|source| SyncError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded {} variables from '{}'", vars.len(), path.display());
    Ok(vars)
}
