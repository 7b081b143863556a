use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sweep_core::SweepError;

/// `<name>.old` alongside the original file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".old");
    PathBuf::from(name)
}

/// Renames each `dir/name` to `dir/name.old`, ignoring every failure.
///
/// Returns the files that were actually moved.
pub fn backup_artifacts(dir: &Path, names: &[PathBuf]) -> Vec<PathBuf> {
    let mut moved = Vec::new();
    for name in names {
        let source = dir.join(name);
        let target = backup_path(&source);
        match fs::rename(&source, &target) {
            Ok(()) => {
                tracing::info!(from = %source.display(), to = %target.display(), "artifact backed up");
                moved.push(source);
            }
            Err(err) => {
                tracing::debug!(path = %source.display(), error = %err, "artifact backup skipped");
            }
        }
    }
    moved
}

/// Appends the contents of `source` to `aggregate`, creating the aggregate
/// if needed. A missing source is skipped and reported as `Ok(0)`.
pub fn append_log_fragment(source: &Path, aggregate: &Path) -> Result<u64, SweepError> {
    let fragment = match fs::read(source) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %source.display(), "no log fragment to append");
            return Ok(0);
        }
        Err(err) => return Err(SweepError::io("log_read", source, err)),
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(aggregate)
        .map_err(|err| SweepError::io("log_open", aggregate, err))?;
    file.write_all(&fragment)
        .map_err(|err| SweepError::io("log_append", aggregate, err))?;
    Ok(fragment.len() as u64)
}
