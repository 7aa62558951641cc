pub mod walker;

pub use walker::{collect_files, is_generated, FileFilter, FileWalker};

use crate::errors::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system("Failed to read file", path, e))
}

/// Replace `path` with `content` through a sibling temporary file and a
/// rename, keeping the original permissions.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let permissions = fs::metadata(path)
        .map(|metadata| metadata.permissions())
        .ok();

    let tmp = temp_path(path);
    fs::write(&tmp, content)
        .map_err(|e| Error::file_system("Failed to write temporary file", &tmp, e))?;
    if let Some(permissions) = permissions {
        if let Err(e) = fs::set_permissions(&tmp, permissions) {
            log::warn!("Failed to copy permissions to {}: {}", tmp.display(), e);
        }
    }

    if let Err(e) = fs::rename(&tmp, path) {
        // Best effort cleanup.
        let _ = fs::remove_file(&tmp);
        return Err(Error::file_system("Failed to replace file", path, e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.gomsort.tmp", std::process::id()));
    path.with_file_name(name)
}
