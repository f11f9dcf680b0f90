//! Folder Scanning Service
//!
//! Lists the direct regular files of a folder and keys them by stem (file
//! name with its final extension stripped). Callers validate the folder
//! before invoking the scan.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Scan a folder's direct regular files into a stem → path map
///
/// Subdirectories are ignored. When two files share a stem the later
/// directory entry wins; directory order is unspecified.
pub fn scan_folder(folder: &Path) -> Result<HashMap<String, PathBuf>> {
    let mut files = HashMap::new();

    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!("Skipping non-UTF-8 file name in {}", folder.display());
            continue;
        };

        files.insert(stem.to_string(), path);
    }

    tracing::debug!("Scanned {} file(s) in {}", files.len(), folder.display());
    Ok(files)
}
