//! Definition file discovery inside package folders.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Lists all XML files under a directory, recursively.
///
/// Symlinked folders are not followed, so a link pointing back into the
/// package cannot list the same file twice. Files come back sorted by path
/// so load order is stable across platforms.
pub fn list_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| IngestError::DirectoryRead {
            path: err.path().unwrap_or(dir).to_path_buf(),
            source: err.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        // Check for .xml extension (case-insensitive)
        let is_xml = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));

        if is_xml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
