use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SiteError, io_error};

/// What a [`copy_tree`] call copied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    /// Directories created, the destination itself included.
    pub directories: usize,
}

/// Mirror `source` into `destination`.
///
/// The destination is deleted and recreated first, so nothing from a previous
/// run survives. Files and subdirectories are copied recursively.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<CopyReport, SiteError> {
    if !source.exists() {
        return Err(SiteError::MissingSource {
            path: source.to_path_buf(),
        });
    }

    if destination.exists() {
        log::warn!(
            "deleting and re-creating destination directory {}",
            destination.display()
        );
        fs::remove_dir_all(destination).map_err(io_error(destination))?;
    }

    let mut report = CopyReport::default();
    copy_dir(source, destination, &mut report)?;
    Ok(report)
}

fn copy_dir(source: &Path, destination: &Path, report: &mut CopyReport) -> Result<(), SiteError> {
    fs::create_dir_all(destination).map_err(io_error(destination))?;
    report.directories += 1;

    for path in sorted_entries(source)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = destination.join(name);

        if path.is_dir() {
            copy_dir(&path, &target, report)?;
        } else {
            fs::copy(&path, &target).map_err(io_error(&path))?;
            log::info!("copied {} to {}", path.display(), target.display());
            report.files += 1;
        }
    }

    Ok(())
}

/// Directory entries sorted by path, so runs are deterministic.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(dir))?;
    entries.sort();
    Ok(entries)
}
