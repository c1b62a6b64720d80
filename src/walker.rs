// Directory walker: picks the image files directly inside a directory
// and hands them to the uploader one at a time.

use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::api::UploadClient;
use crate::error::UploadError;
use crate::ui;

/// Extensions uploaded when the caller does not pass a list.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Case-insensitive extension allow-list. Entries are stored lower-cased
/// with a leading dot, so `JPG`, `jpg` and `.jpg` are the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        ExtensionFilter::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .filter_map(|e| normalize(e.as_ref()))
            .collect();
        ExtensionFilter { extensions }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extensions in sorted order, for display.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| normalize(&e.to_string_lossy()))
            .map_or(false, |e| self.extensions.contains(&e))
    }
}

fn normalize(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        None
    } else {
        Some(format!(".{}", ext.to_lowercase()))
    }
}

/// Tally of a directory run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectoryReport {
    pub succeeded: usize,
    pub total: usize,
}

impl DirectoryReport {
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Regular files directly inside `dir` whose extension passes `filter`,
/// sorted by path. Subdirectories are not descended into.
pub fn collect_matching(dir: &Path, filter: &ExtensionFilter) -> Result<Vec<PathBuf>, UploadError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| UploadError::Other(format!("Failed to read {}: {}", dir.display(), e)))?;
    Ok(select_files(dir, entries.map(|e| e.map(|e| e.path())), filter))
}

/// Keep the regular files passing `filter`. Unreadable entries are logged
/// and skipped.
fn select_files<I>(dir: &Path, entries: I, filter: &ExtensionFilter) -> Vec<PathBuf>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if !path.is_file() {
            debug!("Skipping non-file {}", path.display());
            continue;
        }
        if filter.matches(&path) {
            files.push(path);
        } else {
            debug!("Skipping {} (extension not allowed)", path.display());
        }
    }
    files.sort();
    files
}

/// Upload every matching file in `dir`, sequentially, without stopping on
/// the first failure. Each outcome is printed as it happens, followed by a
/// final tally. A run with no matching files makes no requests.
pub fn upload_directory(
    client: &UploadClient,
    dir: &Path,
    filter: &ExtensionFilter,
) -> Result<DirectoryReport, UploadError> {
    if !dir.exists() {
        return Err(UploadError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(UploadError::NotADirectory(dir.to_path_buf()));
    }

    let files = collect_matching(dir, filter)?;
    if files.is_empty() {
        ui::print_no_matches(dir, filter);
        return Ok(DirectoryReport::default());
    }

    info!("Found {} file(s) in {}", files.len(), dir.display());
    ui::print_found(files.len(), dir);

    let mut report = DirectoryReport {
        succeeded: 0,
        total: files.len(),
    };
    for file in &files {
        let outcome = client.upload_file(file);
        ui::print_outcome(file, &outcome);
        if outcome.is_ok() {
            report.succeeded += 1;
        }
    }

    ui::print_summary(&report);
    Ok(report)
}
