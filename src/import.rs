use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{CatalogError, Result};
use crate::storage::AssetRepository;
use crate::storage::models::{Asset, NewAsset};
use crate::thumbnail::thumbnail_for;

#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub added: Vec<Asset>,
    pub skipped: usize,
    pub failed: Vec<ImportFailure>,
}

#[derive(Debug, Serialize)]
pub struct ImportFailure {
    pub path: String,
    pub error: String,
}

/// Builds the catalogue record for a file from its metadata.
pub fn describe_file(path: &Path) -> Result<NewAsset> {
    let meta = match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta,
        Ok(_) => return Err(CatalogError::FileNotFound(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CatalogError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(CatalogError::Io(e)),
    };

    let modified = meta.modified().map(to_utc).unwrap_or_else(|_| Utc::now());
    let created = meta.created().map(to_utc).unwrap_or(modified);
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let asset_type = path
        .extension()
        .map(|e| e.to_string_lossy().to_uppercase())
        .unwrap_or_default();

    Ok(NewAsset {
        name,
        file_path: utf8_path(path)?.to_string(),
        thumbnail_path: thumbnail_for(path),
        file_size: meta.len() as i64,
        date_created: created,
        date_modified: modified,
        asset_type,
        description: String::new(),
        category_id: None,
    })
}

/// Stored paths must round-trip to the file on disk, so lossy conversion is
/// refused.
fn utf8_path(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        CatalogError::InvalidInput(format!("path is not valid UTF-8: {}", path.display()))
    })
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Stored paths are absolute so the same file is never catalogued twice
/// under different spellings.
fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::FileNotFound(path.to_path_buf()),
        _ => CatalogError::Io(e),
    })
}

/// Adds one file. `Ok(None)` means the path was already catalogued.
pub fn add_file<S: AssetRepository>(storage: &S, path: &Path) -> Result<Option<Asset>> {
    let path = canonical(path)?;
    if storage.asset_exists(utf8_path(&path)?)? {
        debug!(path = %path.display(), "skipping catalogued file");
        return Ok(None);
    }
    let asset = describe_file(&path)?;
    storage.insert_asset(asset)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Adds every visible file under `dir`. Per-file failures are collected in
/// the report and never stop the import.
pub fn import_dir<S: AssetRepository>(storage: &S, dir: &Path, recursive: bool) -> Result<ImportReport> {
    let root = canonical(dir)?;
    if !root.is_dir() {
        return Err(CatalogError::InvalidInput(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    let mut report = ImportReport::default();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "could not read directory entry");
                report.failed.push(ImportFailure {
                    path: e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    error: e.to_string(),
                });
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if !entry.file_type().is_file() {
            debug!(path = %entry.path().display(), "skipping non-regular file");
            report.skipped += 1;
            continue;
        }
        match add_file(storage, entry.path()) {
            Ok(Some(asset)) => report.added.push(asset),
            Ok(None) => report.skipped += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "failed to add file");
                report.failed.push(ImportFailure {
                    path: entry.path().display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        dir = %root.display(),
        added = report.added.len(),
        skipped = report.skipped,
        failed = report.failed.len(),
        "import finished"
    );
    Ok(report)
}
