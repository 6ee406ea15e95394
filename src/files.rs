use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ViewerError;

pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "bmp", "cur", "gif", "icns", "ico", "jfif", "jpeg", "jpg", "pbm", "pdf", "pgm", "png", "ppm",
    "svg", "svgz", "tga", "tif", "tiff", "wbmp", "webp", "xbm", "xpm",
];

/// One image file. Equality and ordering use the normalized key, the real
/// path is kept for filesystem access.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    path: PathBuf,
    key: String,
}

impl ImageEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = absolute_path(&path.into());
        let key = normalize_path(&path);
        Self { path, key }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl PartialEq for ImageEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ImageEntry {}

/// Result of scanning the folder around a start file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pub entries: Vec<ImageEntry>,
    pub start_index: usize,
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Identity key of an absolute path. Case and separators are folded only on
/// Windows, where the filesystem treats them as equal.
#[cfg(windows)]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

#[cfg(not(windows))]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lists the supported siblings of `path`, sorted by normalized path, and
/// locates `path` among them.
pub fn resolve(path: &Path) -> Result<FileSet, ViewerError> {
    let target = ImageEntry::new(path);
    let Some(dir) = target.path().parent() else {
        return Err(ViewerError::NotFound(target.path().to_path_buf()));
    };

    let listing = fs::read_dir(dir).map_err(|err| {
        log::warn!("Could not list {}: {err}", dir.display());
        ViewerError::NotFound(target.path().to_path_buf())
    })?;

    let mut entries = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|candidate| is_supported(candidate) && candidate.is_file())
        .map(ImageEntry::new)
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let start_index = entries
        .iter()
        .position(|entry| entry.key == target.key)
        .ok_or_else(|| ViewerError::NotFound(target.path().to_path_buf()))?;

    log::info!(
        "Scanned {}: {} image(s), starting at {}",
        dir.display(),
        entries.len(),
        start_index
    );
    Ok(FileSet {
        entries,
        start_index,
    })
}
