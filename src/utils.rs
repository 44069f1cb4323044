use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::constants::{TEMP_UPLOAD_PREFIX, UPLOADS_PREFIX};

/// Flat directory backing every uploaded file.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    /// Creates the directory (and parents) if it does not exist yet.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if !root.exists() {
            log::info!("## Creating upload dir: {}", root.display());
            fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scratch file inside the upload dir; its dot prefix never survives
    /// `secure_filename`, so it cannot be downloaded while in flight.
    pub fn temp_file(&self) -> io::Result<NamedTempFile> {
        tempfile::Builder::new().prefix(TEMP_UPLOAD_PREFIX).tempfile_in(&self.root)
    }

    /// Absolute-or-relative location of `filename` inside the upload dir.
    /// Callers pass names that already went through `secure_filename`.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

/// Public URL path under which an uploaded file is served.
pub fn public_path(filename: &str) -> String {
    format!("{}/{}", UPLOADS_PREFIX, filename)
}

/// Reduces a client supplied name to a plain, single segment file name.
///
/// Path separators act as word breaks, whitespace runs collapse to `_`,
/// anything outside `[A-Za-z0-9._-]` is dropped and leading/trailing
/// dots and underscores are trimmed. Returns `None` when nothing is left.
pub fn secure_filename(name: &str) -> Option<String> {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
