//! Server configuration.
//!
//! The staging directory and the allowed-extension set are explicit values
//! injected into the request handlers, and staged files get a per-request
//! uuid prefix so concurrent uploads of the same filename never collide.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Extensions accepted by the upload endpoint, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xls", "xlsx"];

/// Where uploads are staged and which files are accepted.
#[derive(Debug, Clone)]
pub struct StagingConfig {
    /// Directory uploads are written to before parsing.
    pub staging_dir: PathBuf,
}

impl StagingConfig {
    /// Create a config with an explicit staging directory.
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    /// Extract the lowercase extension of a filename, if any.
    pub fn extension(filename: &str) -> Option<String> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Check whether a filename carries an accepted extension.
    pub fn allowed_file(filename: &str) -> bool {
        Self::extension(filename)
            .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Collision-safe staging path for one upload.
    pub fn staged_path(&self, filename: &str) -> PathBuf {
        let safe_name = sanitize_filename(filename);
        self.staging_dir
            .join(format!("{}_{}", Uuid::new_v4(), safe_name))
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            staging_dir: std::env::temp_dir().join("datascope-uploads"),
        }
    }
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Path separators and anything outside `[A-Za-z0-9._-]` are replaced with
/// underscores, so the staged path always stays inside the staging dir.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}
