//! Output storage: filename derivation, document persistence and download lookup.
//!
//! The output directory is flat and append-only. Filenames carry a
//! second-resolution timestamp, so two identical requests within the same
//! second map to the same file and the later write wins.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::info;

use crate::document::docx::{to_docx_bytes, ExportError};
use crate::document::Document;

pub const DOCX_EXTENSION: &str = "docx";
const FALLBACK_NAME: &str = "document";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file: {0}")]
    Missing(PathBuf),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Keeps alphanumerics, spaces, hyphens and underscores, trims trailing
/// whitespace and turns spaces into underscores. Empty results become `document`.
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = kept.trim_end().replace(' ', "_");
    if safe.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        safe
    }
}

/// `{doc_type}_{sanitized_name}_{template}_{YYYYMMDD_HHMMSS}.docx` for the current local time.
pub fn safe_filename(name: &str, doc_type: &str, template: &str) -> String {
    safe_filename_at(name, doc_type, template, Local::now().naive_local())
}

pub fn safe_filename_at(
    name: &str,
    doc_type: &str,
    template: &str,
    timestamp: NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        doc_type,
        sanitize_name(name),
        template,
        timestamp.format(TIMESTAMP_FORMAT),
        DOCX_EXTENSION
    )
}

/// Creates the output directory if needed. Called once at startup and again
/// before every write.
pub async fn ensure_output_dir(dir: &Path) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| StorageError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// Serializes `doc` to `dir/filename` and verifies the file exists afterwards.
pub async fn persist(doc: &Document, dir: &Path, filename: &str) -> Result<PathBuf, StorageError> {
    ensure_output_dir(dir).await?;

    let bytes = to_docx_bytes(doc)?;
    let path = dir.join(filename);

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(StorageError::Missing(path));
    }

    let shown = tokio::fs::canonicalize(&path)
        .await
        .unwrap_or_else(|_| path.clone());
    info!("Document saved: {}", shown.display());
    Ok(path)
}

/// Reduces a requested download name to its final path component.
/// Returns `None` for names with no usable component (`..`, `/`, empty).
pub fn download_basename(requested: &str) -> Option<String> {
    // Treat both separators as path delimiters regardless of platform.
    let last = requested.rsplit(|c: char| c == '/' || c == '\\').next()?;
    let name = Path::new(last).file_name()?.to_str()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

/// Path inside `dir` for a download request, or `None` if the name is unusable.
pub fn resolve_download(dir: &Path, requested: &str) -> Option<PathBuf> {
    download_basename(requested).map(|name| dir.join(name))
}
