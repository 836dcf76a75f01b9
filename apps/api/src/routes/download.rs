use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{download_basename, resolve_download};

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// RFC 5987 `attr-char`: everything else in `filename*` is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// GET /download/:filename
///
/// Only the final path component of `filename` is used, so the lookup never
/// leaves the output directory.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let shown = download_basename(&filename).unwrap_or_default();
    let path = resolve_download(&state.config.output_dir, &filename)
        .ok_or_else(|| AppError::FileNotFound(shown.clone()))?;

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(AppError::FileNotFound(shown)),
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Error serving file {shown}: {e}")))?;

    info!("Serving download {}", shown);

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&shown)),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition. Names that are not plain ASCII get a stripped
/// `filename` fallback plus the exact name as `filename*=UTF-8''...`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && !matches!(c, '"' | '\\'))
        .collect();

    if fallback == filename {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!(
            "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
            utf8_percent_encode(filename, ATTR_CHAR)
        )
    }
}
