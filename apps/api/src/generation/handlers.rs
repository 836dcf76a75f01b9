//! Axum route handlers for document generation.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::generation::cover_letter::{generate_cover_letter, CoverLetterRequest, CoverLetterResponse};
use crate::generation::resume::{generate_resume, ResumeRequest, ResumeResponse};
use crate::generation::DocumentKind;
use crate::state::AppState;

/// POST /generate-resume
///
/// Body: candidate record + `template` + `page_limit`.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    payload: Result<Json<ResumeRequest>, JsonRejection>,
) -> Result<Json<ResumeResponse>, AppError> {
    let Json(request) = payload?;

    generate_resume(state.generator.as_ref(), &state.config, request)
        .await
        .map(Json)
        .map_err(|e| AppError::generation(DocumentKind::Resume, e))
}

/// POST /generate-cover-letter
///
/// Body: candidate record + `company`, `position`, `job_description`, `interest`.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(request) = payload?;

    generate_cover_letter(state.generator.as_ref(), &state.config, request)
        .await
        .map(Json)
        .map_err(|e| AppError::generation(DocumentKind::CoverLetter, e))
}
