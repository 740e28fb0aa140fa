//! Axum route handlers for the CV API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analysis::or_placeholder;
use crate::ats::{compute_score, ScoreReport};
use crate::errors::AppError;
use crate::extraction::{self, DocumentKind, ExtractionError};
use crate::state::AppState;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "cv";
/// Multipart field carrying the optional job description.
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
/// Characters of extracted text echoed back in the analyze response.
const PREVIEW_CHARS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeData {
    pub file_name: String,
    pub ats_score: ScoreReport,
    pub ai_analysis: String,
    pub extracted_text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareData {
    pub file_name: String,
    pub ats_score: ScoreReport,
    pub comparison_analysis: String,
    pub job_description: String,
    pub timestamp: DateTime<Utc>,
}

/// A validated upload: allowed document kind, within the size limit.
struct CvUpload {
    file_name: String,
    kind: DocumentKind,
    bytes: Bytes,
    job_description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/cv/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AnalyzeData>>, AppError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    let cv_text = extract(upload.kind, upload.bytes).await?;

    let job_description = upload.job_description.as_deref();
    let ats_score = compute_score(&cv_text, job_description);
    info!(
        file_name = %upload.file_name,
        kind = upload.kind.as_str(),
        total_score = ats_score.total_score,
        grade = ?ats_score.grade,
        "CV scored"
    );

    let ai_analysis = or_placeholder(state.analyst.analyze(&cv_text).await);

    Ok(ApiResponse::ok(AnalyzeData {
        file_name: upload.file_name,
        ats_score,
        ai_analysis,
        extracted_text: preview(&cv_text),
        timestamp: Utc::now(),
    }))
}

/// POST /api/cv/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<CompareData>>, AppError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    let job_description = upload
        .job_description
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    let cv_text = extract(upload.kind, upload.bytes).await?;

    let ats_score = compute_score(&cv_text, Some(&job_description));
    info!(
        file_name = %upload.file_name,
        kind = upload.kind.as_str(),
        total_score = ats_score.total_score,
        keywords = ats_score.breakdown.keywords,
        grade = ?ats_score.grade,
        "CV compared against job description"
    );

    let comparison_analysis =
        or_placeholder(state.analyst.compare(&cv_text, &job_description).await);

    Ok(ApiResponse::ok(CompareData {
        file_name: upload.file_name,
        ats_score,
        comparison_analysis,
        job_description,
        timestamp: Utc::now(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload plumbing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the multipart form. The file type is checked from its name before the
/// body is read; blank job descriptions count as absent.
async fn read_upload(multipart: &mut Multipart, limit_bytes: usize) -> Result<CvUpload, AppError> {
    let mut file: Option<(String, DocumentKind, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_bytes))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if file_name.is_empty() {
                    return Err(AppError::Validation("Uploaded file has no name".to_string()));
                }
                let kind = DocumentKind::from_file_name(&file_name)
                    .ok_or_else(|| AppError::UnsupportedFileType(file_name.clone()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, limit_bytes))?;
                if bytes.len() > limit_bytes {
                    return Err(AppError::PayloadTooLarge { limit_bytes });
                }
                file = Some((file_name, kind, bytes));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit_bytes))?;
                job_description = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {} // unknown fields are ignored
        }
    }

    let (file_name, kind, bytes) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    Ok(CvUpload {
        file_name,
        kind,
        bytes,
        job_description,
    })
}

fn multipart_error(err: MultipartError, limit_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit_bytes }
    } else {
        AppError::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}

/// Runs the CPU-bound extraction on the blocking pool.
async fn extract(kind: DocumentKind, bytes: Bytes) -> Result<String, AppError> {
    let joined = tokio::task::spawn_blocking(move || extraction::extract_text(kind, &bytes)).await;
    match joined {
        Ok(result) => result.map_err(AppError::from),
        Err(e) if e.is_panic() => Err(ExtractionError::ParserPanic(kind.as_str()).into()),
        Err(e) => Err(AppError::Internal(anyhow::anyhow!("extraction task failed: {e}"))),
    }
}

/// First `PREVIEW_CHARS` characters, with "..." appended when truncated.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
