//! Axum route handler for document analysis.

use std::io::Write;
use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

use super::evaluator::evaluate_sections;
use super::extract::extract_document_text;
use super::report::{build_report, Report};
use super::sections::{identify_sections, RequiredSection};

/// POST /api/analyze
///
/// Multipart upload of a 510(k) PDF. Spools the upload to a uniquely named
/// temp file (removed on drop on every exit path), then runs the pipeline:
/// extract text → identify sections → evaluate each section → aggregate.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Report>, AppError> {
    let started = Instant::now();

    let (filename, data) = read_upload(&mut multipart).await?;
    if !is_pdf_filename(&filename) {
        return Err(AppError::Validation("Only PDF files are supported".to_string()));
    }

    let mut upload = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile_in(&state.config.upload_dir)
        .map_err(|e| AppError::Internal(e.into()))?;
    upload
        .write_all(&data)
        .map_err(|e| AppError::Internal(e.into()))?;

    // pdf parsing is CPU-bound; keep it off the runtime workers
    let path = upload.path().to_path_buf();
    let text = tokio::task::spawn_blocking(move || extract_document_text(&path))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let extracted = identify_sections(&text);
    info!(
        "identified {}/{} required sections in {filename}",
        extracted.len(),
        RequiredSection::ALL.len()
    );

    let assessments = evaluate_sections(&state.llm, &extracted).await;
    let report = build_report(assessments, extracted.len(), started.elapsed());

    Ok(Json(report))
}

/// Pulls the uploaded file out of the multipart stream: the `file` field, or
/// failing that the first field that carries a filename.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") || field.file_name().is_some() {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            return Ok((filename, data));
        }
    }
    Err(AppError::Validation("Missing file field".to_string()))
}

fn is_pdf_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}
