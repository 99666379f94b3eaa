//! Rewrite endpoints: JSON body and file upload

use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    routing::post,
    Extension, Router,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::api::middleware::RequestId;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, RewriteEmailRequest, RewriteEmailResponse, RewriteMetadata};
use crate::domain::extraction::IngestRequest;
use crate::domain::rewrite::{parse_focus_areas, RewriteOutcome, RewriteRequest, Tone};
use crate::domain::validation::{strip_control_chars, validate_request_text, ContentRole};
use crate::infrastructure::batch::save_output_file;
use crate::infrastructure::extraction::detect_kind;

/// Prefix of files written for JSON rewrites with `save_output`
const OUTPUT_PREFIX: &str = "rewritten_email";

pub fn create_rewrite_router() -> Router<AppState> {
    Router::new()
        .route("/rewrite", post(rewrite_email))
        .route("/rewrite-upload", post(rewrite_upload))
}

pub(super) fn parse_tone(raw: Option<&str>) -> Result<Tone, ApiError> {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tone) => tone
            .parse()
            .map_err(|e| ApiError::from(e).with_param("tone")),
        None => Ok(Tone::default()),
    }
}

fn build_metadata(
    outcome: &RewriteOutcome,
    start: Instant,
    correlation_id: String,
    request: &RewriteRequest,
) -> RewriteMetadata {
    RewriteMetadata {
        timestamp: Utc::now(),
        processing_time: start.elapsed().as_secs_f64(),
        tokens_used: outcome.usage.total_tokens,
        estimated_cost_usd: outcome.cost_usd,
        model: outcome.model.clone(),
        correlation_id,
        target_audience: request.target_audience.clone(),
        tone: request.tone,
        source_file: None,
    }
}

/// POST /rewrite
pub async fn rewrite_email(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(body): Json<RewriteEmailRequest>,
) -> Result<Json<RewriteEmailResponse>, ApiError> {
    let start = Instant::now();
    let correlation_id = body
        .correlation_id
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| request_id.map(|Extension(id)| id.0))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let tone = parse_tone(body.tone.as_deref())?;
    let email_text =
        validate_request_text("email_text", &body.email_text, ContentRole::Email, &state.validator)?;
    let target_audience = validate_request_text(
        "target_audience",
        &body.target_audience,
        ContentRole::Context,
        &state.validator,
    )?;

    let request = RewriteRequest::new(email_text, target_audience)
        .with_tone(tone)
        .with_focus_areas(body.focus_areas.unwrap_or_default())
        .with_additional_instructions(body.additional_instructions.map(|i| strip_control_chars(&i)));

    debug!(correlation_id = %correlation_id, tone = %tone, "Rewriting email");

    let outcome = state.rewriter.rewrite(request.clone()).await?;
    let metadata = build_metadata(&outcome, start, correlation_id.clone(), &request);

    let saved_to = if body.save_output {
        let path = save_output_file(&outcome.content, &state.folders.output_dir, OUTPUT_PREFIX)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to save output: {}", e)))?;
        Some(path.display().to_string())
    } else {
        None
    };

    info!(
        correlation_id = %correlation_id,
        processing_time = metadata.processing_time,
        tokens = metadata.tokens_used,
        cost_usd = metadata.estimated_cost_usd,
        "Email rewritten"
    );

    Ok(Json(
        RewriteEmailResponse::from_outcome(outcome, metadata).with_saved_to(saved_to),
    ))
}

/// Fields collected from a `/rewrite-upload` form
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Option<Vec<u8>>,
    target_audience: Option<String>,
    tone: Option<String>,
    focus_areas: Option<String>,
    additional_instructions: Option<String>,
    correlation_id: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::multipart("Failed to read multipart field", e))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            form.file_name = field.file_name().map(str::to_string);
            form.content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::multipart("Failed to read file", e))?;
            form.bytes = Some(bytes.to_vec());
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::multipart(&format!("Failed to read field '{}'", name), e))?;

        match name.as_str() {
            "target_audience" => form.target_audience = Some(value),
            "tone" => form.tone = Some(value),
            "focus_areas" => form.focus_areas = Some(value),
            "additional_instructions" => form.additional_instructions = Some(value),
            "correlation_id" => form.correlation_id = Some(value),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// POST /rewrite-upload
pub async fn rewrite_upload(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    multipart: Multipart,
) -> Result<Json<RewriteEmailResponse>, ApiError> {
    let start = Instant::now();
    let form = read_upload_form(multipart).await?;

    let correlation_id = form
        .correlation_id
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| request_id.map(|Extension(id)| id.0))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let bytes = form
        .bytes
        .ok_or_else(|| ApiError::bad_request("No file provided").with_param("file"))?;
    let target_audience = form
        .target_audience
        .map(|t| strip_control_chars(&t).trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request("target_audience is required").with_param("target_audience")
        })?;
    let tone = parse_tone(form.tone.as_deref())?;

    state.validator.check_size(bytes.len())?;
    let kind = detect_kind(form.file_name.as_deref(), form.content_type.as_deref())?;

    let mut ingest = IngestRequest::new(bytes, kind);
    if let Some(ref name) = form.file_name {
        ingest = ingest.with_file_name(name.clone());
    }

    info!(
        correlation_id = %correlation_id,
        file = form.file_name.as_deref().unwrap_or("unnamed"),
        kind = %kind,
        bytes = ingest.byte_len(),
        "Processing uploaded file"
    );

    let document = state.extractors.extract_blocking(ingest).await?;
    state
        .validator
        .validate(document.text(), ContentRole::Email)
        .into_result()
        .map_err(|e| ApiError::from(e).with_param("file"))?;

    let request = RewriteRequest::new(document.into_text(), target_audience)
        .with_tone(tone)
        .with_focus_areas(
            form.focus_areas
                .as_deref()
                .map(parse_focus_areas)
                .unwrap_or_default(),
        )
        .with_additional_instructions(form.additional_instructions.map(|i| strip_control_chars(&i)));

    let outcome = state.rewriter.rewrite(request.clone()).await?;
    let mut metadata = build_metadata(&outcome, start, correlation_id.clone(), &request);
    metadata.source_file = form.file_name;

    info!(
        correlation_id = %correlation_id,
        processing_time = metadata.processing_time,
        tokens = metadata.tokens_used,
        cost_usd = metadata.estimated_cost_usd,
        "Uploaded email rewritten"
    );

    Ok(Json(RewriteEmailResponse::from_outcome(outcome, metadata)))
}
