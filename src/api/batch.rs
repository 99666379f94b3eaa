//! Folder processing and folder inspection endpoints

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    routing::{get, post},
    Extension, Form, Router,
};
use tracing::info;

use super::rewrite::parse_tone;
use crate::api::middleware::RequestId;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, FolderStatsResponse, Json, ProcessFolderRequest, ProcessFolderResponse,
    SupportedFormatsResponse,
};
use crate::domain::validation::strip_control_chars;
use crate::infrastructure::folder_stats::collect_folder_stats;

/// Routes that trigger batch runs; rate limited by the caller
pub fn create_batch_router() -> Router<AppState> {
    Router::new().route("/process-input-folder", post(process_input_folder))
}

/// Read-only folder routes
pub fn create_folders_router() -> Router<AppState> {
    Router::new()
        .route("/folder-stats", get(folder_stats))
        .route("/supported-formats", get(supported_formats))
}

/// Accept JSON, urlencoded or multipart bodies
async fn read_process_request(
    request: Request,
    state: &AppState,
) -> Result<ProcessFolderRequest, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let Json(body) = Json::<ProcessFolderRequest>::from_request(request, state).await?;
        return Ok(body);
    }

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut body = ProcessFolderRequest {
            target_audience: String::new(),
            tone: None,
        };
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::multipart("Failed to read multipart field", e))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::multipart(&format!("Failed to read field '{}'", name), e))?;
            match name.as_str() {
                "target_audience" => body.target_audience = value,
                "tone" => body.tone = Some(value),
                _ => {}
            }
        }
        return Ok(body);
    }

    let Form(body) = Form::<ProcessFolderRequest>::from_request(request, state)
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()).with_param("target_audience"))?;
    Ok(body)
}

/// POST /process-input-folder
pub async fn process_input_folder(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    request: Request,
) -> Result<Json<ProcessFolderResponse>, ApiError> {
    let request_id = request_id
        .map(|Extension(id)| id.0)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let body = read_process_request(request, &state).await?;
    let target_audience = strip_control_chars(&body.target_audience).trim().to_string();
    if target_audience.is_empty() {
        return Err(
            ApiError::bad_request("target_audience is required").with_param("target_audience")
        );
    }
    let tone = parse_tone(body.tone.as_deref())?;

    info!(
        request_id = %request_id,
        input_dir = %state.folders.input_dir.display(),
        "Processing input folder"
    );

    let dispatcher = state.batch_dispatcher(&target_audience, tone);
    let report = state
        .batch_processor
        .process_folder(&state.folders.input_dir, &dispatcher)
        .await?;

    Ok(Json(ProcessFolderResponse::new(request_id, report)))
}

/// GET /folder-stats
pub async fn folder_stats(
    State(state): State<AppState>,
) -> Result<Json<FolderStatsResponse>, ApiError> {
    let input_folder = collect_folder_stats(&state.folders.input_dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read input folder: {}", e)))?;
    let output_folder = collect_folder_stats(&state.folders.output_dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read output folder: {}", e)))?;

    Ok(Json(FolderStatsResponse {
        input_folder,
        output_folder,
    }))
}

/// GET /supported-formats
pub async fn supported_formats(State(state): State<AppState>) -> Json<SupportedFormatsResponse> {
    Json(SupportedFormatsResponse::for_limit(
        state.validator.limits().max_bytes,
    ))
}
