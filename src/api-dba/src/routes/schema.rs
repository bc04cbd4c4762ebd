use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use core_dba::{generate_schema, prepare_diagram};

use crate::models::{ApiError, DiagramPayload, DiagramResponse, GeneratePayload};
use crate::routes::AppState;

/// POST /api/generate-schema - Run the full description → schema pipeline.
///
/// One upstream attempt per request; a re-click in the UI is simply a new
/// request.
pub async fn post_generate_schema(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = payload.prompt.ok_or(ApiError::MissingField("Prompt is required"))?;

    let generated = generate_schema(state.llm.as_ref(), &prompt).await?;

    Ok((StatusCode::OK, Json(generated)))
}

/// POST /api/generate-diagram - Validate a Mermaid erDiagram string.
///
/// The generate-schema response already carries a diagram; this route
/// serves editor-initiated validation of hand-edited strings.
pub async fn post_validate_diagram(
    Json(payload): Json<DiagramPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let diagram_string = payload
        .diagram_string
        .ok_or(ApiError::MissingField("Diagram string is required"))?;

    let validated_diagram = prepare_diagram(&diagram_string)?;

    Ok((StatusCode::OK, Json(DiagramResponse { validated_diagram })))
}
