//! Request/response bodies and the error-to-status mapping for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use core_dba::Error;

/// POST /api/generate-schema body. The field is optional so an absent key
/// answers 400 with a useful message instead of a framework rejection.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePayload {
    pub prompt: Option<String>,
}

/// POST /api/chat body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatPayload {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/generate-diagram body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramPayload {
    pub diagram_string: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramResponse {
    pub validated_diagram: String,
}

/// Maps failures onto HTTP statuses: caller mistakes are 400s, everything
/// else from the pipeline is a 500. The auth middleware alone emits 401.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required body field was absent.
    #[error("{0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Pipeline(#[from] Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(Error::InvalidInput | Error::InvalidDiagram(_)) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("request failed: {}", message);
        } else {
            tracing::debug!("request rejected: {}", message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
