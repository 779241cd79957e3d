//! HTTP handler and error mapping for the validation endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use docval_core::{Catalog, ValidationReport, Validator};
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::boundary::RequestValidator;
use crate::config::ServerConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub validator: Validator,
    pub requests: Arc<RequestValidator>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, config: &ServerConfig) -> Self {
        let requests = Arc::new(RequestValidator::new(&catalog));
        let validator = Validator::new(catalog)
            .with_runner(config.runner())
            .with_deadline(config.deadline());
        Self {
            validator,
            requests,
        }
    }
}

/// JSON error body: `{ "statusCode", "error", "message" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

/// An error response from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<docval_core::Error> for ApiError {
    fn from(err: docval_core::Error) -> Self {
        let status = match &err {
            docval_core::Error::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// `POST <route>`: validate a document against the selected checks.
pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("validate", %request_id);

    let mut response = match handle(state, payload).instrument(span).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => err.into_response(),
    };
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn handle(
    state: AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ValidationReport, ApiError> {
    let Json(body) = payload?;

    let request = state.requests.validate(body).map_err(|messages| {
        tracing::debug!(?messages, "Rejected request body");
        ApiError::bad_request(messages.join(", "))
    })?;

    let report = state.validator.validate_request(request).await.map_err(|e| {
        tracing::warn!(error = %e, "Validation failed");
        ApiError::from(e)
    })?;
    Ok(report)
}
