use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to HTTP clients as `{success, info}` JSON bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected before anything was sent to the controller.
    #[error("{0}")]
    Validation(String),

    /// The controller call itself failed.
    #[error(transparent)]
    Upstream(#[from] cmsgate_api::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(err) if err.is_auth() => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "info": self.to_string() }));
        (self.status(), body).into_response()
    }
}
