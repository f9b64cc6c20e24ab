use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pneuscope_probe::Error as ProbeError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Assessment(#[from] ProbeError),

    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Assessment(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Assessment(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidBody { status, .. } => *status,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Assessment(e) => e.kind(),
            AppError::InvalidBody { .. } => "invalid_request",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();
        let error_message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %error_message, error_type, "request failed");
        } else {
            tracing::debug!(error = %error_message, error_type, "request rejected");
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": error_message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        for e in [
            ProbeError::EmptyInput,
            ProbeError::InsufficientData { got: 2, required: 5 },
            ProbeError::InvalidSampleRate(0.0),
        ] {
            assert_eq!(AppError::from(e).status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn engine_failures_map_to_server_error() {
        let err = AppError::from(ProbeError::Computation("non-finite mean (NaN)".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "computation_error");
    }
}
