use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use threadist_core::{CoreError, ErrorExt, ErrorPayload};

/// Renders a [`CoreError`] as `{ "error": message }` with 404 or 500.
#[derive(Debug)]
pub struct ProxyError(pub CoreError);

impl From<CoreError> for ProxyError {
    fn from(error: CoreError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status == StatusCode::NOT_FOUND {
            self.0.log_warn();
        } else {
            self.0.log_error();
        }

        let body = ErrorPayload {
            error: self.0.response_message(),
        };
        (status, Json(body)).into_response()
    }
}
