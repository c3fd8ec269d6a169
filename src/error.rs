//! Error types for request decoding.
//!
//! [`RequestError`] is the only failure the sync core reports. The HTTP
//! dispatcher turns it into a `400 Bad Request` through its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A request payload that does not carry the fields its action needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A required key is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A key is present but holds the wrong kind of value.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
