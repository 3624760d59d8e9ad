use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::error::Error as StdError;

use crate::booking;

/// An error response. `detail` is shown to clients for 4xx errors only; for
/// server faults it is logged and the client gets the bare title.
#[derive(Debug)]
pub struct Error {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<Box<dyn StdError + Send + Sync>>,
}

#[derive(Serialize)]
struct SerializableError {
    status: u16,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl Error {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Not found".to_string(),
            detail: None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let detail = if self.status.is_server_error() {
            if let Some(detail) = &self.detail {
                tracing::error! {status = %self.status, %detail, "{}", self.title};
            }
            None
        } else {
            self.detail.map(|e| e.to_string())
        };
        let err = SerializableError {
            status: u16::from(self.status),
            title: self.title,
            detail,
        };
        (self.status, Json(err)).into_response()
    }
}

impl From<booking::Error> for Error {
    fn from(value: booking::Error) -> Self {
        match value {
            booking::Error::NotFound { .. } => Error::not_found(),
            booking::Error::Validation(_) => Self {
                status: StatusCode::BAD_REQUEST,
                title: "Invalid form data".to_string(),
                detail: Some(value.into()),
            },
            booking::Error::IntegrityViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                title: "Unresolvable reference".to_string(),
                detail: Some(value.into()),
            },
            booking::Error::Storage(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                title: "Internal server error".to_string(),
                detail: Some(value.into()),
            },
        }
    }
}
