use axum::http::StatusCode;
use thiserror::Error;

/// A reminder log that cannot be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    #[error("reminder log {id}: invalid occurredAt timestamp '{value}'")]
    Timestamp { id: String, value: String },

    #[error("reminder log {id}: invalid status '{value}' (expected taken, missed or skipped)")]
    Status { id: String, value: String },
}

impl MalformedInputError {
    pub fn id(&self) -> &str {
        match self {
            Self::Timestamp { id, .. } | Self::Status { id, .. } => id,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

// Logs only reach aggregation from the server's own store.
impl From<MalformedInputError> for AppError {
    fn from(err: MalformedInputError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
