use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Users service error variants.
#[derive(Debug, thiserror::Error)]
pub enum UsersServiceError {
    #[error("Invalid user ID")]
    InvalidUserId,
    #[error("Invalid request payload")]
    InvalidPayload(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl UsersServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUserId | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for UsersServiceError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected path parameter");
        Self::InvalidUserId
    }
}

impl From<JsonRejection> for UsersServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for UsersServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            }
            Self::InvalidPayload(detail) => {
                tracing::debug!(%detail, kind = self.kind(), "client error");
            }
            _ => tracing::debug!(kind = self.kind(), "client error"),
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
