use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::domain::reference::error::ReferenceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Body parsing error: {0}")]
    BodyParsingError(String),

    #[error("Upstream API error: {0}")]
    UpstreamApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ReferenceError> for AppError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::Fetch { .. } => AppError::UpstreamApiError(err.to_string()),
            ReferenceError::UnknownType(_) | ReferenceError::NotRegistered(_) => {
                AppError::NotFound(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::BodyParsingError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::reference_type::ReferenceType;

    #[test]
    fn reference_errors_map_to_status() {
        let fetch = AppError::from(ReferenceError::Fetch {
            reference_type: ReferenceType::Project,
            message: "timeout".into(),
        });
        assert_eq!(fetch.into_response().status(), StatusCode::BAD_GATEWAY);

        let unknown = AppError::from(ReferenceError::UnknownType("galaxy".into()));
        assert_eq!(unknown.into_response().status(), StatusCode::NOT_FOUND);

        let bad_body = AppError::BodyParsingError("expected object".into());
        assert_eq!(bad_body.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
