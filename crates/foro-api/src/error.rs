use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use foro_db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::Duplicate(msg) => ApiError::Duplicate(msg),
            DbError::InvalidInput(msg) => ApiError::Validation(msg),
            other => {
                error!("Database error: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_map_to_statuses() {
        let cases = [
            (DbError::not_found("topic", 9), StatusCode::NOT_FOUND),
            (DbError::Duplicate("x".into()), StatusCode::CONFLICT),
            (DbError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (DbError::LockPoisoned("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (db_err, status) in cases {
            assert_eq!(ApiError::from(db_err).into_response().status(), status);
        }
    }
}
