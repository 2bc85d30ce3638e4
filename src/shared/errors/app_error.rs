use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::SerializationError(_) => "SERIALIZATION_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_)
            | AppError::SerializationError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => AppError::NotFound("Record not found in database".to_string()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let constraint = info.constraint_name().unwrap_or("unknown").to_string();
                AppError::Conflict(format!("Duplicate value violates {}", constraint))
            }
            Error::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                AppError::ValidationError(info.message().to_string())
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

// r2d2 `get` fails only after its connection timeout elapses
impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        log::warn!("Database pool error: {}", err);
        AppError::ServiceUnavailable("Database is temporarily unavailable".to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Upstream("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::Upstream("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            AppError::Upstream(format!("HTTP {}: {}", status, err))
        } else {
            AppError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::ValidationError(format!("Invalid UUID: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Infrastructure details stay in the log, not in the response body
        let message = match &self {
            AppError::DatabaseError(_)
            | AppError::SerializationError(_)
            | AppError::InternalError(_) => {
                log::error!("{}", self);
                "An internal error occurred".to_string()
            }
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::Upstream(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
        };

        let body = json!({
            "error": message,
            "code": self.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ValidationError("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn pool_timeouts_are_service_unavailable() {
        use diesel::r2d2::{ConnectionManager, Pool};
        use diesel::PgConnection;
        use std::time::Duration;

        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(50))
            .build_unchecked(ConnectionManager::<PgConnection>::new(
                "postgres://nobody@127.0.0.1:1/unreachable",
            ));

        let err: AppError = pool.get().map(|_| ()).unwrap_err().into();

        assert_eq!(
            err,
            AppError::ServiceUnavailable("Database is temporarily unavailable".to_string())
        );
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let response = AppError::DatabaseError("password leaked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
