use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// Domain error kinds. Transport mapping to status codes lives in
/// `IntoResponse`; services raise kinds only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

/// Store-level constraint violations become `Conflict`; everything else
/// stays an opaque ORM error. The repository itself never translates --
/// this runs when a service propagates with `?`.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                AppError::Conflict(format!("unique constraint violated: {msg}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                AppError::Conflict(format!("foreign key constraint violated: {msg}"))
            }
            _ => AppError::OrmError(err),
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_resource_name() {
        let err = AppError::NotFound("Medicine");
        assert_eq!(err.to_string(), "Medicine not found");
    }

    #[test]
    fn plain_db_err_is_not_translated_to_conflict() {
        let err: AppError = DbErr::RecordNotUpdated.into();
        assert!(matches!(err, AppError::OrmError(_)));
    }
}
