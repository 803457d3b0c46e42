use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use list_store::StoreError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Session unavailable")]
    SessionMissing,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Store(StoreError::NotFound(_)) => "not_found",
            AppError::Store(_) => "validation_error",
            _ => "api_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SessionMissing => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: self.kind().to_string(),
            },
        };
        HttpResponse::build(status_code).json(error_response)
    }
}
