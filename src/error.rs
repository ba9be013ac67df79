use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Failures raised by the entity store. Everything is scoped to the
/// operation that produced it; nothing here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub struct AppError(StoreError);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(StoreError::Db(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            StoreError::NotFound => {
                (StatusCode::NOT_FOUND, crate::templates::not_found_page())
            }
            StoreError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, crate::templates::error_page(self.to_string()))
            }
            StoreError::Conflict(_) => {
                (StatusCode::CONFLICT, crate::templates::error_page(self.to_string()))
            }
            StoreError::Db(err) => {
                tracing::error!(%err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, crate::templates::error_page(self.to_string()))
            }
        };
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
