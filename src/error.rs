//! Error types for the store and the HTTP layer

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by [`crate::database::MappingStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The code is absent, maps to an empty value, or the table was never created.
    #[error("short code not found")]
    NotFound,

    /// Any failure reported by redb, passed through unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),
}

// redb reports a distinct error type per call site; funnel them all through `redb::Error`.
macro_rules! storage_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(err: $ty) -> Self {
                    StoreError::Storage(err.into())
                }
            }
        )*
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or unparseable request body.
    #[error("invalid request body: {0}")]
    Input(#[from] JsonRejection),

    #[error("URL not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(redb::Error),

    /// The stored URL contains bytes not allowed in a `Location` header.
    #[error("stored URL is not a valid redirect target: {0:?}")]
    InvalidRedirectTarget(String),

    /// A blocking store task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::Storage(e) => AppError::Storage(e),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("store task failed: {err}"))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Input(rejection) => rejection.status(),
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::InvalidRedirectTarget(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: AppError = StoreError::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_maps_to_500() {
        let io = std::io::Error::other("disk full");
        let err: AppError = StoreError::Storage(redb::Error::Io(io)).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn invalid_redirect_target_maps_to_500() {
        let err = AppError::InvalidRedirectTarget("https://example.com/a\nb".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("a\\nb"));
    }

    #[test]
    fn internal_maps_to_500() {
        let err = AppError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
