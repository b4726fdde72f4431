//! Error types for the HTTP service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] udon5e::common::Error),

    /// The sheet fetcher could not be built.
    #[error(transparent)]
    Scrape(#[from] udon5e::scrape::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Common(e.into())
    }
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single conversion request.
#[derive(Debug, Error)]
pub enum AppError {
    /// No `url` query parameter, or an empty one.
    #[error("missing url parameter")]
    MissingUrl,

    /// `url` is not a character sheet URL.
    #[error("malformed sheet url: {0:?}")]
    InvalidUrl(String),

    /// Fetching or converting the sheet failed.
    #[error(transparent)]
    Conversion(#[from] udon5e::Error),

    /// The conversion task panicked or was cancelled.
    #[error("conversion task failed: {0}")]
    Task(String),
}

impl AppError {
    /// Status code sent for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::Conversion(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent for this error. Server-side details are only logged.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::MissingUrl => "URLクエリパラメータを指定してください。",
            AppError::InvalidUrl(_) => "URLの形式が正しくありません。",
            AppError::Conversion(_) | AppError::Task(_) => "サーバーエラーが発生しました。",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "conversion request failed");
        } else {
            tracing::debug!(error = %self, "rejected conversion request");
        }
        (status, self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidUrl("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Task("cancelled".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Conversion(udon5e::Error::Scrape(udon5e::scrape::Error::Fetch(
            "connection refused".to_string(),
        )));
        assert_eq!(err.message(), "サーバーエラーが発生しました。");
        assert!(err.to_string().contains("connection refused"));
    }
}
