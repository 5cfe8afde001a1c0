use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shortlink_core::ShortcutError;
use thiserror::Error;

use crate::templates::TemplateError;

/// Request-level failures, rendered as plain-text responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Index(#[from] ShortcutError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Invalid redirect target: {0}")]
    InvalidRedirect(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Index(_) | AppError::Template(_) | AppError::InvalidRedirect(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (self.status(), self.to_string()).into_response()
    }
}
