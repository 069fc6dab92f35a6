use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Failures of the account flows. The display text is shown to the user as
/// a flash message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email and password are required.")]
    MissingCredentials,

    #[error("Passwords do not match. Please try again.")]
    PasswordMismatch,

    #[error("Email already exists")]
    UserAlreadyExists,

    #[error("Invalid username or password.")]
    WrongCredentials,

    #[error("An unexpected error occurred.")]
    Internal,
}

/// Failures of the like/unlike toggle, displayed as flash messages.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Zitat nicht gefunden.")]
    NotFound,

    #[error("Beim Liken des Zitats ist ein Fehler aufgetreten.")]
    Internal(#[from] anyhow::Error),
}

/// Errors that abort rendering a page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to render template")]
    Template(#[from] askama::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Template(e) => tracing::error!(err = ?e, "template rendering failed"),
            AppError::Internal(e) => tracing::error!(err = ?e, "request failed"),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Es ist ein unerwarteter Fehler aufgetreten.</h1>"),
        )
            .into_response()
    }
}
