use thiserror::Error;

use crate::domain::form::FormError;
use crate::domain::validation::ValidationErrors;
use crate::infra::error::InfraError;
use crate::infra::http::RequestError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("an API token is required to start a session")]
    Unauthenticated,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Message the server attached to a failed request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Request(err) => err.server_message(),
            _ => None,
        }
    }

    /// Text for a failure notification: the server's message, else `fallback`.
    pub fn notification_text(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Collect an error and its sources, outermost first.
pub fn error_chain(error: &dyn std::error::Error) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(inner) = current {
        messages.push(inner.to_string());
        current = inner.source();
    }
    messages
}
