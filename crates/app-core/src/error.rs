//! A centralized and idiomatic error handling module for the Axum web
//! application.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use super::config::ConfigError;
use super::oauth::OAuthError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid request format: {0}")]
    RequestFormat(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Internal Libraries
    #[error("Config operation failed")]
    Config(#[from] ConfigError),

    #[error("OAuth operation failed")]
    OAuth(#[from] OAuthError),

    #[error("An internal server error occurred")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation(err) => {
                let details = json!(err.field_errors());
                (StatusCode::UNPROCESSABLE_ENTITY, "Validation failed".to_string(), Some(details))
            },
            AppError::RequestFormat(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),

            // Internal Libraries
            AppError::Config(err) => {
                tracing::error!("Config getter error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            },
            AppError::OAuth(err) => {
                let status = match err {
                    OAuthError::TokenExchange(_) => StatusCode::BAD_REQUEST,
                    OAuthError::Fetch(_) | OAuthError::ProfileDecode(_) => StatusCode::BAD_GATEWAY,
                };

                let message = match err {
                    OAuthError::TokenExchange(_) => "OAuth operation failed".to_string(),
                    OAuthError::Fetch(_) | OAuthError::ProfileDecode(_) => "OAuth provider unavailable".to_string(),
                };

                (status, message, None)
            },
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
                None,
            ),
        };

        (status, Json(ErrorResponse { message, details })).into_response()
    }
}
