use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::GatewayError;
use crate::infra::CookieError;
use crate::prompts;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", prompts::MSG_NO_API_KEY)]
    MissingApiKey,

    #[error("{}", prompts::MSG_INVALID_API_KEY_FORMAT)]
    InvalidApiKeyFormat,

    #[error("{}", prompts::MSG_INFLUENCER_NOT_FOUND)]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid form submission: {0}")]
    Form(#[from] FormRejection),

    #[error("{}", prompts::MSG_COOKIE_PARSE_FAILED)]
    Cookie(#[from] CookieError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{}", prompts::MSG_SOMETHING_WENT_WRONG)]
    SearchFailed(#[source] GatewayError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey => StatusCode::UNAUTHORIZED,
            AppError::InvalidApiKeyFormat | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Form(rejection) => rejection.status(),
            AppError::Cookie(_) | AppError::SearchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Gateway(e) => match e {
                GatewayError::MissingCredential | GatewayError::InvalidCredential => {
                    StatusCode::UNAUTHORIZED
                }
                GatewayError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::MissingApiKey => "missing_credential",
            AppError::InvalidApiKeyFormat => "invalid_credential",
            AppError::NotFound => "not_found",
            AppError::InvalidInput(_) | AppError::Form(_) => "invalid_input",
            AppError::Cookie(_) => "cookie",
            AppError::Gateway(e) | AppError::SearchFailed(e) => e.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Cookie(e) => error!("Error parsing cookie: {e}"),
            AppError::SearchFailed(e) => error!("Error during influencer search: {e}"),
            AppError::Gateway(e) if status.is_server_error() => error!("LLM request failed: {e}"),
            _ => warn!(kind = self.kind(), "request rejected: {self}"),
        }

        let body = json!({
            "success": false,
            "error": self.kind(),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
