use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

/// Errors returned by request handlers. Every variant renders as
/// `{"error": "<message>"}`; internal causes are logged, never sent.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// Wrong password on login. Reported as 400, unlike token failures.
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Logs `cause` and hides it behind `message`.
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        let message = message.into();
        error!(error = %cause, "{}", message);
        AppError::Internal(message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials(_)
            | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl AppError {
    /// Duplicate email stays a conflict; database failures hide behind `context`.
    pub fn from_store(e: StoreError, context: &str) -> Self {
        match e {
            StoreError::DuplicateEmail => AppError::Conflict("Email already exists".into()),
            StoreError::Database(inner) => AppError::internal(context, inner),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::from_store(e, "Internal server error")
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        AppError::Validation("Invalid request body".into())
    }
}

/// Unwraps a JSON body. A request without a JSON content type is read as
/// an empty object, so the handler's own field validation reports it.
pub fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            warn!("request body without json content type; treating as empty");
            Ok(T::default())
        }
        Err(rejection) => Err(rejection.into()),
    }
}
