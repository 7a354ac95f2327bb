use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;

/// Body of both `/auth/register` and `/auth/login`. Missing fields
/// deserialize as empty and are rejected by `validate`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".into(),
            ));
        }
        Ok(())
    }
}

pub type RegisterRequest = CredentialsRequest;
pub type LoginRequest = CredentialsRequest;

/// Response returned after register or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Stored profile of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
