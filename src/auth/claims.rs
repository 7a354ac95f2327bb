use serde::{Deserialize, Serialize};

/// JWT payload. Carries the identity only; no `exp`, tokens stay valid
/// until the signing secret changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,       // user ID
    pub email: String, // user email at issue time
    pub iat: i64,      // issued at (unix timestamp)
}
