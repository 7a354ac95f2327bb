use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use extractors::AuthUser;
pub use jwt::JwtKeys;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
