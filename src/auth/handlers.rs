use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, MeResponse, RegisterRequest},
        extractors::AuthUser,
        password::{hash_password_blocking, verify_password_blocking},
    },
    error::{json_body, AppError},
    state::AppState,
    store::StoreError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    const CONTEXT: &str = "Error creating user";
    let payload = json_body(payload)?;
    payload.validate()?;

    if state
        .store
        .find_user_by_email(&payload.email)
        .await
        .map_err(|e| AppError::from_store(e, CONTEXT))?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let hash = hash_password_blocking(payload.password)
        .await
        .map_err(|e| AppError::internal(CONTEXT, e))?;

    let user = state
        .store
        .create_user(&payload.email, &hash)
        .await
        .map_err(|e| {
            if matches!(e, StoreError::DuplicateEmail) {
                warn!(email = %payload.email, "email registered concurrently");
            }
            AppError::from_store(e, CONTEXT)
        })?;

    let token = state
        .keys
        .sign(user.id, &user.email)
        .map_err(|e| AppError::internal(CONTEXT, e))?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse { token }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    const CONTEXT: &str = "Error logging in";
    let payload = json_body(payload)?;
    payload.validate()?;

    let user = match state
        .store
        .find_user_by_email(&payload.email)
        .await
        .map_err(|e| AppError::from_store(e, CONTEXT))?
    {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::NotFound("User not found".into()));
        }
    };

    let ok = verify_password_blocking(payload.password, user.password_hash.clone())
        .await
        .map_err(|e| AppError::internal(CONTEXT, e))?;

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials("Invalid password".into()));
    }

    let token = state
        .keys
        .sign(user.id, &user.email)
        .map_err(|e| AppError::internal(CONTEXT, e))?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse { token }))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let stored = state
        .store
        .find_user_by_id(user.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            warn!(user_id = user.id, "token refers to missing user");
            AppError::NotFound("User not found".into())
        })?;

    Ok(Json(MeResponse {
        id: stored.id,
        email: stored.email,
        created_at: stored.created_at,
    }))
}
