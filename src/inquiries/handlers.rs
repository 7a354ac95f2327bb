use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{dto::CreateInquiryRequest, repo_types::Inquiry};
use crate::{
    auth::AuthUser,
    error::{json_body, AppError},
    state::AppState,
};

pub fn inquiry_routes() -> Router<AppState> {
    Router::new().route("/inquiries", get(list_inquiries).post(create_inquiry))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_inquiries(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    let items = state.store.list_inquiries_for_user(user.id).await?;
    Ok(Json(items))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn create_inquiry(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateInquiryRequest>, JsonRejection>,
) -> Result<Json<Inquiry>, AppError> {
    let payload = json_body(payload)?;
    if let Err(e) = payload.validate() {
        warn!("inquiry missing title or description");
        return Err(e);
    }

    let inquiry = state
        .store
        .create_inquiry(user.id, &payload.title, &payload.description)
        .await?;

    info!(inquiry_id = inquiry.id, "inquiry created");
    Ok(Json(inquiry))
}
