//! Axum route handlers for the Lead Profile API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::leads::repository::{get_or_create_profile, recent_interactions};
use crate::models::lead::{LeadInteractionRow, LeadProfileRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/leads/me
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<LeadProfileRow>, AppError> {
    let mut conn = state.db.acquire().await?;
    let profile = get_or_create_profile(&mut conn, params.user_id).await?;
    Ok(Json(profile))
}

/// GET /api/v1/leads/me/interactions
///
/// Latest 50 interactions, newest first.
pub async fn handle_get_interactions(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<LeadInteractionRow>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let profile = get_or_create_profile(&mut conn, params.user_id).await?;
    let interactions = recent_interactions(&mut conn, profile.id).await?;
    Ok(Json(interactions))
}
