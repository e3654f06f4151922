use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::diagnosis::Language;
use crate::errors::AppError;
use crate::leads::handlers::UserIdQuery;
use crate::state::AppState;
use crate::wizard::completion::complete_session;
use crate::wizard::diagnoses::{
    get_diagnosis, latest_diagnosis, list_diagnoses, user_language, DiagnosisView,
};
use crate::wizard::session::{
    abandon_session, find_active_session, get_session, load_session_view, record_answer,
    start_session, AnswerInput, RecordedAnswer, SessionView, StartOutcome,
};
use crate::wizard::steps::{total_steps, LocalizedStep, WIZARD_STEPS};

#[derive(Deserialize)]
pub struct StepsQuery {
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct StepsResponse {
    pub language: Language,
    pub steps: Vec<LocalizedStep>,
    pub total_steps: u32,
}

#[derive(Deserialize)]
pub struct StartSessionRequest {
    pub user_id: Uuid,
    pub session_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SubmitResponseRequest {
    pub user_id: Uuid,
    pub step_number: u32,
    pub response_value: String,
    #[serde(default)]
    pub response_data: Option<Value>,
    #[serde(default)]
    pub time_spent_seconds: Option<i32>,
}

#[derive(Deserialize)]
pub struct SessionActionRequest {
    pub user_id: Uuid,
}

/// GET /api/v1/wizard/steps
pub async fn handle_list_steps(
    State(state): State<AppState>,
    Query(params): Query<StepsQuery>,
) -> Json<StepsResponse> {
    let language = params
        .language
        .as_deref()
        .map(Language::from_code)
        .unwrap_or(state.config.default_language);
    Json(StepsResponse {
        language,
        steps: WIZARD_STEPS.iter().map(|s| s.localize(language)).collect(),
        total_steps: total_steps(),
    })
}

/// POST /api/v1/wizard/sessions
///
/// 200 with the existing in-progress session, 201 with a new one.
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let outcome = start_session(&state.db, req.user_id, req.session_id.as_deref()).await?;
    let (status, session) = match outcome {
        StartOutcome::Existing(session) => (StatusCode::OK, session),
        StartOutcome::Created(session) => (StatusCode::CREATED, session),
    };
    let mut conn = state.db.acquire().await?;
    let view = load_session_view(&mut conn, session).await?;
    Ok((status, Json(view)))
}

/// GET /api/v1/wizard/sessions/current
pub async fn handle_current_session(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SessionView>, AppError> {
    let mut conn = state.db.acquire().await?;
    let session = find_active_session(&mut conn, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No active wizard session".to_string()))?;
    Ok(Json(load_session_view(&mut conn, session).await?))
}

/// GET /api/v1/wizard/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SessionView>, AppError> {
    let mut conn = state.db.acquire().await?;
    let session = get_session(&mut conn, id, params.user_id).await?;
    Ok(Json(load_session_view(&mut conn, session).await?))
}

/// POST /api/v1/wizard/sessions/:id/responses
pub async fn handle_submit_response(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitResponseRequest>,
) -> Result<Json<RecordedAnswer>, AppError> {
    let input = AnswerInput {
        step_number: req.step_number,
        response_value: &req.response_value,
        response_data: req.response_data.unwrap_or_else(|| json!({})),
        time_spent_seconds: req.time_spent_seconds.unwrap_or(0),
    };
    let recorded = record_answer(&state.db, req.user_id, id, input).await?;
    Ok(Json(recorded))
}

/// POST /api/v1/wizard/sessions/:id/complete
pub async fn handle_complete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SessionActionRequest>,
) -> Result<Json<DiagnosisView>, AppError> {
    let row = complete_session(
        &state.db,
        state.completion_guard.as_ref(),
        req.user_id,
        id,
    )
    .await?;
    let mut conn = state.db.acquire().await?;
    let language = user_language(&mut conn, req.user_id, state.config.default_language).await?;
    Ok(Json(DiagnosisView::from_row(row, language)))
}

/// POST /api/v1/wizard/sessions/:id/abandon
pub async fn handle_abandon_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SessionActionRequest>,
) -> Result<Json<Value>, AppError> {
    abandon_session(&state.db, req.user_id, id).await?;
    Ok(Json(json!({ "status": "abandoned" })))
}

/// GET /api/v1/wizard/diagnoses
pub async fn handle_list_diagnoses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<DiagnosisView>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let language = user_language(&mut conn, params.user_id, state.config.default_language).await?;
    let rows = list_diagnoses(&mut conn, params.user_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| DiagnosisView::from_row(row, language))
            .collect(),
    ))
}

/// GET /api/v1/wizard/diagnoses/latest
pub async fn handle_latest_diagnosis(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DiagnosisView>, AppError> {
    let mut conn = state.db.acquire().await?;
    let language = user_language(&mut conn, params.user_id, state.config.default_language).await?;
    let row = latest_diagnosis(&mut conn, params.user_id).await?;
    Ok(Json(DiagnosisView::from_row(row, language)))
}

/// GET /api/v1/wizard/diagnoses/:id
pub async fn handle_get_diagnosis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DiagnosisView>, AppError> {
    let mut conn = state.db.acquire().await?;
    let language = user_language(&mut conn, params.user_id, state.config.default_language).await?;
    let row = get_diagnosis(&mut conn, id, params.user_id).await?;
    Ok(Json(DiagnosisView::from_row(row, language)))
}
