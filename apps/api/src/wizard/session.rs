//! Wizard session lifecycle: start, answer, abandon, and the read models the
//! handlers return.

use serde::Serialize;
use serde_json::{json, Map, Value};
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::diagnosis::WizardAnswer;
use crate::errors::AppError;
use crate::leads::repository::{get_or_create_profile, record_interaction, InteractionType};
use crate::models::wizard::{SessionStatus, WizardResponseRow, WizardSessionRow};
use crate::wizard::steps::{find_step, total_steps, WIZARD_STEPS};

/// Session plus its answers, as returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: WizardSessionRow,
    pub progress_percentage: i32,
    pub responses: Vec<WizardResponseRow>,
}

#[derive(Debug)]
pub enum StartOutcome {
    Existing(WizardSessionRow),
    Created(WizardSessionRow),
}

#[derive(Debug, Serialize)]
pub struct RecordedAnswer {
    pub response: WizardResponseRow,
    pub current_step: i32,
    pub progress_percentage: i32,
}

/// Input for a single step answer.
#[derive(Debug)]
pub struct AnswerInput<'a> {
    pub step_number: u32,
    pub response_value: &'a str,
    pub response_data: Value,
    pub time_spent_seconds: i32,
}

pub fn progress_percentage(session: &WizardSessionRow) -> i32 {
    if session.status() == Some(SessionStatus::Completed) {
        return 100;
    }
    if session.total_steps <= 0 {
        return 0;
    }
    ((session.current_step - 1).max(0) * 100 / session.total_steps).min(100)
}

/// Catalog steps with no recorded answer, in step order.
pub fn missing_steps(responses: &[WizardResponseRow]) -> Vec<u32> {
    WIZARD_STEPS
        .iter()
        .map(|s| s.step_number)
        .filter(|n| !responses.iter().any(|r| r.step_number == *n as i32))
        .collect()
}

pub fn answers_from_responses(responses: &[WizardResponseRow]) -> Vec<WizardAnswer> {
    responses
        .iter()
        .filter_map(|r| {
            let step_number = u32::try_from(r.step_number).ok()?;
            let auxiliary_data = match &r.response_data {
                Value::Object(map) => map.clone(),
                _ => Map::new(),
            };
            Some(WizardAnswer {
                auxiliary_data,
                ..WizardAnswer::new(step_number, r.response_value.as_str())
            })
        })
        .collect()
}

fn resolve_client_session_id(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Queries
// ────────────────────────────────────────────────────────────────────────────

pub async fn find_active_session(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Option<WizardSessionRow>, AppError> {
    Ok(sqlx::query_as::<_, WizardSessionRow>(
        "SELECT * FROM wizard_sessions WHERE user_id = $1 AND status = $2",
    )
    .bind(user_id)
    .bind(SessionStatus::InProgress.as_str())
    .fetch_optional(&mut *conn)
    .await?)
}

const SELECT_OWNED_SESSION: &str = "SELECT * FROM wizard_sessions WHERE id = $1 AND user_id = $2";

/// Row-locking variant: answers and completion for one session serialize on this lock.
const SELECT_OWNED_SESSION_FOR_UPDATE: &str =
    "SELECT * FROM wizard_sessions WHERE id = $1 AND user_id = $2 FOR UPDATE";

/// Moves an in-progress session to the given step; completed or abandoned sessions are untouched.
const ADVANCE_IN_PROGRESS_SESSION: &str = r#"
    UPDATE wizard_sessions
    SET current_step = $2, last_activity = now()
    WHERE id = $1 AND status = $3
    RETURNING *
"#;

/// Loads a session owned by `user_id`; other users' sessions are reported as missing.
pub async fn get_session(
    conn: &mut PgConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<WizardSessionRow, AppError> {
    fetch_owned_session(conn, SELECT_OWNED_SESSION, id, user_id).await
}

/// Like [`get_session`], but holds the row lock until the surrounding transaction ends.
pub async fn get_session_for_update(
    conn: &mut PgConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<WizardSessionRow, AppError> {
    fetch_owned_session(conn, SELECT_OWNED_SESSION_FOR_UPDATE, id, user_id).await
}

async fn fetch_owned_session(
    conn: &mut PgConnection,
    sql: &str,
    id: Uuid,
    user_id: Uuid,
) -> Result<WizardSessionRow, AppError> {
    sqlx::query_as::<_, WizardSessionRow>(sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

pub async fn list_responses(
    conn: &mut PgConnection,
    session_pk: Uuid,
) -> Result<Vec<WizardResponseRow>, AppError> {
    Ok(sqlx::query_as::<_, WizardResponseRow>(
        "SELECT * FROM wizard_responses WHERE session_id = $1 ORDER BY step_number",
    )
    .bind(session_pk)
    .fetch_all(&mut *conn)
    .await?)
}

pub async fn load_session_view(
    conn: &mut PgConnection,
    session: WizardSessionRow,
) -> Result<SessionView, AppError> {
    let responses = list_responses(conn, session.id).await?;
    Ok(SessionView {
        progress_percentage: progress_percentage(&session),
        session,
        responses,
    })
}

/// Flips `in_progress` → `completed`. Returns false if the session had already left `in_progress`.
pub async fn mark_completed(conn: &mut PgConnection, session_pk: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE wizard_sessions
        SET status = $2, completed_at = now(), last_activity = now()
        WHERE id = $1 AND status = $3
        "#,
    )
    .bind(session_pk)
    .bind(SessionStatus::Completed.as_str())
    .bind(SessionStatus::InProgress.as_str())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

// ────────────────────────────────────────────────────────────────────────────
// Commands
// ────────────────────────────────────────────────────────────────────────────

/// Returns the user's in-progress session, or opens a new one and tracks `wizard_start`.
pub async fn start_session(
    pool: &PgPool,
    user_id: Uuid,
    requested_session_id: Option<&str>,
) -> Result<StartOutcome, AppError> {
    let mut tx = pool.begin().await?;

    if let Some(existing) = find_active_session(&mut tx, user_id).await? {
        return Ok(StartOutcome::Existing(existing));
    }

    let session_id = resolve_client_session_id(requested_session_id);
    // The partial unique index allows one in-progress session per user, so a
    // racing start lands in the conflict branch and we return the winner.
    let created = sqlx::query_as::<_, WizardSessionRow>(
        r#"
        INSERT INTO wizard_sessions (id, user_id, session_id, total_steps)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&session_id)
    .bind(total_steps() as i32)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(session) = created else {
        return match find_active_session(&mut tx, user_id).await? {
            Some(existing) => Ok(StartOutcome::Existing(existing)),
            None => Err(AppError::Conflict(format!(
                "Session id '{session_id}' is already in use"
            ))),
        };
    };

    let profile = get_or_create_profile(&mut tx, user_id).await?;
    record_interaction(
        &mut tx,
        profile.id,
        InteractionType::WizardStart,
        &session.session_id,
        json!({ "wizard_session_id": session.id }),
    )
    .await?;

    tx.commit().await?;
    info!("Started wizard session {} for user {user_id}", session.id);
    Ok(StartOutcome::Created(session))
}

/// Upserts one step answer and advances the session to the following step.
///
/// Once a session has left `in_progress` its answers are frozen.
pub async fn record_answer(
    pool: &PgPool,
    user_id: Uuid,
    session_pk: Uuid,
    input: AnswerInput<'_>,
) -> Result<RecordedAnswer, AppError> {
    let mut tx = pool.begin().await?;

    let session = get_session_for_update(&mut tx, session_pk, user_id).await?;
    if !session.is_in_progress() {
        return Err(AppError::Validation("Session is not active".to_string()));
    }
    let step = find_step(input.step_number)
        .ok_or_else(|| AppError::NotFound(format!("Step {} not found", input.step_number)))?;
    if input.response_value.trim().is_empty() {
        return Err(AppError::Validation(
            "response_value must not be blank".to_string(),
        ));
    }

    let session = sqlx::query_as::<_, WizardSessionRow>(ADVANCE_IN_PROGRESS_SESSION)
        .bind(session.id)
        .bind(step.step_number as i32 + 1)
        .bind(SessionStatus::InProgress.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Validation("Session is not active".to_string()))?;

    let response = sqlx::query_as::<_, WizardResponseRow>(
        r#"
        INSERT INTO wizard_responses
            (id, session_id, step_number, response_value, response_data, time_spent_seconds)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (session_id, step_number) DO UPDATE
        SET response_value = EXCLUDED.response_value,
            response_data = EXCLUDED.response_data,
            time_spent_seconds = EXCLUDED.time_spent_seconds,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session.id)
    .bind(step.step_number as i32)
    .bind(input.response_value)
    .bind(&input.response_data)
    .bind(input.time_spent_seconds.max(0))
    .fetch_one(&mut *tx)
    .await?;

    let profile = get_or_create_profile(&mut tx, user_id).await?;
    record_interaction(
        &mut tx,
        profile.id,
        InteractionType::WizardStep,
        &session.session_id,
        json!({
            "step_number": step.step_number,
            "response_value": input.response_value,
        }),
    )
    .await?;

    tx.commit().await?;

    Ok(RecordedAnswer {
        progress_percentage: progress_percentage(&session),
        current_step: session.current_step,
        response,
    })
}

pub async fn abandon_session(
    pool: &PgPool,
    user_id: Uuid,
    session_pk: Uuid,
) -> Result<(), AppError> {
    let mut conn = pool.acquire().await?;
    let session = get_session(&mut conn, session_pk, user_id).await?;
    if !session.is_in_progress() {
        return Err(AppError::Validation("Session is not active".to_string()));
    }

    let result = sqlx::query(
        "UPDATE wizard_sessions SET status = $2, last_activity = now() WHERE id = $1 AND status = $3",
    )
    .bind(session.id)
    .bind(SessionStatus::Abandoned.as_str())
    .bind(SessionStatus::InProgress.as_str())
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Validation("Session is not active".to_string()));
    }

    info!("Abandoned wizard session {session_pk}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(status: SessionStatus, current_step: i32, total_steps: i32) -> WizardSessionRow {
        WizardSessionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            session_id: "client-1".to_string(),
            current_step,
            total_steps,
            status: status.as_str().to_string(),
            started_at: Utc::now(),
            completed_at: None,
            last_activity: Utc::now(),
        }
    }

    fn response(step_number: i32, value: &str, data: Value) -> WizardResponseRow {
        WizardResponseRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            step_number,
            response_value: value.to_string(),
            response_data: data,
            time_spent_seconds: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_progress_starts_at_zero() {
        assert_eq!(progress_percentage(&session(SessionStatus::InProgress, 1, 6)), 0);
    }

    #[test]
    fn test_progress_truncates() {
        // 2 of 6 answered → 33.3%
        assert_eq!(progress_percentage(&session(SessionStatus::InProgress, 3, 6)), 33);
        assert_eq!(progress_percentage(&session(SessionStatus::InProgress, 7, 6)), 100);
    }

    #[test]
    fn test_progress_caps_at_hundred() {
        assert_eq!(progress_percentage(&session(SessionStatus::InProgress, 9, 6)), 100);
    }

    #[test]
    fn test_progress_completed_is_hundred() {
        assert_eq!(progress_percentage(&session(SessionStatus::Completed, 2, 6)), 100);
    }

    #[test]
    fn test_progress_zero_total_steps() {
        assert_eq!(progress_percentage(&session(SessionStatus::InProgress, 4, 0)), 0);
    }

    #[test]
    fn test_missing_steps_lists_unanswered_in_order() {
        let responses = vec![
            response(1, "audits", json!({})),
            response(3, "legal", json!({})),
            response(6, "influencer", json!({})),
        ];
        assert_eq!(missing_steps(&responses), vec![2, 4, 5]);
    }

    #[test]
    fn test_missing_steps_empty_when_all_answered() {
        let responses: Vec<_> = (1..=6).map(|n| response(n, "x", json!({}))).collect();
        assert!(missing_steps(&responses).is_empty());
    }

    #[test]
    fn test_answers_carry_object_payloads_only() {
        let responses = vec![
            response(4, "Manual reports", json!({ "chars": 14 })),
            response(5, "short", json!(["not", "an", "object"])),
        ];
        let answers = answers_from_responses(&responses);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].step_number, 4);
        assert_eq!(answers[0].value, "Manual reports");
        assert_eq!(answers[0].auxiliary_data["chars"], json!(14));
        assert!(answers[1].auxiliary_data.is_empty());
    }

    #[test]
    fn test_locking_read_takes_row_lock() {
        assert!(SELECT_OWNED_SESSION_FOR_UPDATE.trim_end().ends_with("FOR UPDATE"));
        assert!(!SELECT_OWNED_SESSION.contains("FOR UPDATE"));
        assert!(SELECT_OWNED_SESSION_FOR_UPDATE.starts_with(SELECT_OWNED_SESSION));
    }

    #[test]
    fn test_advance_only_touches_in_progress_sessions() {
        assert!(ADVANCE_IN_PROGRESS_SESSION.contains("WHERE id = $1 AND status = $3"));
        assert!(ADVANCE_IN_PROGRESS_SESSION.contains("RETURNING *"));
    }

    #[test]
    fn test_client_session_id_generated_when_blank() {
        assert_eq!(resolve_client_session_id(Some(" abc ")), "abc");
        let generated = resolve_client_session_id(Some("  "));
        assert!(Uuid::parse_str(&generated).is_ok());
        assert!(Uuid::parse_str(&resolve_client_session_id(None)).is_ok());
    }
}
