//! Wizard completion: turns a fully answered session into exactly one
//! persisted diagnosis and a qualified lead.

use serde_json::json;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::diagnosis::generate_diagnosis;
use crate::errors::AppError;
use crate::leads::repository::{
    apply_diagnosis, compute_lead_score, get_or_create_profile, qualify_user, record_interaction,
    InteractionType,
};
use crate::models::diagnosis::DiagnosisRow;
use crate::wizard::diagnoses::insert_diagnosis;
use crate::wizard::guard::CompletionGuard;
use crate::wizard::session::{
    answers_from_responses, get_session_for_update, list_responses, mark_completed,
    missing_steps,
};

pub async fn complete_session(
    pool: &PgPool,
    guard: &dyn CompletionGuard,
    user_id: Uuid,
    session_pk: Uuid,
) -> Result<DiagnosisRow, AppError> {
    let lease = guard.acquire(session_pk).await?.ok_or_else(|| {
        AppError::Conflict(format!("Session {session_pk} is already being completed"))
    })?;

    let outcome = run_completion(pool, user_id, session_pk).await;

    if let Err(e) = guard.release(lease).await {
        warn!("Failed to release completion lease for session {session_pk}: {e}");
    }
    outcome
}

async fn run_completion(
    pool: &PgPool,
    user_id: Uuid,
    session_pk: Uuid,
) -> Result<DiagnosisRow, AppError> {
    let mut tx = pool.begin().await?;

    // Holding the row lock keeps answers from changing under the diagnosis.
    let session = get_session_for_update(&mut tx, session_pk, user_id).await?;
    if !session.is_in_progress() {
        return Err(AppError::Validation("Session is not active".to_string()));
    }

    let responses = list_responses(&mut tx, session.id).await?;
    let missing = missing_steps(&responses);
    if !missing.is_empty() {
        let listed: Vec<String> = missing.iter().map(u32::to_string).collect();
        return Err(AppError::Validation(format!(
            "Not all steps have been completed; missing steps: {}",
            listed.join(", ")
        )));
    }

    let diagnosis = generate_diagnosis(&answers_from_responses(&responses));
    let main_pain_point = diagnosis.pain_points.first().map(String::as_str);

    let row = insert_diagnosis(&mut tx, session.id, user_id, &diagnosis).await?;
    if !mark_completed(&mut tx, session.id).await? {
        return Err(AppError::Conflict(format!(
            "Session {session_pk} was completed concurrently"
        )));
    }

    let profile = get_or_create_profile(&mut tx, user_id).await?;
    apply_diagnosis(&mut tx, profile.id, &diagnosis, main_pain_point).await?;
    let lead_score = compute_lead_score(diagnosis.urgency_score, diagnosis.fit_score);
    qualify_user(&mut tx, user_id, lead_score).await?;
    record_interaction(
        &mut tx,
        profile.id,
        InteractionType::WizardComplete,
        &session.session_id,
        json!({
            "primary_solution": diagnosis.primary_solution,
            "urgency_score": diagnosis.urgency_score,
            "fit_score": diagnosis.fit_score,
        }),
    )
    .await?;

    tx.commit().await?;

    info!(
        "Completed wizard session {} → {} (urgency {}, fit {}, lead score {lead_score})",
        session.id,
        diagnosis.primary_solution.code(),
        diagnosis.urgency_score,
        diagnosis.fit_score,
    );
    Ok(row)
}
