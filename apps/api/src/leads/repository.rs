use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgConnection;
use tracing::debug;
use uuid::Uuid;

use crate::diagnosis::{DiagnosisResult, Language};
use crate::errors::AppError;
use crate::models::lead::{LeadInteractionRow, LeadProfileRow};

/// Lead status written once a wizard produces a diagnosis.
pub const LEAD_STATUS_QUALIFIED: &str = "qualified";

/// Interactions returned by the activity endpoint.
pub const INTERACTION_HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    WizardStart,
    WizardStep,
    WizardComplete,
}

impl InteractionType {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionType::WizardStart => "wizard_start",
            InteractionType::WizardStep => "wizard_step",
            InteractionType::WizardComplete => "wizard_complete",
        }
    }
}

/// Lead score written to the user record: `(urgency + fit) * 5`, 0–100.
pub fn compute_lead_score(urgency_score: u8, fit_score: u8) -> i32 {
    (i32::from(urgency_score) + i32::from(fit_score)) * 5
}

/// Returns the user's lead profile, creating an empty one on first contact.
pub async fn get_or_create_profile(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<LeadProfileRow, AppError> {
    sqlx::query(
        "INSERT INTO lead_profiles (id, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .execute(&mut *conn)
    .await?;

    Ok(
        sqlx::query_as::<_, LeadProfileRow>("SELECT * FROM lead_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?,
    )
}

/// Appends an interaction and bumps the profile's interaction counter.
pub async fn record_interaction(
    conn: &mut PgConnection,
    lead_id: Uuid,
    interaction_type: InteractionType,
    session_id: &str,
    data: Value,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO lead_interactions (id, lead_id, interaction_type, data, session_id)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(lead_id)
    .bind(interaction_type.as_str())
    .bind(&data)
    .bind(session_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        UPDATE lead_profiles
        SET total_interactions = total_interactions + 1,
            last_interaction = now()
        WHERE id = $1
        "#,
    )
    .bind(lead_id)
    .execute(&mut *conn)
    .await?;

    debug!("Recorded {} interaction for lead {lead_id}", interaction_type.as_str());
    Ok(())
}

/// Copies a fresh diagnosis onto the lead profile.
///
/// The stored summary is the Spanish variant, matching the sales team's working language.
pub async fn apply_diagnosis(
    conn: &mut PgConnection,
    lead_id: Uuid,
    diagnosis: &DiagnosisResult,
    main_pain_point: Option<&str>,
) -> Result<(), AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        UPDATE lead_profiles
        SET wizard_completed = true,
            wizard_completed_date = $2,
            recommended_solution = $3,
            secondary_solutions = $4,
            diagnosis_summary = $5,
            diagnosis_date = $2,
            main_pain_point = COALESCE($6, main_pain_point),
            updated_at = $2
        WHERE id = $1
        "#,
    )
    .bind(lead_id)
    .bind(now)
    .bind(diagnosis.primary_solution.code())
    .bind(Json(&diagnosis.secondary_solutions))
    .bind(diagnosis.diagnosis_summary.get(Language::Es))
    .bind(main_pain_point)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Writes the lead score and marks the user as qualified.
pub async fn qualify_user(
    conn: &mut PgConnection,
    user_id: Uuid,
    lead_score: i32,
) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET lead_score = $1, lead_status = $2 WHERE id = $3")
        .bind(lead_score)
        .bind(LEAD_STATUS_QUALIFIED)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Most recent interactions first.
pub async fn recent_interactions(
    conn: &mut PgConnection,
    lead_id: Uuid,
) -> Result<Vec<LeadInteractionRow>, AppError> {
    Ok(sqlx::query_as::<_, LeadInteractionRow>(
        "SELECT * FROM lead_interactions WHERE lead_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(lead_id)
    .bind(INTERACTION_HISTORY_LIMIT)
    .fetch_all(&mut *conn)
    .await?)
}
