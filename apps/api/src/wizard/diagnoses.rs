//! Persisted diagnoses and the language-selected view served to clients.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::diagnosis::{DiagnosisResult, Language, Localized, Solution, CATALOG_VERSION};
use crate::errors::AppError;
use crate::models::diagnosis::DiagnosisRow;

/// Catalog details of the primary solution in one language.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SolutionDetails {
    pub title: &'static str,
    pub description: &'static str,
    pub features: Vec<&'static str>,
    pub next_steps: Vec<&'static str>,
}

impl SolutionDetails {
    pub fn for_solution(solution: Solution, language: Language) -> Self {
        let profile = solution.profile();
        Self {
            title: profile.title.get(language),
            description: profile.description.get(language),
            features: profile.features.iter().map(|t| t.get(language)).collect(),
            next_steps: profile.next_steps.iter().map(|t| t.get(language)).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosisView {
    pub id: Uuid,
    pub session_id: Uuid,
    pub language: Language,
    pub primary_solution: String,
    pub secondary_solutions: Vec<Solution>,
    pub diagnosis_summary: String,
    pub diagnosis_summary_en: String,
    pub diagnosis_summary_es: String,
    pub pain_points_identified: Vec<String>,
    pub recommended_features: Vec<Localized>,
    pub urgency_score: i16,
    pub fit_score: i16,
    pub personalized_pitch: String,
    pub personalized_pitch_en: String,
    pub personalized_pitch_es: String,
    pub next_steps: Vec<Localized>,
    pub catalog_version: String,
    pub created_at: DateTime<Utc>,
    /// `None` if the stored solution code is no longer in the catalog.
    pub solution_details: Option<SolutionDetails>,
}

impl DiagnosisView {
    pub fn from_row(row: DiagnosisRow, language: Language) -> Self {
        let Json(summary) = row.diagnosis_summary;
        let Json(pitch) = row.personalized_pitch;
        let solution_details = Solution::from_code(&row.primary_solution)
            .map(|s| SolutionDetails::for_solution(s, language));

        Self {
            id: row.id,
            session_id: row.session_id,
            language,
            diagnosis_summary: summary.get(language).to_string(),
            personalized_pitch: pitch.get(language).to_string(),
            diagnosis_summary_en: summary.en,
            diagnosis_summary_es: summary.es,
            personalized_pitch_en: pitch.en,
            personalized_pitch_es: pitch.es,
            primary_solution: row.primary_solution,
            secondary_solutions: row.secondary_solutions.0,
            pain_points_identified: row.pain_points.0,
            recommended_features: row.recommended_features.0,
            urgency_score: row.urgency_score,
            fit_score: row.fit_score,
            next_steps: row.next_steps.0,
            catalog_version: row.catalog_version,
            created_at: row.created_at,
            solution_details,
        }
    }
}

/// Stored preference of the user, or `fallback` when the user is unknown.
pub async fn user_language(
    conn: &mut PgConnection,
    user_id: Uuid,
    fallback: Language,
) -> Result<Language, AppError> {
    let stored: Option<String> =
        sqlx::query_scalar("SELECT preferred_language FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(stored.map_or(fallback, |code| Language::from_code(&code)))
}

/// Inserts the diagnosis for a session. A second diagnosis for the same session is a conflict.
pub async fn insert_diagnosis(
    conn: &mut PgConnection,
    session_pk: Uuid,
    user_id: Uuid,
    diagnosis: &DiagnosisResult,
) -> Result<DiagnosisRow, AppError> {
    sqlx::query_as::<_, DiagnosisRow>(
        r#"
        INSERT INTO diagnosis_results
            (id, session_id, user_id, primary_solution, secondary_solutions,
             diagnosis_summary, pain_points, recommended_features,
             urgency_score, fit_score, personalized_pitch, next_steps, catalog_version)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session_pk)
    .bind(user_id)
    .bind(diagnosis.primary_solution.code())
    .bind(Json(&diagnosis.secondary_solutions))
    .bind(Json(&diagnosis.diagnosis_summary))
    .bind(Json(&diagnosis.pain_points))
    .bind(Json(&diagnosis.recommended_features))
    .bind(i16::from(diagnosis.urgency_score))
    .bind(i16::from(diagnosis.fit_score))
    .bind(Json(&diagnosis.personalized_pitch))
    .bind(Json(&diagnosis.next_steps))
    .bind(CATALOG_VERSION)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict(format!("Session {session_pk} already has a diagnosis"))
        }
        other => AppError::Database(other),
    })
}

/// Newest first.
pub async fn list_diagnoses(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Vec<DiagnosisRow>, AppError> {
    Ok(sqlx::query_as::<_, DiagnosisRow>(
        "SELECT * FROM diagnosis_results WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?)
}

pub async fn latest_diagnosis(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<DiagnosisRow, AppError> {
    sqlx::query_as::<_, DiagnosisRow>(
        "SELECT * FROM diagnosis_results WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| AppError::NotFound("No diagnosis found".to_string()))
}

pub async fn get_diagnosis(
    conn: &mut PgConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<DiagnosisRow, AppError> {
    sqlx::query_as::<_, DiagnosisRow>(
        "SELECT * FROM diagnosis_results WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Diagnosis {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::{generate_diagnosis, WizardAnswer};

    fn stored(result: &DiagnosisResult, primary_solution: &str) -> DiagnosisRow {
        DiagnosisRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            primary_solution: primary_solution.to_string(),
            secondary_solutions: Json(result.secondary_solutions.clone()),
            diagnosis_summary: Json(result.diagnosis_summary.clone()),
            pain_points: Json(result.pain_points.clone()),
            recommended_features: Json(result.recommended_features.clone()),
            urgency_score: i16::from(result.urgency_score),
            fit_score: i16::from(result.fit_score),
            personalized_pitch: Json(result.personalized_pitch.clone()),
            next_steps: Json(result.next_steps.clone()),
            catalog_version: CATALOG_VERSION.to_string(),
            created_at: Utc::now(),
        }
    }

    fn contracts_diagnosis() -> DiagnosisResult {
        generate_diagnosis(&[
            WizardAnswer::new(1, "contracts"),
            WizardAnswer::new(3, "finance"),
            WizardAnswer::new(4, "Renewals slip through"),
            WizardAnswer::new(5, "short"),
        ])
    }

    #[test]
    fn test_view_selects_requested_language() {
        let result = contracts_diagnosis();
        let row = stored(&result, result.primary_solution.code());

        let en = DiagnosisView::from_row(row.clone(), Language::En);
        assert_eq!(en.diagnosis_summary, result.diagnosis_summary.en);
        assert_eq!(en.personalized_pitch, result.personalized_pitch.en);
        assert_eq!(en.diagnosis_summary_es, result.diagnosis_summary.es);

        let es = DiagnosisView::from_row(row, Language::Es);
        assert_eq!(es.diagnosis_summary, result.diagnosis_summary.es);
        assert_eq!(es.pain_points_identified, vec!["Renewals slip through".to_string()]);
    }

    #[test]
    fn test_view_attaches_solution_details() {
        let result = contracts_diagnosis();
        let row = stored(&result, result.primary_solution.code());
        let view = DiagnosisView::from_row(row, Language::Es);
        let details = view.solution_details.unwrap();
        assert_eq!(details, SolutionDetails::for_solution(Solution::DealVisor, Language::Es));
        assert_eq!(details.features.len(), 5);
        assert_eq!(details.next_steps.len(), 3);
    }

    #[test]
    fn test_view_without_catalog_match_has_no_details() {
        let result = contracts_diagnosis();
        let view = DiagnosisView::from_row(stored(&result, "retired_product"), Language::En);
        assert!(view.solution_details.is_none());
        assert_eq!(view.primary_solution, "retired_product");
    }

    #[test]
    fn test_view_serializes_language_code() {
        let result = contracts_diagnosis();
        let view = DiagnosisView::from_row(stored(&result, "deal_visor"), Language::En);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["language"], "en");
        assert_eq!(json["secondary_solutions"], serde_json::json!(["data_room_audit"]));
        assert_eq!(json["solution_details"]["title"], "Deal Visor for Contract Monitoring");
    }
}
