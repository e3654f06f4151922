use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::diagnosis::{Localized, Solution};

/// A persisted diagnosis. Localized columns are JSONB `{"en": …, "es": …}` maps.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiagnosisRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub primary_solution: String,
    pub secondary_solutions: Json<Vec<Solution>>,
    pub diagnosis_summary: Json<Localized>,
    pub pain_points: Json<Vec<String>>,
    pub recommended_features: Json<Vec<Localized>>,
    pub urgency_score: i16,
    pub fit_score: i16,
    pub personalized_pitch: Json<Localized>,
    pub next_steps: Json<Vec<Localized>>,
    pub catalog_version: String,
    pub created_at: DateTime<Utc>,
}
