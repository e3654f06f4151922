use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::diagnosis::Solution;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeadProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub main_pain_point: Option<String>,
    pub recommended_solution: Option<String>,
    pub secondary_solutions: Json<Vec<Solution>>,
    pub diagnosis_summary: Option<String>,
    pub diagnosis_date: Option<DateTime<Utc>>,
    pub wizard_completed: bool,
    pub wizard_completed_date: Option<DateTime<Utc>>,
    pub total_interactions: i32,
    pub last_interaction: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeadInteractionRow {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub interaction_type: String,
    pub data: Value,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}
