use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(SessionStatus::InProgress),
            "completed" => Some(SessionStatus::Completed),
            "abandoned" => Some(SessionStatus::Abandoned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WizardSessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: String,
    pub current_step: i32,
    pub total_steps: i32,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_activity: DateTime<Utc>,
}

impl WizardSessionRow {
    pub fn status(&self) -> Option<SessionStatus> {
        SessionStatus::parse(&self.status)
    }

    pub fn is_in_progress(&self) -> bool {
        self.status() == Some(SessionStatus::InProgress)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WizardResponseRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub step_number: i32,
    pub response_value: String,
    pub response_data: Value,
    pub time_spent_seconds: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
