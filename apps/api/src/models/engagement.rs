use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EngagementRow {
    pub id: i64,
    pub prospect_id: i64,
    pub template_id: i64,
    pub sent_at: DateTime<Utc>,
    pub opened_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
    pub replied_at: Option<DateTime<Utc>>,
    pub response_content: Option<String>,
    pub engagement_score: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngagementCreate {
    pub prospect_id: i64,
    pub template_id: i64,
    pub engagement_score: Option<i32>,
    pub response_content: Option<String>,
}

/// Partial update for externally-observed milestones. The score is excluded:
/// it is accumulated onto the prospect at creation time and rewriting it here
/// would desynchronize the two.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngagementUpdate {
    pub opened_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
    pub replied_at: Option<DateTime<Utc>>,
    pub response_content: Option<String>,
}
