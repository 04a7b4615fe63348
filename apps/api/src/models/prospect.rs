use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Prospect pipeline stages. Stored as a free string — the set is open by
/// convention (new/contacted/engaged/qualified/converted), not constrained
/// in the schema.
pub const DEFAULT_STATUS: &str = "new";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProspectRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub company_id: i64,
    pub linkedin_url: Option<String>,
    pub status: String,
    pub engagement_score: i32,
    pub last_contacted: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProspectCreate {
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub company_id: i64,
    pub linkedin_url: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Partial update payload. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProspectUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub company_id: Option<i64>,
    pub linkedin_url: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
