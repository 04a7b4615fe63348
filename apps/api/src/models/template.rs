use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateRow {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub company_id: i64,
    pub is_active: bool,
    /// A/B variant label, e.g. "variant_1". None for base templates.
    pub variant: Option<String>,
    pub performance_metrics: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateCreate {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub company_id: i64,
    pub is_active: Option<bool>,
    pub variant: Option<String>,
    pub performance_metrics: Option<Value>,
}

/// Partial update payload. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub is_active: Option<bool>,
    pub variant: Option<String>,
    pub performance_metrics: Option<Value>,
}
