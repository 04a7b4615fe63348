use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub company_bio: Option<String>,
    pub product_info: Option<String>,
    pub key_insights: Option<String>,
    pub market_position: Option<String>,
    pub funding_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub company_bio: Option<String>,
    pub product_info: Option<String>,
    pub key_insights: Option<String>,
    pub market_position: Option<String>,
    pub funding_info: Option<String>,
}

/// Partial update payload. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub company_bio: Option<String>,
    pub product_info: Option<String>,
    pub key_insights: Option<String>,
    pub market_position: Option<String>,
    pub funding_info: Option<String>,
}
