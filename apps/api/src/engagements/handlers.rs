use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::engagements::metrics::{
    build_prospect_view, compute_metrics, EngagementMetrics, ProspectEngagementView,
};
use crate::engagements::store;
use crate::errors::AppError;
use crate::models::engagement::{EngagementCreate, EngagementRow, EngagementUpdate};
use crate::models::ListParams;
use crate::prospects;
use crate::state::AppState;
use crate::templates;

const DEFAULT_WINDOW_DAYS: i64 = 30;
const MAX_WINDOW_DAYS: i64 = 365;

/// POST /engagements/
///
/// Side effect: bumps the prospect's engagement_score and last_contacted
/// in the same transaction as the insert.
pub async fn create_engagement(
    State(state): State<AppState>,
    Json(payload): Json<EngagementCreate>,
) -> Result<Json<EngagementRow>, AppError> {
    if prospects::store::get_prospect(&state.db, payload.prospect_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(format!(
            "Prospect {} does not exist",
            payload.prospect_id
        )));
    }
    if templates::store::get_template(&state.db, payload.template_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(format!(
            "Template {} does not exist",
            payload.template_id
        )));
    }
    if payload.engagement_score.is_some_and(|s| s < 0) {
        return Err(AppError::Validation(
            "engagement_score must not be negative".into(),
        ));
    }

    let engagement = store::create_engagement(&state.db, &payload).await?;
    Ok(Json(engagement))
}

/// GET /engagements/:id
pub async fn get_engagement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EngagementRow>, AppError> {
    let engagement = store::get_engagement(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Engagement {id} not found")))?;
    Ok(Json(engagement))
}

/// GET /engagements/
pub async fn list_engagements(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<EngagementRow>>, AppError> {
    let engagements =
        store::list_engagements(&state.db, params.offset(), params.page_size()).await?;
    Ok(Json(engagements))
}

/// PUT /engagements/:id
///
/// Records externally-observed milestones (opened/clicked/replied) and
/// response content.
pub async fn update_engagement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<EngagementUpdate>,
) -> Result<Json<EngagementRow>, AppError> {
    let engagement = store::update_engagement(&state.db, id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Engagement {id} not found")))?;
    Ok(Json(engagement))
}

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub company_id: Option<i64>,
    pub days: Option<i64>,
}

/// GET /engagements/metrics/
pub async fn engagement_metrics(
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<EngagementMetrics>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    // Validate before touching the database.
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::Validation(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}, got {days}"
        )));
    }

    let since = Utc::now() - Duration::days(days);
    let rows = store::metrics_rows(&state.db, since, query.company_id).await?;
    Ok(Json(compute_metrics(&rows)))
}

/// GET /prospects/:id/engagement/
pub async fn prospect_engagement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProspectEngagementView>, AppError> {
    if prospects::store::get_prospect(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Prospect {id} not found")));
    }
    let rows = store::engagements_for_prospect(&state.db, id).await?;
    Ok(Json(build_prospect_view(id, rows)))
}
