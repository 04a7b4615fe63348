use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::companies;
use crate::errors::AppError;
use crate::models::template::{TemplateCreate, TemplateRow, TemplateUpdate};
use crate::models::ListParams;
use crate::state::AppState;
use crate::templates::store;

/// POST /templates/
pub async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<TemplateCreate>,
) -> Result<Json<TemplateRow>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Template name must not be empty".into(),
        ));
    }
    if payload.subject.trim().is_empty() || payload.body.trim().is_empty() {
        return Err(AppError::Validation(
            "Template subject and body must not be empty".into(),
        ));
    }
    if companies::store::get_company(&state.db, payload.company_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(format!(
            "Company {} does not exist",
            payload.company_id
        )));
    }

    let template = store::create_template(&state.db, &payload).await?;
    Ok(Json(template))
}

/// GET /templates/:id
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TemplateRow>, AppError> {
    let template = store::get_template(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    Ok(Json(template))
}

#[derive(Debug, Deserialize)]
pub struct TemplateListQuery {
    pub company_id: Option<i64>,
    pub is_active: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /templates/
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateListQuery>,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    let page = ListParams {
        skip: query.skip,
        limit: query.limit,
    };
    let templates = store::list_templates(
        &state.db,
        query.company_id,
        query.is_active,
        page.offset(),
        page.page_size(),
    )
    .await?;
    Ok(Json(templates))
}

/// PUT /templates/:id
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<TemplateUpdate>,
) -> Result<Json<TemplateRow>, AppError> {
    let template = store::update_template(&state.db, id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    Ok(Json(template))
}
