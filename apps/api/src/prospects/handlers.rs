use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::companies;
use crate::errors::AppError;
use crate::models::prospect::{ProspectCreate, ProspectRow, ProspectUpdate};
use crate::models::ListParams;
use crate::prospects::store;
use crate::state::AppState;
use crate::validation::is_valid_email;

/// POST /prospects/
pub async fn create_prospect(
    State(state): State<AppState>,
    Json(payload): Json<ProspectCreate>,
) -> Result<Json<ProspectRow>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Prospect name must not be empty".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            payload.email
        )));
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

    let prospect = store::create_prospect(&state.db, &payload)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(d) if d.is_unique_violation() => AppError::Validation(format!(
                "A prospect with email '{}' already exists",
                payload.email
            )),
            _ => AppError::Database(e),
        })?;
    Ok(Json(prospect))
}

/// GET /prospects/:id
pub async fn get_prospect(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProspectRow>, AppError> {
    let prospect = store::get_prospect(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Prospect {id} not found")))?;
    Ok(Json(prospect))
}

#[derive(Debug, Deserialize)]
pub struct ProspectListQuery {
    pub status: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /prospects/
pub async fn list_prospects(
    State(state): State<AppState>,
    Query(query): Query<ProspectListQuery>,
) -> Result<Json<Vec<ProspectRow>>, AppError> {
    let page = ListParams {
        skip: query.skip,
        limit: query.limit,
    };
    let prospects = store::list_prospects(
        &state.db,
        query.status.as_deref(),
        page.offset(),
        page.page_size(),
    )
    .await?;
    Ok(Json(prospects))
}

/// PUT /prospects/:id
pub async fn update_prospect(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<ProspectUpdate>,
) -> Result<Json<ProspectRow>, AppError> {
    if let Some(email) = &update.email {
        if !is_valid_email(email) {
            return Err(AppError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
    }
    if let Some(company_id) = update.company_id {
        if companies::store::get_company(&state.db, company_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(format!(
                "Company {company_id} does not exist"
            )));
        }
    }

    let prospect = store::update_prospect(&state.db, id, update)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(d) if d.is_unique_violation() => {
                AppError::Validation("A prospect with that email already exists".into())
            }
            _ => AppError::Database(e),
        })?
        .ok_or_else(|| AppError::NotFound(format!("Prospect {id} not found")))?;
    Ok(Json(prospect))
}
