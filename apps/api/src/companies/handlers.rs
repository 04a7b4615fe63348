use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::companies::store;
use crate::errors::AppError;
use crate::importer;
use crate::models::company::{CompanyCreate, CompanyRow, CompanyUpdate};
use crate::models::ListParams;
use crate::state::AppState;

/// POST /companies/
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CompanyCreate>,
) -> Result<Json<CompanyRow>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Company name must not be empty".into()));
    }
    let company = store::create_company(&state.db, &payload).await?;
    Ok(Json(company))
}

/// GET /companies/:id
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CompanyRow>, AppError> {
    let company = store::get_company(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    Ok(Json(company))
}

/// GET /companies/
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let companies = store::list_companies(&state.db, params.offset(), params.page_size()).await?;
    Ok(Json(companies))
}

/// PUT /companies/:id
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CompanyUpdate>,
) -> Result<Json<CompanyRow>, AppError> {
    if matches!(&update.name, Some(n) if n.trim().is_empty()) {
        return Err(AppError::Validation("Company name must not be empty".into()));
    }
    let company = store::update_company(&state.db, id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    Ok(Json(company))
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub companies_created: usize,
    pub prospects_created: usize,
}

/// POST /companies/upload-csv
///
/// Multipart upload of a prospect CSV. Rejects non-.csv filenames before
/// reading any rows; any row failure aborts the import with a 400.
pub async fn upload_companies_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Import(format!("Invalid multipart request: {e}")))?
    {
        if let Some(filename) = field.file_name() {
            let filename = filename.to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Import(format!("Failed to read upload: {e}")))?;
            file = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Import("No file found in request".into()))?;
    if !filename.ends_with(".csv") {
        return Err(AppError::Import("File must be a CSV".into()));
    }

    let text = String::from_utf8(data.to_vec())
        .map_err(|_| AppError::Import("File is not valid UTF-8".into()))?;

    let summary = importer::run_import(&state.db, &text).await?;
    Ok(Json(ImportResponse {
        message: "CSV processed successfully".into(),
        companies_created: summary.companies_created,
        prospects_created: summary.prospects_created,
    }))
}
