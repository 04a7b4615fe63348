use sqlx::PgPool;

use crate::models::company::{CompanyCreate, CompanyRow, CompanyUpdate};

pub async fn create_company(
    pool: &PgPool,
    payload: &CompanyCreate,
) -> Result<CompanyRow, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies
            (name, industry, website, description, company_bio, product_info,
             key_insights, market_position, funding_info)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.industry)
    .bind(&payload.website)
    .bind(&payload.description)
    .bind(&payload.company_bio)
    .bind(&payload.product_info)
    .bind(&payload.key_insights)
    .bind(&payload.market_position)
    .bind(&payload.funding_info)
    .fetch_one(pool)
    .await
}

pub async fn get_company(pool: &PgPool, id: i64) -> Result<Option<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Exact, case-sensitive name match. Used by the CSV reconciler; company
/// names are not unique in storage, so the earliest row wins.
pub async fn find_company_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>(
        "SELECT * FROM companies WHERE name = $1 ORDER BY id ASC LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn list_companies(
    pool: &PgPool,
    skip: i64,
    limit: i64,
) -> Result<Vec<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY id OFFSET $1 LIMIT $2")
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Fetch-merge-write partial update. Returns None when the row is absent.
pub async fn update_company(
    pool: &PgPool,
    id: i64,
    update: CompanyUpdate,
) -> Result<Option<CompanyRow>, sqlx::Error> {
    let Some(mut company) = get_company(pool, id).await? else {
        return Ok(None);
    };
    apply_update(&mut company, update);

    let updated = sqlx::query_as::<_, CompanyRow>(
        r#"
        UPDATE companies
        SET name = $2, industry = $3, website = $4, description = $5,
            company_bio = $6, product_info = $7, key_insights = $8,
            market_position = $9, funding_info = $10, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&company.name)
    .bind(&company.industry)
    .bind(&company.website)
    .bind(&company.description)
    .bind(&company.company_bio)
    .bind(&company.product_info)
    .bind(&company.key_insights)
    .bind(&company.market_position)
    .bind(&company.funding_info)
    .fetch_one(pool)
    .await?;

    Ok(Some(updated))
}

/// Merges supplied fields onto the stored row; absent fields are untouched.
pub fn apply_update(company: &mut CompanyRow, update: CompanyUpdate) {
    if let Some(v) = update.name {
        company.name = v;
    }
    if let Some(v) = update.industry {
        company.industry = Some(v);
    }
    if let Some(v) = update.website {
        company.website = Some(v);
    }
    if let Some(v) = update.description {
        company.description = Some(v);
    }
    if let Some(v) = update.company_bio {
        company.company_bio = Some(v);
    }
    if let Some(v) = update.product_info {
        company.product_info = Some(v);
    }
    if let Some(v) = update.key_insights {
        company.key_insights = Some(v);
    }
    if let Some(v) = update.market_position {
        company.market_position = Some(v);
    }
    if let Some(v) = update.funding_info {
        company.funding_info = Some(v);
    }
}
