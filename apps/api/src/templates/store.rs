use sqlx::PgPool;

use crate::models::template::{TemplateCreate, TemplateRow, TemplateUpdate};

pub async fn create_template(
    pool: &PgPool,
    payload: &TemplateCreate,
) -> Result<TemplateRow, sqlx::Error> {
    sqlx::query_as::<_, TemplateRow>(
        r#"
        INSERT INTO email_templates
            (name, subject, body, company_id, is_active, variant, performance_metrics)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.subject)
    .bind(&payload.body)
    .bind(payload.company_id)
    .bind(payload.is_active.unwrap_or(true))
    .bind(&payload.variant)
    .bind(&payload.performance_metrics)
    .fetch_one(pool)
    .await
}

pub async fn get_template(pool: &PgPool, id: i64) -> Result<Option<TemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, TemplateRow>("SELECT * FROM email_templates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_templates(
    pool: &PgPool,
    company_id: Option<i64>,
    is_active: Option<bool>,
    skip: i64,
    limit: i64,
) -> Result<Vec<TemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, TemplateRow>(
        r#"
        SELECT * FROM email_templates
        WHERE ($1::BIGINT IS NULL OR company_id = $1)
          AND ($2::BOOLEAN IS NULL OR is_active = $2)
        ORDER BY id
        OFFSET $3 LIMIT $4
        "#,
    )
    .bind(company_id)
    .bind(is_active)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Fetch-merge-write partial update. Returns None when the row is absent.
pub async fn update_template(
    pool: &PgPool,
    id: i64,
    update: TemplateUpdate,
) -> Result<Option<TemplateRow>, sqlx::Error> {
    let Some(mut template) = get_template(pool, id).await? else {
        return Ok(None);
    };
    apply_update(&mut template, update);

    let updated = sqlx::query_as::<_, TemplateRow>(
        r#"
        UPDATE email_templates
        SET name = $2, subject = $3, body = $4, is_active = $5,
            variant = $6, performance_metrics = $7, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&template.name)
    .bind(&template.subject)
    .bind(&template.body)
    .bind(template.is_active)
    .bind(&template.variant)
    .bind(&template.performance_metrics)
    .fetch_one(pool)
    .await?;

    Ok(Some(updated))
}

/// Merges supplied fields onto the stored row; absent fields are untouched.
pub fn apply_update(template: &mut TemplateRow, update: TemplateUpdate) {
    if let Some(v) = update.name {
        template.name = v;
    }
    if let Some(v) = update.subject {
        template.subject = v;
    }
    if let Some(v) = update.body {
        template.body = v;
    }
    if let Some(v) = update.is_active {
        template.is_active = v;
    }
    if let Some(v) = update.variant {
        template.variant = Some(v);
    }
    if let Some(v) = update.performance_metrics {
        template.performance_metrics = Some(v);
    }
}
