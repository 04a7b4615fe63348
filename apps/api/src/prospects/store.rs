use sqlx::PgPool;

use crate::models::prospect::{ProspectCreate, ProspectRow, ProspectUpdate, DEFAULT_STATUS};

pub async fn create_prospect(
    pool: &PgPool,
    payload: &ProspectCreate,
) -> Result<ProspectRow, sqlx::Error> {
    sqlx::query_as::<_, ProspectRow>(
        r#"
        INSERT INTO prospects
            (name, email, position, company_id, linkedin_url, status, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.position)
    .bind(payload.company_id)
    .bind(&payload.linkedin_url)
    .bind(payload.status.as_deref().unwrap_or(DEFAULT_STATUS))
    .bind(&payload.notes)
    .fetch_one(pool)
    .await
}

pub async fn get_prospect(pool: &PgPool, id: i64) -> Result<Option<ProspectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProspectRow>("SELECT * FROM prospects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_prospects(
    pool: &PgPool,
    status: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<ProspectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProspectRow>(
        r#"
        SELECT * FROM prospects
        WHERE ($1::VARCHAR IS NULL OR status = $1)
        ORDER BY id
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(status)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Fetch-merge-write partial update. Returns None when the row is absent.
pub async fn update_prospect(
    pool: &PgPool,
    id: i64,
    update: ProspectUpdate,
) -> Result<Option<ProspectRow>, sqlx::Error> {
    let Some(mut prospect) = get_prospect(pool, id).await? else {
        return Ok(None);
    };
    apply_update(&mut prospect, update);

    let updated = sqlx::query_as::<_, ProspectRow>(
        r#"
        UPDATE prospects
        SET name = $2, email = $3, position = $4, company_id = $5,
            linkedin_url = $6, status = $7, notes = $8, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&prospect.name)
    .bind(&prospect.email)
    .bind(&prospect.position)
    .bind(prospect.company_id)
    .bind(&prospect.linkedin_url)
    .bind(&prospect.status)
    .bind(&prospect.notes)
    .fetch_one(pool)
    .await?;

    Ok(Some(updated))
}

/// Merges supplied fields onto the stored row; absent fields are untouched.
/// Score and last_contacted are owned by engagement creation and never
/// writable here.
pub fn apply_update(prospect: &mut ProspectRow, update: ProspectUpdate) {
    if let Some(v) = update.name {
        prospect.name = v;
    }
    if let Some(v) = update.email {
        prospect.email = v;
    }
    if let Some(v) = update.position {
        prospect.position = Some(v);
    }
    if let Some(v) = update.company_id {
        prospect.company_id = v;
    }
    if let Some(v) = update.linkedin_url {
        prospect.linkedin_url = Some(v);
    }
    if let Some(v) = update.status {
        prospect.status = v;
    }
    if let Some(v) = update.notes {
        prospect.notes = Some(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_prospect() -> ProspectRow {
        ProspectRow {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@acme.com".to_string(),
            position: Some("CTO".to_string()),
            company_id: 1,
            linkedin_url: None,
            status: "new".to_string(),
            engagement_score: 5,
            last_contacted: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_apply_update_changes_status_only() {
        let mut prospect = make_prospect();
        apply_update(
            &mut prospect,
            ProspectUpdate {
                status: Some("contacted".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(prospect.status, "contacted");
        assert_eq!(prospect.email, "alice@acme.com");
        assert_eq!(prospect.position.as_deref(), Some("CTO"));
    }

    #[test]
    fn test_apply_update_never_touches_score() {
        let mut prospect = make_prospect();
        apply_update(
            &mut prospect,
            ProspectUpdate {
                name: Some("Alice Smith".to_string()),
                notes: Some("met at conf".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(prospect.engagement_score, 5);
        assert!(prospect.last_contacted.is_none());
        assert_eq!(prospect.name, "Alice Smith");
    }
}
