use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::engagements::metrics::MetricsRow;
use crate::models::engagement::{EngagementCreate, EngagementRow, EngagementUpdate};

/// Inserts an engagement and applies its side effects on the prospect
/// (score accumulation, last_contacted) in one transaction.
pub async fn create_engagement(
    pool: &PgPool,
    payload: &EngagementCreate,
) -> Result<EngagementRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let engagement = sqlx::query_as::<_, EngagementRow>(
        r#"
        INSERT INTO email_engagements
            (prospect_id, template_id, engagement_score, response_content)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(payload.prospect_id)
    .bind(payload.template_id)
    .bind(payload.engagement_score.unwrap_or(0))
    .bind(&payload.response_content)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE prospects
        SET engagement_score = engagement_score + $2,
            last_contacted = $3,
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(engagement.prospect_id)
    .bind(engagement.engagement_score)
    .bind(engagement.sent_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(engagement)
}

pub async fn get_engagement(pool: &PgPool, id: i64) -> Result<Option<EngagementRow>, sqlx::Error> {
    sqlx::query_as::<_, EngagementRow>("SELECT * FROM email_engagements WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_engagements(
    pool: &PgPool,
    skip: i64,
    limit: i64,
) -> Result<Vec<EngagementRow>, sqlx::Error> {
    sqlx::query_as::<_, EngagementRow>(
        "SELECT * FROM email_engagements ORDER BY id OFFSET $1 LIMIT $2",
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Fetch-merge-write partial update for milestone timestamps and response
/// content. Returns None when the row is absent.
pub async fn update_engagement(
    pool: &PgPool,
    id: i64,
    update: EngagementUpdate,
) -> Result<Option<EngagementRow>, sqlx::Error> {
    let Some(mut engagement) = get_engagement(pool, id).await? else {
        return Ok(None);
    };
    apply_update(&mut engagement, update);

    let updated = sqlx::query_as::<_, EngagementRow>(
        r#"
        UPDATE email_engagements
        SET opened_at = $2, clicked_at = $3, replied_at = $4, response_content = $5
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(engagement.opened_at)
    .bind(engagement.clicked_at)
    .bind(engagement.replied_at)
    .bind(&engagement.response_content)
    .fetch_one(pool)
    .await?;

    Ok(Some(updated))
}

/// Merges supplied milestone fields onto the stored row.
pub fn apply_update(engagement: &mut EngagementRow, update: EngagementUpdate) {
    if let Some(v) = update.opened_at {
        engagement.opened_at = Some(v);
    }
    if let Some(v) = update.clicked_at {
        engagement.clicked_at = Some(v);
    }
    if let Some(v) = update.replied_at {
        engagement.replied_at = Some(v);
    }
    if let Some(v) = update.response_content {
        engagement.response_content = Some(v);
    }
}

/// All engagements for one prospect, newest first.
pub async fn engagements_for_prospect(
    pool: &PgPool,
    prospect_id: i64,
) -> Result<Vec<EngagementRow>, sqlx::Error> {
    sqlx::query_as::<_, EngagementRow>(
        "SELECT * FROM email_engagements WHERE prospect_id = $1 ORDER BY sent_at DESC",
    )
    .bind(prospect_id)
    .fetch_all(pool)
    .await
}

/// Engagements inside the trailing window, joined to their template name,
/// optionally restricted to one company's prospects.
pub async fn metrics_rows(
    pool: &PgPool,
    since: DateTime<Utc>,
    company_id: Option<i64>,
) -> Result<Vec<MetricsRow>, sqlx::Error> {
    sqlx::query_as::<_, MetricsRow>(
        r#"
        SELECT e.template_id, t.name AS template_name,
               e.opened_at, e.clicked_at, e.replied_at, e.engagement_score
        FROM email_engagements e
        JOIN email_templates t ON t.id = e.template_id
        JOIN prospects p ON p.id = e.prospect_id
        WHERE e.sent_at >= $1
          AND ($2::BIGINT IS NULL OR p.company_id = $2)
        "#,
    )
    .bind(since)
    .bind(company_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_engagement() -> EngagementRow {
        EngagementRow {
            id: 1,
            prospect_id: 7,
            template_id: 3,
            sent_at: Utc::now(),
            opened_at: None,
            clicked_at: None,
            replied_at: None,
            response_content: None,
            engagement_score: 2,
        }
    }

    #[test]
    fn test_apply_update_sets_milestones() {
        let mut engagement = make_engagement();
        let opened = Utc::now();
        apply_update(
            &mut engagement,
            EngagementUpdate {
                opened_at: Some(opened),
                response_content: Some("sounds interesting".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(engagement.opened_at, Some(opened));
        assert_eq!(
            engagement.response_content.as_deref(),
            Some("sounds interesting")
        );
        assert!(engagement.clicked_at.is_none());
    }

    #[test]
    fn test_apply_update_cannot_clear_milestones() {
        let mut engagement = make_engagement();
        engagement.replied_at = Some(Utc::now());
        apply_update(&mut engagement, EngagementUpdate::default());
        assert!(engagement.replied_at.is_some());
        assert_eq!(engagement.engagement_score, 2);
    }
}
