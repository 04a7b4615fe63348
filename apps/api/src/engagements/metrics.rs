//! Engagement aggregation: window totals, average score, best template,
//! and the per-prospect trend view. Pure single-pass functions over rows
//! already selected by the store, so everything here is unit-testable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::engagement::EngagementRow;

/// One windowed engagement joined to its template name.
#[derive(Debug, Clone, FromRow)]
pub struct MetricsRow {
    pub template_id: i64,
    pub template_name: String,
    pub opened_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
    pub replied_at: Option<DateTime<Utc>>,
    pub engagement_score: i32,
}

#[derive(Debug, Serialize)]
pub struct EngagementMetrics {
    pub total_sent: i64,
    pub total_opened: i64,
    pub total_clicked: i64,
    pub total_replied: i64,
    pub average_engagement_score: f64,
    pub best_performing_template: Option<String>,
}

/// Aggregates the selected window. Empty input yields zeros and a null best
/// template, never a division error. "Best" is the template with the
/// strictly highest opens+clicks+replies; ties resolve to the lowest
/// template id so the result is deterministic.
pub fn compute_metrics(rows: &[MetricsRow]) -> EngagementMetrics {
    let total_sent = rows.len() as i64;
    let total_opened = rows.iter().filter(|r| r.opened_at.is_some()).count() as i64;
    let total_clicked = rows.iter().filter(|r| r.clicked_at.is_some()).count() as i64;
    let total_replied = rows.iter().filter(|r| r.replied_at.is_some()).count() as i64;

    let average_engagement_score = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| f64::from(r.engagement_score)).sum::<f64>() / rows.len() as f64
    };

    // BTreeMap keeps template ids ordered, which is what makes the
    // strict-greater comparison below a lowest-id tie-break.
    let mut per_template: BTreeMap<i64, (i64, &str)> = BTreeMap::new();
    for row in rows {
        let responses = i64::from(row.opened_at.is_some())
            + i64::from(row.clicked_at.is_some())
            + i64::from(row.replied_at.is_some());
        let entry = per_template
            .entry(row.template_id)
            .or_insert((0, row.template_name.as_str()));
        entry.0 += responses;
    }

    let mut best: Option<(i64, &str)> = None;
    for &(score, name) in per_template.values() {
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, name));
        }
    }

    EngagementMetrics {
        total_sent,
        total_opened,
        total_clicked,
        total_replied,
        average_engagement_score,
        best_performing_template: best.map(|(_, name)| name.to_string()),
    }
}

/// One step of a prospect's outreach history, newest first.
#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub engagement_id: i64,
    pub sent_at: DateTime<Utc>,
    pub opened_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
    pub replied_at: Option<DateTime<Utc>>,
    pub engagement_score: i32,
}

#[derive(Debug, Serialize)]
pub struct ProspectEngagementView {
    pub prospect_id: i64,
    pub total_engagements: i64,
    pub last_engagement_at: Option<DateTime<Utc>>,
    pub engagements: Vec<EngagementRow>,
    pub trend: Vec<TrendPoint>,
}

/// Shapes the per-prospect response. `rows` must already be ordered by
/// `sent_at` descending; the trend preserves that order.
pub fn build_prospect_view(prospect_id: i64, rows: Vec<EngagementRow>) -> ProspectEngagementView {
    let trend = rows
        .iter()
        .map(|r| TrendPoint {
            engagement_id: r.id,
            sent_at: r.sent_at,
            opened_at: r.opened_at,
            clicked_at: r.clicked_at,
            replied_at: r.replied_at,
            engagement_score: r.engagement_score,
        })
        .collect();

    ProspectEngagementView {
        prospect_id,
        total_engagements: rows.len() as i64,
        last_engagement_at: rows.first().map(|r| r.sent_at),
        engagements: rows,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_row(
        template_id: i64,
        template_name: &str,
        opened: bool,
        clicked: bool,
        replied: bool,
        score: i32,
    ) -> MetricsRow {
        let now = Utc::now();
        MetricsRow {
            template_id,
            template_name: template_name.to_string(),
            opened_at: opened.then_some(now),
            clicked_at: clicked.then_some(now),
            replied_at: replied.then_some(now),
            engagement_score: score,
        }
    }

    #[test]
    fn test_empty_window_yields_zeros_and_null_best() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics.total_sent, 0);
        assert_eq!(metrics.total_opened, 0);
        assert_eq!(metrics.total_clicked, 0);
        assert_eq!(metrics.total_replied, 0);
        assert_eq!(metrics.average_engagement_score, 0.0);
        assert!(metrics.best_performing_template.is_none());
    }

    #[test]
    fn test_counts_each_milestone_independently() {
        let rows = vec![
            make_row(1, "Intro", true, true, false, 4),
            make_row(1, "Intro", true, false, false, 2),
            make_row(2, "Follow-up", false, false, true, 6),
        ];
        let metrics = compute_metrics(&rows);
        assert_eq!(metrics.total_sent, 3);
        assert_eq!(metrics.total_opened, 2);
        assert_eq!(metrics.total_clicked, 1);
        assert_eq!(metrics.total_replied, 1);
        assert!((metrics.average_engagement_score - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_best_template_sums_opens_clicks_replies() {
        let rows = vec![
            make_row(1, "Intro", true, false, false, 0),
            make_row(2, "Follow-up", true, true, true, 0),
        ];
        let metrics = compute_metrics(&rows);
        assert_eq!(metrics.best_performing_template.as_deref(), Some("Follow-up"));
    }

    #[test]
    fn test_best_template_tie_breaks_to_lowest_id() {
        let rows = vec![
            make_row(9, "Later", true, false, false, 0),
            make_row(2, "Earlier", false, true, false, 0),
        ];
        let metrics = compute_metrics(&rows);
        assert_eq!(metrics.best_performing_template.as_deref(), Some("Earlier"));
    }

    #[test]
    fn test_best_template_present_even_with_zero_responses() {
        let rows = vec![make_row(5, "Cold open", false, false, false, 0)];
        let metrics = compute_metrics(&rows);
        assert_eq!(metrics.best_performing_template.as_deref(), Some("Cold open"));
    }

    fn make_engagement(id: i64, sent_at: DateTime<Utc>) -> EngagementRow {
        EngagementRow {
            id,
            prospect_id: 7,
            template_id: 1,
            sent_at,
            opened_at: None,
            clicked_at: None,
            replied_at: None,
            response_content: None,
            engagement_score: 1,
        }
    }

    #[test]
    fn test_prospect_view_empty_history() {
        let view = build_prospect_view(7, vec![]);
        assert_eq!(view.prospect_id, 7);
        assert_eq!(view.total_engagements, 0);
        assert!(view.last_engagement_at.is_none());
        assert!(view.trend.is_empty());
    }

    #[test]
    fn test_prospect_view_preserves_descending_order() {
        let now = Utc::now();
        let rows = vec![
            make_engagement(3, now),
            make_engagement(2, now - Duration::days(1)),
            make_engagement(1, now - Duration::days(2)),
        ];
        let view = build_prospect_view(7, rows);
        assert_eq!(view.total_engagements, 3);
        assert_eq!(view.last_engagement_at, Some(now));
        let ids: Vec<i64> = view.trend.iter().map(|t| t.engagement_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(view
            .trend
            .windows(2)
            .all(|w| w[0].sent_at >= w[1].sent_at));
    }
}
