pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::companies::handlers as companies;
use crate::engagements::handlers as engagements;
use crate::prospects::handlers as prospects;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Companies
        .route(
            "/companies/",
            post(companies::create_company).get(companies::list_companies),
        )
        .route("/companies/upload-csv", post(companies::upload_companies_csv))
        .route(
            "/companies/:id",
            get(companies::get_company).put(companies::update_company),
        )
        // Prospects
        .route(
            "/prospects/",
            post(prospects::create_prospect).get(prospects::list_prospects),
        )
        .route(
            "/prospects/:id",
            get(prospects::get_prospect).put(prospects::update_prospect),
        )
        .route(
            "/prospects/:id/engagement/",
            get(engagements::prospect_engagement),
        )
        // Templates
        .route(
            "/templates/",
            post(templates::create_template).get(templates::list_templates),
        )
        .route(
            "/templates/:id",
            get(templates::get_template).put(templates::update_template),
        )
        // Engagements
        .route(
            "/engagements/",
            post(engagements::create_engagement).get(engagements::list_engagements),
        )
        .route("/engagements/metrics/", get(engagements::engagement_metrics))
        .route(
            "/engagements/:id",
            get(engagements::get_engagement).put(engagements::update_engagement),
        )
        .with_state(state)
}
