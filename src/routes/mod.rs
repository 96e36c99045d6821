pub mod companies;
pub mod extract;
pub mod health;
pub mod jobs;
pub mod skills;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::auth::require_candidate, AppState};

pub fn router(state: AppState) -> Router {
    let base_routes = Router::new().route("/health", get(health::health));

    let candidate_api = Router::new()
        .route("/api/candidate/jobs/ranking", get(jobs::rank_jobs))
        .route("/api/candidate/jobs/suggestions", get(jobs::job_suggestions))
        .route(
            "/api/candidate/jobs/location-suggestions",
            get(jobs::location_suggestions),
        )
        .route("/api/candidate/jobs/search", get(jobs::search_jobs))
        .route("/api/candidate/jobs/:id", get(jobs::get_job))
        .route("/api/candidate/companies", get(companies::list_companies))
        .route(
            "/api/candidate/companies/search",
            get(companies::search_companies),
        )
        .route("/api/candidate/companies/:id", get(companies::get_company))
        .route("/api/candidate/skills", get(skills::list_skills))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_candidate,
        ));

    base_routes
        .merge(candidate_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
