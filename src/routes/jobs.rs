use axum::{
    extract::{Extension, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    dto::{
        job_dto::{
            JobDetail, JobSearchQuery, JobSearchResponse, JobSummary, RankedJob, RankingQuery,
            RankingResponse, SuggestionQuery,
        },
        response::ApiResponse,
    },
    error::{Error, Result},
    middleware::auth::AuthCandidate,
    routes::extract::{Path, Query},
    services::{
        job_filter::RankingOptions, pagination::PageRequest, suggestion_service::suggestion_limit,
    },
    AppState,
};

/// `q` must be present and non-empty. Whitespace-only passes here and yields
/// empty suggestions further down.
fn required_query(q: Option<&str>) -> Result<&str> {
    match q {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(Error::BadRequest("Search query is required".to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/api/candidate/jobs/ranking",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("limit" = Option<String>, Query, description = "Page size, default 10, max 50"),
        ("location" = Option<String>, Query, description = "Substring of city, state or country"),
        ("jobTitle" = Option<String>, Query, description = "Substring of title or company name"),
        ("jobType" = Option<String>, Query, description = "full-time, part-time, contract, internship or freelance"),
        ("experienceLevel" = Option<String>, Query, description = "Comma separated experience levels"),
        ("postedWithin" = Option<String>, Query, description = "Posted within this many days"),
    ),
    responses(
        (status = 200, description = "Ranked jobs for the candidate", body = serde_json::Value),
        (status = 400, description = "Unknown job type or experience level"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn rank_jobs(
    State(state): State<AppState>,
    Extension(candidate): Extension<AuthCandidate>,
    Query(query): Query<RankingQuery>,
) -> Result<impl IntoResponse> {
    let options = RankingOptions::parse(&query)?;
    let page = state.ranking_service.rank_jobs(candidate.id, &options).await?;

    Ok(ApiResponse::ok(
        "Jobs ranked successfully",
        RankingResponse {
            jobs: page.jobs.into_iter().map(RankedJob::from).collect(),
            pagination: page.pagination,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidate/jobs/suggestions",
    params(
        ("q" = String, Query, description = "Text to complete"),
        ("limit" = Option<String>, Query, description = "Values per list, default 8")
    ),
    responses(
        (status = 200, description = "Matching job titles and company names", body = serde_json::Value),
        (status = 400, description = "Missing query")
    )
)]
#[axum::debug_handler]
pub async fn job_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<impl IntoResponse> {
    let q = required_query(query.q.as_deref())?;
    let suggestions = state
        .suggestion_service
        .title_suggestions(q, suggestion_limit(query.limit.as_deref()))
        .await?;
    Ok(ApiResponse::ok("Suggestions retrieved successfully", suggestions))
}

#[utoipa::path(
    get,
    path = "/api/candidate/jobs/location-suggestions",
    params(
        ("q" = String, Query, description = "Text to complete"),
        ("limit" = Option<String>, Query, description = "Values per list, default 8")
    ),
    responses(
        (status = 200, description = "Matching cities, states and countries", body = serde_json::Value),
        (status = 400, description = "Missing query")
    )
)]
#[axum::debug_handler]
pub async fn location_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<impl IntoResponse> {
    let q = required_query(query.q.as_deref())?;
    let suggestions = state
        .suggestion_service
        .location_suggestions(q, suggestion_limit(query.limit.as_deref()))
        .await?;
    Ok(ApiResponse::ok(
        "Location suggestions retrieved successfully",
        suggestions,
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidate/jobs/search",
    params(
        ("q" = String, Query, description = "Text searched in title, description and company"),
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("limit" = Option<String>, Query, description = "Page size, default 10, max 50")
    ),
    responses(
        (status = 200, description = "Matching jobs, newest first", body = serde_json::Value),
        (status = 400, description = "Missing query")
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let q = required_query(query.q.as_deref())?.trim();
    if q.is_empty() {
        return Err(Error::BadRequest("Search query is required".to_string()));
    }
    let request = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());
    let page = state.ranking_service.search_jobs(q, request).await?;

    Ok(ApiResponse::ok(
        "Jobs retrieved successfully",
        JobSearchResponse {
            jobs: page.jobs.iter().map(JobSummary::from).collect(),
            pagination: page.pagination,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidate/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job detail", body = serde_json::Value),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let view = state.ranking_service.job_detail(id).await?;

    let service = state.ranking_service.clone();
    tokio::spawn(async move {
        if let Err(err) = service.increment_views(id).await {
            tracing::warn!(job_id = %id, error = %err, "failed to record job view");
        }
    });

    Ok(ApiResponse::ok(
        "Job retrieved successfully",
        JobDetail::from(view),
    ))
}
