use axum::{
    extract::State,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    dto::{
        company_dto::{CompanyListQuery, CompanySearchQuery},
        response::ApiResponse,
    },
    error::{Error, Result},
    routes::extract::{Path, Query},
    services::{
        company_service::{DEFAULT_COMPANY_PAGE_LIMIT, DEFAULT_COMPANY_SEARCH_LIMIT},
        pagination::{PageRequest, MAX_PAGE_LIMIT},
    },
    utils::query::{lenient_int, non_blank},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidate/companies",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("limit" = Option<String>, Query, description = "Page size, default 20, max 50"),
        ("search" = Option<String>, Query, description = "Substring of the company name")
    ),
    responses(
        (status = 200, description = "Active companies by name", body = serde_json::Value)
    )
)]
#[axum::debug_handler]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<impl IntoResponse> {
    let request = PageRequest::from_raw_with(
        query.page.as_deref(),
        query.limit.as_deref(),
        DEFAULT_COMPANY_PAGE_LIMIT,
    );
    let list = state
        .company_service
        .list(request, non_blank(query.search.as_deref()))
        .await?;
    Ok(ApiResponse::ok("Companies retrieved successfully", list))
}

#[utoipa::path(
    get,
    path = "/api/candidate/companies/search",
    params(
        ("q" = String, Query, description = "Substring of the company name"),
        ("limit" = Option<String>, Query, description = "Maximum results, default 10")
    ),
    responses(
        (status = 200, description = "Matching companies", body = serde_json::Value),
        (status = 400, description = "Missing query")
    )
)]
#[axum::debug_handler]
pub async fn search_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanySearchQuery>,
) -> Result<impl IntoResponse> {
    let q = non_blank(query.q.as_deref())
        .ok_or_else(|| Error::BadRequest("Search query is required".to_string()))?;
    let limit = lenient_int(
        query.limit.as_deref(),
        DEFAULT_COMPANY_SEARCH_LIMIT,
        1,
        MAX_PAGE_LIMIT,
    );
    let companies = state.company_service.search(&q, limit).await?;
    Ok(ApiResponse::ok("Companies retrieved successfully", companies))
}

#[utoipa::path(
    get,
    path = "/api/candidate/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company", body = serde_json::Value),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.get(id).await?;
    Ok(ApiResponse::ok("Company retrieved successfully", company))
}
