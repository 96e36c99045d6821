use axum::{
    extract::State,
    response::IntoResponse,
};

use crate::{
    dto::{response::ApiResponse, skill_dto::SkillListQuery},
    error::Result,
    routes::extract::Query,
    utils::query::non_blank,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidate/skills",
    params(
        ("search" = Option<String>, Query, description = "Substring of the skill name")
    ),
    responses(
        (status = 200, description = "Active catalog skills", body = serde_json::Value)
    )
)]
#[axum::debug_handler]
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<SkillListQuery>,
) -> Result<impl IntoResponse> {
    let skills = state
        .skill_service
        .list(non_blank(query.search.as_deref()))
        .await?;
    Ok(ApiResponse::ok("Skills retrieved successfully", skills))
}
