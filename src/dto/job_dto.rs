use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::experience::ExperienceBracket;
use crate::models::job::JobPosting;
use crate::services::pagination::Pagination;
use crate::services::ranking_service::{JobDetailView, ScoredJob};

/// Raw ranking query string. Every value stays a string here so lenient
/// parsing and validation happen in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub job_type: Option<String>,
    #[serde(alias = "experience")]
    pub experience_level: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    pub is_remote: Option<String>,
    pub posted_within: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDetail {
    pub skill_id: String,
    pub name: String,
    pub category: String,
    pub rating: Option<f64>,
    pub required_experience: Option<f64>,
}

/// Fields of a posting that are safe to hand to candidates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub job_code: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub job_role: Option<String>,
    pub company_id: Option<Uuid>,
    pub company_name: String,
    pub job_type: Option<String>,
    pub work_experience: Option<f64>,
    pub experience_level: Option<ExperienceBracket>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub posted_on: Option<DateTime<Utc>>,
    pub last_date: Option<DateTime<Utc>>,
    pub openings: i32,
    pub applications_count: i32,
}

impl From<&JobPosting> for JobSummary {
    fn from(job: &JobPosting) -> Self {
        Self {
            id: job.id,
            job_code: job.job_code.clone(),
            title: job.title.clone(),
            description: job.description.clone(),
            job_role: job.job_role.clone(),
            company_id: job.company_id,
            company_name: job.resolved_company_name().to_string(),
            job_type: job.job_type.clone(),
            work_experience: job.work_experience,
            experience_level: job.experience_bracket(),
            city: job.city.clone(),
            state: job.state.clone(),
            country: job.country.clone(),
            posted_on: job.posted_on,
            last_date: job.last_date,
            openings: job.openings,
            applications_count: job.applications_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: JobSummary,
    pub match_score: f64,
    pub match_percentage: f64,
    pub skill_match_count: usize,
    pub total_required_skills: usize,
    pub skill_details: Vec<SkillDetail>,
}

impl From<ScoredJob> for RankedJob {
    fn from(scored: ScoredJob) -> Self {
        Self {
            job: JobSummary::from(&scored.job),
            match_score: scored.score.match_score,
            match_percentage: scored.score.match_percentage,
            skill_match_count: scored.score.skill_match_count,
            total_required_skills: scored.score.total_required_skills,
            skill_details: scored.skill_details,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub jobs: Vec<RankedJob>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: JobSummary,
    pub views: i32,
    pub skill_details: Vec<SkillDetail>,
}

impl From<JobDetailView> for JobDetail {
    fn from(view: JobDetailView) -> Self {
        Self {
            job: JobSummary::from(&view.job),
            views: view.job.views,
            skill_details: view.skill_details,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleSuggestions {
    pub titles: Vec<String>,
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestions {
    pub cities: Vec<String>,
    pub states: Vec<String>,
    pub countries: Vec<String>,
}
