use std::collections::BTreeMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::candidate::CandidateProfile;
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::models::skill::Skill;
use crate::services::job_filter::{JobFilter, TextField};
use crate::services::match_scorer::{MatchScore, MatchScorer};
use crate::services::skill_set_service::CandidateSkillSet;

/// Distinct values per requested facet.
pub type FacetValues = BTreeMap<TextField, Vec<String>>;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn candidate_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    /// One page of jobs matching `filter`, company name joined in, each
    /// scored against `candidate`. Ordered by score, then newest first with
    /// undated jobs last, then id. The total is the match count before paging.
    async fn ranked_jobs(
        &self,
        filter: &JobFilter,
        candidate: &CandidateSkillSet,
        scorer: MatchScorer,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<(JobPosting, MatchScore)>, i64)>;

    /// One page of matching jobs, newest first, plus the total match count.
    async fn page_jobs(
        &self,
        filter: &JobFilter,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<JobPosting>, i64)>;

    async fn job_by_id(&self, id: Uuid) -> Result<Option<JobPosting>>;

    async fn increment_views(&self, id: Uuid) -> Result<()>;

    /// For each facet, the distinct non-blank values containing `needle`
    /// among jobs matching `filter`, sorted ascending, at most `limit` each.
    /// All facets come back from a single round trip.
    async fn facet_values(
        &self,
        filter: &JobFilter,
        facets: &[TextField],
        needle: &str,
        limit: i64,
    ) -> Result<FacetValues>;
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn list_companies(
        &self,
        search: Option<String>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Company>, i64)>;

    async fn company_by_id(&self, id: Uuid) -> Result<Option<Company>>;

    async fn search_companies(&self, query: String, limit: i64) -> Result<Vec<Company>>;
}

#[async_trait]
pub trait SkillStore: Send + Sync {
    async fn skills_by_ids(&self, ids: &[String]) -> Result<Vec<Skill>>;

    /// Active skills; with a search term, name matches only.
    async fn list_skills(&self, search: Option<String>, limit: Option<i64>) -> Result<Vec<Skill>>;
}
