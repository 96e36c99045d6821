//! Candidate job ranking.
//!
//! Load the candidate's skills, then ask the job store for one scored, sorted
//! page of matching jobs. Filtering, scoring, ordering and paging run inside
//! that single store call; skill details are resolved for the page only.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::{JobStore, SkillStore};
use crate::dto::job_dto::SkillDetail;
use crate::error::{Error, Result};
use crate::models::job::JobPosting;
use crate::models::skill::Skill;
use crate::services::job_filter::{JobFilter, RankingOptions};
use crate::services::match_scorer::{MatchScore, MatchScorer};
use crate::services::pagination::{PageRequest, Pagination};
use crate::services::skill_set_service::SkillSetService;
use crate::utils::time;

#[derive(Debug, Clone)]
pub struct ScoredJob {
    pub job: JobPosting,
    pub score: MatchScore,
    pub skill_details: Vec<SkillDetail>,
}

#[derive(Debug, Clone)]
pub struct RankedPage {
    pub jobs: Vec<ScoredJob>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct JobDetailView {
    pub job: JobPosting,
    pub skill_details: Vec<SkillDetail>,
}

#[derive(Debug, Clone)]
pub struct JobSearchPage {
    pub jobs: Vec<JobPosting>,
    pub pagination: Pagination,
}

/// Score descending, then newest first with undated jobs last, then id.
/// The Postgres store's `ORDER BY` is the SQL rendering of this.
pub(crate) fn ranking_order(
    a: &(JobPosting, MatchScore),
    b: &(JobPosting, MatchScore),
) -> Ordering {
    let ((a_job, a_score), (b_job, b_score)) = (a, b);
    b_score
        .match_score
        .total_cmp(&a_score.match_score)
        .then_with(|| match (a_job.posted_on, b_job.posted_on) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a_job.id.cmp(&b_job.id))
}

#[derive(Clone)]
pub struct RankingService {
    jobs: Arc<dyn JobStore>,
    skills: Arc<dyn SkillStore>,
    skill_sets: SkillSetService,
    scorer: MatchScorer,
}

impl RankingService {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        skills: Arc<dyn SkillStore>,
        skill_sets: SkillSetService,
        scorer: MatchScorer,
    ) -> Self {
        Self {
            jobs,
            skills,
            skill_sets,
            scorer,
        }
    }

    pub async fn rank_jobs(&self, candidate_id: Uuid, options: &RankingOptions) -> Result<RankedPage> {
        match self.rank(candidate_id, options).await {
            Ok(page) => Ok(page),
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(%candidate_id, ?options, error = %err, "job ranking failed");
                } else {
                    tracing::warn!(%candidate_id, ?options, error = %err, "job ranking rejected");
                }
                Err(err)
            }
        }
    }

    async fn rank(&self, candidate_id: Uuid, options: &RankingOptions) -> Result<RankedPage> {
        let candidate = self.skill_sets.read(candidate_id).await?;

        let filter = JobFilter::for_ranking(options, time::now());
        let request = options.page;
        let (rows, total) = self
            .jobs
            .ranked_jobs(&filter, &candidate, self.scorer, request.skip(), request.limit)
            .await?;

        let mut page: Vec<ScoredJob> = rows
            .into_iter()
            .map(|(job, score)| ScoredJob {
                job,
                score,
                skill_details: Vec::new(),
            })
            .collect();

        let catalog = self.catalog_for(page.iter().map(|s| &s.job)).await?;
        for entry in &mut page {
            entry.skill_details = skill_details(&entry.job, &catalog);
        }

        tracing::debug!(
            %candidate_id,
            total,
            returned = page.len(),
            page = request.page,
            "ranked jobs"
        );

        Ok(RankedPage {
            jobs: page,
            pagination: Pagination::new(request, total),
        })
    }

    pub async fn job_detail(&self, id: Uuid) -> Result<JobDetailView> {
        let job = self
            .jobs
            .job_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        let catalog = self.catalog_for(std::iter::once(&job)).await?;
        let skill_details = skill_details(&job, &catalog);
        Ok(JobDetailView { job, skill_details })
    }

    pub async fn increment_views(&self, id: Uuid) -> Result<()> {
        self.jobs.increment_views(id).await
    }

    pub async fn search_jobs(&self, query: &str, request: PageRequest) -> Result<JobSearchPage> {
        let filter = JobFilter::for_text_search(query);
        let (jobs, total) = self
            .jobs
            .page_jobs(&filter, request.skip(), request.limit)
            .await?;
        Ok(JobSearchPage {
            jobs,
            pagination: Pagination::new(request, total),
        })
    }

    async fn catalog_for<'a>(
        &self,
        jobs: impl Iterator<Item = &'a JobPosting>,
    ) -> Result<HashMap<String, Skill>> {
        let mut seen = HashSet::new();
        let ids: Vec<String> = jobs
            .flat_map(|job| job.skill_required.iter())
            .map(|req| req.skill_id.clone())
            .filter(|id| seen.insert(id.clone()))
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let skills = self.skills.skills_by_ids(&ids).await?;
        Ok(skills
            .into_iter()
            .map(|skill| (skill.id.to_string(), skill))
            .collect())
    }
}

/// Requirement order is kept; requirements missing from the catalog are
/// dropped.
fn skill_details(job: &JobPosting, catalog: &HashMap<String, Skill>) -> Vec<SkillDetail> {
    job.skill_required
        .iter()
        .filter_map(|req| {
            let skill = catalog.get(&req.skill_id)?;
            Some(SkillDetail {
                skill_id: req.skill_id.clone(),
                name: skill.name.clone(),
                category: skill.category.clone(),
                rating: req.rating,
                required_experience: req.required_experience,
            })
        })
        .collect()
}
