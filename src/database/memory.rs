//! In-process store with the same query semantics as the Postgres store.
//! Backs the router-level integration tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::{CandidateStore, CompanyStore, FacetValues, JobStore, SkillStore};
use crate::error::Result;
use crate::models::candidate::CandidateProfile;
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::models::skill::Skill;
use crate::services::job_filter::{contains_ignore_case, JobFilter, TextField};
use crate::services::match_scorer::{MatchScore, MatchScorer};
use crate::services::ranking_service::ranking_order;
use crate::services::skill_set_service::CandidateSkillSet;

#[derive(Default)]
struct Collections {
    candidates: HashMap<Uuid, CandidateProfile>,
    jobs: HashMap<Uuid, JobPosting>,
    companies: HashMap<Uuid, Company>,
    skills: HashMap<Uuid, Skill>,
}

impl Collections {
    /// Mirrors the companies join: the looked-up name is always taken from
    /// the companies collection, never from what was inserted.
    fn joined(&self, job: &JobPosting) -> JobPosting {
        let mut job = job.clone();
        job.company_lookup_name = job
            .company_id
            .and_then(|id| self.companies.get(&id))
            .map(|c| c.company_name.clone());
        job
    }

    fn matching_jobs(&self, filter: &JobFilter) -> Vec<JobPosting> {
        let mut jobs: Vec<JobPosting> = self
            .jobs
            .values()
            .map(|job| self.joined(job))
            .filter(|job| filter.matches(job))
            .collect();
        jobs.sort_by_key(|job| job.id);
        jobs
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_candidate(&self, candidate: CandidateProfile) {
        self.inner
            .write()
            .await
            .candidates
            .insert(candidate.id, candidate);
    }

    pub async fn insert_job(&self, job: JobPosting) {
        self.inner.write().await.jobs.insert(job.id, job);
    }

    pub async fn insert_company(&self, company: Company) {
        self.inner
            .write()
            .await
            .companies
            .insert(company.id, company);
    }

    pub async fn insert_skill(&self, skill: Skill) {
        self.inner.write().await.skills.insert(skill.id, skill);
    }

    pub async fn job_views(&self, id: Uuid) -> Option<i32> {
        self.inner.read().await.jobs.get(&id).map(|job| job.views)
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn candidate_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>> {
        Ok(self.inner.read().await.candidates.get(&id).cloned())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn ranked_jobs(
        &self,
        filter: &JobFilter,
        candidate: &CandidateSkillSet,
        scorer: MatchScorer,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<(JobPosting, MatchScore)>, i64)> {
        let mut scored: Vec<(JobPosting, MatchScore)> = self
            .inner
            .read()
            .await
            .matching_jobs(filter)
            .into_iter()
            .map(|job| {
                let score =
                    scorer.score(&job, &candidate.skill_ids, candidate.overall_experience);
                (job, score)
            })
            .collect();
        scored.sort_by(ranking_order);

        let total = scored.len() as i64;
        let page = scored
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn page_jobs(
        &self,
        filter: &JobFilter,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<JobPosting>, i64)> {
        let mut jobs = self.inner.read().await.matching_jobs(filter);
        // Newest first, undated last, id as the final tie-break.
        jobs.sort_by(|a, b| {
            b.posted_on
                .is_some()
                .cmp(&a.posted_on.is_some())
                .then_with(|| b.posted_on.cmp(&a.posted_on))
                .then_with(|| a.id.cmp(&b.id))
        });
        let total = jobs.len() as i64;
        let page = jobs
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn job_by_id(&self, id: Uuid) -> Result<Option<JobPosting>> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.get(&id).map(|job| inner.joined(job)))
    }

    async fn increment_views(&self, id: Uuid) -> Result<()> {
        if let Some(job) = self.inner.write().await.jobs.get_mut(&id) {
            job.views += 1;
        }
        Ok(())
    }

    async fn facet_values(
        &self,
        filter: &JobFilter,
        facets: &[TextField],
        needle: &str,
        limit: i64,
    ) -> Result<FacetValues> {
        let jobs = self.inner.read().await.matching_jobs(filter);
        let mut values = FacetValues::new();
        for field in facets {
            let distinct: BTreeSet<String> = jobs
                .iter()
                .filter_map(|job| field.value_of(job))
                .map(str::trim)
                .filter(|v| !v.is_empty() && contains_ignore_case(v, needle))
                .map(str::to_string)
                .collect();
            values.insert(
                *field,
                distinct.into_iter().take(limit.max(0) as usize).collect(),
            );
        }
        Ok(values)
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn list_companies(
        &self,
        search: Option<String>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Company>, i64)> {
        let inner = self.inner.read().await;
        let mut companies: Vec<Company> = inner
            .companies
            .values()
            .filter(|c| c.active)
            .filter(|c| {
                search
                    .as_deref()
                    .map_or(true, |s| contains_ignore_case(&c.company_name, s))
            })
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.company_name.cmp(&b.company_name).then(a.id.cmp(&b.id)));
        let total = companies.len() as i64;
        let page = companies
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn company_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        Ok(self.inner.read().await.companies.get(&id).cloned())
    }

    async fn search_companies(&self, query: String, limit: i64) -> Result<Vec<Company>> {
        let (companies, _) = self.list_companies(Some(query), 0, limit).await?;
        Ok(companies)
    }
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn skills_by_ids(&self, ids: &[String]) -> Result<Vec<Skill>> {
        let inner = self.inner.read().await;
        Ok(inner
            .skills
            .values()
            .filter(|skill| ids.contains(&skill.id.to_string()))
            .cloned()
            .collect())
    }

    async fn list_skills(&self, search: Option<String>, limit: Option<i64>) -> Result<Vec<Skill>> {
        let inner = self.inner.read().await;
        let mut skills: Vec<Skill> = inner
            .skills
            .values()
            .filter(|skill| skill.active)
            .filter(|skill| {
                search
                    .as_deref()
                    .map_or(true, |s| contains_ignore_case(&skill.name, s))
            })
            .cloned()
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(limit) = limit {
            skills.truncate(limit.max(0) as usize);
        }
        Ok(skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{JobStatus, SkillRequirement};
    use crate::services::job_filter::Eligibility;
    use chrono::{TimeZone, Utc};

    fn job(title: &str, city: &str, company_id: Option<Uuid>) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            job_code: None,
            title: title.into(),
            description: None,
            job_role: None,
            company_id,
            company_name: Some("Snapshot Co".into()),
            company_lookup_name: None,
            job_type: None,
            work_experience: Some(1.0),
            city: Some(city.into()),
            state: None,
            country: None,
            posted_on: None,
            last_date: None,
            active: true,
            legacy_active: false,
            status: JobStatus::Approved,
            skill_required: vec![SkillRequirement::new("s1")],
            openings: 1,
            applications_count: 0,
            views: 0,
        }
    }

    #[test]
    fn join_uses_companies_collection() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let company_id = Uuid::new_v4();
            store
                .insert_company(Company {
                    id: company_id,
                    company_name: "Acme".into(),
                    email: None,
                    is_approved: true,
                    active: true,
                    image_link: None,
                    registration_date: None,
                })
                .await;
            let j = job("Dev", "Pune", Some(company_id));
            let id = j.id;
            store.insert_job(j).await;

            let found = store.job_by_id(id).await.unwrap().unwrap();
            assert_eq!(found.company_lookup_name.as_deref(), Some("Acme"));
            assert_eq!(found.resolved_company_name(), "Acme");
        });
    }

    #[tokio::test]
    async fn facets_are_distinct_sorted_and_capped() {
        let store = MemoryStore::new();
        for (title, city) in [("Dev", " Pune "), ("Dev", "Pune"), ("Ops", "Puri"), ("QA", "")] {
            store.insert_job(job(title, city, None)).await;
        }
        let filter = JobFilter::new(Eligibility::ApprovedOrLegacy);
        let facets = store
            .facet_values(&filter, &[TextField::City], "pu", 1)
            .await
            .unwrap();
        assert_eq!(facets[&TextField::City], vec!["Pune".to_string()]);

        let facets = store
            .facet_values(&filter, &[TextField::City], "pu", 10)
            .await
            .unwrap();
        assert_eq!(facets[&TextField::City], vec!["Pune".to_string(), "Puri".to_string()]);
    }

    #[tokio::test]
    async fn pages_are_newest_first() {
        let store = MemoryStore::new();
        let mut old = job("Old", "Pune", None);
        old.posted_on = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let mut new = job("New", "Pune", None);
        new.posted_on = Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        let undated = job("Undated", "Pune", None);
        store.insert_job(old).await;
        store.insert_job(undated).await;
        store.insert_job(new).await;

        let (page, total) = store
            .page_jobs(&JobFilter::new(Eligibility::Approved), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 3);
        let titles: Vec<_> = page.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }
}
