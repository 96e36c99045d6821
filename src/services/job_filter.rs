//! Structured predicates over the job collection.
//!
//! A [`JobFilter`] is a conjunction of [`Clause`]s on top of an eligibility
//! rule. Each client option contributes at most one clause and an option that
//! is not supplied contributes nothing. The filter is rendered to SQL by the
//! Postgres store and evaluated directly by [`JobFilter::matches`] in the
//! in-memory store.

use chrono::{DateTime, Utc};

use crate::dto::job_dto::RankingQuery;
use crate::error::{Error, Result};
use crate::models::experience::ExperienceBracket;
use crate::models::job::{JobPosting, JobStatus, JobType};
use crate::services::pagination::PageRequest;
use crate::utils::query::{non_blank, parse_leading_int};
use crate::utils::time::days_before;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// `active == true AND status == 'APPROVED'`.
    Approved,
    /// Either generation of the active flag, either approved status value.
    ApprovedOrLegacy,
}

impl Eligibility {
    pub fn admits(self, job: &JobPosting) -> bool {
        match self {
            Eligibility::Approved => job.active && job.status == JobStatus::Approved,
            Eligibility::ApprovedOrLegacy => {
                (job.active || job.legacy_active)
                    && matches!(job.status, JobStatus::Approved | JobStatus::LegacyActive)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextField {
    Title,
    CompanyName,
    Description,
    City,
    State,
    Country,
}

impl TextField {
    pub fn value_of<'a>(self, job: &'a JobPosting) -> Option<&'a str> {
        match self {
            TextField::Title => Some(job.title.as_str()),
            TextField::CompanyName => job
                .company_lookup_name
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .or(job.company_name.as_deref()),
            TextField::Description => job.description.as_deref(),
            TextField::City => job.city.as_deref(),
            TextField::State => job.state.as_deref(),
            TextField::Country => job.country.as_deref(),
        }
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Needle appears in at least one of the fields.
    TextContains { fields: Vec<TextField>, needle: String },
    JobType(JobType),
    /// Required experience falls in at least one of the brackets' ranges.
    ExperienceIn(Vec<ExperienceBracket>),
    PostedSince(DateTime<Utc>),
}

impl Clause {
    pub fn matches(&self, job: &JobPosting) -> bool {
        match self {
            Clause::TextContains { fields, needle } => fields.iter().any(|field| {
                field
                    .value_of(job)
                    .is_some_and(|value| contains_ignore_case(value, needle))
            }),
            Clause::JobType(job_type) => job
                .job_type
                .as_deref()
                .is_some_and(|raw| job_type.spellings().contains(&raw)),
            Clause::ExperienceIn(brackets) => job.work_experience.is_some_and(|years| {
                brackets.iter().any(|bracket| {
                    let (min, max) = bracket.years_range();
                    years >= min && max.map_or(true, |max| years <= max)
                })
            }),
            Clause::PostedSince(since) => job.posted_on.is_some_and(|posted| posted >= *since),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobFilter {
    pub eligibility: Eligibility,
    pub clauses: Vec<Clause>,
}

impl JobFilter {
    pub fn new(eligibility: Eligibility) -> Self {
        Self {
            eligibility,
            clauses: Vec::new(),
        }
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Candidate-facing ranking filter.
    pub fn for_ranking(options: &RankingOptions, now: DateTime<Utc>) -> Self {
        let mut filter = JobFilter::new(Eligibility::Approved);

        if let Some(location) = &options.location {
            filter = filter.with(Clause::TextContains {
                fields: vec![TextField::City, TextField::State, TextField::Country],
                needle: location.clone(),
            });
        }
        if let Some(title) = &options.job_title {
            filter = filter.with(Clause::TextContains {
                fields: vec![TextField::Title, TextField::CompanyName],
                needle: title.clone(),
            });
        }
        if let Some(job_type) = options.job_type {
            filter = filter.with(Clause::JobType(job_type));
        }
        if !options.experience_levels.is_empty() {
            filter = filter.with(Clause::ExperienceIn(options.experience_levels.clone()));
        }
        if let Some(days) = options.posted_within_days {
            filter = filter.with(Clause::PostedSince(days_before(now, days)));
        }

        filter
    }

    pub fn for_text_search(query: &str) -> Self {
        JobFilter::new(Eligibility::ApprovedOrLegacy).with(Clause::TextContains {
            fields: vec![
                TextField::Title,
                TextField::Description,
                TextField::CompanyName,
            ],
            needle: query.to_string(),
        })
    }

    pub fn for_suggestions(query: &str, fields: &[TextField]) -> Self {
        JobFilter::new(Eligibility::ApprovedOrLegacy).with(Clause::TextContains {
            fields: fields.to_vec(),
            needle: query.to_string(),
        })
    }

    pub fn matches(&self, job: &JobPosting) -> bool {
        self.eligibility.admits(job) && self.clauses.iter().all(|clause| clause.matches(job))
    }
}

/// Ranking options after parsing the raw query string.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingOptions {
    pub page: PageRequest,
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub job_type: Option<JobType>,
    pub experience_levels: Vec<ExperienceBracket>,
    pub posted_within_days: Option<i64>,
}

impl RankingOptions {
    /// Validation happens here, before any store call. Salary bounds and the
    /// remote flag are accepted for compatibility and have no effect: jobs
    /// carry neither field.
    pub fn parse(query: &RankingQuery) -> Result<Self> {
        let job_type = match non_blank(query.job_type.as_deref()) {
            Some(raw) => Some(
                JobType::parse(&raw)
                    .ok_or_else(|| Error::BadRequest(format!("Unknown job type: {}", raw)))?,
            ),
            None => None,
        };

        let mut experience_levels = Vec::new();
        if let Some(raw) = query.experience_level.as_deref() {
            for label in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let bracket = ExperienceBracket::parse_label(label).ok_or_else(|| {
                    Error::BadRequest(format!("Unknown experience level: {}", label))
                })?;
                if !experience_levels.contains(&bracket) {
                    experience_levels.push(bracket);
                }
            }
        }

        let posted_within_days = query
            .posted_within
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|days| *days > 0);

        if query.min_salary.is_some() || query.max_salary.is_some() || query.is_remote.is_some() {
            tracing::debug!(
                min_salary = ?query.min_salary,
                max_salary = ?query.max_salary,
                is_remote = ?query.is_remote,
                "ignoring reserved ranking options"
            );
        }

        Ok(Self {
            page: PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref()),
            location: non_blank(query.location.as_deref()),
            job_title: non_blank(query.job_title.as_deref()),
            job_type,
            experience_levels,
            posted_within_days,
        })
    }
}
