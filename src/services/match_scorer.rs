//! Scores a job against a candidate's skills and experience.
//!
//! `matchScore = matchPercentage * 0.7 + experienceMatch * 30`, where
//! `matchPercentage` is the share of the job's required skills the candidate
//! has and `experienceMatch` is 0 or 1.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::job::JobPosting;

pub const SKILL_WEIGHT: f64 = 0.7;
pub const EXPERIENCE_BONUS: f64 = 30.0;

/// How the candidate's overall experience is compared with a job's
/// `workExperience`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperiencePolicy {
    /// Candidate experience must be both `>=` and `<=` the job's value, i.e.
    /// exactly equal.
    #[default]
    Exact,
    /// Candidate experience is at least the job's value.
    MeetsOrExceeds,
}

impl std::str::FromStr for ExperiencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exact" => Ok(ExperiencePolicy::Exact),
            "meets_or_exceeds" | "minimum" => Ok(ExperiencePolicy::MeetsOrExceeds),
            other => Err(format!("unknown experience match policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub total_required_skills: usize,
    pub skill_match_count: usize,
    pub match_percentage: f64,
    pub experience_match: u8,
    pub match_score: f64,
}

impl MatchScore {
    /// Percentage and weighted score from the raw counts. The Postgres store
    /// orders by the same arithmetic in SQL and rebuilds its rows through here.
    pub fn from_counts(
        total_required_skills: usize,
        skill_match_count: usize,
        experience_match: bool,
    ) -> Self {
        let match_percentage = if total_required_skills > 0 {
            (skill_match_count as f64 / total_required_skills as f64) * 100.0
        } else {
            0.0
        };
        let experience_match = u8::from(experience_match);
        let match_score =
            match_percentage * SKILL_WEIGHT + f64::from(experience_match) * EXPERIENCE_BONUS;

        Self {
            total_required_skills,
            skill_match_count,
            match_percentage,
            experience_match,
            match_score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer {
    policy: ExperiencePolicy,
}

impl MatchScorer {
    pub fn new(policy: ExperiencePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ExperiencePolicy {
        self.policy
    }

    pub fn score(
        &self,
        job: &JobPosting,
        candidate_skills: &HashSet<String>,
        candidate_experience: f64,
    ) -> MatchScore {
        let skill_match_count = job
            .skill_required
            .iter()
            .filter(|req| candidate_skills.contains(&req.skill_id))
            .count();

        MatchScore::from_counts(
            job.skill_required.len(),
            skill_match_count,
            self.experience_matches(job, candidate_experience),
        )
    }

    fn experience_matches(&self, job: &JobPosting, candidate_experience: f64) -> bool {
        // A job without a requirement compares like a null: never matches.
        let Some(required) = job.work_experience else {
            return false;
        };
        match self.policy {
            ExperiencePolicy::Exact => {
                candidate_experience >= required && candidate_experience <= required
            }
            ExperiencePolicy::MeetsOrExceeds => candidate_experience >= required,
        }
    }
}
