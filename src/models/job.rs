use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::experience::ExperienceBracket;
use crate::models::skill::{number_of, skill_id_of};

pub const UNKNOWN_COMPANY: &str = "Unknown Company";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl JobType {
    /// Every spelling a stored job may carry for this type.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            JobType::FullTime => &["full-time", "Fulltime"],
            JobType::PartTime => &["part-time", "Part Time"],
            JobType::Contract => &["contract", "Contract"],
            JobType::Internship => &["internship", "Internship"],
            JobType::Freelance => &["freelance", "Freelance"],
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "fulltime" => Some(JobType::FullTime),
            "parttime" => Some(JobType::PartTime),
            "contract" => Some(JobType::Contract),
            "internship" => Some(JobType::Internship),
            "freelance" => Some(JobType::Freelance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Approved,
    /// Status value older documents used for a listable job.
    LegacyActive,
    Other(String),
}

impl JobStatus {
    pub const APPROVED: &'static str = "APPROVED";
    pub const LEGACY_ACTIVE: &'static str = "active";

    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(Self::APPROVED) => JobStatus::Approved,
            Some(Self::LEGACY_ACTIVE) => JobStatus::LegacyActive,
            Some(other) => JobStatus::Other(other.to_string()),
            None => JobStatus::Other(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    pub skill_id: String,
    pub rating: Option<f64>,
    pub required_experience: Option<f64>,
}

impl SkillRequirement {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            rating: None,
            required_experience: None,
        }
    }

    /// Parses a stored `skillRequired` array. Anything that is not an array
    /// reads as empty; entries without a usable skill id are dropped.
    pub fn list_from_json(value: Option<&JsonValue>) -> Vec<Self> {
        let Some(JsonValue::Array(items)) = value else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| {
                let skill_id = skill_id_of(item.get("skillId")?)?;
                Some(Self {
                    skill_id,
                    rating: number_of(item.get("rating")),
                    required_experience: number_of(
                        item.get("requiredExperience").or_else(|| item.get("experience")),
                    ),
                })
            })
            .collect()
    }
}

/// Canonical in-memory job. Legacy column shapes are folded in by
/// `From<JobRow>` before anything downstream sees the record.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub id: Uuid,
    pub job_code: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub job_role: Option<String>,
    pub company_id: Option<Uuid>,
    /// Denormalized snapshot written with the job.
    pub company_name: Option<String>,
    /// Name from the companies table, when the reference resolves.
    pub company_lookup_name: Option<String>,
    pub job_type: Option<String>,
    pub work_experience: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub posted_on: Option<DateTime<Utc>>,
    pub last_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub legacy_active: bool,
    pub status: JobStatus,
    pub skill_required: Vec<SkillRequirement>,
    pub openings: i32,
    pub applications_count: i32,
    pub views: i32,
}

impl JobPosting {
    pub fn resolved_company_name(&self) -> &str {
        self.company_lookup_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.company_name.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or(UNKNOWN_COMPANY)
    }

    pub fn experience_bracket(&self) -> Option<ExperienceBracket> {
        self.work_experience.map(ExperienceBracket::from_years)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Row as stored. Old documents carry `is_active` instead of `active`, the
/// `active` status instead of `APPROVED`, and a nested location object.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub job_code: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub job_role: Option<String>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub company_lookup_name: Option<String>,
    pub job_type: Option<String>,
    pub work_experience: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub location: Option<sqlx::types::Json<LegacyLocation>>,
    pub posted_on: Option<DateTime<Utc>>,
    pub last_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub is_active: Option<bool>,
    pub status: Option<String>,
    pub skill_required: Option<JsonValue>,
    pub openings: Option<i32>,
    pub applications_count: Option<i32>,
    pub views: Option<i32>,
}

fn prefer_flat(flat: Option<String>, nested: Option<String>) -> Option<String> {
    flat.filter(|s| !s.trim().is_empty())
        .or_else(|| nested.filter(|s| !s.trim().is_empty()))
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        let nested = row.location.map(|l| l.0).unwrap_or_default();
        Self {
            id: row.id,
            job_code: row.job_code,
            title: row.title,
            description: row.description,
            job_role: row.job_role,
            company_id: row.company_id,
            company_name: row.company_name,
            company_lookup_name: row.company_lookup_name,
            job_type: row.job_type,
            work_experience: row.work_experience,
            city: prefer_flat(row.city, nested.city),
            state: prefer_flat(row.state, nested.state),
            country: prefer_flat(row.country, nested.country),
            posted_on: row.posted_on,
            last_date: row.last_date,
            active: row.active.unwrap_or(false),
            legacy_active: row.is_active.unwrap_or(false),
            status: JobStatus::from_raw(row.status.as_deref()),
            skill_required: SkillRequirement::list_from_json(row.skill_required.as_ref()),
            openings: row.openings.unwrap_or(1),
            applications_count: row.applications_count.unwrap_or(0),
            views: row.views.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            job_code: None,
            title: "Backend Engineer".into(),
            description: None,
            job_role: None,
            company_id: None,
            company_name: None,
            company_lookup_name: None,
            job_type: Some("Fulltime".into()),
            work_experience: Some(3.0),
            city: None,
            state: None,
            country: None,
            location: None,
            posted_on: None,
            last_date: None,
            active: None,
            is_active: None,
            status: None,
            skill_required: None,
            openings: None,
            applications_count: None,
            views: None,
        }
    }

    #[test]
    fn flat_location_wins_over_nested() {
        let mut r = row();
        r.city = Some("Berlin".into());
        r.location = Some(sqlx::types::Json(LegacyLocation {
            city: Some("Munich".into()),
            state: Some("Bavaria".into()),
            country: None,
        }));
        let job = JobPosting::from(r);
        assert_eq!(job.city.as_deref(), Some("Berlin"));
        assert_eq!(job.state.as_deref(), Some("Bavaria"));
        assert_eq!(job.country, None);
    }

    #[test]
    fn legacy_flags_are_kept_apart() {
        let mut r = row();
        r.is_active = Some(true);
        r.status = Some("active".into());
        let job = JobPosting::from(r);
        assert!(!job.active);
        assert!(job.legacy_active);
        assert_eq!(job.status, JobStatus::LegacyActive);
    }

    #[test]
    fn malformed_skill_arrays_read_as_empty() {
        let mut r = row();
        r.skill_required = Some(json!({"skillId": "x"}));
        assert!(JobPosting::from(r).skill_required.is_empty());

        let mut r = row();
        r.skill_required = Some(json!([
            {"skillId": "S1", "rating": 4, "requiredExperience": 2},
            {"rating": 3},
            {"skillId": {"$oid": "s2"}, "experience": "1.5"}
        ]));
        let skills = JobPosting::from(r).skill_required;
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].skill_id, "S1");
        assert_eq!(skills[0].rating, Some(4.0));
        assert_eq!(skills[1].required_experience, Some(1.5));
    }

    #[test]
    fn company_name_falls_back_in_order() {
        let mut job = JobPosting::from(row());
        assert_eq!(job.resolved_company_name(), UNKNOWN_COMPANY);
        job.company_name = Some("Snapshot Inc".into());
        assert_eq!(job.resolved_company_name(), "Snapshot Inc");
        job.company_lookup_name = Some("Acme".into());
        assert_eq!(job.resolved_company_name(), "Acme");
    }

    #[test]
    fn job_type_accepts_case_variants() {
        assert_eq!(JobType::parse("Part Time"), Some(JobType::PartTime));
        assert_eq!(JobType::parse("full-time"), Some(JobType::FullTime));
        assert_eq!(JobType::parse("gig"), None);
    }
}
