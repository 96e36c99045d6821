use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skill::{number_of, skill_id_of};

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSkill {
    pub skill_id: String,
    pub experience_years: f64,
    pub rating: f64,
}

/// The slice of a candidate the ranking path reads.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub skills: Vec<CandidateSkill>,
    pub overall_experience: f64,
    pub current_city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub skills: Option<JsonValue>,
    pub overall_experience: Option<f64>,
    pub current_city: Option<String>,
    pub country: Option<String>,
}

impl From<CandidateRow> for CandidateProfile {
    fn from(row: CandidateRow) -> Self {
        let skills = match row.skills {
            Some(JsonValue::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    Some(CandidateSkill {
                        skill_id: skill_id_of(item.get("skillId")?)?,
                        experience_years: number_of(
                            item.get("experienceYears").or_else(|| item.get("experience")),
                        )
                        .unwrap_or(0.0),
                        rating: number_of(item.get("rating")).unwrap_or(0.0),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: row.id,
            skills,
            overall_experience: row.overall_experience.unwrap_or(0.0),
            current_city: row.current_city,
            country: row.country,
        }
    }
}
