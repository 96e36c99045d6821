use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::CandidateStore;
use crate::error::{Error, Result};
use crate::models::candidate::CandidateProfile;

/// What ranking needs to know about a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSkillSet {
    pub candidate_id: Uuid,
    pub skill_ids: HashSet<String>,
    pub overall_experience: f64,
    pub current_city: Option<String>,
    pub country: Option<String>,
}

impl From<CandidateProfile> for CandidateSkillSet {
    fn from(profile: CandidateProfile) -> Self {
        Self {
            candidate_id: profile.id,
            skill_ids: profile.skills.into_iter().map(|s| s.skill_id).collect(),
            overall_experience: profile.overall_experience,
            current_city: profile.current_city,
            country: profile.country,
        }
    }
}

#[derive(Clone)]
pub struct SkillSetService {
    candidates: Arc<dyn CandidateStore>,
}

impl SkillSetService {
    pub fn new(candidates: Arc<dyn CandidateStore>) -> Self {
        Self { candidates }
    }

    pub async fn read(&self, candidate_id: Uuid) -> Result<CandidateSkillSet> {
        let profile = self
            .candidates
            .candidate_profile(candidate_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
        Ok(CandidateSkillSet::from(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::candidate::CandidateSkill;

    fn skill(id: &str) -> CandidateSkill {
        CandidateSkill {
            skill_id: id.to_string(),
            experience_years: 1.0,
            rating: 3.0,
        }
    }

    #[tokio::test]
    async fn duplicate_skills_collapse() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store
            .insert_candidate(CandidateProfile {
                id,
                skills: vec![skill("a"), skill("b"), skill("a")],
                overall_experience: 4.0,
                current_city: Some("Pune".into()),
                country: None,
            })
            .await;

        let service = SkillSetService::new(Arc::new(store));
        let set = service.read(id).await.unwrap();
        assert_eq!(set.skill_ids.len(), 2);
        assert!(set.skill_ids.contains("a") && set.skill_ids.contains("b"));
        assert_eq!(set.overall_experience, 4.0);
        assert_eq!(set.current_city.as_deref(), Some("Pune"));
    }

    #[tokio::test]
    async fn unknown_candidate_is_not_found() {
        let service = SkillSetService::new(Arc::new(MemoryStore::new()));
        let err = service.read(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "Candidate not found"));
    }
}
