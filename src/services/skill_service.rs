use std::sync::Arc;

use crate::database::store::SkillStore;
use crate::error::Result;
use crate::models::skill::Skill;

pub const SKILL_SEARCH_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct SkillService {
    skills: Arc<dyn SkillStore>,
}

impl SkillService {
    pub fn new(skills: Arc<dyn SkillStore>) -> Self {
        Self { skills }
    }

    /// With a search term, the first ten name matches; otherwise the whole
    /// active catalog.
    pub async fn list(&self, search: Option<String>) -> Result<Vec<Skill>> {
        match search {
            Some(term) => self.skills.list_skills(Some(term), Some(SKILL_SEARCH_LIMIT)).await,
            None => self.skills.list_skills(None, None).await,
        }
    }
}
