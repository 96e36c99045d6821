pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::database::postgres::PgStore;
use crate::database::store::{CandidateStore, CompanyStore, JobStore, SkillStore};
use crate::services::{
    company_service::CompanyService, match_scorer::MatchScorer, ranking_service::RankingService,
    skill_service::SkillService, skill_set_service::SkillSetService,
    suggestion_service::SuggestionService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ranking_service: RankingService,
    pub suggestion_service: SuggestionService,
    pub company_service: CompanyService,
    pub skill_service: SkillService,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self::with_store(config, Arc::new(PgStore::new(pool)))
    }

    /// Wires every service to one backing store.
    pub fn with_store<S>(config: Config, store: Arc<S>) -> Self
    where
        S: CandidateStore + JobStore + CompanyStore + SkillStore + 'static,
    {
        let skill_sets = SkillSetService::new(store.clone());
        let scorer = MatchScorer::new(config.experience_policy);

        let ranking_service = RankingService::new(store.clone(), store.clone(), skill_sets, scorer);
        let suggestion_service = SuggestionService::new(store.clone());
        let company_service = CompanyService::new(store.clone());
        let skill_service = SkillService::new(store);

        Self {
            config: Arc::new(config),
            ranking_service,
            suggestion_service,
            company_service,
            skill_service,
        }
    }
}
