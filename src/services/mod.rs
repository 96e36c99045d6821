pub mod company_service;
pub mod job_filter;
pub mod match_scorer;
pub mod pagination;
pub mod ranking_service;
pub mod skill_service;
pub mod skill_set_service;
pub mod suggestion_service;
