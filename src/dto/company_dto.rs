use serde::{Deserialize, Serialize};

use crate::models::company::Company;
use crate::services::pagination::Pagination;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySearchQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_companies: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<Pagination> for CompanyPagination {
    fn from(p: Pagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_companies: p.total_jobs,
            limit: p.limit,
            has_next_page: p.has_next_page,
            has_prev_page: p.has_prev_page,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
    pub pagination: CompanyPagination,
}
