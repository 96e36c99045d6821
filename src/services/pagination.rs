use serde::{Deserialize, Serialize};

use crate::utils::query::lenient_int;

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::from_raw_with(page, limit, DEFAULT_PAGE_LIMIT)
    }

    pub fn from_raw_with(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Self {
        Self {
            page: lenient_int(page, 1, 1, i64::MAX),
            limit: lenient_int(limit, default_limit, 1, MAX_PAGE_LIMIT),
        }
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_jobs: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };
        Self {
            current_page: request.page,
            total_pages,
            total_jobs: total,
            limit: request.limit,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        }
    }
}
