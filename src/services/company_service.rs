use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::CompanyStore;
use crate::dto::company_dto::{CompanyListResponse, CompanyPagination};
use crate::error::{Error, Result};
use crate::models::company::Company;
use crate::services::pagination::{PageRequest, Pagination};

pub const DEFAULT_COMPANY_PAGE_LIMIT: i64 = 20;
pub const DEFAULT_COMPANY_SEARCH_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyStore>,
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyStore>) -> Self {
        Self { companies }
    }

    pub async fn list(
        &self,
        request: PageRequest,
        search: Option<String>,
    ) -> Result<CompanyListResponse> {
        let (companies, total) = self
            .companies
            .list_companies(search, request.skip(), request.limit)
            .await?;
        Ok(CompanyListResponse {
            companies,
            pagination: CompanyPagination::from(Pagination::new(request, total)),
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Company> {
        self.companies
            .company_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Company not found".to_string()))
    }

    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<Company>> {
        self.companies
            .search_companies(query.trim().to_string(), limit)
            .await
    }
}
