//! Autocomplete over the job collection.

use std::sync::Arc;

use crate::database::store::{FacetValues, JobStore};
use crate::dto::job_dto::{LocationSuggestions, TitleSuggestions};
use crate::error::Result;
use crate::services::job_filter::{JobFilter, TextField};
use crate::services::pagination::MAX_PAGE_LIMIT;
use crate::utils::query::lenient_int;

pub const DEFAULT_SUGGESTION_LIMIT: i64 = 8;

const TITLE_FACETS: [TextField; 2] = [TextField::Title, TextField::CompanyName];
const LOCATION_FACETS: [TextField; 3] = [TextField::City, TextField::State, TextField::Country];

pub fn suggestion_limit(raw: Option<&str>) -> i64 {
    lenient_int(raw, DEFAULT_SUGGESTION_LIMIT, 1, MAX_PAGE_LIMIT)
}

#[derive(Clone)]
pub struct SuggestionService {
    jobs: Arc<dyn JobStore>,
}

impl SuggestionService {
    pub fn new(jobs: Arc<dyn JobStore>) -> Self {
        Self { jobs }
    }

    pub async fn title_suggestions(&self, query: &str, limit: i64) -> Result<TitleSuggestions> {
        let Some(mut facets) = self.facets(query, &TITLE_FACETS, limit).await? else {
            return Ok(TitleSuggestions::default());
        };
        Ok(TitleSuggestions {
            titles: facets.remove(&TextField::Title).unwrap_or_default(),
            companies: facets.remove(&TextField::CompanyName).unwrap_or_default(),
        })
    }

    pub async fn location_suggestions(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<LocationSuggestions> {
        let Some(mut facets) = self.facets(query, &LOCATION_FACETS, limit).await? else {
            return Ok(LocationSuggestions::default());
        };
        Ok(LocationSuggestions {
            cities: facets.remove(&TextField::City).unwrap_or_default(),
            states: facets.remove(&TextField::State).unwrap_or_default(),
            countries: facets.remove(&TextField::Country).unwrap_or_default(),
        })
    }

    /// `None` for a blank query; the store is not consulted.
    async fn facets(
        &self,
        query: &str,
        fields: &[TextField],
        limit: i64,
    ) -> Result<Option<FacetValues>> {
        let needle = query.trim();
        if needle.is_empty() {
            return Ok(None);
        }
        let filter = JobFilter::for_suggestions(needle, fields);
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let values = self
            .jobs
            .facet_values(&filter, fields, needle, limit)
            .await
            .map_err(|err| {
                tracing::error!(query = needle, error = %err, "suggestion lookup failed");
                err
            })?;
        Ok(Some(values))
    }
}
