use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::database::store::{CandidateStore, CompanyStore, FacetValues, JobStore, SkillStore};
use crate::error::Result;
use crate::models::candidate::{CandidateProfile, CandidateRow};
use crate::models::company::Company;
use crate::models::job::{JobPosting, JobRow};
use crate::models::skill::Skill;
use crate::services::job_filter::{Clause, Eligibility, JobFilter, TextField};
use crate::services::match_scorer::{
    ExperiencePolicy, MatchScore, MatchScorer, EXPERIENCE_BONUS, SKILL_WEIGHT,
};
use crate::services::skill_set_service::CandidateSkillSet;

const JOB_COLUMNS: &str = "j.id, j.job_code, j.title, j.description, j.job_role, j.company_id, \
     j.company_name, c.company_name AS company_lookup_name, j.job_type, j.work_experience, \
     j.city, j.state, j.country, j.location, j.posted_on, j.last_date, j.active, j.is_active, \
     j.status, j.skill_required, j.openings, j.applications_count, j.views";

const JOB_SOURCE: &str = "FROM jobs j LEFT JOIN companies c ON c.id = j.company_id";

/// One row per usable `skillRequired` entry of `j`. Ids are read the same way
/// `SkillRequirement::list_from_json` reads them: a plain string or an
/// `{"$oid": "..."}` object, trimmed, blanks dropped.
const REQUIRED_SKILL_IDS: &str = "jsonb_array_elements(CASE WHEN jsonb_typeof(j.skill_required) = 'array' \
     THEN j.skill_required ELSE '[]'::jsonb END) AS req(item) \
     CROSS JOIN LATERAL (SELECT BTRIM(CASE jsonb_typeof(req.item -> 'skillId') \
     WHEN 'string' THEN req.item ->> 'skillId' \
     WHEN 'object' THEN CASE WHEN jsonb_typeof(req.item -> 'skillId' -> '$oid') = 'string' \
     THEN req.item -> 'skillId' ->> '$oid' END END) AS skill_id) r \
     WHERE r.skill_id <> ''";

const COMPANY_COLUMNS: &str =
    "id, company_name, email, is_approved, active, image_link, registration_date";

const SKILL_COLUMNS: &str = "id, name, category, active, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_jobs(&self, filter: &JobFilter) -> Result<i64> {
        let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) {}", JOB_SOURCE));
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

/// A ranked job with the counts its score is rebuilt from.
#[derive(FromRow)]
struct RankedRow {
    #[sqlx(flatten)]
    job: JobRow,
    total_required: i64,
    skill_match_count: i64,
    experience_match: bool,
    total_matches: i64,
}

fn field_expr(field: TextField) -> &'static str {
    match field {
        TextField::Title => "j.title",
        TextField::CompanyName => {
            "COALESCE(CASE WHEN BTRIM(c.company_name) <> '' THEN c.company_name END, j.company_name)"
        }
        TextField::Description => "j.description",
        TextField::City => {
            "COALESCE(NULLIF(BTRIM(j.city), ''), NULLIF(BTRIM(j.location->>'city'), ''))"
        }
        TextField::State => {
            "COALESCE(NULLIF(BTRIM(j.state), ''), NULLIF(BTRIM(j.location->>'state'), ''))"
        }
        TextField::Country => {
            "COALESCE(NULLIF(BTRIM(j.country), ''), NULLIF(BTRIM(j.location->>'country'), ''))"
        }
    }
}

/// `%needle%` with LIKE metacharacters escaped, so user text is matched
/// literally.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    qb.push(" WHERE ");
    match filter.eligibility {
        Eligibility::Approved => qb.push("j.active IS TRUE AND j.status = 'APPROVED'"),
        Eligibility::ApprovedOrLegacy => qb.push(
            "(j.active IS TRUE OR j.is_active IS TRUE) AND j.status IN ('APPROVED', 'active')",
        ),
    };

    for clause in &filter.clauses {
        qb.push(" AND ");
        match clause {
            Clause::TextContains { fields, needle } => {
                if fields.is_empty() {
                    qb.push("FALSE");
                    continue;
                }
                let pattern = like_pattern(needle);
                qb.push("(");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(field_expr(*field))
                        .push(" ILIKE ")
                        .push_bind(pattern.clone());
                }
                qb.push(")");
            }
            Clause::JobType(job_type) => {
                let spellings: Vec<String> =
                    job_type.spellings().iter().map(|s| s.to_string()).collect();
                qb.push("j.job_type = ANY(").push_bind(spellings).push(")");
            }
            Clause::ExperienceIn(brackets) => {
                if brackets.is_empty() {
                    qb.push("FALSE");
                    continue;
                }
                qb.push("(");
                for (i, bracket) in brackets.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    let (min, max) = bracket.years_range();
                    qb.push("(j.work_experience >= ").push_bind(min);
                    if let Some(max) = max {
                        qb.push(" AND j.work_experience <= ").push_bind(max);
                    }
                    qb.push(")");
                }
                qb.push(")");
            }
            Clause::PostedSince(since) => {
                qb.push("j.posted_on >= ").push_bind(*since);
            }
        }
    }
}

fn push_experience_match(
    qb: &mut QueryBuilder<'_, Postgres>,
    policy: ExperiencePolicy,
    experience: f64,
) {
    match policy {
        ExperiencePolicy::Exact => {
            qb.push_bind(experience)
                .push("::float8 >= j.work_experience AND ")
                .push_bind(experience)
                .push("::float8 <= j.work_experience");
        }
        ExperiencePolicy::MeetsOrExceeds => {
            qb.push_bind(experience)
                .push("::float8 >= j.work_experience");
        }
    }
}

/// Filter, company join, scoring, ordering and paging in one statement.
/// `total_matches` is the pre-paging count, present on every returned row.
fn ranked_query(
    filter: &JobFilter,
    candidate_skills: Vec<String>,
    experience: f64,
    policy: ExperiencePolicy,
    skip: i64,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(format!(
        "SELECT *, COUNT(*) OVER () AS total_matches FROM (SELECT {}, \
         m.total_required, m.skill_match_count, (",
        JOB_COLUMNS
    ));
    push_experience_match(&mut qb, policy, experience);
    qb.push(") IS TRUE AS experience_match ")
        .push(JOB_SOURCE)
        .push(
            " CROSS JOIN LATERAL (SELECT COUNT(*) AS total_required, \
             COUNT(*) FILTER (WHERE r.skill_id = ANY(",
        )
        .push_bind(candidate_skills)
        .push(")) AS skill_match_count FROM ")
        .push(REQUIRED_SKILL_IDS)
        .push(") m");
    push_filter(&mut qb, filter);

    qb.push(
        ") scored ORDER BY (CASE WHEN total_required > 0 \
         THEN skill_match_count::float8 / total_required::float8 * 100.0::float8 \
         ELSE 0::float8 END) * ",
    )
    .push_bind(SKILL_WEIGHT)
    .push(" + CASE WHEN experience_match THEN ")
    .push_bind(EXPERIENCE_BONUS)
    .push(" ELSE 0::float8 END DESC, posted_on DESC NULLS LAST, id LIMIT ")
    .push_bind(limit)
    .push(" OFFSET ")
    .push_bind(skip);
    qb
}

#[async_trait]
impl CandidateStore for PgStore {
    async fn candidate_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT id, skills, overall_experience, current_city, country
            FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CandidateProfile::from))
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn ranked_jobs(
        &self,
        filter: &JobFilter,
        candidate: &CandidateSkillSet,
        scorer: MatchScorer,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<(JobPosting, MatchScore)>, i64)> {
        let mut qb = ranked_query(
            filter,
            candidate.skill_ids.iter().cloned().collect(),
            candidate.overall_experience,
            scorer.policy(),
            skip,
            limit,
        );
        let rows = qb
            .build_query_as::<RankedRow>()
            .fetch_all(&self.pool)
            .await?;

        // Past the last page no row carries the window count.
        let total = match rows.first() {
            Some(row) => row.total_matches,
            None if skip > 0 => self.count_jobs(filter).await?,
            None => 0,
        };

        let jobs = rows
            .into_iter()
            .map(|row| {
                let score = MatchScore::from_counts(
                    row.total_required as usize,
                    row.skill_match_count as usize,
                    row.experience_match,
                );
                (JobPosting::from(row.job), score)
            })
            .collect();
        Ok((jobs, total))
    }

    async fn page_jobs(
        &self,
        filter: &JobFilter,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<JobPosting>, i64)> {
        let total = self.count_jobs(filter).await?;

        let mut items = QueryBuilder::<Postgres>::new(format!("SELECT {} {}", JOB_COLUMNS, JOB_SOURCE));
        push_filter(&mut items, filter);
        items
            .push(" ORDER BY j.posted_on DESC NULLS LAST, j.id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(skip);
        let rows = items.build_query_as::<JobRow>().fetch_all(&self.pool).await?;

        Ok((rows.into_iter().map(JobPosting::from).collect(), total))
    }

    async fn job_by_id(&self, id: Uuid) -> Result<Option<JobPosting>> {
        let sql = format!("SELECT {} {} WHERE j.id = $1", JOB_COLUMNS, JOB_SOURCE);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(JobPosting::from))
    }

    async fn increment_views(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE jobs SET views = COALESCE(views, 0) + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn facet_values(
        &self,
        filter: &JobFilter,
        facets: &[TextField],
        needle: &str,
        limit: i64,
    ) -> Result<FacetValues> {
        if facets.is_empty() {
            return Ok(FacetValues::new());
        }

        let projected = facets
            .iter()
            .enumerate()
            .map(|(i, field)| format!("{} AS f{}", field_expr(*field), i))
            .collect::<Vec<_>>()
            .join(", ");

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "WITH matched AS (SELECT {} {}",
            projected, JOB_SOURCE
        ));
        push_filter(&mut qb, filter);
        qb.push(") SELECT ");

        let pattern = like_pattern(needle);
        for i in 0..facets.len() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(format!(
                "ARRAY(SELECT v FROM (SELECT DISTINCT BTRIM(f{i}) AS v FROM matched) d \
                 WHERE v <> '' AND v ILIKE "
            ))
            .push_bind(pattern.clone())
            .push(" ORDER BY v LIMIT ")
            .push_bind(limit)
            .push(format!(") AS f{i}"));
        }

        let row = qb.build().fetch_one(&self.pool).await?;
        let mut values = FacetValues::new();
        for (i, field) in facets.iter().enumerate() {
            let column = format!("f{}", i);
            values.insert(*field, row.try_get::<Vec<String>, _>(column.as_str())?);
        }
        Ok(values)
    }
}

#[async_trait]
impl CompanyStore for PgStore {
    async fn list_companies(
        &self,
        search: Option<String>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Company>, i64)> {
        fn push_where(qb: &mut QueryBuilder<'_, Postgres>, search: &Option<String>) {
            qb.push(" WHERE active IS TRUE");
            if let Some(search) = search {
                qb.push(" AND company_name ILIKE ")
                    .push_bind(like_pattern(search));
            }
        }

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM companies");
        push_where(&mut count, &search);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut items =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM companies", COMPANY_COLUMNS));
        push_where(&mut items, &search);
        items
            .push(" ORDER BY company_name, id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(skip);
        let companies = items
            .build_query_as::<Company>()
            .fetch_all(&self.pool)
            .await?;

        Ok((companies, total))
    }

    async fn company_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        let sql = format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS);
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn search_companies(&self, query: String, limit: i64) -> Result<Vec<Company>> {
        let sql = format!(
            "SELECT {} FROM companies WHERE active IS TRUE AND company_name ILIKE $1 \
             ORDER BY company_name, id LIMIT $2",
            COMPANY_COLUMNS
        );
        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(like_pattern(&query))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }
}

#[async_trait]
impl SkillStore for PgStore {
    async fn skills_by_ids(&self, ids: &[String]) -> Result<Vec<Skill>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM skills WHERE id::text = ANY($1)", SKILL_COLUMNS);
        let skills = sqlx::query_as::<_, Skill>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(skills)
    }

    async fn list_skills(&self, search: Option<String>, limit: Option<i64>) -> Result<Vec<Skill>> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM skills WHERE active IS TRUE", SKILL_COLUMNS));
        if let Some(search) = search {
            qb.push(" AND name ILIKE ").push_bind(like_pattern(&search));
        }
        qb.push(" ORDER BY name");
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        let skills = qb.build_query_as::<Skill>().fetch_all(&self.pool).await?;
        Ok(skills)
    }
}
