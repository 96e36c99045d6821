#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jobboard_backend::{
    config::{Config, LogFormat},
    database::memory::MemoryStore,
    middleware::auth::Claims,
    models::{
        candidate::{CandidateProfile, CandidateSkill},
        company::Company,
        job::{JobPosting, JobStatus, SkillRequirement},
        skill::Skill,
    },
    routes,
    services::match_scorer::ExperiencePolicy,
    AppState,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test_secret_key";

pub fn config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        database_max_connections: 1,
        jwt_secret: JWT_SECRET.into(),
        experience_policy: ExperiencePolicy::Exact,
        log_format: LogFormat::Pretty,
    }
}

pub fn app(store: MemoryStore) -> Router {
    routes::router(AppState::with_store(config(), Arc::new(store)))
}

pub fn token_for(candidate: Uuid) -> String {
    let claims = Claims {
        sub: candidate.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        role: Some("candidate".into()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let resp = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub const RUST: u128 = 1;
pub const SQL: u128 = 2;
pub const KAFKA: u128 = 3;
pub const CANDIDATE: u128 = 42;
pub const ACME: u128 = 500;

pub fn skill(n: u128, name: &str) -> Skill {
    Skill {
        id: id(n),
        name: name.into(),
        category: "Engineering".into(),
        active: true,
        created_at: None,
    }
}

pub fn company(n: u128, name: &str) -> Company {
    Company {
        id: id(n),
        company_name: name.into(),
        email: None,
        is_approved: true,
        active: true,
        image_link: None,
        registration_date: None,
    }
}

pub fn job(n: u128, title: &str, skills: &[u128], work_experience: f64) -> JobPosting {
    JobPosting {
        id: id(1000 + n),
        job_code: Some(format!("JOB-{}", n)),
        title: title.into(),
        description: Some(format!("{} role", title)),
        job_role: None,
        company_id: None,
        company_name: Some("Snapshot Ltd".into()),
        company_lookup_name: None,
        job_type: Some("full-time".into()),
        work_experience: Some(work_experience),
        city: Some("Pune".into()),
        state: Some("Maharashtra".into()),
        country: Some("India".into()),
        posted_on: Some(Utc::now() - Duration::days(n as i64)),
        last_date: None,
        active: true,
        legacy_active: false,
        status: JobStatus::Approved,
        skill_required: skills
            .iter()
            .map(|s| SkillRequirement {
                skill_id: id(*s).to_string(),
                rating: Some(3.0),
                required_experience: Some(1.0),
            })
            .collect(),
        openings: 2,
        applications_count: 0,
        views: 0,
    }
}

/// Candidate with Rust and SQL, three years of experience.
pub async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    for (n, name) in [(RUST, "Rust"), (SQL, "SQL"), (KAFKA, "Kafka")] {
        store.insert_skill(skill(n, name)).await;
    }
    store.insert_company(company(ACME, "Acme Corp")).await;
    store
        .insert_candidate(CandidateProfile {
            id: id(CANDIDATE),
            skills: [RUST, SQL]
                .iter()
                .map(|s| CandidateSkill {
                    skill_id: id(*s).to_string(),
                    experience_years: 3.0,
                    rating: 4.0,
                })
                .collect(),
            overall_experience: 3.0,
            current_city: Some("Pune".into()),
            country: Some("India".into()),
        })
        .await;
    store
}
