mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn ranking_requires_a_bearer_token() {
    let app = app(seeded_store().await);

    let (status, body) = get(&app, "/api/candidate/jobs/ranking", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, "/api/candidate/jobs/ranking", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_candidate_is_not_found() {
    let app = app(seeded_store().await);
    let token = token_for(id(9999));

    let (status, body) = get(&app, "/api/candidate/jobs/ranking", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Candidate not found");
}

#[tokio::test]
async fn ranks_by_score_and_reports_two_of_three_skills() {
    let store = seeded_store().await;
    // 2/3 skills, experience differs: 46.67.
    store.insert_job(job(1, "Platform Engineer", &[RUST, SQL, KAFKA], 5.0)).await;
    // 2/3 skills, experience equal: 76.67.
    store.insert_job(job(2, "Backend Engineer", &[RUST, SQL, KAFKA], 3.0)).await;
    // No skills required, experience equal: 30.
    store.insert_job(job(3, "Support Engineer", &[], 3.0)).await;
    let app = app(store);
    let token = token_for(id(CANDIDATE));

    let (status, body) = get(&app, "/api/candidate/jobs/ranking", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let jobs = body["data"]["jobs"].as_array().unwrap();
    let titles: Vec<&str> = jobs.iter().map(|j| j["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Backend Engineer", "Platform Engineer", "Support Engineer"]);

    let platform = &jobs[1];
    assert_eq!(platform["skillMatchCount"], 2);
    assert_eq!(platform["totalRequiredSkills"], 3);
    let pct = platform["matchPercentage"].as_f64().unwrap();
    let score = platform["matchScore"].as_f64().unwrap();
    assert!((pct - 66.67).abs() < 0.01, "pct={pct}");
    assert!((score - 46.67).abs() < 0.01, "score={score}");

    let support = &jobs[2];
    assert_eq!(support["matchPercentage"].as_f64().unwrap(), 0.0);
    assert_eq!(support["matchScore"].as_f64().unwrap(), 30.0);

    // Catalog details follow requirement order.
    let details: Vec<&str> = jobs[0]["skillDetails"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(details, vec!["Rust", "SQL", "Kafka"]);
    assert_eq!(jobs[0]["experienceLevel"], "Mid Level");
    assert_eq!(jobs[0]["companyName"], "Snapshot Ltd");

    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["totalJobs"], 3);
    assert_eq!(pagination["currentPage"], 1);
    assert_eq!(pagination["limit"], 10);
}

#[tokio::test]
async fn ranking_twice_gives_identical_output() {
    let store = seeded_store().await;
    for n in 1..=6 {
        store.insert_job(job(n, "Engineer", &[RUST], 1.0)).await;
    }
    let app = app(store);
    let token = token_for(id(CANDIDATE));

    let (_, first) = get(&app, "/api/candidate/jobs/ranking", Some(&token)).await;
    let (_, second) = get(&app, "/api/candidate/jobs/ranking", Some(&token)).await;
    assert_eq!(first["data"], second["data"]);

    // Equal scores fall back to newest first.
    let codes: Vec<&str> = first["data"]["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["jobCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["JOB-1", "JOB-2", "JOB-3", "JOB-4", "JOB-5", "JOB-6"]);
}

#[tokio::test]
async fn pagination_follows_the_ranked_order() {
    let store = seeded_store().await;
    for n in 1..=25 {
        store.insert_job(job(n, "Engineer", &[RUST], 3.0)).await;
    }
    let app = app(store);
    let token = token_for(id(CANDIDATE));

    let (_, body) = get(&app, "/api/candidate/jobs/ranking?page=1&limit=10", Some(&token)).await;
    let p = &body["data"]["pagination"];
    assert_eq!(p["totalPages"], 3);
    assert_eq!(p["hasNextPage"], true);
    assert_eq!(p["hasPrevPage"], false);

    let (_, body) = get(&app, "/api/candidate/jobs/ranking?page=3&limit=10", Some(&token)).await;
    assert_eq!(body["data"]["jobs"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["pagination"]["hasNextPage"], false);
}

#[tokio::test]
async fn out_of_range_paging_is_clamped() {
    let store = seeded_store().await;
    store.insert_job(job(1, "Engineer", &[RUST], 3.0)).await;
    let app = app(store);
    let token = token_for(id(CANDIDATE));

    for (query, page, limit) in [
        ("page=0&limit=0", 1, 10),
        ("page=-2&limit=500", 1, 50),
        ("page=abc&limit=xyz", 1, 10),
        ("page=2abc&limit=5", 2, 5),
    ] {
        let uri = format!("/api/candidate/jobs/ranking?{}", query);
        let (status, body) = get(&app, &uri, Some(&token)).await;
        assert_eq!(status, StatusCode::OK, "{query}");
        assert_eq!(body["data"]["pagination"]["currentPage"], page, "{query}");
        assert_eq!(body["data"]["pagination"]["limit"], limit, "{query}");
    }
}

#[tokio::test]
async fn filters_combine_as_intersection() {
    let store = seeded_store().await;
    let mut lisbon = job(1, "Rust Engineer", &[RUST], 1.0);
    lisbon.city = Some("Lisbon".into());
    lisbon.state = None;
    lisbon.country = Some("Portugal".into());
    store.insert_job(lisbon).await;
    store.insert_job(job(2, "Rust Engineer", &[RUST], 1.0)).await;
    store.insert_job(job(3, "Rust Engineer", &[RUST], 9.0)).await;
    let mut contract = job(4, "Data Engineer", &[SQL], 1.0);
    contract.job_type = Some("contract".into());
    store.insert_job(contract).await;
    let app = app(store);
    let token = token_for(id(CANDIDATE));

    let codes = |body: &serde_json::Value| -> Vec<String> {
        body["data"]["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["jobCode"].as_str().unwrap().to_string())
            .collect()
    };

    // Pune and 0-2 years: the Lisbon job and the 9-year job both drop out.
    let (_, body) = get(
        &app,
        "/api/candidate/jobs/ranking?location=pune&experienceLevel=Entry%20Level",
        Some(&token),
    )
    .await;
    assert_eq!(codes(&body), vec!["JOB-2", "JOB-4"]);

    let (_, body) = get(
        &app,
        "/api/candidate/jobs/ranking?location=pune&jobType=contract",
        Some(&token),
    )
    .await;
    assert_eq!(codes(&body), vec!["JOB-4"]);

    let (_, body) = get(&app, "/api/candidate/jobs/ranking?jobTitle=DATA", Some(&token)).await;
    assert_eq!(codes(&body), vec!["JOB-4"]);

    let (_, body) = get(&app, "/api/candidate/jobs/ranking?postedWithin=3", Some(&token)).await;
    assert_eq!(codes(&body), vec!["JOB-1", "JOB-2"]);

    // Reserved options change nothing.
    let (_, plain) = get(&app, "/api/candidate/jobs/ranking", Some(&token)).await;
    let (_, reserved) = get(
        &app,
        "/api/candidate/jobs/ranking?minSalary=10&maxSalary=20&isRemote=true",
        Some(&token),
    )
    .await;
    assert_eq!(codes(&plain), codes(&reserved));
}

#[tokio::test]
async fn unknown_filter_values_are_rejected() {
    let app = app(seeded_store().await);
    let token = token_for(id(CANDIDATE));

    for query in ["jobType=gig", "experienceLevel=Wizard", "experienceLevel=senior,astronaut"] {
        let uri = format!("/api/candidate/jobs/ranking?{}", query);
        let (status, body) = get(&app, &uri, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn malformed_query_strings_use_the_error_envelope() {
    let app = app(seeded_store().await);
    let token = token_for(id(CANDIDATE));

    for uri in [
        "/api/candidate/jobs/ranking?limit=1&limit=2",
        "/api/candidate/jobs/suggestions?q=dev&q=ops",
        "/api/candidate/companies?page=1&page=2",
    ] {
        let (status, body) = get(&app, uri, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid query string");
    }
}
