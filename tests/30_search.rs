mod common;

use anyhow::Result;
use axum::http::StatusCode;
use axum::Router;
use serde_json::json;

async fn seed(app: &Router) {
    for payload in [
        json!({"name": "Ann Lee", "email": "ann@x.com", "department": "Eng", "position": "SWE", "salary": 90000}),
        json!({"name": "Bob Stone", "email": "bob@y.com", "department": "Product", "position": "Product Manager", "salary": 85000}),
        json!({"name": "Carol Jones", "email": "carol@z.com", "department": "Design", "position": "Designer", "salary": 80000}),
    ] {
        let (status, _) = common::send(app, "POST", "/api/employees", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn search_is_case_insensitive_on_name() -> Result<()> {
    let app = common::test_app();
    seed(&app).await;

    let (status, body) = common::send(&app, "GET", "/api/employees/search?q=ANN", None).await;

    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Ann Lee");
    Ok(())
}

#[tokio::test]
async fn search_matches_email_substring() -> Result<()> {
    let app = common::test_app();
    seed(&app).await;

    let (status, body) = common::send(&app, "GET", "/api/employees/search?q=%40y.com", None).await;

    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["email"], "bob@y.com");
    Ok(())
}

#[tokio::test]
async fn search_matches_position_substring() -> Result<()> {
    let app = common::test_app();
    seed(&app).await;

    let (status, body) = common::send(&app, "GET", "/api/employees/search?q=manager", None).await;

    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Bob Stone");
    Ok(())
}

#[tokio::test]
async fn search_without_match_returns_empty_array() -> Result<()> {
    let app = common::test_app();
    seed(&app).await;

    let (status, body) = common::send(&app, "GET", "/api/employees/search?q=zzz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn missing_or_empty_term_is_rejected() -> Result<()> {
    let app = common::test_app();

    for uri in [
        "/api/employees/search",
        "/api/employees/search?q=",
        "/api/employees/search?q=%20%20",
        // nothing left once the metacharacters are stripped
        "/api/employees/search?q=%27%3B--",
    ] {
        let (status, body) = common::send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body["message"], "Search query is required");
    }
    Ok(())
}

#[tokio::test]
async fn injection_attempt_is_treated_as_a_literal_term() -> Result<()> {
    let app = common::test_app();
    seed(&app).await;

    // q = '; DROP TABLE employees; --
    let (status, body) = common::send(
        &app,
        "GET",
        "/api/employees/search?q=%27%3B%20DROP%20TABLE%20employees%3B%20--",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // The table is still intact and fully populated
    let (status, body) = common::send(&app, "GET", "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    Ok(())
}
