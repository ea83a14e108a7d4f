// SPDX-License-Identifier: MIT

//! Lead CRUD and filter/stats contract tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn post_lead(name: &str, status: &str) -> Request<Body> {
    let body = serde_json::json!({
        "name": name,
        "phone": "+7 900 000-00-00",
        "status": status,
        "source": "manual"
    });
    Request::builder()
        .method("POST")
        .uri("/api/leads")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_filter_matches_stats_aggregate() {
    let (app, _) = common::create_test_app();

    for (name, status) in [("a", "new"), ("b", "new"), ("c", "contacted")] {
        let response = app.clone().oneshot(post_lead(name, status)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/api/leads?status=new")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let leads = body["leads"].as_array().unwrap();

    // Only matching records come back, and the filtered count agrees with
    // the collection-wide aggregate for that status
    assert!(leads.iter().all(|l| l["status"] == "new"));
    assert_eq!(body["total"], serde_json::json!(2));
    assert_eq!(body["stats"]["total"], serde_json::json!(3));
    assert_eq!(body["stats"]["by_status"]["new"], serde_json::json!(2));
    assert_eq!(body["stats"]["by_status"]["contacted"], serde_json::json!(1));
}

#[tokio::test]
async fn test_created_id_is_fresh_and_listed() {
    let (app, _) = common::create_test_app();

    let before = app.clone().oneshot(get("/api/leads")).await.unwrap();
    let before = common::body_json(before).await;
    let prior_ids: Vec<String> = before["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap().to_string())
        .collect();

    let created = app.clone().oneshot(post_lead("Иван", "new")).await.unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = common::body_json(created).await;
    let new_id = created["id"].as_str().unwrap().to_string();

    assert!(!prior_ids.contains(&new_id));

    let after = app.oneshot(get("/api/leads")).await.unwrap();
    let after = common::body_json(after).await;
    assert!(after["leads"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["id"].as_str() == Some(new_id.as_str())));
}

#[tokio::test]
async fn test_delete_unknown_id_is_404_and_collection_unchanged() {
    let (app, state) = common::create_test_app();

    app.clone().oneshot(post_lead("a", "new")).await.unwrap();
    assert_eq!(state.stores.leads.len(), 1);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/leads/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.stores.leads.len(), 1);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], serde_json::json!("not_found"));
}

#[tokio::test]
async fn test_partial_update_changes_status_only() {
    let (app, _) = common::create_test_app();

    let created = app.clone().oneshot(post_lead("Иван", "new")).await.unwrap();
    let created = common::body_json(created).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/leads/{}", id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"status":"won"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = common::body_json(response).await;
    assert_eq!(updated["status"], serde_json::json!("won"));
    assert_eq!(updated["name"], serde_json::json!("Иван"));
}

#[tokio::test]
async fn test_create_without_phone_is_rejected() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/leads")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Иван","phone":"  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.stores.leads.is_empty());
}

#[tokio::test]
async fn test_get_unknown_lead_is_404() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(get("/api/leads/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
