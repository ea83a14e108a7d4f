// SPDX-License-Identifier: MIT

//! Article CRUD endpoint tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn post_article(title: &str, slug: &str, category: &str, published: bool) -> Request<Body> {
    let body = serde_json::json!({
        "title": title,
        "slug": slug,
        "category": category,
        "published": published,
        "content": "..."
    });
    Request::builder()
        .method("POST")
        .uri("/api/articles")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let (app, _) = common::create_test_app();

    let created = app
        .clone()
        .oneshot(post_article("Выбор автобетононасоса", "vybor-abn", "guides", true))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = common::body_json(created).await;
    let id = created["id"].as_str().unwrap();

    let fetched = app
        .oneshot(get(&format!("/api/articles/{}", id)))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);

    let fetched = common::body_json(fetched).await;
    assert_eq!(fetched["title"], serde_json::json!("Выбор автобетононасоса"));
    assert_eq!(fetched["slug"], serde_json::json!("vybor-abn"));
    assert!(fetched["created_at"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_list_filters_by_category_and_published() {
    let (app, _) = common::create_test_app();

    for (title, slug, category, published) in [
        ("a", "a", "news", true),
        ("b", "b", "news", false),
        ("c", "c", "guides", true),
    ] {
        app.clone()
            .oneshot(post_article(title, slug, category, published))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/api/articles?category=news&published=true"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["total"], serde_json::json!(1));
    assert_eq!(body["articles"][0]["slug"], serde_json::json!("a"));

    // No filters returns everything
    let all = app.oneshot(get("/api/articles")).await.unwrap();
    let all = common::body_json(all).await;
    assert_eq!(all["total"], serde_json::json!(3));
}

#[tokio::test]
async fn test_slug_filter_finds_single_article() {
    let (app, _) = common::create_test_app();

    app.clone()
        .oneshot(post_article("x", "pump-rental", "news", true))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/api/articles?slug=pump-rental"))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["total"], serde_json::json!(1));
    assert_eq!(body["articles"][0]["slug"], serde_json::json!("pump-rental"));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let (app, _) = common::create_test_app();

    let created = app
        .clone()
        .oneshot(post_article("Заголовок", "slug-1", "news", false))
        .await
        .unwrap();
    let created = common::body_json(created).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/articles/{}", id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"published":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = common::body_json(response).await;
    assert_eq!(updated["published"], serde_json::json!(true));
    assert_eq!(updated["title"], serde_json::json!("Заголовок"));
    assert_eq!(updated["slug"], serde_json::json!("slug-1"));
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let (app, _) = common::create_test_app();

    let created = app
        .clone()
        .oneshot(post_article("x", "x", "news", true))
        .await
        .unwrap();
    let created = common::body_json(created).await;
    let id = created["id"].as_str().unwrap();

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/articles/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let fetched = app
        .oneshot(get(&format!("/api/articles/{}", id)))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_title_rejected() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(post_article("  ", "slug", "news", true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.stores.articles.is_empty());
}
