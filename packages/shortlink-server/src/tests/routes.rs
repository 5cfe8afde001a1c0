use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use super::harness::{body_text, form_request, get_request, header_value, TestHarness};
use crate::handlers::OPENSEARCH_CONTENT_TYPE;

#[tokio::test]
async fn root_redirects_permanently_to_form() {
    let harness = TestHarness::setup();
    let response = harness.router.clone().oneshot(get_request("/")).await.expect("response");

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(header_value(response.headers(), "location"), Some("/index.html"));
}

#[tokio::test]
async fn index_page_renders_empty_form() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(get_request("/index.html"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<form"));
    assert!(!html.contains("Matching shortcuts"));
}

#[tokio::test]
async fn exact_alias_redirects_to_url() {
    let harness = TestHarness::setup();
    let response = harness.router.clone().oneshot(get_request("/red")).await.expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(response.headers(), "location"), Some("http://reddit.com"));
}

#[tokio::test]
async fn fuzzy_matches_render_candidates() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(get_request("/violet"))
        .await
        .expect("response");

    // A single fuzzy hit is listed, never followed
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(">blue-full</a>"));
    assert!(html.contains(r#"value="violet""#));
}

#[tokio::test]
async fn unknown_alias_renders_prefilled_form() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(get_request("/zyzzyva"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"value="zyzzyva""#));
    assert!(!html.contains("Matching shortcuts"));
}

#[tokio::test]
async fn opensearch_descriptor_has_declaration_and_content_type() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(get_request("/opensearch.xml"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(response.headers(), "content-type"),
        Some(OPENSEARCH_CONTENT_TYPE)
    );
    let xml = body_text(response).await;
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(xml.contains("go.example.com:8080"));
}

#[tokio::test]
async fn create_requires_alias() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/", "url=example.com"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Shortcut was not supplied");
}

#[tokio::test]
async fn create_requires_url() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/", "shortform=new&url=+"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "URL was not supplied");
}

#[tokio::test]
async fn create_rejects_existing_alias() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/red", "url=http%3A%2F%2Fother.example"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Shortcut already exists.");

    let found = harness.state.index.find_shortcut("red").expect("find");
    assert_eq!(found.redirect_target(), Some("http://reddit.com"));
}

#[tokio::test]
async fn create_redirects_and_stores_in_background() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request(
            "/",
            "shortform=docs&url=docs.example.com%2Fguide&description=team+handbook",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        header_value(response.headers(), "location"),
        Some("http://docs.example.com/guide")
    );

    assert!(harness.wait_for_shortcut("docs").await);
    let found = harness.state.index.find_shortcut("docs").expect("find");
    assert_eq!(found.redirect_target(), Some("http://docs.example.com/guide"));
    assert_eq!(found.shortcuts[0].description, "team handbook");

    let fuzzy = harness.state.index.find_shortcut("handbook").expect("find");
    assert_eq!(fuzzy.len(), 1);
    assert!(!fuzzy.sole);
}

#[tokio::test]
async fn path_alias_wins_over_form_field() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/wiki", "shortform=ignored&url=https%3A%2F%2Fwiki.example"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(harness.wait_for_shortcut("wiki").await);
    assert!(!harness.state.index.contains("ignored").expect("contains"));
}

#[tokio::test]
async fn create_without_body_reports_missing_url() {
    let harness = TestHarness::setup();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/newtwo")
        .body(axum::body::Body::empty())
        .expect("build request");
    let response = harness.router.clone().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "URL was not supplied");
}

#[tokio::test]
async fn create_accepts_query_string_fields() {
    let harness = TestHarness::setup();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/newone?url=example.com")
        .body(axum::body::Body::empty())
        .expect("build request");
    let response = harness.router.clone().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(response.headers(), "location"), Some("http://example.com"));
    assert!(harness.wait_for_shortcut("newone").await);
}

#[tokio::test]
async fn body_fields_override_query_string() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/both?url=query.example", "url=body.example"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(response.headers(), "location"), Some("http://body.example"));
}

#[tokio::test]
async fn index_page_answers_any_method() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/index.html", ""))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<form"));
}

#[tokio::test]
async fn create_strips_control_characters_from_url() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(form_request("/ctl", "url=a%0Ab.com"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(response.headers(), "location"), Some("http://ab.com/"));
    assert!(harness.wait_for_shortcut("ctl").await);
    let found = harness.state.index.find_shortcut("ctl").expect("find");
    assert_eq!(found.redirect_target(), Some("http://ab.com/"));
}
