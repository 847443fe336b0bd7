use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::util::ServiceExt;

use wordlist_lemmas::LemmaTable;
use wordlister::handlers::{AppState, router};
use wordlister::wordlist::Wordlist;

fn make_state() -> AppState {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("lemmas.txt");
    std::fs::write(&path, b"run\trunning\nbe\twas\n").unwrap();
    let lemmas = LemmaTable::load(&path).unwrap();
    AppState {
        wordlist: Arc::new(Wordlist::new(lemmas)),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_tokens(tokens: &[&str]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/tokens")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(tokens).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tokens_endpoint_counts_and_reports_total() {
    let state = make_state();
    let app = router(state.clone());
    let response = app
        .oneshot(post_tokens(&["The", "cats", "run!", "run", "run"]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 4);
    assert_eq!(state.wordlist.count("cat"), 1);
    assert_eq!(state.wordlist.count("run"), 3);
}

#[tokio::test]
async fn words_endpoint_lists_plural_closure() {
    let state = make_state();
    state.wordlist.ingest(["cat"]);
    let app = router(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/words")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let words: Vec<&str> = body["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap())
        .collect();
    assert!(words.contains(&"cat"));
    assert!(words.contains(&"cats"));
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn distribution_endpoint_sums_to_one() {
    let state = make_state();
    state.wordlist.ingest(["apple", "apple", "banana", "cherry"]);
    let app = router(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/distribution")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let sum: f64 = body["distribution"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert_eq!(body["distribution"]["apple"], 0.5);
}

#[tokio::test]
async fn distribution_endpoint_is_empty_before_ingestion() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/distribution")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
    assert!(body["distribution"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn documents_endpoint_ingests_html() {
    let state = make_state();
    let app = router(state.clone());
    let html = "<html><script>var skip = 0;</script><body><p>Dogs were running</p></body></html>";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/documents")
                .body(Body::from(html))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // "Dogs" singularizes, "were" passes through, "running" hits the
    // lemma table, script content is stripped.
    assert_eq!(state.wordlist.count("dog"), 1);
    assert_eq!(state.wordlist.count("run"), 1);
    assert_eq!(state.wordlist.count("were"), 1);
    assert_eq!(state.wordlist.count("var"), 0);
}

#[tokio::test]
async fn documents_endpoint_rejects_empty_body() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/documents")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("required")
    );
}
