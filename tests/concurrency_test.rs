//! Parallel requests against one shared store

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use shorturls::database::{AppState, MappingStore};
use shorturls::route::create_app;
use shorturls::shortcode::ShortCode;

fn setup_test_app() -> (axum::Router, MappingStore, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let store = MappingStore::open(temp_db.path()).expect("Failed to open test database");
    let state = AppState {
        store: store.clone(),
        base_url: "http://localhost:3000".to_string(),
    };
    (create_app(state), store, temp_db)
}

fn shorten_request(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/shorten")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_are_all_visible() {
    let (app, store, _temp_db) = setup_test_app();
    let urls: Vec<String> = (0..64)
        .map(|i| format!("https://example.com/parallel/{}", i))
        .collect();

    let handles: Vec<_> = urls
        .iter()
        .cloned()
        .map(|url| {
            let app = app.clone();
            tokio::spawn(async move { app.oneshot(shorten_request(&url)).await.unwrap().status() })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    assert_eq!(store.count().unwrap(), urls.len() as u64);

    for url in &urls {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", ShortCode::derive(url)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), url.as_str());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_duplicate_creates_leave_one_entry() {
    let (app, store, _temp_db) = setup_test_app();
    let url = "https://example.com/hot";

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { app.oneshot(shorten_request(url)).await.unwrap().status() })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.resolve(&ShortCode::derive(url)).unwrap(), url);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_run_alongside_writes() {
    let (_app, store, _temp_db) = setup_test_app();
    let stable = "https://example.com/stable";
    let stable_code = ShortCode::derive(stable);
    store.create(&stable_code, stable).unwrap();

    let writer = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || {
            for i in 0..200 {
                let url = format!("https://example.com/churn/{}", i);
                let code = ShortCode::derive(&url);
                store.create(&code, &url).unwrap();
                store.delete(&code).unwrap();
            }
        })
    };
    let reader = {
        let store = store.clone();
        let code = stable_code.clone();
        tokio::task::spawn_blocking(move || {
            for _ in 0..200 {
                assert_eq!(store.resolve(&code).unwrap(), stable);
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(store.count().unwrap(), 1);
}
