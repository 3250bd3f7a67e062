//! `HttpSearchClient` against a local axum stand-in for the Memora API.

use std::future::IntoFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing, Json, Router,
};
use memora_core::{
    FailureCategory, SearchConfig, SearchError, SearchPanel, SearchService, View, ViewKind,
};
use memora_http::HttpSearchClient;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::oneshot};

#[derive(Clone, Default)]
struct Seen {
    bodies: Arc<Mutex<Vec<Value>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
}

async fn start_search_server(seen: Seen) -> (String, oneshot::Sender<()>) {
    let app = Router::new().route("/api/v1/search", routing::post(search_handler)).with_state(seen);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind search server.");
    let addr = listener.local_addr().expect("Failed to read search server address.");
    let (tx, rx) = oneshot::channel();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = rx.await;
    });

    tokio::spawn(async move {
        let _ = server.into_future().await;
    });

    (format!("http://{addr}"), tx)
}

async fn search_handler(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    seen.bodies.lock().unwrap().push(body.clone());
    seen.auth.lock().unwrap().push(
        headers.get("authorization").and_then(|v| v.to_str().ok()).map(|s| s.to_string()),
    );

    match body["query"].as_str().unwrap_or_default() {
        "roadmap" => Json(json!({
            "success": true,
            "query": "roadmap",
            "mode": body["mode"],
            "total": 2,
            "took_ms": 12.5,
            "results": [
                { "memory": { "id": "m-1", "title": "Q3 roadmap" }, "score": 0.91 },
                { "memory": { "id": "m-2", "title": "Roadmap review" }, "score": 0.77 }
            ]
        }))
        .into_response(),
        "nothing" => Json(json!({ "success": true, "results": [], "total": 0, "took_ms": 1.0 }))
            .into_response(),
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Search failed: qdrant unavailable" })),
        )
            .into_response(),
        "garbage" => (StatusCode::OK, "definitely not json").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "success": true, "results": [] })).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn config(url: &str) -> SearchConfig {
    SearchConfig { api_url: url.to_string(), ..SearchConfig::default() }
}

fn request(text: &str) -> memora_core::SearchRequest {
    let mut q = memora_core::QueryState::default();
    q.set_text(text);
    memora_core::compose(&q)
}

#[tokio::test]
async fn returns_ranked_results_with_server_timing() {
    let seen = Seen::default();
    let (url, _stop) = start_search_server(seen.clone()).await;
    let client = HttpSearchClient::new(&config(&url)).unwrap();

    let resp = client.search(&request("roadmap")).await.unwrap();

    assert_eq!(resp.elapsed_ms, Some(12.5));
    let ids: Vec<_> = resp.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["m-1", "m-2"]);
    assert_eq!(resp.results[0].score, Some(0.91));
}

#[tokio::test]
async fn request_body_omits_memory_types_without_filter() {
    let seen = Seen::default();
    let (url, _stop) = start_search_server(seen.clone()).await;
    let client = HttpSearchClient::new(&config(&url)).unwrap();

    client.search(&request("nothing")).await.unwrap();

    let mut q = memora_core::QueryState::default();
    q.set_text("nothing");
    q.toggle_type("insight").unwrap();
    q.set_mode(memora_core::SearchMode::Keyword);
    q.set_window(memora_core::TimeWindow::Month);
    client.search(&memora_core::compose(&q)).await.unwrap();

    let bodies = seen.bodies.lock().unwrap().clone();
    assert_eq!(
        bodies[0],
        json!({ "query": "nothing", "mode": "hybrid", "limit": 20, "temporal_boost": true })
    );
    assert_eq!(bodies[1]["memory_types"], json!(["insight"]));
    assert_eq!(bodies[1]["mode"], "sparse");
    assert_eq!(bodies[1]["temporal_filter"], "month");
}

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let seen = Seen::default();
    let (url, _stop) = start_search_server(seen.clone()).await;
    let cfg = SearchConfig { api_token: Some("s3cret".into()), ..config(&url) };
    let client = HttpSearchClient::new(&cfg).unwrap();

    client.search(&request("nothing")).await.unwrap();

    assert_eq!(seen.auth.lock().unwrap()[0].as_deref(), Some("Bearer s3cret"));
}

#[tokio::test]
async fn server_error_is_backend_failure_with_detail() {
    let (url, _stop) = start_search_server(Seen::default()).await;
    let client = HttpSearchClient::new(&config(&url)).unwrap();

    let err = client.search(&request("boom")).await.unwrap_err();

    assert_eq!(
        err,
        SearchError::backend(Some(500), Some("Search failed: qdrant unavailable".into()))
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (url, _stop) = start_search_server(Seen::default()).await;
    let client = HttpSearchClient::new(&config(&url)).unwrap();

    let err = client.search(&request("garbage")).await.unwrap_err();

    assert_eq!(err.category(), FailureCategory::Malformed);
}

#[tokio::test]
async fn slow_server_times_out_as_transport_failure() {
    let (url, _stop) = start_search_server(Seen::default()).await;
    let cfg = SearchConfig { request_timeout_ms: 200, ..config(&url) };
    let client = HttpSearchClient::new(&cfg).unwrap();

    let err = client.search(&request("slow")).await.unwrap_err();

    assert_eq!(err.category(), FailureCategory::Transport);
    assert!(err.is_timeout(), "expected a timeout, got {err}");
}

#[tokio::test]
async fn refused_connection_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpSearchClient::new(&config(&format!("http://{addr}"))).unwrap();

    let err = client.search(&request("roadmap")).await.unwrap_err();

    assert_eq!(err.category(), FailureCategory::Transport);
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn panel_over_http_renders_populated_view() {
    let (url, _stop) = start_search_server(Seen::default()).await;
    let client = Arc::new(HttpSearchClient::new(&config(&url)).unwrap());
    let mut panel = SearchPanel::new(client, &config(&url));

    panel.set_text("roadmap");
    panel.run().await.unwrap();

    let View::Populated { cards, elapsed_ms } = panel.view() else {
        panic!("expected populated view, got {:?}", panel.view().kind());
    };
    assert_eq!(elapsed_ms, 12.5);
    assert_eq!(cards.iter().map(|c| c.score).collect::<Vec<_>>(), vec![Some(0.91), Some(0.77)]);

    panel.set_text("boom");
    panel.run().await.unwrap();
    assert_eq!(panel.view().kind(), ViewKind::Errored);
}
