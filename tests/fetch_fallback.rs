use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde_json::json;
use snippet_board::{Fetch, FetchError, Payload, ResilientFetcher, Via};
use tokio::net::TcpListener;

/// A canned endpoint that counts hits and remembers the `url` it was asked to relay
#[derive(Clone)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    relayed: Arc<Mutex<Option<String>>>,
    status: StatusCode,
    body: &'static str,
}

impl Upstream {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            relayed: Arc::new(Mutex::new(None)),
            status,
            body,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn relayed(&self) -> Option<String> {
        self.relayed.lock().unwrap().clone()
    }
}

async fn respond(
    State(upstream): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(url) = params.get("url") {
        *upstream.relayed.lock().unwrap() = Some(url.clone());
    }
    (upstream.status, upstream.body)
}

/// Serve `upstream` at `path` on an ephemeral port; returns the full URL.
async fn serve(path: &str, upstream: Upstream) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new()
        .route(path, get(respond))
        .with_state(upstream);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}{}", addr, path)
}

/// A URL on a port nobody is listening on
async fn dead_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, path)
}

fn fetcher(proxy_base: &str) -> ResilientFetcher {
    ResilientFetcher::new(reqwest::Client::new(), proxy_base, "url")
}

#[tokio::test]
async fn test_direct_json_success_skips_proxy() {
    let primary = Upstream::new(StatusCode::OK, r#"{"quote":"Stay hungry"}"#);
    let proxy = Upstream::new(StatusCode::OK, "unused");
    let primary_url = serve("/api/motivation", primary.clone()).await;
    let proxy_url = serve("/raw", proxy.clone()).await;

    let fetched = fetcher(&proxy_url)
        .fetch_with_fallback(&primary_url)
        .await
        .unwrap();

    assert_eq!(fetched.via, Via::Direct);
    assert_eq!(fetched.payload, Payload::Parsed(json!({"quote": "Stay hungry"})));
    assert_eq!(primary.hits(), 1);
    assert_eq!(proxy.hits(), 0);
}

#[tokio::test]
async fn test_direct_text_stays_raw() {
    let primary = Upstream::new(StatusCode::OK, "Why did the scarecrow win an award?");
    let primary_url = serve("/api/dadjokes", primary).await;
    let proxy_url = dead_url("/raw").await;

    let fetched = fetcher(&proxy_url)
        .fetch_with_fallback(&primary_url)
        .await
        .unwrap();

    assert_eq!(fetched.via, Via::Direct);
    assert_eq!(
        fetched.payload,
        Payload::Raw("Why did the scarecrow win an award?".to_string())
    );
}

#[tokio::test]
async fn test_server_error_falls_back_to_proxy_once() {
    let primary = Upstream::new(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let proxy = Upstream::new(StatusCode::OK, r#"{"facts":["**A**","B."]}"#);
    let primary_url = format!("{}?theme=random", serve("/funfact", primary.clone()).await);
    let proxy_url = serve("/raw", proxy.clone()).await;

    let fetched = fetcher(&proxy_url)
        .fetch_with_fallback(&primary_url)
        .await
        .unwrap();

    assert_eq!(fetched.via, Via::Proxy);
    assert_eq!(fetched.payload, Payload::Parsed(json!({"facts": ["**A**", "B."]})));
    assert_eq!(primary.hits(), 1);
    assert_eq!(proxy.hits(), 1);
    assert_eq!(proxy.relayed(), Some(primary_url));
}

#[tokio::test]
async fn test_proxy_failure_reason_is_terminal() {
    let primary = Upstream::new(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let proxy = Upstream::new(StatusCode::BAD_GATEWAY, "bad gateway");
    let primary_url = serve("/api/motivation", primary.clone()).await;
    let proxy_url = serve("/raw", proxy.clone()).await;

    let err = fetcher(&proxy_url)
        .fetch_with_fallback(&primary_url)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::ProxyFailure {
            message: "proxy 502".to_string()
        }
    );
    assert_eq!(err.reason(), "proxy 502");
    assert_eq!(primary.hits(), 1);
    assert_eq!(proxy.hits(), 1);
}

#[tokio::test]
async fn test_transport_error_falls_back_to_proxy() {
    let proxy = Upstream::new(StatusCode::OK, "relayed text");
    let primary_url = dead_url("/api/dadjokes").await;
    let proxy_url = serve("/raw", proxy.clone()).await;

    let fetched = fetcher(&proxy_url)
        .fetch_with_fallback(&primary_url)
        .await
        .unwrap();

    assert_eq!(fetched.via, Via::Proxy);
    assert_eq!(fetched.payload, Payload::Raw("relayed text".to_string()));
    assert_eq!(proxy.hits(), 1);
    assert_eq!(proxy.relayed(), Some(primary_url));
}

#[tokio::test]
async fn test_unreachable_proxy_reports_its_own_error() {
    let primary = Upstream::new(StatusCode::NOT_FOUND, "missing");
    let primary_url = serve("/api/motivation", primary.clone()).await;
    let proxy_url = dead_url("/raw").await;

    let err = fetcher(&proxy_url)
        .fetch_with_fallback(&primary_url)
        .await
        .unwrap_err();

    match err {
        FetchError::ProxyFailure { message } => {
            assert!(!message.is_empty());
            assert_ne!(message, "network 404");
        }
        other => panic!("expected proxy failure, got {:?}", other),
    }
    assert_eq!(primary.hits(), 1);
}

#[tokio::test]
async fn test_empty_url_makes_no_requests() {
    let proxy = Upstream::new(StatusCode::OK, "unused");
    let proxy_url = serve("/raw", proxy.clone()).await;

    let err = fetcher(&proxy_url).fetch_with_fallback("").await.unwrap_err();

    assert_eq!(err, FetchError::EmptyUrl);
    assert_eq!(err.reason(), "empty url");
    assert_eq!(proxy.hits(), 0);
}

#[tokio::test]
async fn test_repeated_fetches_are_independent() {
    let primary = Upstream::new(StatusCode::OK, r#"["one"]"#);
    let primary_url = serve("/api/dadjokes", primary.clone()).await;
    let proxy_url = dead_url("/raw").await;
    let fetcher = fetcher(&proxy_url);

    let first = fetcher.fetch_with_fallback(&primary_url).await.unwrap();
    let second = fetcher.fetch_with_fallback(&primary_url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(primary.hits(), 2);
}
