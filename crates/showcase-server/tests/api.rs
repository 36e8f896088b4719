//! End-to-end tests for the catalog HTTP surface.
//!
//! Each test builds the full application (in-memory backends), serves it
//! on an ephemeral port, and drives it with a real HTTP client.

use serde_json::{Value, json};
use showcase_auth::{AccessTokenClaims, JwtService, ROLE_VIEWER};
use showcase_server::{AppConfig, build_app};
use tokio::task::JoinHandle;
use uuid::Uuid;

const SIGNING_KEY: &str = "integration-test-signing-key";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.signing_key = SIGNING_KEY.to_string();
    config
}

async fn start_server(config: &AppConfig) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(config).await.expect("build app");

    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

async fn register(client: &reqwest::Client, base: &str, email: &str) -> String {
    let resp = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({
            "email": email,
            "password": "secret1",
            "display_name": "Ada",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    body["access_token"].as_str().expect("token").to_string()
}

/// A syntactically valid token whose role set lacks Owner.
fn viewer_token() -> String {
    let jwt = JwtService::new(SIGNING_KEY, 0);
    let claims = AccessTokenClaims::new(
        Uuid::new_v4(),
        "viewer@example.com",
        "Viewer",
        vec![ROLE_VIEWER.to_string()],
        3600,
    );
    jwt.encode(&claims).unwrap()
}

#[tokio::test]
async fn create_list_delete_flow_with_cache_visibility() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();
    let token = register(&client, &base, "ada@example.com").await;

    // Create
    let resp = client
        .post(format!("{base}/api/projects"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Alpha",
            "summary": "first",
            "tags": ["rust"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string();
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().expect("created id").to_string();
    assert_eq!(location, format!("/api/projects/{id}"));

    // Listed immediately, even though the empty pre-create page was cached
    // by registration-time requests (if any) within its TTL.
    let listed: Value = client
        .get(format!("{base}/api/projects"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Alpha"));

    // Lookup by id (warms the item cache entry).
    let resp = client
        .get(format!("{base}/api/projects/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    // Delete
    let resp = client
        .delete(format!("{base}/api/projects/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);

    // The cached item and listing must not survive the delete, even
    // inside the 30 second TTL window.
    let resp = client
        .get(format!("{base}/api/projects/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let listed: Value = client
        .get(format!("{base}/api/projects"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.as_array().unwrap().is_empty());

    // Deleting again reports not-found.
    let resp = client
        .delete(format!("{base}/api/projects/{id}"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn mutations_require_owner_role() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();

    let payload = json!({ "title": "Alpha", "summary": "first", "tags": [] });

    // No token: 401.
    let resp = client
        .post(format!("{base}/api/projects"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    // Valid token without the Owner role: 403, not 401.
    let resp = client
        .post(format!("{base}/api/projects"))
        .bearer_auth(viewer_token())
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);

    // Garbage token: 401.
    let resp = client
        .delete(format!("{base}/api/projects/{}", Uuid::new_v4()))
        .bearer_auth("not.a.jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();
    register(&client, &base, "ada@example.com").await;

    let wrong_password = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "ada@example.com", "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    let unknown_email = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "nobody@example.com", "password": "secret1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), reqwest::StatusCode::UNAUTHORIZED);

    let body_a: Value = wrong_password.json().await.unwrap();
    let body_b: Value = unknown_email.json().await.unwrap();
    assert_eq!(body_a, body_b);

    // The right password still works.
    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "ada@example.com", "password": "secret1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn malformed_payloads_return_field_details() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();
    let token = register(&client, &base, "ada@example.com").await;

    // Empty title on create.
    let resp = client
        .post(format!("{base}/api/projects"))
        .bearer_auth(&token)
        .json(&json!({ "title": "", "summary": "first", "tags": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "validation");
    assert_eq!(body["details"][0]["field"], "title");

    // Short password on register.
    let resp = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({
            "email": "bob@example.com",
            "password": "short",
            "display_name": "Bob",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    // Duplicate email on register.
    let resp = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({
            "email": "ada@example.com",
            "password": "secret2",
            "display_name": "Ada Again",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "email");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn seeded_admin_can_log_in_and_mutate() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "admin@example.com", "password": "Admin!23" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let token = body["access_token"].as_str().unwrap();
    assert!(body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r == "Owner"));

    let resp = client
        .post(format!("{base}/api/projects"))
        .bearer_auth(token)
        .json(&json!({ "title": "Seeded", "summary": "by admin", "tags": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn oversized_page_requests_are_clamped_not_rejected() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();

    for query in ["take=1000", "take=0", "take=-5", "skip=-10"] {
        let resp = client
            .get(format!("{base}/api/projects?{query}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "query {query}");
        let body: Value = resp.json().await.unwrap();
        assert!(body.as_array().unwrap().len() <= 50);
    }

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn health_reports_backend_and_cache() {
    let (base, shutdown_tx, handle) = start_server(&test_config()).await;
    let client = reqwest::Client::new();

    // Warm the cache so the counters move.
    client
        .get(format!("{base}/api/projects"))
        .send()
        .await
        .unwrap();
    client
        .get(format!("{base}/api/projects"))
        .send()
        .await
        .unwrap();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"]["backend"], "memory");
    assert!(body["cache"]["hits"].as_u64().unwrap() >= 1);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
