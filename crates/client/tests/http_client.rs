use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use afiya_client::{AdminApi, ApiErrorKind, HttpAdminApi, StaticToken};
use afiya_core::{NotificationId, OrderId};
use afiya_sales::OrderStatus;

#[derive(Default)]
struct Seen {
    auth_headers: Vec<Option<String>>,
    status_bodies: Vec<Value>,
}

type Shared = Arc<Mutex<Seen>>;

struct TestServer {
    base_url: String,
    seen: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let seen: Shared = Arc::default();
        let app = Router::new()
            .route("/api/admin/users", get(users))
            .route("/api/admin/team", get(|| async { Json(json!({})) }))
            .route("/api/admin/orders/:id/status", put(order_status))
            .route("/api/admin/products", get(expired))
            .route("/api/admin/messages", get(broken))
            .route("/api/notifications/unread-count", get(|| async { Json(json!({ "count": 4 })) }))
            .route("/api/notifications/:id/read", put(missing))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            seen,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn users(State(seen): State<Shared>, headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().unwrap().auth_headers.push(auth);
    Json(json!({
        "users": [
            { "_id": "u1", "firstName": "Lina", "lastName": "Saeed", "email": "lina@afiyazone.com", "role": "admin" },
            { "_id": "u2", "firstName": "Omar", "lastName": "Ali", "email": "omar@example.com", "role": "customer" }
        ]
    }))
}

async fn order_status(
    State(seen): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let status = body["status"].clone();
    seen.lock().unwrap().status_bodies.push(body);
    Json(json!({
        "_id": id,
        "orderNumber": "AFZ-9",
        "status": status,
        "createdAt": "2024-01-05T10:00:00Z",
        "totalAmount": 99.0,
        "items": []
    }))
}

async fn expired() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Token is not valid" })),
    )
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "")
}

async fn missing() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Notification not found" })),
    )
}

#[tokio::test]
async fn bearer_token_is_attached_and_envelope_unwrapped() {
    let srv = TestServer::spawn().await;
    let api = HttpAdminApi::new(&srv.base_url, StaticToken(Some("tok-123".to_string())));

    let users = api.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "lina@afiyazone.com");

    let seen = srv.seen.lock().unwrap();
    assert_eq!(seen.auth_headers, vec![Some("Bearer tok-123".to_string())]);
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let srv = TestServer::spawn().await;
    let api = HttpAdminApi::new(&srv.base_url, StaticToken(None));

    api.list_users().await.unwrap();
    assert_eq!(srv.seen.lock().unwrap().auth_headers, vec![None]);
}

#[tokio::test]
async fn missing_optional_lists_and_counts_decode() {
    let srv = TestServer::spawn().await;
    let api = HttpAdminApi::new(&srv.base_url, StaticToken(Some("t".to_string())));

    assert!(api.list_team_members().await.unwrap().is_empty());
    assert_eq!(api.unread_count().await.unwrap(), 4);
}

#[tokio::test]
async fn order_status_update_sends_lowercase_status() {
    let srv = TestServer::spawn().await;
    let api = HttpAdminApi::new(&srv.base_url, StaticToken(Some("t".to_string())));

    let order = api
        .update_order_status(&OrderId::new("o1"), OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.id, OrderId::new("o1"));
    assert_eq!(srv.seen.lock().unwrap().status_bodies, vec![json!({ "status": "shipped" })]);
}

#[tokio::test]
async fn errors_are_classified_by_kind() {
    let srv = TestServer::spawn().await;
    let api = HttpAdminApi::new(&srv.base_url, StaticToken(Some("t".to_string())));

    let err = api.list_products().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.message, "Token is not valid");

    let err = api.list_messages().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.message, "Request failed with status 502");

    let err = api
        .mark_notification_read(&NotificationId::new("n1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.message, "Notification not found");
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on the discard port.
    let api = HttpAdminApi::new("http://127.0.0.1:9/api", StaticToken(None));
    let err = api.statistics().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
}
