//! reqwest-backed [`AdminApi`].

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use afiya_auth::{AdminPayload, SessionContext, User};
use afiya_core::{NotificationId, OrderId, ProductId, TeamMemberId, UserId};
use afiya_notifications::Notification;
use afiya_parties::{Message, TeamMember, TeamMemberPayload};
use afiya_products::{Product, ProductPayload};
use afiya_sales::{Order, OrderStatus, Statistics};

use crate::api::{AdminApi, LoginResponse};
use crate::error::{ApiError, ApiResult};

/// Where the client reads the bearer token from on every request.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

impl TokenSource for SessionContext {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}

/// Fixed token, mostly for tests and one-off scripts.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Debug, Clone)]
pub struct HttpAdminApi<T = SessionContext> {
    client: reqwest::Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenSource> HttpAdminApi<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, tokens)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, tokens: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.bearer_token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and return the JSON body (`Null` for an empty 2xx body).
    async fn execute(&self, req: RequestBuilder) -> ApiResult<Value> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), kind = ?err.kind, message = %err.message, "api request failed");
            return Err(err);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn get(&self, path: &str) -> ApiResult<Value> {
        self.execute(self.request(Method::GET, path)).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        self.execute(self.request(method, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> ApiResult<R> {
    serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
}

/// Required envelope field, e.g. `{ "users": [...] }`.
fn field<R: DeserializeOwned>(mut body: Value, key: &str) -> ApiResult<R> {
    match body.get_mut(key).map(Value::take) {
        Some(value) if !value.is_null() => decode(value),
        _ => Err(ApiError::decode(format!("response is missing `{key}`"))),
    }
}

/// Optional envelope field; absent or null decodes as the default.
fn field_or_default<R: DeserializeOwned + Default>(mut body: Value, key: &str) -> ApiResult<R> {
    match body.get_mut(key).map(Value::take) {
        Some(value) if !value.is_null() => decode(value),
        _ => Ok(R::default()),
    }
}

/// Mutation result: either the bare record or `{ "<key>": record }`.
fn record<R: DeserializeOwned>(mut body: Value, key: &str) -> ApiResult<R> {
    match body.get_mut(key).map(Value::take) {
        Some(inner) if inner.is_object() => decode(inner),
        _ => decode(body),
    }
}

#[async_trait::async_trait]
impl<T: TokenSource> AdminApi for HttpAdminApi<T> {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = json!({ "email": email, "password": password });
        let value = self.send_json(Method::POST, "/auth/login", &body).await?;
        decode(value)
    }

    async fn statistics(&self) -> ApiResult<Statistics> {
        let value = self.get("/admin/statistics").await?;
        record(value, "statistics")
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        field(self.get("/admin/users").await?, "users")
    }

    async fn create_user(&self, payload: &AdminPayload) -> ApiResult<User> {
        let value = self.send_json(Method::POST, "/admin/users", payload).await?;
        record(value, "user")
    }

    async fn update_user(&self, id: &UserId, payload: &AdminPayload) -> ApiResult<User> {
        let value = self
            .send_json(Method::PUT, &format!("/admin/users/{id}"), payload)
            .await?;
        record(value, "user")
    }

    async fn delete_user(&self, id: &UserId) -> ApiResult<()> {
        self.delete(&format!("/admin/users/{id}")).await
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        field(self.get("/admin/products").await?, "products")
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Product> {
        let value = self.send_json(Method::POST, "/admin/products", payload).await?;
        record(value, "product")
    }

    async fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> ApiResult<Product> {
        let value = self
            .send_json(Method::PUT, &format!("/admin/products/{id}"), payload)
            .await?;
        record(value, "product")
    }

    async fn delete_product(&self, id: &ProductId) -> ApiResult<()> {
        self.delete(&format!("/admin/products/{id}")).await
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        field(self.get("/admin/orders").await?, "orders")
    }

    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> ApiResult<Order> {
        let value = self
            .send_json(
                Method::PUT,
                &format!("/admin/orders/{id}/status"),
                &json!({ "status": status }),
            )
            .await?;
        record(value, "order")
    }

    async fn delete_order(&self, id: &OrderId) -> ApiResult<()> {
        self.delete(&format!("/admin/orders/{id}")).await
    }

    async fn list_team_members(&self) -> ApiResult<Vec<TeamMember>> {
        field_or_default(self.get("/admin/team").await?, "teamMembers")
    }

    async fn create_team_member(&self, payload: &TeamMemberPayload) -> ApiResult<TeamMember> {
        let value = self.send_json(Method::POST, "/admin/team", payload).await?;
        record(value, "teamMember")
    }

    async fn update_team_member(
        &self,
        id: &TeamMemberId,
        payload: &TeamMemberPayload,
    ) -> ApiResult<TeamMember> {
        let value = self
            .send_json(Method::PUT, &format!("/admin/team/{id}"), payload)
            .await?;
        record(value, "teamMember")
    }

    async fn delete_team_member(&self, id: &TeamMemberId) -> ApiResult<()> {
        self.delete(&format!("/admin/team/{id}")).await
    }

    async fn list_messages(&self) -> ApiResult<Vec<Message>> {
        field_or_default(self.get("/admin/messages").await?, "messages")
    }

    async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        field_or_default(self.get("/notifications").await?, "notifications")
    }

    async fn unread_count(&self) -> ApiResult<u64> {
        field_or_default(self.get("/notifications/unread-count").await?, "count")
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> ApiResult<()> {
        self.execute(self.request(Method::PUT, &format!("/notifications/{id}/read")))
            .await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        self.execute(self.request(Method::PUT, "/notifications/read-all"))
            .await?;
        Ok(())
    }
}
