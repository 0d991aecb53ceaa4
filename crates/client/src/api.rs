use serde::{Deserialize, Serialize};

use afiya_auth::{AdminPayload, User};
use afiya_core::{NotificationId, OrderId, ProductId, TeamMemberId, UserId};
use afiya_notifications::Notification;
use afiya_parties::{Message, TeamMember, TeamMemberPayload};
use afiya_products::{Product, ProductPayload};
use afiya_sales::{Order, OrderStatus, Statistics};

use crate::error::ApiResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Admin REST API surface.
///
/// List calls return the unwrapped collection; mutations return the record
/// the server stored.
#[async_trait::async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn statistics(&self) -> ApiResult<Statistics>;

    async fn list_users(&self) -> ApiResult<Vec<User>>;
    async fn create_user(&self, payload: &AdminPayload) -> ApiResult<User>;
    async fn update_user(&self, id: &UserId, payload: &AdminPayload) -> ApiResult<User>;
    async fn delete_user(&self, id: &UserId) -> ApiResult<()>;

    async fn list_products(&self) -> ApiResult<Vec<Product>>;
    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Product>;
    async fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> ApiResult<Product>;
    async fn delete_product(&self, id: &ProductId) -> ApiResult<()>;

    async fn list_orders(&self) -> ApiResult<Vec<Order>>;
    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> ApiResult<Order>;
    async fn delete_order(&self, id: &OrderId) -> ApiResult<()>;

    async fn list_team_members(&self) -> ApiResult<Vec<TeamMember>>;
    async fn create_team_member(&self, payload: &TeamMemberPayload) -> ApiResult<TeamMember>;
    async fn update_team_member(
        &self,
        id: &TeamMemberId,
        payload: &TeamMemberPayload,
    ) -> ApiResult<TeamMember>;
    async fn delete_team_member(&self, id: &TeamMemberId) -> ApiResult<()>;

    async fn list_messages(&self) -> ApiResult<Vec<Message>>;

    async fn list_notifications(&self) -> ApiResult<Vec<Notification>>;
    async fn unread_count(&self) -> ApiResult<u64>;
    async fn mark_notification_read(&self, id: &NotificationId) -> ApiResult<()>;
    async fn mark_all_notifications_read(&self) -> ApiResult<()>;
}
