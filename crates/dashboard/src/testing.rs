//! In-process `AdminApi` double and fixtures for the dashboard tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use afiya_auth::{AdminPayload, Role, User};
use afiya_client::{AdminApi, ApiError, ApiErrorKind, ApiResult, LoginResponse};
use afiya_core::{
    LocalizedText, MessageId, NotificationId, OrderId, ProductId, TeamMemberId, UserId,
};
use afiya_notifications::Notification;
use afiya_parties::{Message, TeamMember, TeamMemberPayload};
use afiya_products::{Product, ProductPayload};
use afiya_sales::{Order, OrderStatus, OrdersByStatus, Statistics};

use crate::config::DashboardConfig;

pub(crate) fn test_config() -> DashboardConfig {
    DashboardConfig {
        api_url: "http://127.0.0.1:9/api".to_string(),
        storage_path: PathBuf::from("/tmp/afiya-admin-test.db"),
        poll_interval: Duration::from_millis(50),
        reload_delay: Duration::from_millis(10),
        admin_email: None,
        admin_password: None,
    }
}

pub(crate) fn unauthorized(message: &str) -> ApiError {
    ApiError::from_response(401, &format!(r#"{{"message":"{message}"}}"#))
}

pub(crate) fn admin_user() -> User {
    User {
        id: UserId::new("u1"),
        first_name: "Lina".to_string(),
        last_name: "Haddad".to_string(),
        email: "lina@afiyazone.com".to_string(),
        phone: None,
        role: Role::Admin,
    }
}

pub(crate) fn customer_user() -> User {
    User {
        id: UserId::new("u2"),
        first_name: "Omar".to_string(),
        last_name: "Saleh".to_string(),
        email: "omar@example.com".to_string(),
        phone: Some("+971 50 123 4567".to_string()),
        role: Role::Customer,
    }
}

pub(crate) fn product(id: &str, name: &str, price: f64) -> Product {
    Product {
        id: ProductId::new(id),
        name: LocalizedText::new(name, format!("{name} (ar)")),
        description: LocalizedText::new("desc", "وصف"),
        category: "supplements".to_string(),
        price,
        original_price: None,
        stock: 10,
        images: vec![format!("https://cdn.example.com/{id}.jpg")],
        features: Vec::new(),
        benefits: Vec::new(),
        is_new: false,
        is_featured: false,
        is_popular: false,
        discount: 0.0,
    }
}

pub(crate) fn order(id: &str, number: &str, status: OrderStatus, created_at: &str) -> Order {
    Order {
        id: OrderId::new(id),
        order_number: number.to_string(),
        status,
        created_at: created_at.to_string(),
        user: None,
        shipping_address: None,
        payment_method: "cash_on_delivery".to_string(),
        total_amount: 120.0,
        items: Vec::new(),
        shipping: None,
        tax: None,
    }
}

pub(crate) fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: NotificationId::new(id),
        kind: "new_order".to_string(),
        title: "New order".to_string(),
        message: format!("Order for {id}"),
        order_id: Some(OrderId::new(format!("o-{id}"))),
        order_number: Some(format!("A-{id}")),
        status: Some("pending".to_string()),
        is_read,
        created_at: "2024-03-01T10:00:00Z".to_string(),
    }
}

fn team_member(id: &str) -> TeamMember {
    TeamMember {
        id: TeamMemberId::new(id),
        name: LocalizedText::new("Dr. Sara", "د. سارة"),
        position: LocalizedText::new("Nutritionist", "أخصائية تغذية"),
        bio: LocalizedText::new("Bio", "نبذة"),
        image: "https://cdn.example.com/sara.jpg".to_string(),
        email: String::new(),
        phone: String::new(),
        department: "medical".to_string(),
        order: 1,
        is_active: true,
    }
}

fn message(id: &str) -> Message {
    Message {
        id: MessageId::new(id),
        name: "Visitor".to_string(),
        email: "visitor@example.com".to_string(),
        phone: None,
        subject: None,
        message: "Do you ship to Sharjah?".to_string(),
        created_at: "2024-03-02T08:00:00Z".to_string(),
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Scripted API: serves the collections it holds and fails any method named
/// in `failures` until healed.
#[derive(Default)]
pub(crate) struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    statistics_stall: Mutex<Option<Arc<Notify>>>,
    admin_payloads: Mutex<Vec<AdminPayload>>,
    next_id: AtomicU64,

    pub(crate) users: Mutex<Vec<User>>,
    pub(crate) products: Mutex<Vec<Product>>,
    pub(crate) orders: Mutex<Vec<Order>>,
    pub(crate) team_members: Mutex<Vec<TeamMember>>,
    pub(crate) messages: Mutex<Vec<Message>>,
    pub(crate) notifications: Mutex<Vec<Notification>>,
    pub(crate) unread: Mutex<u64>,
}

impl FakeApi {
    pub(crate) fn seeded() -> Self {
        let api = Self::default();
        *lock(&api.users) = vec![admin_user(), customer_user()];
        *lock(&api.products) = vec![
            product("p1", "Vitamin D3", 45.0),
            product("p2", "Omega 3", 60.0),
            product("p3", "Zinc", 25.0),
        ];
        *lock(&api.orders) = vec![
            order("o1", "A100", OrderStatus::Pending, "2024-03-01T10:00:00Z"),
            order("o2", "A101", OrderStatus::Delivered, "2024-03-05T12:00:00Z"),
            order("o3", "A102", OrderStatus::Shipped, "2024-03-09T09:30:00Z"),
        ];
        *lock(&api.team_members) = vec![team_member("t1")];
        *lock(&api.messages) = vec![message("m1")];
        *lock(&api.notifications) = vec![notification("n1", false), notification("n2", true)];
        *lock(&api.unread) = 1;
        api
    }

    pub(crate) fn fail(&self, method: &'static str, error: ApiError) {
        lock(&self.failures).insert(method, error);
    }

    pub(crate) fn heal(&self, method: &'static str) {
        lock(&self.failures).remove(method);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|c| **c == method).count()
    }

    pub(crate) fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    pub(crate) fn last_admin_payload(&self) -> Option<AdminPayload> {
        lock(&self.admin_payloads).last().cloned()
    }

    /// Make `statistics()` block until the returned handle is notified.
    pub(crate) fn stall_statistics(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock(&self.statistics_stall) = Some(notify.clone());
        notify
    }

    fn enter(&self, method: &'static str) -> ApiResult<()> {
        lock(&self.calls).push(method);
        match lock(&self.failures).get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{prefix}-new-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

fn not_found() -> ApiError {
    ApiError::new(ApiErrorKind::NotFound, Some(404), "Not found")
}

fn product_from(id: ProductId, p: &ProductPayload) -> Product {
    Product {
        id,
        name: p.name.clone(),
        description: p.description.clone(),
        category: p.category.clone(),
        price: p.price,
        original_price: Some(p.original_price),
        stock: p.stock,
        images: p.images.clone(),
        features: p.features.clone(),
        benefits: p.benefits.clone(),
        is_new: p.is_new,
        is_featured: p.is_featured,
        is_popular: p.is_popular,
        discount: p.discount,
    }
}

fn user_from(id: UserId, p: &AdminPayload) -> User {
    User {
        id,
        first_name: p.first_name.clone(),
        last_name: p.last_name.clone(),
        email: p.email.clone(),
        phone: Some(p.phone.clone()).filter(|s| !s.is_empty()),
        role: p.role,
    }
}

fn member_from(id: TeamMemberId, p: &TeamMemberPayload) -> TeamMember {
    TeamMember {
        id,
        name: p.name.clone(),
        position: p.position.clone(),
        bio: p.bio.clone(),
        image: p.image.clone(),
        email: p.email.clone(),
        phone: p.phone.clone(),
        department: p.department.clone(),
        order: p.order,
        is_active: p.is_active,
    }
}

#[async_trait::async_trait]
impl AdminApi for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> ApiResult<LoginResponse> {
        self.enter("login")?;
        let user = lock(&self.users)
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| ApiError::new(ApiErrorKind::Validation, Some(400), "Invalid credentials"))?;
        Ok(LoginResponse {
            token: format!("token-for-{}", user.id),
            user,
        })
    }

    async fn statistics(&self) -> ApiResult<Statistics> {
        self.enter("statistics")?;
        let stall = lock(&self.statistics_stall).clone();
        if let Some(stall) = stall {
            stall.notified().await;
        }
        let orders = lock(&self.orders).clone();
        let count = |s: OrderStatus| orders.iter().filter(|o| o.status == s).count() as u64;
        Ok(Statistics {
            total_users: lock(&self.users).len() as u64,
            total_products: lock(&self.products).len() as u64,
            total_orders: orders.len() as u64,
            total_revenue: orders.iter().map(|o| o.total_amount).sum(),
            orders_by_status: OrdersByStatus {
                pending: count(OrderStatus::Pending),
                processing: count(OrderStatus::Processing),
                shipped: count(OrderStatus::Shipped),
                delivered: count(OrderStatus::Delivered),
            },
        })
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.enter("list_users")?;
        Ok(lock(&self.users).clone())
    }

    async fn create_user(&self, payload: &AdminPayload) -> ApiResult<User> {
        self.enter("create_user")?;
        lock(&self.admin_payloads).push(payload.clone());
        let user = user_from(UserId::new(self.fresh_id("u")), payload);
        lock(&self.users).insert(0, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, payload: &AdminPayload) -> ApiResult<User> {
        self.enter("update_user")?;
        lock(&self.admin_payloads).push(payload.clone());
        let mut users = lock(&self.users);
        let slot = users.iter_mut().find(|u| &u.id == id).ok_or_else(not_found)?;
        *slot = user_from(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_user(&self, id: &UserId) -> ApiResult<()> {
        self.enter("delete_user")?;
        lock(&self.users).retain(|u| &u.id != id);
        Ok(())
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.enter("list_products")?;
        Ok(lock(&self.products).clone())
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Product> {
        self.enter("create_product")?;
        let product = product_from(ProductId::new(self.fresh_id("p")), payload);
        lock(&self.products).insert(0, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &ProductId, payload: &ProductPayload) -> ApiResult<Product> {
        self.enter("update_product")?;
        let mut products = lock(&self.products);
        let slot = products.iter_mut().find(|p| &p.id == id).ok_or_else(not_found)?;
        *slot = product_from(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> ApiResult<()> {
        self.enter("delete_product")?;
        lock(&self.products).retain(|p| &p.id != id);
        Ok(())
    }

    async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        self.enter("list_orders")?;
        Ok(lock(&self.orders).clone())
    }

    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> ApiResult<Order> {
        self.enter("update_order_status")?;
        let mut orders = lock(&self.orders);
        let slot = orders.iter_mut().find(|o| &o.id == id).ok_or_else(not_found)?;
        slot.status = status;
        Ok(slot.clone())
    }

    async fn delete_order(&self, id: &OrderId) -> ApiResult<()> {
        self.enter("delete_order")?;
        lock(&self.orders).retain(|o| &o.id != id);
        Ok(())
    }

    async fn list_team_members(&self) -> ApiResult<Vec<TeamMember>> {
        self.enter("list_team_members")?;
        Ok(lock(&self.team_members).clone())
    }

    async fn create_team_member(&self, payload: &TeamMemberPayload) -> ApiResult<TeamMember> {
        self.enter("create_team_member")?;
        let member = member_from(TeamMemberId::new(self.fresh_id("t")), payload);
        lock(&self.team_members).insert(0, member.clone());
        Ok(member)
    }

    async fn update_team_member(
        &self,
        id: &TeamMemberId,
        payload: &TeamMemberPayload,
    ) -> ApiResult<TeamMember> {
        self.enter("update_team_member")?;
        let mut members = lock(&self.team_members);
        let slot = members.iter_mut().find(|m| &m.id == id).ok_or_else(not_found)?;
        *slot = member_from(id.clone(), payload);
        Ok(slot.clone())
    }

    async fn delete_team_member(&self, id: &TeamMemberId) -> ApiResult<()> {
        self.enter("delete_team_member")?;
        lock(&self.team_members).retain(|m| &m.id != id);
        Ok(())
    }

    async fn list_messages(&self) -> ApiResult<Vec<Message>> {
        self.enter("list_messages")?;
        Ok(lock(&self.messages).clone())
    }

    async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        self.enter("list_notifications")?;
        Ok(lock(&self.notifications).clone())
    }

    async fn unread_count(&self) -> ApiResult<u64> {
        self.enter("unread_count")?;
        Ok(*lock(&self.unread))
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> ApiResult<()> {
        self.enter("mark_notification_read")?;
        let mut items = lock(&self.notifications);
        let item = items.iter_mut().find(|n| &n.id == id).ok_or_else(not_found)?;
        if !item.is_read {
            item.is_read = true;
            let mut unread = lock(&self.unread);
            *unread = unread.saturating_sub(1);
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        self.enter("mark_all_notifications_read")?;
        for item in lock(&self.notifications).iter_mut() {
            item.is_read = true;
        }
        *lock(&self.unread) = 0;
        Ok(())
    }
}
