//! Dashboard orchestrator.
//!
//! Loads the six dashboard collections in one all-or-nothing batch, runs the
//! CRUD mutations, and splices their results into [`DashboardState`]. Every
//! failure is terminal here: it becomes a [`Notice`] and an error value, and
//! prior state is kept.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::Mutex;

use afiya_auth::{AdminDraft, LoginForm, SessionContext, SessionError, User};
use afiya_client::{AdminApi, ApiError};
use afiya_core::{DomainError, OrderId, ProductId, Splice, TeamMemberId, UserId};
use afiya_parties::{TeamMember, TeamMemberDraft};
use afiya_products::{Product, ProductDraft};
use afiya_sales::{Order, OrderStatus};

use crate::config::DashboardConfig;
use crate::confirm::Confirm;
use crate::notice::{Notice, NoticeSink};
use crate::state::DashboardState;

const SESSION_EXPIRED: &str = "Session expired. Please login again.";
const LOGIN_REQUIRED: &str = "Please login to access admin panel";

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Client-side validation blocked the action; no request was sent.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The API rejected the stored credentials; a return to login is scheduled.
    #[error("session expired")]
    SessionExpired,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct Dashboard<A: AdminApi> {
    api: Arc<A>,
    session: SessionContext,
    state: Arc<Mutex<DashboardState>>,
    notices: Arc<dyn NoticeSink>,
    confirm: Arc<dyn Confirm>,
    config: DashboardConfig,
    alive: Arc<AtomicBool>,
}

impl<A: AdminApi> Clone for Dashboard<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            state: self.state.clone(),
            notices: self.notices.clone(),
            confirm: self.confirm.clone(),
            config: self.config.clone(),
            alive: self.alive.clone(),
        }
    }
}

impl<A: AdminApi> Dashboard<A> {
    pub fn new(
        api: Arc<A>,
        session: SessionContext,
        notices: Arc<dyn NoticeSink>,
        confirm: Arc<dyn Confirm>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            api,
            session,
            state: Arc::new(Mutex::new(DashboardState::default())),
            notices,
            confirm,
            config,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Run a synchronous edit against the state (filter inputs, tab switches, modals).
    pub async fn update_state<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }

    pub async fn focus_order(&self, id: OrderId) {
        self.state.lock().await.view.focus_order(id);
    }

    /// Stop committing responses. In-flight requests are not cancelled; their
    /// results are dropped on arrival.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        tracing::info!("dashboard torn down");
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────

    pub async fn login(&self, form: LoginForm) -> Result<User, DashboardError> {
        form.validate().map_err(|e| self.reject(e))?;

        let response = self
            .api
            .login(&form.email, &form.password)
            .await
            .map_err(|e| self.fail(e, "Login failed"))?;

        LoginForm::ensure_admin(&response.user).map_err(|e| self.reject(e))?;

        let ack = self
            .session
            .login(response.token, response.user.clone())
            .await?;
        self.notices.notify(Notice::success(ack));
        Ok(response.user)
    }

    pub async fn logout(&self) -> Result<(), DashboardError> {
        let ack = self.session.logout().await?;
        *self.state.lock().await = DashboardState::default();
        self.notices.notify(Notice::success(ack));
        Ok(())
    }

    /// Clear the rejected token now, return to login after the configured delay.
    async fn expire_session(&self) -> DashboardError {
        if let Err(err) = self.session.expire().await {
            tracing::error!(error = %err, "failed to clear stored token");
        }
        self.notices.notify(Notice::error(SESSION_EXPIRED));

        let session = self.session.clone();
        let delay = self.config.reload_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = session.reload().await {
                tracing::error!(error = %err, "forced session reload failed");
            }
        });

        DashboardError::SessionExpired
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch all six collections; commit only if every fetch succeeds.
    pub async fn load_all(&self) -> Result<(), DashboardError> {
        if !self.is_alive() {
            return Ok(());
        }

        if self.session.token().is_none() {
            self.notices.notify(Notice::error(LOGIN_REQUIRED));
            self.session.reload().await?;
            return Err(DashboardError::NotAuthenticated);
        }

        self.state.lock().await.loading = true;
        tracing::info!("loading dashboard data");

        let api = &self.api;
        let result = tokio::try_join!(
            api.statistics(),
            api.list_users(),
            api.list_products(),
            api.list_orders(),
            api.list_team_members(),
            api.list_messages(),
        );

        if !self.is_alive() {
            tracing::debug!("dropping dashboard load after teardown");
            return Ok(());
        }

        match result {
            Ok((statistics, users, products, orders, team_members, messages)) => {
                let mut state = self.state.lock().await;
                state.statistics = Some(statistics);
                state.users = users;
                state.products = products;
                state.orders = orders;
                state.team_members = team_members;
                state.messages = messages;
                state.loading = false;
                tracing::info!(
                    users = state.users.len(),
                    products = state.products.len(),
                    orders = state.orders.len(),
                    "dashboard data loaded"
                );
                Ok(())
            }
            Err(err) => {
                self.state.lock().await.loading = false;
                Err(self.fetch_failed(err, "Failed to load dashboard data").await)
            }
        }
    }

    /// Re-fetch everything except messages under the `refreshing` flag.
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        if !self.is_alive() {
            return Ok(());
        }

        self.state.lock().await.refreshing = true;

        let api = &self.api;
        let result = tokio::try_join!(
            api.statistics(),
            api.list_users(),
            api.list_products(),
            api.list_orders(),
            api.list_team_members(),
        );

        if !self.is_alive() {
            return Ok(());
        }

        match result {
            Ok((statistics, users, products, orders, team_members)) => {
                {
                    let mut state = self.state.lock().await;
                    state.statistics = Some(statistics);
                    state.users = users;
                    state.products = products;
                    state.orders = orders;
                    state.team_members = team_members;
                    state.refreshing = false;
                }
                self.notices.notify(Notice::success("Data refreshed successfully"));
                Ok(())
            }
            Err(err) => {
                self.state.lock().await.refreshing = false;
                Err(self.fetch_failed(err, "Failed to refresh dashboard data").await)
            }
        }
    }

    async fn fetch_failed(&self, err: ApiError, fallback: &str) -> DashboardError {
        if err.is_unauthorized() {
            tracing::warn!(message = %err.message, "credentials rejected during fetch");
            return self.expire_session().await;
        }
        self.fail(err, fallback)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, DashboardError> {
        let payload = draft.into_payload().map_err(|e| self.reject(e))?;
        let created = self
            .api
            .create_product(&payload)
            .await
            .map_err(|e| self.fail(e, "Failed to create product"))?;

        self.commit(|state| {
            state.products.prepend(created.clone());
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("Product created successfully"));
        self.reconcile().await;
        Ok(created)
    }

    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, DashboardError> {
        let payload = draft.into_payload().map_err(|e| self.reject(e))?;
        let updated = self
            .api
            .update_product(id, &payload)
            .await
            .map_err(|e| self.fail(e, "Failed to update product"))?;

        self.commit(|state| {
            state.products.replace_by_id(updated.clone());
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("Product updated successfully"));
        Ok(updated)
    }

    /// Returns `Ok(false)` when the operator declines.
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, DashboardError> {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this product?")
            .await
        {
            return Ok(false);
        }
        self.api
            .delete_product(id)
            .await
            .map_err(|e| self.fail(e, "Failed to delete product"))?;

        self.commit(|state| {
            state.products.remove_by_id(id);
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("Product deleted successfully"));
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_admin(&self, draft: AdminDraft) -> Result<User, DashboardError> {
        let payload = draft.into_payload().map_err(|e| self.reject(e))?;
        let created = self
            .api
            .create_user(&payload)
            .await
            .map_err(|e| self.fail(e, "Failed to create admin user"))?;

        self.commit(|state| {
            state.users.prepend(created.clone());
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("Admin user created successfully"));
        Ok(created)
    }

    /// An empty password in the draft keeps the existing one.
    pub async fn update_admin(&self, id: &UserId, draft: AdminDraft) -> Result<User, DashboardError> {
        let payload = draft.into_payload().map_err(|e| self.reject(e))?;
        let updated = self
            .api
            .update_user(id, &payload)
            .await
            .map_err(|e| self.fail(e, "Failed to update admin user"))?;

        self.commit(|state| {
            state.users.replace_by_id(updated.clone());
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("Admin user updated successfully"));
        Ok(updated)
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<bool, DashboardError> {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this user?")
            .await
        {
            return Ok(false);
        }
        self.api
            .delete_user(id)
            .await
            .map_err(|e| self.fail(e, "Failed to delete user"))?;

        self.commit(|state| {
            state.users.remove_by_id(id);
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("User deleted successfully"));
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────

    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, DashboardError> {
        let updated = self
            .api
            .update_order_status(id, status)
            .await
            .map_err(|e| self.fail(e, "Failed to update order status"))?;

        self.commit(|state| {
            state.orders.replace_by_id(updated.clone());
            state.view.close_modal();
        })
        .await;
        self.notices
            .notify(Notice::success("Order status updated successfully"));
        Ok(updated)
    }

    pub async fn delete_order(&self, id: &OrderId) -> Result<bool, DashboardError> {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this order?")
            .await
        {
            return Ok(false);
        }
        self.api
            .delete_order(id)
            .await
            .map_err(|e| self.fail(e, "Failed to delete order"))?;

        self.commit(|state| {
            state.orders.remove_by_id(id);
            state.view.close_modal();
        })
        .await;
        self.notices.notify(Notice::success("Order deleted successfully"));
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Team
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_team_member(
        &self,
        draft: TeamMemberDraft,
    ) -> Result<TeamMember, DashboardError> {
        let payload = draft.into_payload().map_err(|e| self.reject(e))?;
        let created = self
            .api
            .create_team_member(&payload)
            .await
            .map_err(|e| self.fail(e, "Failed to create team member"))?;

        self.commit(|state| {
            state.team_members.prepend(created.clone());
            state.view.close_modal();
        })
        .await;
        self.notices
            .notify(Notice::success("Team member created successfully"));
        self.reconcile().await;
        Ok(created)
    }

    pub async fn update_team_member(
        &self,
        id: &TeamMemberId,
        draft: TeamMemberDraft,
    ) -> Result<TeamMember, DashboardError> {
        let payload = draft.into_payload().map_err(|e| self.reject(e))?;
        let updated = self
            .api
            .update_team_member(id, &payload)
            .await
            .map_err(|e| self.fail(e, "Failed to update team member"))?;

        self.commit(|state| {
            state.team_members.replace_by_id(updated.clone());
            state.view.close_modal();
        })
        .await;
        self.notices
            .notify(Notice::success("Team member updated successfully"));
        Ok(updated)
    }

    pub async fn delete_team_member(&self, id: &TeamMemberId) -> Result<bool, DashboardError> {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this team member?")
            .await
        {
            return Ok(false);
        }
        self.api
            .delete_team_member(id)
            .await
            .map_err(|e| self.fail(e, "Failed to delete team member"))?;

        self.commit(|state| {
            state.team_members.remove_by_id(id);
            state.view.close_modal();
        })
        .await;
        self.notices
            .notify(Notice::success("Team member deleted successfully"));
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Apply a splice unless the dashboard was torn down meanwhile.
    async fn commit(&self, f: impl FnOnce(&mut DashboardState)) {
        if !self.is_alive() {
            tracing::debug!("dropping mutation result after teardown");
            return;
        }
        let mut state = self.state.lock().await;
        f(&mut state);
    }

    /// Full reload after creates, so server-derived fields (statistics) catch up.
    async fn reconcile(&self) {
        if let Err(err) = self.load_all().await {
            tracing::debug!(error = %err, "post-create reload failed");
        }
    }

    fn reject(&self, err: DomainError) -> DashboardError {
        self.notices.notify(Notice::error(err.to_string()));
        DashboardError::Invalid(err)
    }

    fn fail(&self, err: ApiError, fallback: &str) -> DashboardError {
        let message = err.reported_message().unwrap_or(fallback).to_string();
        tracing::error!(kind = ?err.kind, message = %message, "dashboard request failed");
        self.notices.notify(Notice::error(message));
        DashboardError::Api(err)
    }
}
