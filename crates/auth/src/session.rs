//! Session gate: decides between the login screen and the dashboard.
//!
//! [`SessionContext`] is passed explicitly to every component that needs
//! authentication state. It exposes read-only views plus the mutators
//! `login`, `logout` and `expire`; nothing else writes the stored token.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::sync::watch;

use afiya_core::{DomainError, DomainResult};

use crate::token_store::{TokenStore, TokenStoreError};
use crate::user::User;

/// Fixed storage key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "adminToken";

/// Which top-level view the gate renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    Login,
    Dashboard,
}

/// Authenticated session: opaque bearer token plus the logged-in admin.
///
/// `user` is `None` when the session was restored from storage; only the
/// token survives a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] TokenStoreError),
}

/// Login screen input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("Please fill in all fields"));
        }
        Ok(())
    }

    /// Only admins may open a session.
    pub fn ensure_admin(user: &User) -> DomainResult<()> {
        if !user.role.is_admin() {
            return Err(DomainError::validation(
                "Access denied. Admin privileges required.",
            ));
        }
        Ok(())
    }
}

struct SessionInner {
    store: Arc<dyn TokenStore>,
    session: RwLock<Option<Session>>,
    gate: watch::Sender<GateView>,
}

/// Single source of truth for authentication state.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

impl core::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("gate", &*self.inner.gate.borrow())
            .finish()
    }
}

impl SessionContext {
    /// Restore the session from durable storage.
    ///
    /// A stored token is trusted as-is; a stale or forged token is only
    /// discovered when the first API call fails.
    pub async fn restore(store: Arc<dyn TokenStore>) -> Result<Self, SessionError> {
        let token = store.load(TOKEN_KEY).await?;
        let gate = if token.is_some() {
            GateView::Dashboard
        } else {
            GateView::Login
        };
        let session = token.map(|token| Session { token, user: None });

        tracing::info!(authenticated = session.is_some(), "session restored");

        let (tx, _rx) = watch::channel(gate);
        Ok(Self {
            inner: Arc::new(SessionInner {
                store,
                session: RwLock::new(session),
                gate: tx,
            }),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read_session().map(|s| s.token)
    }

    pub fn user(&self) -> Option<User> {
        self.read_session().and_then(|s| s.user)
    }

    pub fn gate(&self) -> GateView {
        *self.inner.gate.borrow()
    }

    /// Watch gate transitions (login, logout, forced reload).
    pub fn subscribe(&self) -> watch::Receiver<GateView> {
        self.inner.gate.subscribe()
    }

    /// Persist the token and open the dashboard.
    pub async fn login(&self, token: String, user: User) -> Result<&'static str, SessionError> {
        self.inner.store.save(TOKEN_KEY, &token).await?;
        tracing::info!(email = %user.email, "admin logged in");
        self.write_session(Some(Session {
            token,
            user: Some(user),
        }));
        self.inner.gate.send_replace(GateView::Dashboard);
        Ok("Login successful!")
    }

    /// Clear storage and return to the login screen.
    pub async fn logout(&self) -> Result<&'static str, SessionError> {
        self.inner.store.remove(TOKEN_KEY).await?;
        self.write_session(None);
        self.inner.gate.send_replace(GateView::Login);
        tracing::info!("admin logged out");
        Ok("Logged out successfully")
    }

    /// Drop a token the API rejected.
    ///
    /// Storage and the in-memory session are cleared immediately; the gate
    /// only moves on the next [`reload`](Self::reload).
    pub async fn expire(&self) -> Result<(), SessionError> {
        self.inner.store.remove(TOKEN_KEY).await?;
        self.write_session(None);
        tracing::warn!("session expired; stored token cleared");
        Ok(())
    }

    /// Re-run the startup decision against durable storage.
    pub async fn reload(&self) -> Result<GateView, SessionError> {
        let token = self.inner.store.load(TOKEN_KEY).await?;
        let view = match token {
            Some(token) => {
                let user = self.user();
                self.write_session(Some(Session { token, user }));
                GateView::Dashboard
            }
            None => {
                self.write_session(None);
                GateView::Login
            }
        };
        self.inner.gate.send_replace(view);
        tracing::info!(?view, "session gate reloaded");
        Ok(view)
    }

    fn read_session(&self) -> Option<Session> {
        match self.inner.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write_session(&self, session: Option<Session>) {
        match self.inner.session.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }
}
