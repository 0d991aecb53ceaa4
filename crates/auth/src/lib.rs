//! `afiya-auth` — session gate, users and roles.
//!
//! This crate owns the single source of truth for authentication state
//! ([`SessionContext`]) and the durable storage it persists the bearer token
//! in. It is decoupled from HTTP: token validity is only ever discovered when
//! an API call fails.

pub mod roles;
pub mod session;
pub mod token_store;
pub mod user;

pub use roles::Role;
pub use session::{GateView, LoginForm, Session, SessionContext, SessionError, TOKEN_KEY};
pub use token_store::{MemoryTokenStore, SqliteTokenStore, TokenStore, TokenStoreError};
pub use user::{AdminDraft, AdminPayload, User, partition_by_role};
