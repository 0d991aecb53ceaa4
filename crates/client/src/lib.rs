//! Typed client for the Afiya Zone admin REST API.
//!
//! [`AdminApi`] is the seam the dashboard and the notification poller depend
//! on; [`HttpAdminApi`] is the reqwest-backed implementation. Every failure
//! carries a closed [`ApiErrorKind`] so callers branch on kind, not on text.

pub mod api;
pub mod error;
pub mod http;

pub use api::{AdminApi, LoginResponse};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use http::{HttpAdminApi, StaticToken, TokenSource};
