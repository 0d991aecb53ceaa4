//! `afiya-core` — shared building blocks for the admin panel crates.
//!
//! This crate contains **pure** primitives (no IO): typed identifiers, the
//! bilingual text value object, and the collection splice helpers every
//! in-memory collection goes through.

pub mod entity;
pub mod error;
pub mod form;
pub mod id;
pub mod value_object;
pub mod wire;

pub use entity::{Entity, Splice};
pub use error::{DomainError, DomainResult};
pub use form::FormMode;
pub use id::{MessageId, NotificationId, OrderId, ProductId, TeamMemberId, UserId};
pub use value_object::{LocalizedText, ValueObject};
