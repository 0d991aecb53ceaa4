//! Notifications domain module.
//!
//! The notification record and the bell's feed state machine. The feed owns
//! every state transition (poll application, optimistic mark-read, view
//! filter, dropdown); the poller in `afiya-dashboard` only drives it.

pub mod feed;
pub mod notification;

pub use feed::{FeedPhase, NotificationFeed, NotificationFilter, PollOutcome, PollTicket};
pub use notification::Notification;
