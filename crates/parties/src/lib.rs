//! Parties domain module.
//!
//! The people the back-office deals with besides customers: the public team
//! roster (editable) and inbound contact-form messages (read-only).

pub mod message;
pub mod team_member;

pub use message::Message;
pub use team_member::{Department, TeamMember, TeamMemberDraft, TeamMemberPayload};
