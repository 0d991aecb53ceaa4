//! User records and the admin account form.
//!
//! Admins and customers come from one fetched collection; the Admins and Users
//! tabs are two views of it, partitioned by role.

use serde::{Deserialize, Serialize};

use afiya_core::{DomainError, DomainResult, Entity, FormMode, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User record
// ─────────────────────────────────────────────────────────────────────────────

/// User record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Split one user collection into `(admins, customers)`.
///
/// The two halves are disjoint and together contain every input row, in the
/// original order.
pub fn partition_by_role(users: &[User]) -> (Vec<User>, Vec<User>) {
    users.iter().cloned().partition(|u| u.role.is_admin())
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin form
// ─────────────────────────────────────────────────────────────────────────────

/// Outgoing payload for creating or updating an admin account.
///
/// `password` is absent on the wire when `None`; the API then keeps the
/// existing password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
}

/// Local draft of the admin account form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDraft {
    pub mode: FormMode<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl AdminDraft {
    /// Empty draft for a new admin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing account. The password always starts blank.
    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit(user.id.clone()),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password: String::new(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.email.is_empty() {
            return Err(DomainError::validation("Please fill in all required fields"));
        }
        if self.mode.is_create() && self.password.is_empty() {
            return Err(DomainError::validation("Password is required for new admin"));
        }
        Ok(())
    }

    /// Validate and build the outgoing payload (role is always `admin`).
    pub fn into_payload(self) -> DomainResult<AdminPayload> {
        self.validate()?;
        let password = if self.password.is_empty() {
            None
        } else {
            Some(self.password)
        };
        Ok(AdminPayload {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password,
            phone: self.phone,
            role: Role::Admin,
        })
    }
}
