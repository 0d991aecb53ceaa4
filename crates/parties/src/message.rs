use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use afiya_core::wire::lenient_string;
use afiya_core::{Entity, MessageId};

/// Inbound contact-form message. Read-only: no status, no reply flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(alias = "_id")]
    pub id: MessageId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl Entity for Message {
    type Id = MessageId;

    fn id(&self) -> &MessageId {
        &self.id
    }
}

impl Message {
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn subject_or_default(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("(no subject)")
    }
}
