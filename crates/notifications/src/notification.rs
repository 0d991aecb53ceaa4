use serde::{Deserialize, Serialize};

use afiya_core::wire::lenient_string;
use afiya_core::{Entity, NotificationId, OrderId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: NotificationId,
    /// Free-form type tag; order events conventionally contain "order".
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> &NotificationId {
        &self.id
    }
}

impl Notification {
    pub fn is_order_related(&self) -> bool {
        self.kind.to_lowercase().contains("order")
    }
}
