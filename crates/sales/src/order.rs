use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use afiya_core::wire::lenient_string;
use afiya_core::{DomainError, Entity, LocalizedText, OrderId};

/// Order status. Any status may move to any other; no workflow is enforced
/// client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Display label for stat cards and select options.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown order status: {s}")))
    }
}

/// Denormalized snapshot of the ordering customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
}

/// Product reference on an order line: either a populated snapshot or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Snapshot {
        #[serde(default, alias = "_id")]
        id: Option<String>,
        #[serde(default)]
        name: LocalizedText,
    },
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product: Option<ProductRef>,
    /// Line-level name some payloads carry instead of a populated product.
    #[serde(default)]
    pub name: Option<LocalizedText>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
}

impl OrderItem {
    /// English display name, falling back to `"Product"`.
    pub fn display_name(&self) -> &str {
        let from_product = match &self.product {
            Some(ProductRef::Snapshot { name, .. }) if !name.en.is_empty() => Some(name.en.as_str()),
            _ => None,
        };
        from_product
            .or_else(|| {
                self.name
                    .as_ref()
                    .map(|n| n.en.as_str())
                    .filter(|en| !en.is_empty())
            })
            .unwrap_or("Product")
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Order record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_number: String,
    pub status: OrderStatus,
    /// Raw timestamp; parsed on demand so a malformed value never fails a decode.
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(default)]
    pub user: Option<OrderUser>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping: Option<f64>,
    #[serde(default)]
    pub tax: Option<f64>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

impl Order {
    /// UTC calendar date of `created_at`.
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates; anything else
    /// yields `None`.
    pub fn created_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.created_at)
    }

    pub fn customer_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| format!("{} {}", u.first_name, u.last_name).trim().to_string())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn created_date_uses_utc_calendar_day() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "_id": "o1",
            "orderNumber": "A100",
            "status": "pending",
            "createdAt": "2024-01-05T23:30:00-02:00"
        }))
        .unwrap();
        assert_eq!(order.created_date(), NaiveDate::from_ymd_opt(2024, 1, 6));
    }

    #[test]
    fn bare_date_and_garbage() {
        assert_eq!(parse_calendar_date("2024-02-10"), NaiveDate::from_ymd_opt(2024, 2, 10));
        assert_eq!(parse_calendar_date("yesterday"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn item_name_falls_back_through_snapshot_then_line_name() {
        let items: Vec<OrderItem> = serde_json::from_value(serde_json::json!([
            { "product": { "_id": "p1", "name": { "en": "Omega 3", "ar": "أوميغا" } }, "price": 10.0, "quantity": 2 },
            { "product": "p2", "name": { "en": "Zinc" }, "price": 5.0, "quantity": 1 },
            { "price": 1.0, "quantity": 3 }
        ]))
        .unwrap();

        assert_eq!(items[0].display_name(), "Omega 3");
        assert_eq!(items[1].display_name(), "Zinc");
        assert_eq!(items[2].display_name(), "Product");
        assert_eq!(items[0].line_total(), 20.0);
    }

    #[test]
    fn odd_created_at_does_not_sink_the_list() {
        let orders: Vec<Order> = serde_json::from_value(serde_json::json!([
            { "_id": "o1", "orderNumber": "A100", "status": "pending", "createdAt": "2024-01-01" },
            { "_id": "o2", "orderNumber": "A101", "status": "shipped", "createdAt": null },
            { "_id": "o3", "orderNumber": "A102", "status": "delivered", "createdAt": 1704067200000u64 }
        ]))
        .unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].created_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(orders[1].created_at, "");
        assert_eq!(orders[1].created_date(), None);
        assert_eq!(orders[2].created_date(), None);
    }
}
