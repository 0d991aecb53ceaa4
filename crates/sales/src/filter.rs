//! Orders-tab filter.
//!
//! Three independent predicates composed by AND, evaluated in a fixed order:
//! date range, status, order-number substring. Each inactive predicate passes
//! every order.

use chrono::NaiveDate;

use crate::order::{Order, OrderStatus};

/// Status predicate; `All` is the inactive sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: StatusFilter,
    pub order_number: String,
}

impl OrderFilter {
    /// True when any predicate is set.
    pub fn is_active(&self) -> bool {
        self.start_date.is_some()
            || self.end_date.is_some()
            || self.status != StatusFilter::All
            || !self.order_number.is_empty()
    }

    /// Reset every predicate to inactive.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Date-range predicate, inclusive on both bounds.
    ///
    /// An order whose date cannot be parsed never matches a bounded range but
    /// passes an unbounded one.
    pub fn matches_date(&self, order: &Order) -> bool {
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(day) = order.created_date() else {
            return false;
        };
        self.start_date.is_none_or(|start| day >= start) && self.end_date.is_none_or(|end| day <= end)
    }

    pub fn matches_status(&self, order: &Order) -> bool {
        self.status.matches(order.status)
    }

    pub fn matches_order_number(&self, order: &Order) -> bool {
        self.order_number.is_empty()
            || order
                .order_number
                .to_lowercase()
                .contains(&self.order_number.to_lowercase())
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.matches_date(order) && self.matches_status(order) && self.matches_order_number(order)
    }

    /// Filtered view of `orders`, preserving their order.
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders
            .iter()
            .filter(|o| self.matches_date(o))
            .filter(|o| self.matches_status(o))
            .filter(|o| self.matches_order_number(o))
            .cloned()
            .collect()
    }
}
