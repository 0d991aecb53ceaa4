//! In-memory dashboard state.
//!
//! Every collection is a verbatim snapshot of the last successful fetch,
//! adjusted only by splicing mutation responses in by id.

use afiya_auth::{User, partition_by_role};
use afiya_core::OrderId;
use afiya_parties::{Message, TeamMember};
use afiya_products::{Product, matches_search};
use afiya_sales::{Invoice, Order, OrderFilter, Statistics};

use crate::view::ViewState;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub statistics: Option<Statistics>,
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub team_members: Vec<TeamMember>,
    pub messages: Vec<Message>,

    /// Initial load in flight (blocking spinner).
    pub loading: bool,
    /// Manual refresh in flight (non-blocking spinner).
    pub refreshing: bool,

    pub order_filter: OrderFilter,
    pub product_search: String,
    pub view: ViewState,
}

impl DashboardState {
    pub fn filtered_orders(&self) -> Vec<Order> {
        self.order_filter.apply(&self.orders)
    }

    /// Admins tab rows.
    pub fn admins(&self) -> Vec<User> {
        partition_by_role(&self.users).0
    }

    /// Users tab rows (everyone who is not an admin).
    pub fn customers(&self) -> Vec<User> {
        partition_by_role(&self.users).1
    }

    pub fn searched_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| matches_search(p, &self.product_search))
            .collect()
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn invoice(&self, id: &OrderId) -> Option<Invoice> {
        self.order(id).map(Invoice::from_order)
    }
}
