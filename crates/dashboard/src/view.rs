//! Navigation state: active tab, open modal, highlighted order.

use afiya_core::{OrderId, ProductId, TeamMemberId, UserId};
use afiya_sales::OrderStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Team,
    Messages,
    Admins,
    Users,
    Products,
    Orders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    AddProduct,
    EditProduct(ProductId),
    AddAdmin,
    EditAdmin(UserId),
    AddTeamMember,
    EditTeamMember(TeamMemberId),
    InvoicePreview(OrderId),
    PrintInvoice(OrderId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub modal: Option<Modal>,
    pub focused_order: Option<OrderId>,
}

impl ViewState {
    pub fn select(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn open(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Jump to the Orders tab with `id` highlighted (notification click).
    pub fn focus_order(&mut self, id: OrderId) {
        self.tab = Tab::Orders;
        self.focused_order = Some(id);
    }
}

/// Badge class for an order status pill.
pub fn status_badge(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge-warning",
        OrderStatus::Processing => "badge-info",
        OrderStatus::Shipped => "badge-primary",
        OrderStatus::Delivered => "badge-success",
        OrderStatus::Cancelled => "badge-danger",
    }
}
