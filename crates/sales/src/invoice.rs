//! Invoice computation for the preview and printable receipt.

use core::fmt;

use crate::order::{Order, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

/// Derived invoice for one order.
///
/// `total` is the server's `total_amount`, not `subtotal + shipping + tax`;
/// the server may apply discounts the client never sees.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub order_number: String,
    pub created_on: String,
    pub status: OrderStatus,
    pub customer: String,
    pub customer_email: String,
    pub ship_to: String,
    pub address: String,
    pub phone: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: String,
}

impl Invoice {
    pub fn from_order(order: &Order) -> Self {
        let lines: Vec<InvoiceLine> = order
            .items
            .iter()
            .map(|item| InvoiceLine {
                name: item.display_name().to_string(),
                quantity: item.quantity,
                unit_price: item.price,
                total: item.line_total(),
            })
            .collect();
        let subtotal = lines.iter().map(|l| l.total).sum();

        let customer = order.customer_name();
        let address = order.shipping_address.clone().unwrap_or_default();
        let ship_to = address
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| customer.clone());

        Self {
            order_number: order.order_number.clone(),
            created_on: order
                .created_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| order.created_at.clone()),
            status: order.status,
            customer_email: order.user.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
            customer,
            ship_to,
            address: format!("{}, {}", address.street, address.city),
            phone: address.phone,
            lines,
            subtotal,
            shipping: order.shipping.unwrap_or(0.0),
            tax: order.tax.unwrap_or(0.0),
            total: order.total_amount,
            payment_method: order.payment_method.clone(),
        }
    }
}

struct Aed(f64);

impl fmt::Display for Aed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AED {:.2}", self.0)
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AFIYA ZONE - Natural Health & Wellness")?;
        writeln!(f, "Invoice #{}  {}  [{}]", self.order_number, self.created_on, self.status)?;
        writeln!(f)?;
        writeln!(f, "Customer:  {} <{}>", self.customer, self.customer_email)?;
        writeln!(f, "Ship to:   {}", self.ship_to)?;
        writeln!(f, "           {}", self.address)?;
        writeln!(f, "           Phone: {}", self.phone)?;
        writeln!(f)?;
        writeln!(f, "{:<30} {:>5} {:>14} {:>14}", "Product", "Qty", "Price", "Total")?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<30} {:>5} {:>14} {:>14}",
                line.name,
                line.quantity,
                Aed(line.unit_price).to_string(),
                Aed(line.total).to_string()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:<51} {:>14}", "Subtotal", Aed(self.subtotal).to_string())?;
        writeln!(f, "{:<51} {:>14}", "Shipping", Aed(self.shipping).to_string())?;
        writeln!(f, "{:<51} {:>14}", "Tax", Aed(self.tax).to_string())?;
        writeln!(f, "{:<51} {:>14}", "Total", Aed(self.total).to_string())?;
        write!(f, "Payment method: {}", self.payment_method)
    }
}
