//! Orders domain module.
//!
//! Order records, the client-side order filter, invoice computation and the
//! dashboard statistics. Deterministic logic only (no IO, no HTTP).

pub mod filter;
pub mod invoice;
pub mod order;
pub mod statistics;

pub use filter::{OrderFilter, StatusFilter};
pub use invoice::{Invoice, InvoiceLine};
pub use order::{Order, OrderItem, OrderStatus, OrderUser, ProductRef, ShippingAddress};
pub use statistics::{OrdersByStatus, Statistics};
