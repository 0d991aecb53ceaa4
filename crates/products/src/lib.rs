//! Products domain module.
//!
//! Catalog records as the API returns them, plus the product form draft with
//! its validation and pre-submit sanitization. Pure logic: no IO, no HTTP.

pub mod draft;
pub mod product;

pub use draft::{ProductDraft, ProductPayload};
pub use product::{Product, ProductCategory, matches_search};
