//! Product form draft.
//!
//! Blank list entries are dropped before submission: image URLs that are empty
//! or whitespace, and features/benefits whose English and Arabic halves are
//! both blank. One policy for all three lists.

use serde::{Deserialize, Serialize};

use afiya_core::{DomainError, DomainResult, FormMode, LocalizedText, ProductId};

use crate::product::{Product, ProductCategory};

/// Outgoing create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub price: f64,
    pub original_price: f64,
    pub stock: i64,
    pub images: Vec<String>,
    pub features: Vec<LocalizedText>,
    pub benefits: Vec<LocalizedText>,
    pub is_new: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub discount: f64,
}

/// Local draft mirroring the product shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub mode: FormMode<ProductId>,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub price: f64,
    pub original_price: f64,
    pub stock: i64,
    pub images: Vec<String>,
    pub features: Vec<LocalizedText>,
    pub benefits: Vec<LocalizedText>,
    pub is_new: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub discount: f64,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            name: LocalizedText::default(),
            description: LocalizedText::default(),
            category: ProductCategory::Supplements.as_str().to_string(),
            price: 0.0,
            original_price: 0.0,
            stock: 0,
            images: vec![String::new()],
            features: vec![LocalizedText::default()],
            benefits: vec![LocalizedText::default()],
            is_new: false,
            is_featured: false,
            is_popular: false,
            discount: 0.0,
        }
    }
}

impl ProductDraft {
    /// Fixed default draft for the "add product" form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing product for editing.
    pub fn edit(product: &Product) -> Self {
        let mut images: Vec<String> = product
            .images
            .iter()
            .filter(|img| !img.trim().is_empty())
            .cloned()
            .collect();
        if images.is_empty() {
            images.push(String::new());
        }

        let or_blank_row = |rows: &[LocalizedText]| {
            if rows.is_empty() {
                vec![LocalizedText::default()]
            } else {
                rows.to_vec()
            }
        };

        let category = if product.category.is_empty() {
            ProductCategory::Supplements.as_str().to_string()
        } else {
            product.category.clone()
        };

        Self {
            mode: FormMode::Edit(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            category,
            price: product.price,
            original_price: product.original_price.unwrap_or(0.0),
            stock: product.stock,
            images,
            features: or_blank_row(&product.features),
            benefits: or_blank_row(&product.benefits),
            is_new: product.is_new,
            is_featured: product.is_featured,
            is_popular: product.is_popular,
            discount: product.discount,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // List edits
    // ─────────────────────────────────────────────────────────────────────

    pub fn push_image(&mut self) {
        self.images.push(String::new());
    }

    pub fn set_image(&mut self, index: usize, url: impl Into<String>) -> DomainResult<()> {
        let slot = self
            .images
            .get_mut(index)
            .ok_or_else(|| out_of_range("image", index))?;
        *slot = url.into();
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> DomainResult<String> {
        remove_at(&mut self.images, index, "image")
    }

    pub fn push_feature(&mut self) {
        self.features.push(LocalizedText::default());
    }

    pub fn set_feature(&mut self, index: usize, text: LocalizedText) -> DomainResult<()> {
        let slot = self
            .features
            .get_mut(index)
            .ok_or_else(|| out_of_range("feature", index))?;
        *slot = text;
        Ok(())
    }

    pub fn remove_feature(&mut self, index: usize) -> DomainResult<LocalizedText> {
        remove_at(&mut self.features, index, "feature")
    }

    pub fn push_benefit(&mut self) {
        self.benefits.push(LocalizedText::default());
    }

    pub fn set_benefit(&mut self, index: usize, text: LocalizedText) -> DomainResult<()> {
        let slot = self
            .benefits
            .get_mut(index)
            .ok_or_else(|| out_of_range("benefit", index))?;
        *slot = text;
        Ok(())
    }

    pub fn remove_benefit(&mut self, index: usize) -> DomainResult<LocalizedText> {
        remove_at(&mut self.benefits, index, "benefit")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Submit
    // ─────────────────────────────────────────────────────────────────────

    /// Required-field checks, first failure wins.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.name.is_complete() {
            return Err(DomainError::validation(
                "Please fill in both English and Arabic product names",
            ));
        }
        if !self.description.is_complete() {
            return Err(DomainError::validation(
                "Please fill in both English and Arabic descriptions",
            ));
        }
        if !(self.price > 0.0) {
            return Err(DomainError::validation("Price must be greater than 0"));
        }
        Ok(())
    }

    /// Validate, drop blank list entries, and build the outgoing payload.
    pub fn into_payload(self) -> DomainResult<ProductPayload> {
        self.validate()?;
        Ok(ProductPayload {
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            original_price: self.original_price,
            stock: self.stock,
            images: self
                .images
                .into_iter()
                .filter(|img| !img.trim().is_empty())
                .collect(),
            features: self.features.into_iter().filter(|f| !f.is_blank()).collect(),
            benefits: self.benefits.into_iter().filter(|b| !b.is_blank()).collect(),
            is_new: self.is_new,
            is_featured: self.is_featured,
            is_popular: self.is_popular,
            discount: self.discount,
        })
    }
}

fn out_of_range(list: &str, index: usize) -> DomainError {
    DomainError::validation(format!("no {list} at position {index}"))
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, list: &str) -> DomainResult<T> {
    if index >= items.len() {
        return Err(out_of_range(list, index));
    }
    Ok(items.remove(index))
}
