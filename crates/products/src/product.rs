use serde::{Deserialize, Serialize};

use afiya_core::{Entity, LocalizedText, ProductId};

/// Known catalog categories.
///
/// The wire value is an open string so unknown categories survive a round
/// trip; this enum only backs the form's category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Supplements,
    Cosmetics,
    Herbal,
    Medical,
    Accessories,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Supplements,
        ProductCategory::Cosmetics,
        ProductCategory::Herbal,
        ProductCategory::Medical,
        ProductCategory::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Supplements => "supplements",
            ProductCategory::Cosmetics => "cosmetics",
            ProductCategory::Herbal => "herbal",
            ProductCategory::Medical => "medical",
            ProductCategory::Accessories => "accessories",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Supplements => "Supplements",
            ProductCategory::Cosmetics => "Cosmetics",
            ProductCategory::Herbal => "Herbal Products",
            ProductCategory::Medical => "Medical Equipment",
            ProductCategory::Accessories => "Accessories",
        }
    }
}

/// Catalog product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<LocalizedText>,
    #[serde(default)]
    pub benefits: Vec<LocalizedText>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub discount: f64,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Products tab search: case-insensitive match on either language of the name.
///
/// An empty term matches every product.
pub fn matches_search(product: &Product, term: &str) -> bool {
    term.is_empty() || product.name.contains_ignore_case(term)
}
