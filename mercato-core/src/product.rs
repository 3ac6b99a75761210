//! Products and catalogue filtering

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fields::{non_blank, MAX_NAME_LEN, MAX_TEXT_LEN};
use crate::{Money, Review, ReviewId, ValidationError};

pub type ProductId = i64;

/// Stored product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub about: String,
    pub price: Money,
    /// Reviews appended by the review workflow, in submission order
    pub review_ids: Vec<ReviewId>,
    /// Mean review score rounded to two decimals, 0 without reviews
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub about: String,
    pub price: Money,
}

impl NewProduct {
    pub fn new(
        name: Option<String>,
        about: Option<String>,
        price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(name, "name", MAX_NAME_LEN)?;
        let about = non_blank(about, "about", MAX_TEXT_LEN)?;
        let price = price.ok_or(ValidationError::Missing { field: "price" })?;
        let price = Money::price(price, "price")?;
        Ok(Self { name, about, price })
    }
}

/// Catalogue search: case-insensitive substrings plus an inclusive price cap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub about: Option<String>,
    pub max_price: Option<Money>,
}

impl ProductFilter {
    /// Build a filter from raw query values.
    ///
    /// Blank substrings are ignored, as is a price that does not parse as a
    /// number.
    pub fn from_query(name: Option<String>, about: Option<String>, price: Option<String>) -> Self {
        let name = name.filter(|s| !s.trim().is_empty());
        let about = about.filter(|s| !s.trim().is_empty());
        let max_price = price
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite())
            .map(|p| Money::from_cents((p * 100.0).round() as i64));
        Self {
            name,
            about,
            max_price,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        fn contains(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        self.name.as_deref().map_or(true, |n| contains(&product.name, n))
            && self.about.as_deref().map_or(true, |a| contains(&product.about, a))
            && self.max_price.map_or(true, |max| product.price <= max)
    }
}

/// Product with the reviews currently pointing at it
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub reviews: Vec<Review>,
}
