use serde::{Deserialize, Serialize};

/// Товар каталога. `sku` is the primary key and never changes once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Maximum retail price
    pub mrp: f64,
    /// Selling price, never above `mrp`
    pub price: f64,
    pub quantity: i32,
}

/// One page of the catalog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: u64,
    /// 0-based page index
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl ProductPage {
    pub fn new(items: Vec<Product>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(ProductPage::new(vec![], 0, 0, 10).total_pages, 0);
        assert_eq!(ProductPage::new(vec![], 10, 0, 10).total_pages, 1);
        assert_eq!(ProductPage::new(vec![], 11, 0, 10).total_pages, 2);
    }

    #[test]
    fn test_product_serializes_optional_fields_as_null() {
        let product = Product {
            sku: "A1".into(),
            name: "Shirt".into(),
            brand: "Acme".into(),
            color: None,
            size: Some("M".into()),
            mrp: 500.0,
            price: 450.0,
            quantity: 10,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["color"], serde_json::Value::Null);
        assert_eq!(json["size"], "M");
        assert_eq!(json["mrp"], 500.0);
    }
}
