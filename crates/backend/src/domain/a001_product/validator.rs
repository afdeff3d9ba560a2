use contracts::domain::a001_product::Product;

use super::error::RowError;
use super::row_parser::ProductCandidate;

/// Проверяет бизнес-правила и превращает кандидата в `Product`.
///
/// Rules run in a fixed order and the first failure is reported:
/// sku, name, brand, mrp, price, price <= mrp, quantity.
/// Non-negativity of mrp/price is a column constraint of the store, not
/// checked here.
pub fn validate(candidate: ProductCandidate) -> Result<Product, RowError> {
    if candidate.sku.is_empty() {
        return Err(invalid("SKU is missing."));
    }
    if candidate.name.is_empty() {
        return Err(invalid("Name is missing."));
    }
    if candidate.brand.is_empty() {
        return Err(invalid("Brand is missing."));
    }
    let mrp = candidate.mrp.ok_or_else(|| invalid("MRP is missing."))?;
    let price = candidate.price.ok_or_else(|| invalid("Price is missing."))?;

    if price > mrp {
        return Err(RowError::Validation(format!(
            "Price ({}) cannot be greater than MRP ({}).",
            format_decimal(price),
            format_decimal(mrp)
        )));
    }

    let quantity = match candidate.quantity {
        Some(q) if q >= 0 => q,
        _ => return Err(invalid("Quantity must be non-negative.")),
    };

    Ok(Product {
        sku: candidate.sku,
        name: candidate.name,
        brand: candidate.brand,
        color: candidate.color,
        size: candidate.size,
        mrp,
        price,
        quantity,
    })
}

fn invalid(message: &str) -> RowError {
    RowError::Validation(message.to_string())
}

/// 600 -> "600.0", 450.5 -> "450.5"
fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> ProductCandidate {
        ProductCandidate {
            sku: "A1".into(),
            name: "Shirt".into(),
            brand: "Acme".into(),
            color: Some("Red".into()),
            size: Some("M".into()),
            mrp: Some(500.0),
            price: Some(450.0),
            quantity: Some(10),
        }
    }

    fn message(c: ProductCandidate) -> String {
        validate(c).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_candidate_is_accepted() {
        let product = validate(candidate()).unwrap();
        assert_eq!(product.sku, "A1");
        assert_eq!(product.price, 450.0);
        assert_eq!(product.quantity, 10);
    }

    #[test]
    fn test_price_equal_to_mrp_is_accepted() {
        let c = ProductCandidate {
            price: Some(500.0),
            ..candidate()
        };
        assert!(validate(c).is_ok());
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let c = ProductCandidate {
            color: None,
            size: None,
            ..candidate()
        };
        let product = validate(c).unwrap();
        assert_eq!(product.color, None);
        assert_eq!(product.size, None);
    }

    #[test]
    fn test_required_field_messages() {
        assert_eq!(
            message(ProductCandidate {
                sku: String::new(),
                ..candidate()
            }),
            "SKU is missing."
        );
        assert_eq!(
            message(ProductCandidate {
                name: String::new(),
                ..candidate()
            }),
            "Name is missing."
        );
        assert_eq!(
            message(ProductCandidate {
                brand: String::new(),
                ..candidate()
            }),
            "Brand is missing."
        );
        assert_eq!(
            message(ProductCandidate {
                mrp: None,
                ..candidate()
            }),
            "MRP is missing."
        );
        assert_eq!(
            message(ProductCandidate {
                price: None,
                ..candidate()
            }),
            "Price is missing."
        );
    }

    #[test]
    fn test_price_above_mrp() {
        let c = ProductCandidate {
            price: Some(600.0),
            ..candidate()
        };
        assert_eq!(
            message(c),
            "Price (600.0) cannot be greater than MRP (500.0)."
        );

        let c = ProductCandidate {
            mrp: Some(99.99),
            price: Some(100.5),
            ..candidate()
        };
        assert_eq!(
            message(c),
            "Price (100.5) cannot be greater than MRP (99.99)."
        );
    }

    #[test]
    fn test_quantity_missing_or_negative() {
        let expected = "Quantity must be non-negative.";
        assert_eq!(
            message(ProductCandidate {
                quantity: Some(-1),
                ..candidate()
            }),
            expected
        );
        assert_eq!(
            message(ProductCandidate {
                quantity: None,
                ..candidate()
            }),
            expected
        );
        assert!(validate(ProductCandidate {
            quantity: Some(0),
            ..candidate()
        })
        .is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let c = ProductCandidate {
            sku: String::new(),
            price: Some(900.0),
            quantity: Some(-5),
            ..candidate()
        };
        assert_eq!(message(c), "SKU is missing.");

        let c = ProductCandidate {
            price: None,
            quantity: Some(-5),
            ..candidate()
        };
        assert_eq!(message(c), "Price is missing.");
    }
}
