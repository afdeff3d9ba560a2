use super::error::RowError;

/// Порядок колонок CSV: sku, name, brand, color, size, mrp, price, quantity
pub const COLUMN_COUNT: usize = 8;

/// Строка CSV после разбора, ещё не прошедшая валидацию.
///
/// Text fields are trimmed. Numeric fields are `None` when the cell is blank;
/// whether that is acceptable is decided by the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCandidate {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub mrp: Option<f64>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

/// Разбирает одну строку данных в кандидата.
///
/// Extra trailing fields are ignored, missing ones are an error.
pub fn parse_row<S: AsRef<str>>(fields: &[S]) -> Result<ProductCandidate, RowError> {
    if fields.len() < COLUMN_COUNT {
        return Err(RowError::MalformedRow(format!(
            "Incorrect number of columns. Expected {}, found {}",
            COLUMN_COUNT,
            fields.len()
        )));
    }

    let field = |idx: usize| fields[idx].as_ref().trim();

    Ok(ProductCandidate {
        sku: field(0).to_string(),
        name: field(1).to_string(),
        brand: field(2).to_string(),
        color: optional_text(field(3)),
        size: optional_text(field(4)),
        mrp: parse_decimal(field(5), "mrp")?,
        price: parse_decimal(field(6), "price")?,
        quantity: parse_integer(field(7), "quantity")?,
    })
}

fn optional_text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_decimal(value: &str, field_name: &str) -> Result<Option<f64>, RowError> {
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(invalid_number(field_name, value)),
    }
}

fn parse_integer(value: &str, field_name: &str) -> Result<Option<i32>, RowError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| invalid_number(field_name, value))
}

fn invalid_number(field_name: &str, value: &str) -> RowError {
    RowError::MalformedRow(format!(
        "Invalid number format for {}: {}",
        field_name, value
    ))
}
