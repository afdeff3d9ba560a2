use contracts::domain::a001_product::Product;

/// Критерии поиска товаров, все необязательные
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCriteria {
    pub brand: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Одно условие фильтра. Text values are stored lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    BrandEq(String),
    ColorEq(String),
    MinPrice(f64),
    MaxPrice(f64),
}

impl FilterClause {
    fn matches(&self, product: &Product) -> bool {
        match self {
            FilterClause::BrandEq(brand) => product.brand.to_lowercase() == *brand,
            FilterClause::ColorEq(color) => product
                .color
                .as_ref()
                .is_some_and(|c| c.to_lowercase() == *color),
            FilterClause::MinPrice(min) => product.price >= *min,
            FilterClause::MaxPrice(max) => product.price <= *max,
        }
    }
}

/// Conjunction of clauses. An empty filter matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    clauses: Vec<FilterClause>,
}

impl ProductFilter {
    /// Собирает фильтр: каждое заданное условие добавляет одно AND-условие.
    /// Blank brand/color strings count as not given. No range check is made,
    /// so `min_price > max_price` simply matches nothing.
    pub fn build(criteria: &ProductCriteria) -> Self {
        let mut clauses = Vec::new();

        if let Some(brand) = non_blank(&criteria.brand) {
            clauses.push(FilterClause::BrandEq(brand.to_lowercase()));
        }
        if let Some(color) = non_blank(&criteria.color) {
            clauses.push(FilterClause::ColorEq(color.to_lowercase()));
        }
        if let Some(min) = criteria.min_price {
            clauses.push(FilterClause::MinPrice(min));
        }
        if let Some(max) = criteria.max_price {
            clauses.push(FilterClause::MaxPrice(max));
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.clauses.iter().all(|clause| clause.matches(product))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
