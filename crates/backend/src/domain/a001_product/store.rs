use async_trait::async_trait;
use contracts::domain::a001_product::{Product, ProductPage};

use super::filter::ProductFilter;

/// Хранилище каталога товаров.
///
/// The import pipeline and the search/list use cases depend only on this
/// trait, never on a concrete database.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert-or-update by `sku`. The whole batch is written or none of it.
    async fn upsert_batch(&self, products: &[Product]) -> anyhow::Result<()>;

    /// `page` is 0-based, items are ordered by `sku`.
    async fn page(&self, page: u64, limit: u64) -> anyhow::Result<ProductPage>;

    async fn filtered_scan(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>>;
}
