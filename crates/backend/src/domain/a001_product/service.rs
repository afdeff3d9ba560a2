use contracts::domain::a001_product::{Product, ProductPage, UploadResult};

use super::csv_import;
use super::error::UploadError;
use super::filter::{ProductCriteria, ProductFilter};
use super::store::CatalogStore;

pub async fn upload_csv<S: CatalogStore + ?Sized>(
    store: &S,
    file_bytes: &[u8],
) -> Result<UploadResult, UploadError> {
    tracing::info!("Received CSV upload of {} bytes", file_bytes.len());
    csv_import::import_products(store, file_bytes).await
}

pub async fn list_page<S: CatalogStore + ?Sized>(
    store: &S,
    page: u64,
    limit: u64,
) -> anyhow::Result<ProductPage> {
    store.page(page, limit).await
}

pub async fn search<S: CatalogStore + ?Sized>(
    store: &S,
    criteria: &ProductCriteria,
) -> anyhow::Result<Vec<Product>> {
    let filter = ProductFilter::build(criteria);
    tracing::debug!("Product search with {} condition(s)", filter.clauses().len());
    store.filtered_scan(&filter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::repository::SqliteCatalogStore;
    use crate::shared::data::db::connect_in_memory;

    const CATALOG: &str = "sku,name,brand,color,size,mrp,price,quantity
A1,Shirt,Acme,Red,M,500,450,10
A2,Jacket,ACME,Black,L,5000,4200,2
B1,Shirt,Bolt,Red,S,300,250,7
C1,Socks,Cozy,,,50,40,100
";

    async fn catalog() -> SqliteCatalogStore {
        let store = SqliteCatalogStore::new(connect_in_memory().await.unwrap());
        let result = upload_csv(&store, CATALOG.as_bytes()).await.unwrap();
        assert_eq!(result.stored, 4);
        store
    }

    #[tokio::test]
    async fn test_search_by_brand_ignores_color_and_price() {
        let store = catalog().await;
        let found = search(
            &store,
            &ProductCriteria {
                brand: Some("acme".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let skus: Vec<_> = found.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, ["A1", "A2"]);
    }

    #[tokio::test]
    async fn test_search_without_criteria_equals_listing() {
        let store = catalog().await;
        let found = search(&store, &ProductCriteria::default()).await.unwrap();
        let listed = list_page(&store, 0, 100).await.unwrap();
        assert_eq!(found, listed.items);
        assert_eq!(listed.total, 4);
    }

    #[tokio::test]
    async fn test_search_price_window() {
        let store = catalog().await;
        let found = search(
            &store,
            &ProductCriteria {
                min_price: Some(40.0),
                max_price: Some(450.0),
                color: Some("RED".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let skus: Vec<_> = found.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, ["A1", "B1"]);
    }

    #[tokio::test]
    async fn test_list_page_defaults() {
        let store = catalog().await;
        let page = list_page(&store, 0, 10).await.unwrap();
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.page, 0);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total_pages, 1);
    }
}
