use axum::{
    body::Bytes,
    extract::{Multipart, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_product::{Product, ProductPage, UploadResult};
use serde::{Deserialize, Deserializer};

use crate::domain::a001_product::{
    filter::ProductCriteria, repository, service, store::CatalogStore,
};

const DEFAULT_PAGE_LIMIT: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub brand: Option<String>,
    pub color: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<f64>,
}

impl From<SearchParams> for ProductCriteria {
    fn from(params: SearchParams) -> Self {
        ProductCriteria {
            brand: params.brand,
            color: params.color,
            min_price: params.min_price,
            max_price: params.max_price,
        }
    }
}

/// `minPrice=` means the same as leaving the parameter out
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// POST /upload
pub async fn upload(mut multipart: Multipart) -> Result<Json<UploadResult>, StatusCode> {
    let file_bytes = read_file_field(&mut multipart).await?;
    upload_into(&repository::store(), file_bytes).await
}

/// Содержимое поля `file`, если оно есть в форме
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Bytes>, StatusCode> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!("Malformed multipart upload: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        };
        if field.name() == Some("file") {
            return match field.bytes().await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) => {
                    tracing::warn!("Failed to read uploaded file: {}", e);
                    Err(StatusCode::BAD_REQUEST)
                }
            };
        }
    }
}

/// 400 for a missing or zero-byte file, 500 for anything the import rejects
async fn upload_into(
    store: &dyn CatalogStore,
    file_bytes: Option<Bytes>,
) -> Result<Json<UploadResult>, StatusCode> {
    let Some(file_bytes) = file_bytes.filter(|bytes| !bytes.is_empty()) else {
        tracing::warn!("Upload rejected: no file or empty file");
        return Err(StatusCode::BAD_REQUEST);
    };

    match service::upload_csv(store, &file_bytes).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!("CSV upload failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /products
pub async fn list(Query(params): Query<ListParams>) -> Result<Json<ProductPage>, StatusCode> {
    if params.limit == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    match service::list_page(&repository::store(), params.page, params.limit).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            tracing::error!("Failed to list products: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /products/search
pub async fn search(
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    let criteria = ProductCriteria::from(params);
    match service::search(&repository::store(), &criteria).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            tracing::error!("Failed to search products: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
