use async_trait::async_trait;
use contracts::domain::a001_product::{Product, ProductPage};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use super::filter::{FilterClause, ProductFilter};
use super::store::CatalogStore;
use crate::shared::data::db::get_connection;

/// SQLite limits bound parameters per statement; 8 columns per row.
const UPSERT_CHUNK_SIZE: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub mrp: f64,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            sku: m.sku,
            name: m.name,
            brand: m.brand,
            color: m.color,
            size: m.size,
            mrp: m.mrp,
            price: m.price,
            quantity: m.quantity,
        }
    }
}

fn to_active_model(product: &Product) -> ActiveModel {
    ActiveModel {
        sku: Set(product.sku.clone()),
        name: Set(product.name.clone()),
        brand: Set(product.brand.clone()),
        color: Set(product.color.clone()),
        size: Set(product.size.clone()),
        mrp: Set(product.mrp),
        price: Set(product.price),
        quantity: Set(product.quantity),
    }
}

fn clause_expr(clause: &FilterClause) -> SimpleExpr {
    match clause {
        FilterClause::BrandEq(brand) => {
            Expr::expr(Func::lower(Expr::col(Column::Brand))).eq(brand.clone())
        }
        FilterClause::ColorEq(color) => {
            Expr::expr(Func::lower(Expr::col(Column::Color))).eq(color.clone())
        }
        FilterClause::MinPrice(min) => Column::Price.gte(*min),
        FilterClause::MaxPrice(max) => Column::Price.lte(*max),
    }
}

/// WHERE-условие: все условия фильтра через AND
fn filter_condition(filter: &ProductFilter) -> Condition {
    filter
        .clauses()
        .iter()
        .fold(Condition::all(), |condition, clause| {
            condition.add(clause_expr(clause))
        })
}

/// Каталог поверх SQLite (sea-orm)
#[derive(Debug, Clone)]
pub struct SqliteCatalogStore {
    db: DatabaseConnection,
}

impl SqliteCatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Хранилище на глобальном соединении приложения
pub fn store() -> SqliteCatalogStore {
    SqliteCatalogStore::new(get_connection().clone())
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn upsert_batch(&self, products: &[Product]) -> anyhow::Result<()> {
        if products.is_empty() {
            return Ok(());
        }

        // Одна транзакция на весь пакет: либо все строки, либо ни одной
        let txn = self.db.begin().await?;
        for chunk in products.chunks(UPSERT_CHUNK_SIZE) {
            Entity::insert_many(chunk.iter().map(to_active_model))
                .on_conflict(
                    OnConflict::column(Column::Sku)
                        .update_columns([
                            Column::Name,
                            Column::Brand,
                            Column::Color,
                            Column::Size,
                            Column::Mrp,
                            Column::Price,
                            Column::Quantity,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn page(&self, page: u64, limit: u64) -> anyhow::Result<ProductPage> {
        anyhow::ensure!(limit > 0, "page limit must be positive");

        let paginator = Entity::find()
            .order_by_asc(Column::Sku)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(ProductPage::new(items, total, page, limit))
    }

    async fn filtered_scan(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>> {
        let items = Entity::find()
            .filter(filter_condition(filter))
            .order_by_asc(Column::Sku)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(items)
    }
}
