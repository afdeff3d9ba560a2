use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Non-negativity of mrp/price/quantity is declared on the columns.
const CREATE_PRODUCT_TABLE_SQL: &str = r#"
    CREATE TABLE a001_product (
        sku TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        brand TEXT NOT NULL,
        color TEXT,
        size TEXT,
        mrp REAL NOT NULL CHECK (mrp >= 0),
        price REAL NOT NULL CHECK (price >= 0),
        quantity INTEGER NOT NULL CHECK (quantity >= 0)
    );
"#;

pub async fn initialize_database(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };
    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", db_url);

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Normalize path separators and ensure proper URL form on Windows
fn sqlite_url(absolute_path: &Path) -> String {
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Создаёт таблицы, которых ещё нет
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_product_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a001_product';
    "#;
    let product_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_product_table.to_string(),
        ))
        .await?;

    if product_table_exists.is_empty() {
        tracing::info!("Creating a001_product table");
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            CREATE_PRODUCT_TABLE_SQL.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Private in-memory database; one pooled connection so every query sees
/// the same data.
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_unix_path() {
        assert_eq!(
            sqlite_url(Path::new("/var/lib/catalog/app.db")),
            "sqlite:///var/lib/catalog/app.db?mode=rwc"
        );
    }

    #[test]
    fn test_sqlite_url_windows_path() {
        assert_eq!(
            sqlite_url(Path::new("C:\\data\\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn test_ensure_schema_is_repeatable() {
        let conn = connect_in_memory().await.unwrap();
        ensure_schema(&conn).await.unwrap();
    }
}
