//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs
//! without hand-written SQL. Creation is `IF NOT EXISTS` and safe on every startup.

use crate::entities::{CatalogRecord, DataHistory, NewsletterSubscriber, SiteSettings};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default database location; the file and its directory are created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/dryfruto.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url` and makes sure
/// all tables exist.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(&dir)?;
    }
    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    info!("Database connection established and tables ensured");
    Ok(db)
}

/// Directory holding the database file of a file-backed `sqlite://` URL.
fn sqlite_parent_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Creates all tables from the entity definitions if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    for mut table in [
        schema.create_table_from_entity(CatalogRecord),
        schema.create_table_from_entity(SiteSettings),
        schema.create_table_from_entity(NewsletterSubscriber),
        schema.create_table_from_entity(DataHistory),
    ] {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    Ok(())
}
