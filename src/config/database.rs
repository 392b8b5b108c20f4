//! Database configuration module for `EconBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Creation is idempotent and runs on
//! every startup.

use crate::entities::{
    Clan, ClanMember, Connect4Game, GuildConfig, Interaction, ShopItem, Wallet, Work, wallet,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/econ_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// Existing tables are left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Wallet).await?;
    create_table(db, &schema, Work).await?;
    create_table(db, &schema, ShopItem).await?;
    create_table(db, &schema, Clan).await?;
    create_table(db, &schema, ClanMember).await?;
    create_table(db, &schema, Interaction).await?;
    create_table(db, &schema, GuildConfig).await?;
    create_table(db, &schema, Connect4Game).await?;

    // One wallet per user and guild
    let index = Index::create()
        .name("idx_wallets_user_guild")
        .table(Wallet)
        .col(wallet::Column::UserDiscordId)
        .col(wallet::Column::GuildDiscordId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(db.get_database_backend().build(&index)).await?;

    info!("Database tables ensured");
    Ok(())
}
