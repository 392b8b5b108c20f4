//! Shared test utilities for `EconBuddy`.
//!
//! Helpers for setting up an in-memory database and seeding wallets and clans
//! with sensible defaults.

use crate::{
    config::settings::ClanSettings,
    core::{clan, wallet},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Guild every test helper creates its rows in.
pub const TEST_GUILD: &str = "test_guild";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a wallet for `user_id` in [`TEST_GUILD`] holding `balance`.
pub async fn create_test_wallet(
    db: &DatabaseConnection,
    user_id: &str,
    balance: i64,
) -> Result<entities::wallet::Model> {
    let created = wallet::get_or_create_wallet(db, user_id, TEST_GUILD).await?;
    if balance == 0 {
        return Ok(created);
    }
    wallet::adjust_balance_atomic(db, created.id, balance).await
}

/// Creates a clan in [`TEST_GUILD`] owned by `owner_id`.
///
/// The owner is funded with exactly the default creation cost, so their wallet
/// is empty afterwards.
pub async fn create_test_clan(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
) -> Result<entities::clan::Model> {
    let settings = ClanSettings::default();
    create_test_wallet(db, owner_id, settings.creation_cost).await?;
    clan::create_clan(db, &settings, owner_id, TEST_GUILD, name).await
}

/// Routes `tracing` output to the test harness; safe to call more than once.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("econ_buddy=debug")
        .with_test_writer()
        .try_init();
}
