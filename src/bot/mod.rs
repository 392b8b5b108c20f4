//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `EconBuddy` application:
//! slash commands, component handlers, autocomplete, and the shared bot context.

/// Discord command implementations (economy, shop, clan, connect4, config, general)
pub mod commands;
/// Framework setup and the run loop
pub mod framework;
/// Discord interaction handlers (autocomplete, components, guards)
pub mod handlers;
/// Embed and component builders shared by commands and handlers
pub mod views;

use crate::{config::settings::Settings, errors::Error};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared data available to all bot commands and component handlers.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Tunables loaded from `config.toml`
    pub settings: Arc<Settings>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: Arc<Settings>) -> Self {
        Self { database, settings }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

pub use commands::*;
pub use framework::run_bot;
