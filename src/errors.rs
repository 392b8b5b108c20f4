//! Unified error types for `EconBuddy`.
//!
//! Domain failures carry the values a handler needs to explain the problem to the
//! user; infrastructure failures wrap the underlying library error.

use thiserror::Error;

/// Every error the bot can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or invalid user input that is not tied to an entity
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable explanation
        message: String,
    },

    /// Database error reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Failed to (de)serialize a JSON payload
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse `config.toml`
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Integer conversion overflowed
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// Amount is zero, negative where not allowed, or otherwise unusable
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Wallet does not exist
    #[error("Wallet not found: {id}")]
    WalletNotFound {
        /// Wallet id
        id: i64,
    },

    /// Wallet balance is too low for the operation
    #[error("Insufficient funds: have {current}, need {required}")]
    InsufficientFunds {
        /// Current balance
        current: i64,
        /// Amount the operation needs
        required: i64,
    },

    /// Shop item (owned tool) does not exist
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Shop item id or item id
        id: String,
    },

    /// Wallet already owns one of this tool
    #[error("Item already owned: {name}")]
    ItemAlreadyOwned {
        /// Display name of the tool
        name: String,
    },

    /// Clan does not exist
    #[error("Clan not found: {name}")]
    ClanNotFound {
        /// Clan name or id
        name: String,
    },

    /// Another clan in the guild already uses this name
    #[error("Clan name already taken: {name}")]
    ClanNameTaken {
        /// Requested clan name
        name: String,
    },

    /// User is already a member of a clan in this guild
    #[error("User is already in a clan: {clan}")]
    AlreadyInClan {
        /// Name of the clan the user belongs to
        clan: String,
    },

    /// User is not a member of any clan in this guild
    #[error("User is not in a clan")]
    NotInClan,

    /// Only the clan owner may perform this action
    #[error("Only the clan owner can do that")]
    NotClanOwner,

    /// The owner tried to leave their own clan
    #[error("The clan owner cannot leave the clan")]
    OwnerCannotLeave,

    /// Clan cannot be upgraded further
    #[error("Clan is already at the maximum level {level}")]
    ClanMaxLevel {
        /// Current (maximum) level
        level: i32,
    },

    /// Interaction context record does not exist
    #[error("Interaction not found: {id}")]
    InteractionNotFound {
        /// Interaction id (component custom id)
        id: String,
    },

    /// Connect Four game does not exist
    #[error("Game not found: {id}")]
    GameNotFound {
        /// Game id
        id: String,
    },

    /// Connect Four rule violation
    #[error("Invalid move: {message}")]
    InvalidMove {
        /// Message shown to the player
        message: String,
    },
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
