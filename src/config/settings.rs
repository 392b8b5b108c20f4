//! Bot settings loading from config.toml
//!
//! Tunables for the economy (mine cooldown, clan prices, leaderboard paging) live in
//! a TOML file. Every section has defaults, so a missing file or a missing key
//! falls back to the values the bot ships with.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// `/mine` cooldown settings
    pub mine: MineSettings,
    /// Clan pricing
    pub clan: ClanSettings,
    /// Leaderboard display
    pub leaderboard: LeaderboardSettings,
}

/// `/mine` cooldown settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MineSettings {
    /// Length of the cooldown window in seconds
    pub cooldown_secs: u64,
    /// Number of uses allowed inside one window
    pub uses: u64,
}

impl Default for MineSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: 60 * 60,
            uses: 3,
        }
    }
}

impl MineSettings {
    /// Cooldown window as a [`Duration`]
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Clan pricing
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClanSettings {
    /// Price of founding a clan
    pub creation_cost: i64,
    /// Upgrading to level N costs `N * upgrade_cost_per_level`
    pub upgrade_cost_per_level: i64,
    /// Highest reachable level
    pub max_level: i32,
}

impl Default for ClanSettings {
    fn default() -> Self {
        Self {
            creation_cost: 50_000,
            upgrade_cost_per_level: 100_000,
            max_level: 20,
        }
    }
}

/// Leaderboard display
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeaderboardSettings {
    /// Wallets shown per page
    pub page_size: u64,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents)?;
    if settings.leaderboard.page_size == 0 {
        return Err(Error::Config {
            message: "leaderboard.page_size must be greater than zero".to_string(),
        });
    }
    if settings.mine.uses == 0 {
        return Err(Error::Config {
            message: "mine.uses must be greater than zero".to_string(),
        });
    }
    Ok(settings)
}

/// Loads settings from `CONFIG_PATH` (default `./config.toml`), using the defaults
/// when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        warn!("No config file at {path}, using default settings");
        return Ok(Settings::default());
    }
    debug!("Loading settings from {path}");
    load_settings(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_partial_settings() {
        let toml_str = r"
            [mine]
            uses = 5

            [clan]
            max_level = 10
        ";

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.mine.uses, 5);
        assert_eq!(settings.mine.cooldown_secs, 3600);
        assert_eq!(settings.clan.max_level, 10);
        assert_eq!(settings.clan.creation_cost, 50_000);
        assert_eq!(settings.leaderboard.page_size, 10);
    }

    #[test]
    fn test_parse_empty_settings_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = parse_settings("[leaderboard]\npage_size = 0\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = parse_settings("[mine\nuses = 3");
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
