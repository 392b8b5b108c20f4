//! Discord interaction handlers
//!
//! Autocomplete providers, the component interaction dispatcher and the handlers
//! it routes to, plus the guards and reply helpers commands share.

/// Autocomplete handlers for tools, clans and clock choices
pub mod autocomplete;
/// Component interaction dispatch
pub mod components;
/// Connect Four buttons
pub mod connect4;
/// Guild-only and economy channel checks
pub mod guards;
/// Inventory dispose menu and confirmation buttons
pub mod inventory;
/// Leaderboard paging buttons
pub mod leaderboard;
/// Reply helpers and user-facing error messages
pub mod respond;
