//! Business logic, independent of Discord.
//!
//! Every operation takes a database connection and plain ids so it can be
//! exercised from tests without a gateway.

pub mod clan;
pub mod connect4;
pub mod format;
pub mod guild_config;
pub mod interaction;
pub mod mine;
pub mod odds;
pub mod router;
pub mod shop;
pub mod wallet;
pub mod work;
