//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Clan commands
pub mod clan;

/// Connect Four challenge command
pub mod connect4;

/// Mining, balance and leaderboard commands
pub mod economy;

/// General utility commands
pub mod general;

/// Server configuration commands
pub mod guild;

/// Shop and inventory commands
pub mod shop;

// Export commands
pub use clan::*;
pub use connect4::*;
pub use economy::*;
pub use general::*;
pub use guild::*;
pub use shop::*;
