//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod clan;
pub mod clan_member;
pub mod connect4_game;
pub mod guild_config;
pub mod interaction;
pub mod shop_item;
pub mod wallet;
pub mod work;

// Re-export specific types to avoid conflicts
pub use clan::{Column as ClanColumn, Entity as Clan, Model as ClanModel};
pub use clan_member::{
    Column as ClanMemberColumn, Entity as ClanMember, Model as ClanMemberModel,
};
pub use connect4_game::{
    Column as Connect4GameColumn, Entity as Connect4Game, Model as Connect4GameModel,
};
pub use guild_config::{
    Column as GuildConfigColumn, Entity as GuildConfig, Model as GuildConfigModel,
};
pub use interaction::{
    Column as InteractionColumn, Entity as Interaction, Model as InteractionModel,
};
pub use shop_item::{Column as ShopItemColumn, Entity as ShopItem, Model as ShopItemModel};
pub use wallet::{Column as WalletColumn, Entity as Wallet, Model as WalletModel};
pub use work::{Column as WorkColumn, Entity as Work, Model as WorkModel};
