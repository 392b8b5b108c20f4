//! Work entity - One row per use of a work command such as `/mine`.
//!
//! Cooldowns are computed by counting the rows inside the cooldown window.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Work database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "works")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID who worked
    pub user_discord_id: String,
    /// Discord guild ID where the work happened
    pub guild_discord_id: String,
    /// Kind of work, e.g. `"MINE"`
    pub work_type: String,
    /// When the command was used
    pub created_at: DateTimeUtc,
}

/// `Work` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
