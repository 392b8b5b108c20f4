//! Interaction entity - Context stored for a button or select menu.
//!
//! The record id is used as the component custom id. When the component is used,
//! the router loads the record and dispatches on `interaction_type`, handing the
//! JSON `payload` to the handler.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Interaction context database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interactions")]
pub struct Model {
    /// Unique identifier (UUID v4), doubles as the component custom id
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Handler selector, e.g. `"INVENTORY_DISPOSE_MENU"`
    pub interaction_type: String,
    /// Discord user ID allowed to use the component
    pub user_discord_id: String,
    /// Discord guild ID the component was created in
    pub guild_id: String,
    /// Handler-specific JSON payload
    pub payload: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// `Interaction` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
