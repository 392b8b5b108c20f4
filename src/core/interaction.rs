//! Interaction context records.
//!
//! Buttons and select menus carry the id of an `interactions` row as their custom
//! id. The row remembers who may use the component, in which guild, which handler
//! runs it and a JSON payload for that handler.

use crate::{
    entities::{Interaction, interaction},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use tracing::debug;

/// Handler selector stored with each interaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionType {
    /// Select menu listing tools to dispose
    InventoryDisposeMenu,
    /// Confirm disposing a tool
    InventoryDisposeToolAccept,
    /// Cancel disposing a tool
    InventoryDisposeToolDecline,
    /// Opponent accepts a Connect Four challenge
    Connect4Accept,
    /// Opponent declines a Connect Four challenge
    Connect4Decline,
    /// Column buttons of a running Connect Four game
    Connect4Move,
    /// Waiting player claims the win once the opponent's clock has run out
    Connect4ClaimWin,
}

impl InteractionType {
    const ALL: [Self; 7] = [
        Self::InventoryDisposeMenu,
        Self::InventoryDisposeToolAccept,
        Self::InventoryDisposeToolDecline,
        Self::Connect4Accept,
        Self::Connect4Decline,
        Self::Connect4Move,
        Self::Connect4ClaimWin,
    ];

    /// Value stored in the `interaction_type` column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InventoryDisposeMenu => "INVENTORY_DISPOSE_MENU",
            Self::InventoryDisposeToolAccept => "INVENTORY_DISPOSE_TOOL_ACCEPT",
            Self::InventoryDisposeToolDecline => "INVENTORY_DISPOSE_TOOL_DECLINE",
            Self::Connect4Accept => "CONNECT4_ACCEPT",
            Self::Connect4Decline => "CONNECT4_DECLINE",
            Self::Connect4Move => "CONNECT4_MOVE",
            Self::Connect4ClaimWin => "CONNECT4_CLAIM_WIN",
        }
    }

    /// Parses a stored value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a new interaction record.
#[derive(Debug, Clone)]
pub struct NewInteraction<'a> {
    /// Handler that will run when the component is used
    pub interaction_type: InteractionType,
    /// User allowed to use the component
    pub user_id: &'a str,
    /// Guild the component belongs to
    pub guild_id: &'a str,
    /// Serialized payload
    pub payload: Option<String>,
}

impl<'a> NewInteraction<'a> {
    /// Builds a record with a JSON-serialized payload.
    ///
    /// # Errors
    /// Returns an error if the payload cannot be serialized.
    pub fn with_payload<T: Serialize>(
        interaction_type: InteractionType,
        user_id: &'a str,
        guild_id: &'a str,
        payload: &T,
    ) -> Result<Self> {
        Ok(Self {
            interaction_type,
            user_id,
            guild_id,
            payload: Some(serde_json::to_string(payload)?),
        })
    }
}

/// Why a user may not use a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// Someone else created the component
    NotYours {
        /// Owner of the record
        owner_id: String,
    },
    /// Used outside of a guild
    NotInGuild,
    /// Used in a different guild than the record
    WrongGuild,
}

impl AccessDenied {
    /// Ephemeral message explaining the refusal
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotYours { owner_id } => {
                format!("This interaction belongs to <@{owner_id}>. Run the command yourself to get your own.")
            }
            Self::NotInGuild => "This command is only available in servers.".to_string(),
            Self::WrongGuild => "This interaction was created in a different server.".to_string(),
        }
    }
}

async fn insert_record<C>(db: &C, new: NewInteraction<'_>) -> Result<interaction::Model>
where
    C: ConnectionTrait,
{
    let record = interaction::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        interaction_type: Set(new.interaction_type.as_str().to_string()),
        user_discord_id: Set(new.user_id.to_string()),
        guild_id: Set(new.guild_id.to_string()),
        payload: Set(new.payload),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await?;
    debug!("Created interaction {} ({})", record.id, record.interaction_type);
    Ok(record)
}

/// Creates one interaction record.
pub async fn create_interaction(
    db: &DatabaseConnection,
    new: NewInteraction<'_>,
) -> Result<interaction::Model> {
    insert_record(db, new).await
}

/// Creates two companion records (e.g. Accept and Decline) in one transaction.
pub async fn create_interaction_pair(
    db: &DatabaseConnection,
    first: NewInteraction<'_>,
    second: NewInteraction<'_>,
) -> Result<(interaction::Model, interaction::Model)> {
    let txn = db.begin().await?;
    let first = insert_record(&txn, first).await?;
    let second = insert_record(&txn, second).await?;
    txn.commit().await?;
    Ok((first, second))
}

/// Creates any number of records in one transaction, keeping input order.
pub async fn create_interactions(
    db: &DatabaseConnection,
    records: Vec<NewInteraction<'_>>,
) -> Result<Vec<interaction::Model>> {
    let txn = db.begin().await?;
    let mut created = Vec::with_capacity(records.len());
    for record in records {
        created.push(insert_record(&txn, record).await?);
    }
    txn.commit().await?;
    Ok(created)
}

/// Loads an interaction record by id.
pub async fn get_interaction(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<interaction::Model>> {
    Interaction::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes interaction records once their component is gone.
pub async fn delete_interactions(db: &DatabaseConnection, ids: &[String]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Interaction::delete_many()
        .filter(interaction::Column::Id.is_in(ids.iter().cloned()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

fn type_names(types: &[InteractionType]) -> Vec<&'static str> {
    types.iter().map(|t| t.as_str()).collect()
}

/// Deletes the records of the given types whose payload equals `payload`.
///
/// Companion records (Accept and Decline of one confirmation) share a payload,
/// so this removes the whole set once one of them is used.
pub async fn delete_with_payload(
    db: &DatabaseConnection,
    types: &[InteractionType],
    payload: &str,
) -> Result<u64> {
    let result = Interaction::delete_many()
        .filter(interaction::Column::InteractionType.is_in(type_names(types)))
        .filter(interaction::Column::Payload.eq(payload))
        .exec(db)
        .await?;
    debug!("Deleted {} interaction(s) with payload {}", result.rows_affected, payload);
    Ok(result.rows_affected)
}

/// Deletes the records of the given types whose payload contains `fragment`,
/// e.g. every button of one game.
pub async fn delete_containing_payload(
    db: &DatabaseConnection,
    types: &[InteractionType],
    fragment: &str,
) -> Result<u64> {
    let result = Interaction::delete_many()
        .filter(interaction::Column::InteractionType.is_in(type_names(types)))
        .filter(interaction::Column::Payload.contains(fragment))
        .exec(db)
        .await?;
    debug!("Deleted {} interaction(s) matching {}", result.rows_affected, fragment);
    Ok(result.rows_affected)
}

/// Parses the JSON payload of a record; a missing payload is treated as `{}`.
///
/// # Errors
/// Returns `Error::Json` when the payload does not match `T`.
pub fn parse_payload<T: DeserializeOwned>(record: &interaction::Model) -> Result<T> {
    let raw = record.payload.as_deref().unwrap_or("{}");
    serde_json::from_str(raw).map_err(Error::from)
}

/// Checks that `user_id`, invoking from `guild_id`, may use the record's component.
///
/// # Errors
/// Returns the reason the component may not be used.
pub fn check_access(
    record: &interaction::Model,
    user_id: &str,
    guild_id: Option<&str>,
) -> std::result::Result<(), AccessDenied> {
    if record.user_discord_id != user_id {
        return Err(AccessDenied::NotYours {
            owner_id: record.user_discord_id.clone(),
        });
    }
    let Some(guild_id) = guild_id else {
        return Err(AccessDenied::NotInGuild);
    };
    if guild_id != record.guild_id {
        return Err(AccessDenied::WrongGuild);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        wallet_id: i64,
    }

    fn record(user: &str, guild: &str, payload: Option<&str>) -> interaction::Model {
        interaction::Model {
            id: "id".to_string(),
            interaction_type: InteractionType::InventoryDisposeMenu.as_str().to_string(),
            user_discord_id: user.to_string(),
            guild_id: guild.to_string(),
            payload: payload.map(str::to_string),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_interaction_type_round_trip_names() {
        for t in InteractionType::ALL {
            assert_eq!(InteractionType::parse(t.as_str()), Some(t));
        }
        assert_eq!(InteractionType::parse("SUBSCRIBE"), None);
    }

    #[test]
    fn test_parse_payload() {
        let ok = record("u", "g", Some(r#"{"walletId":7}"#));
        assert_eq!(parse_payload::<Payload>(&ok).unwrap(), Payload { wallet_id: 7 });

        let missing = record("u", "g", None);
        assert!(matches!(parse_payload::<Payload>(&missing), Err(Error::Json(_))));

        let wrong = record("u", "g", Some(r#"{"walletId":"seven"}"#));
        assert!(parse_payload::<Payload>(&wrong).is_err());
    }

    #[test]
    fn test_check_access() {
        let rec = record("owner", "guild", None);
        assert_eq!(check_access(&rec, "owner", Some("guild")), Ok(()));
        assert_eq!(
            check_access(&rec, "intruder", Some("guild")),
            Err(AccessDenied::NotYours {
                owner_id: "owner".to_string()
            })
        );
        assert_eq!(check_access(&rec, "owner", None), Err(AccessDenied::NotInGuild));
        assert_eq!(
            check_access(&rec, "owner", Some("elsewhere")),
            Err(AccessDenied::WrongGuild)
        );
        assert!(AccessDenied::NotYours { owner_id: "1".to_string() }.message().contains("<@1>"));
    }

    #[tokio::test]
    async fn test_create_pair_and_fetch() -> Result<()> {
        let db = setup_test_db().await?;
        let payload = Payload { wallet_id: 3 };

        let (accept, decline) = create_interaction_pair(
            &db,
            NewInteraction::with_payload(
                InteractionType::InventoryDisposeToolAccept,
                "user",
                TEST_GUILD,
                &payload,
            )?,
            NewInteraction::with_payload(
                InteractionType::InventoryDisposeToolDecline,
                "user",
                TEST_GUILD,
                &payload,
            )?,
        )
        .await?;
        assert_ne!(accept.id, decline.id);

        let fetched = get_interaction(&db, &accept.id).await?.unwrap();
        assert_eq!(
            InteractionType::parse(&fetched.interaction_type),
            Some(InteractionType::InventoryDisposeToolAccept)
        );
        assert_eq!(parse_payload::<Payload>(&fetched)?, payload);

        let deleted = delete_interactions(&db, &[accept.id.clone(), decline.id.clone()]).await?;
        assert_eq!(deleted, 2);
        assert!(get_interaction(&db, &accept.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_by_payload_only_touches_matching_records() -> Result<()> {
        let db = setup_test_db().await?;
        let mine = Payload { wallet_id: 1 };
        let theirs = Payload { wallet_id: 12 };
        for payload in [&mine, &theirs] {
            create_interaction_pair(
                &db,
                NewInteraction::with_payload(
                    InteractionType::InventoryDisposeToolAccept,
                    "user",
                    TEST_GUILD,
                    payload,
                )?,
                NewInteraction::with_payload(
                    InteractionType::InventoryDisposeToolDecline,
                    "user",
                    TEST_GUILD,
                    payload,
                )?,
            )
            .await?;
        }
        let menu = create_interaction(
            &db,
            NewInteraction::with_payload(InteractionType::InventoryDisposeMenu, "user", TEST_GUILD, &mine)?,
        )
        .await?;

        let raw = serde_json::to_string(&mine)?;
        let types = [
            InteractionType::InventoryDisposeToolAccept,
            InteractionType::InventoryDisposeToolDecline,
        ];
        assert_eq!(delete_with_payload(&db, &types, &raw).await?, 2);
        assert!(get_interaction(&db, &menu.id).await?.is_some());
        assert_eq!(Interaction::find().count(&db).await?, 3);

        // "walletId":1 is a prefix of "walletId":12
        assert_eq!(
            delete_containing_payload(&db, &types, r#""walletId":1"#).await?,
            2
        );
        assert_eq!(Interaction::find().count(&db).await?, 1);
        Ok(())
    }
}
