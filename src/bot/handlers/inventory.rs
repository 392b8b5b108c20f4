//! Inventory dispose flow.
//!
//! `/inventory` shows a select menu of owned tools. Picking one swaps the menu
//! for Accept/Decline buttons; Accept deletes the tool, Decline restores the
//! inventory view. Each step is backed by interaction records so the flow
//! survives restarts.

use crate::{
    bot::{
        handlers::respond::{self, ComponentReply, ComponentUpdate},
        views,
    },
    core::{
        interaction::{self, InteractionType, NewInteraction},
        shop::{self, ToolType},
    },
    entities::interaction as interaction_entity,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Record types of the confirmation buttons.
const CONFIRM_TYPES: [InteractionType; 2] = [
    InteractionType::InventoryDisposeToolAccept,
    InteractionType::InventoryDisposeToolDecline,
];

/// Payload of the dispose select menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposeMenuPayload {
    /// Wallet whose tools the menu lists
    pub wallet_id: i64,
}

/// Payload of the Accept/Decline buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposeToolPayload {
    /// Wallet that owns the tool
    pub wallet_id: i64,
    /// Unique id of the owned tool
    pub tool_unique_id: String,
}

/// Inventory embed plus, when the wallet owns anything, the dispose menu.
///
/// Menus of earlier inventory messages for the same wallet are deleted.
pub async fn inventory_view(
    db: &DatabaseConnection,
    user_id: &str,
    guild_id: &str,
    wallet_id: i64,
) -> Result<(serenity::CreateEmbed, Vec<serenity::CreateActionRow>)> {
    let menu_payload = DisposeMenuPayload { wallet_id };
    interaction::delete_with_payload(
        db,
        &[InteractionType::InventoryDisposeMenu],
        &serde_json::to_string(&menu_payload)?,
    )
    .await?;

    let items = shop::get_inventory(db, wallet_id).await?;
    let embed = views::inventory_embed(user_id, &items)?;
    if items.is_empty() {
        return Ok((embed, Vec::new()));
    }

    let menu = interaction::create_interaction(
        db,
        NewInteraction::with_payload(
            InteractionType::InventoryDisposeMenu,
            user_id,
            guild_id,
            &menu_payload,
        )?,
    )
    .await?;
    Ok((embed, vec![views::dispose_menu(&menu.id, &items)]))
}

fn tool_label(item_id: &str) -> String {
    ToolType::from_item_id(item_id).map_or_else(|| item_id.to_string(), ToolType::label)
}

async fn delete_confirmation(db: &DatabaseConnection, record: &interaction_entity::Model) -> Result<()> {
    let raw = record.payload.as_deref().unwrap_or("{}");
    interaction::delete_with_payload(db, &CONFIRM_TYPES, raw).await?;
    Ok(())
}

async fn inventory_reply(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    wallet_id: i64,
    content: String,
) -> Result<ComponentReply> {
    let (embed, components) =
        inventory_view(db, &record.user_discord_id, &record.guild_id, wallet_id).await?;
    Ok(ComponentReply::Update(ComponentUpdate {
        content,
        embed: Some(embed),
        components,
    }))
}

/// A tool was picked from the dispose menu: ask for confirmation.
///
/// # Errors
/// `ItemNotFound` when the picked tool is gone or belongs to another wallet.
pub async fn handle_dispose_menu(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
) -> Result<ComponentReply> {
    let Some(values) = respond::selected_values(kind) else {
        return Ok(ComponentReply::ephemeral(respond::SELECT_MENU_ONLY));
    };
    let payload: DisposeMenuPayload = interaction::parse_payload(record)?;
    let Some(selected) = values.first() else {
        return Ok(ComponentReply::ephemeral("Please select a tool."));
    };

    let item = shop::get_item_by_id(db, selected)
        .await?
        .filter(|item| item.wallet_id == payload.wallet_id)
        .ok_or_else(|| Error::ItemNotFound {
            id: selected.clone(),
        })?;

    let button_payload = DisposeToolPayload {
        wallet_id: payload.wallet_id,
        tool_unique_id: item.id.clone(),
    };
    let (accept, decline) = interaction::create_interaction_pair(
        db,
        NewInteraction::with_payload(
            InteractionType::InventoryDisposeToolAccept,
            &record.user_discord_id,
            &record.guild_id,
            &button_payload,
        )?,
        NewInteraction::with_payload(
            InteractionType::InventoryDisposeToolDecline,
            &record.user_discord_id,
            &record.guild_id,
            &button_payload,
        )?,
    )
    .await?;
    interaction::delete_interactions(db, std::slice::from_ref(&record.id)).await?;

    Ok(ComponentReply::Update(ComponentUpdate {
        content: format!(
            "Are you sure, You want to dispose {}",
            tool_label(&item.item_id)
        ),
        embed: None,
        components: vec![views::confirm_buttons(&accept.id, &decline.id)],
    }))
}

/// Confirmation accepted: delete the tool and show the updated inventory.
///
/// # Errors
/// `ItemNotFound` when the tool was already disposed.
pub async fn handle_dispose_accept(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
) -> Result<ComponentReply> {
    if !respond::is_button(kind) {
        return Ok(ComponentReply::ephemeral(respond::BUTTON_ONLY));
    }
    let payload: DisposeToolPayload = interaction::parse_payload(record)?;
    delete_confirmation(db, record).await?;

    let owned = shop::get_item_by_id(db, &payload.tool_unique_id)
        .await?
        .is_some_and(|item| item.wallet_id == payload.wallet_id);
    if !owned {
        return Err(Error::ItemNotFound {
            id: payload.tool_unique_id,
        });
    }
    let item = shop::dispose_item(db, &payload.tool_unique_id).await?;
    info!(
        "User {} disposed {} from wallet {}",
        record.user_discord_id, item.item_id, payload.wallet_id
    );

    let content = format!(
        "Successfully disposed {} from your inventory.",
        tool_label(&item.item_id)
    );
    inventory_reply(db, record, payload.wallet_id, content).await
}

/// Confirmation declined: restore the inventory view.
pub async fn handle_dispose_decline(
    db: &DatabaseConnection,
    record: &interaction_entity::Model,
    kind: &serenity::ComponentInteractionDataKind,
) -> Result<ComponentReply> {
    if !respond::is_button(kind) {
        return Ok(ComponentReply::ephemeral(respond::BUTTON_ONLY));
    }
    let payload: DisposeToolPayload = interaction::parse_payload(record)?;
    delete_confirmation(db, record).await?;

    inventory_reply(db, record, payload.wallet_id, String::new()).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::interaction::get_interaction;
    use crate::entities::{Interaction, shop_item};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, PaginatorTrait};

    const BUTTON: serenity::ComponentInteractionDataKind = serenity::ComponentInteractionDataKind::Button;

    fn select(value: &str) -> serenity::ComponentInteractionDataKind {
        serenity::ComponentInteractionDataKind::StringSelect {
            values: vec![value.to_string()],
        }
    }

    fn record(kind: InteractionType, payload: &str) -> interaction_entity::Model {
        interaction_entity::Model {
            id: "record".to_string(),
            interaction_type: kind.as_str().to_string(),
            user_discord_id: "owner".to_string(),
            guild_id: TEST_GUILD.to_string(),
            payload: Some(payload.to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    async fn records_of(db: &DatabaseConnection, kind: InteractionType) -> Result<Vec<interaction_entity::Model>> {
        Ok(Interaction::find()
            .all(db)
            .await?
            .into_iter()
            .filter(|r| r.interaction_type == kind.as_str())
            .collect())
    }

    /// Wallet owning an axe, with the inventory menu shown.
    async fn inventory_with_axe(db: &DatabaseConnection) -> Result<(i64, shop_item::Model, interaction_entity::Model)> {
        let wallet = create_test_wallet(db, "owner", 100_000).await?;
        let axe = shop::buy_tool(db, wallet.id, ToolType::Axe).await?;
        let _ = inventory_view(db, "owner", TEST_GUILD, wallet.id).await?;
        let menu = records_of(db, InteractionType::InventoryDisposeMenu).await?.remove(0);
        Ok((wallet.id, axe, menu))
    }

    fn update(reply: ComponentReply) -> ComponentUpdate {
        match reply {
            ComponentReply::Update(update) => update,
            ComponentReply::Ephemeral(message) => panic!("expected an update, got {message}"),
        }
    }

    #[test]
    fn test_payload_field_names() {
        let json = serde_json::to_string(&DisposeToolPayload {
            wallet_id: 4,
            tool_unique_id: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"walletId":4,"toolUniqueId":"abc"}"#);
    }

    #[test]
    fn test_tool_label() {
        assert_eq!(tool_label("axe"), "🪓|Axe");
        assert_eq!(tool_label("mystery"), "mystery");
    }

    #[tokio::test]
    async fn test_wrong_component_kind_needs_no_database() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let menu = record(InteractionType::InventoryDisposeMenu, r#"{"walletId":1}"#);
        let reply = handle_dispose_menu(&db, &menu, &BUTTON).await?;
        assert!(matches!(reply, ComponentReply::Ephemeral(ref m) if m == respond::SELECT_MENU_ONLY));

        let accept = record(
            InteractionType::InventoryDisposeToolAccept,
            r#"{"walletId":1,"toolUniqueId":"t"}"#,
        );
        let reply = handle_dispose_accept(&db, &accept, &select("t")).await?;
        assert!(matches!(reply, ComponentReply::Ephemeral(ref m) if m == respond::BUTTON_ONLY));
        let reply = handle_dispose_decline(&db, &accept, &select("t")).await?;
        assert!(matches!(reply, ComponentReply::Ephemeral(ref m) if m == respond::BUTTON_ONLY));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_payload_is_rejected_before_querying() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let menu = record(InteractionType::InventoryDisposeMenu, r#"{"wallet":"one"}"#);
        let result = handle_dispose_menu(&db, &menu, &select("t")).await;
        assert!(matches!(result, Err(Error::Json(_))));

        let accept = record(InteractionType::InventoryDisposeToolAccept, r#"{"walletId":1}"#);
        let result = handle_dispose_accept(&db, &accept, &BUTTON).await;
        assert!(matches!(result, Err(Error::Json(_))));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_menu_rejects_tool_of_another_wallet_mocked() -> Result<()> {
        let foreign = shop_item::Model {
            id: "t".to_string(),
            wallet_id: 99,
            item_id: "axe".to_string(),
            created_at: chrono::Utc::now(),
        };
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![foreign]])
            .into_connection();

        let menu = record(InteractionType::InventoryDisposeMenu, r#"{"walletId":1}"#);
        let result = handle_dispose_menu(&db, &menu, &select("t")).await;
        assert!(matches!(result, Err(Error::ItemNotFound { ref id }) if id == "t"));
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_view_creates_menu_record_only_with_items() -> Result<()> {
        let db = setup_test_db().await?;
        let wallet = create_test_wallet(&db, "owner", 100_000).await?;

        let (_, empty) = inventory_view(&db, "owner", TEST_GUILD, wallet.id).await?;
        assert!(empty.is_empty());

        shop::buy_tool(&db, wallet.id, ToolType::Axe).await?;
        let (_, rows) = inventory_view(&db, "owner", TEST_GUILD, wallet.id).await?;
        assert_eq!(rows.len(), 1);

        let records = Interaction::find().all(&db).await?;
        assert_eq!(records.len(), 1);
        let menu = get_interaction(&db, &records[0].id).await?.unwrap();
        assert_eq!(
            interaction::parse_payload::<DisposeMenuPayload>(&menu)?,
            DisposeMenuPayload { wallet_id: wallet.id }
        );
        assert_eq!(menu.user_discord_id, "owner");
        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_inventory_keeps_one_menu() -> Result<()> {
        let db = setup_test_db().await?;
        let (wallet_id, _, first) = inventory_with_axe(&db).await?;
        let other = create_test_wallet(&db, "other", 100_000).await?;
        shop::buy_tool(&db, other.id, ToolType::Axe).await?;
        let _ = inventory_view(&db, "other", TEST_GUILD, other.id).await?;

        for _ in 0..3 {
            let _ = inventory_view(&db, "owner", TEST_GUILD, wallet_id).await?;
        }
        assert!(get_interaction(&db, &first.id).await?.is_none());
        assert_eq!(records_of(&db, InteractionType::InventoryDisposeMenu).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_menu_selection_asks_for_confirmation() -> Result<()> {
        let db = setup_test_db().await?;
        let (wallet_id, axe, menu) = inventory_with_axe(&db).await?;

        let update = update(handle_dispose_menu(&db, &menu, &select(&axe.id)).await?);
        assert_eq!(update.content, "Are you sure, You want to dispose 🪓|Axe");
        assert!(update.embed.is_none());
        assert_eq!(update.components.len(), 1);

        assert!(get_interaction(&db, &menu.id).await?.is_none());
        let accept = records_of(&db, InteractionType::InventoryDisposeToolAccept).await?;
        assert_eq!(accept.len(), 1);
        assert_eq!(
            interaction::parse_payload::<DisposeToolPayload>(&accept[0])?,
            DisposeToolPayload {
                wallet_id,
                tool_unique_id: axe.id.clone(),
            }
        );
        assert_eq!(records_of(&db, InteractionType::InventoryDisposeToolDecline).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_menu_rejects_tool_of_another_wallet() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, _, menu) = inventory_with_axe(&db).await?;
        let other = create_test_wallet(&db, "other", 100_000).await?;
        let foreign = shop::buy_tool(&db, other.id, ToolType::Axe).await?;

        let result = handle_dispose_menu(&db, &menu, &select(&foreign.id)).await;
        assert!(matches!(result, Err(Error::ItemNotFound { .. })));
        assert!(shop::get_item_by_id(&db, &foreign.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_accept_disposes_and_clears_both_buttons() -> Result<()> {
        let db = setup_test_db().await?;
        let (wallet_id, axe, menu) = inventory_with_axe(&db).await?;
        handle_dispose_menu(&db, &menu, &select(&axe.id)).await?;
        let accept = records_of(&db, InteractionType::InventoryDisposeToolAccept).await?.remove(0);

        let update = update(handle_dispose_accept(&db, &accept, &BUTTON).await?);
        assert_eq!(update.content, "Successfully disposed 🪓|Axe from your inventory.");
        assert!(update.embed.is_some());
        // Nothing left to dispose, so no new menu
        assert!(update.components.is_empty());

        assert!(shop::get_inventory(&db, wallet_id).await?.is_empty());
        assert_eq!(Interaction::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_accept_after_tool_is_gone() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, axe, menu) = inventory_with_axe(&db).await?;
        handle_dispose_menu(&db, &menu, &select(&axe.id)).await?;
        let accept = records_of(&db, InteractionType::InventoryDisposeToolAccept).await?.remove(0);
        shop::dispose_item(&db, &axe.id).await?;

        let result = handle_dispose_accept(&db, &accept, &BUTTON).await;
        let error = result.unwrap_err();
        assert!(matches!(error, Error::ItemNotFound { .. }));
        assert_eq!(
            respond::user_message(&error),
            "Cannot find selected tool. Contact Developer."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_decline_restores_inventory() -> Result<()> {
        let db = setup_test_db().await?;
        let (wallet_id, axe, menu) = inventory_with_axe(&db).await?;
        handle_dispose_menu(&db, &menu, &select(&axe.id)).await?;
        let decline = records_of(&db, InteractionType::InventoryDisposeToolDecline).await?.remove(0);

        let update = update(handle_dispose_decline(&db, &decline, &BUTTON).await?);
        assert!(update.content.is_empty());
        assert!(update.embed.is_some());
        assert_eq!(update.components.len(), 1);

        assert_eq!(shop::get_inventory(&db, wallet_id).await?.len(), 1);
        assert!(records_of(&db, InteractionType::InventoryDisposeToolAccept).await?.is_empty());
        assert!(records_of(&db, InteractionType::InventoryDisposeToolDecline).await?.is_empty());
        assert_eq!(records_of(&db, InteractionType::InventoryDisposeMenu).await?.len(), 1);
        Ok(())
    }
}
