//! Work cooldown business logic.
//!
//! Each work command may be used a limited number of times inside a sliding
//! window. Uses are stored as rows in `works`; the window is evaluated from their
//! timestamps so nothing has to be scheduled.

use crate::{
    config::settings::MineSettings,
    core::wallet,
    entities::{Work, wallet as wallet_entity, work},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{debug, instrument};

/// Kinds of work that share the cooldown machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkType {
    /// `/mine`
    Mine,
}

impl WorkType {
    /// Value stored in the `work_type` column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mine => "MINE",
        }
    }
}

/// How often a work command may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    /// Length of the sliding window
    pub window: chrono::Duration,
    /// Uses allowed inside one window
    pub uses: u64,
}

impl CooldownPolicy {
    /// Builds the `/mine` policy from settings.
    ///
    /// # Errors
    /// Returns an error when the configured window does not fit a `chrono::Duration`.
    pub fn from_mine_settings(settings: &MineSettings) -> Result<Self> {
        let window = chrono::Duration::from_std(settings.cooldown()).map_err(|e| Error::Config {
            message: format!("Invalid mine cooldown: {e}"),
        })?;
        Ok(Self {
            window,
            uses: settings.uses,
        })
    }
}

/// Result of checking a user's recent uses against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// The command may be used; `used` uses already happened in the window
    Available {
        /// Uses already consumed in the current window
        used: u64,
    },
    /// All uses are consumed until `available_at`
    Exhausted {
        /// When the oldest use leaves the window
        available_at: DateTime<Utc>,
    },
}

/// Loads the uses of `work_type` by `user_id` inside the policy window, newest first.
///
/// At most `policy.uses` rows are returned.
pub async fn recent_uses(
    db: &DatabaseConnection,
    user_id: &str,
    work_type: WorkType,
    policy: CooldownPolicy,
    now: DateTime<Utc>,
) -> Result<Vec<work::Model>> {
    Work::find()
        .filter(work::Column::WorkType.eq(work_type.as_str()))
        .filter(work::Column::UserDiscordId.eq(user_id))
        .filter(work::Column::CreatedAt.gte(now - policy.window))
        .order_by_desc(work::Column::CreatedAt)
        .limit(policy.uses)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Evaluates recent uses (newest first) against a policy.
#[must_use]
pub fn cooldown_status(uses: &[work::Model], policy: CooldownPolicy) -> CooldownStatus {
    let used = uses.len() as u64;
    if used < policy.uses {
        return CooldownStatus::Available { used };
    }

    // Rows are newest first, so the last one is the oldest use still in the window.
    uses.last().map_or(CooldownStatus::Available { used: 0 }, |oldest| {
        CooldownStatus::Exhausted {
            available_at: oldest.created_at + policy.window,
        }
    })
}

/// Records one use of a work command and credits its reward, atomically.
///
/// Returns the wallet after the balance change.
#[instrument(skip(db, wallet))]
pub async fn record_work(
    db: &DatabaseConnection,
    wallet: &wallet_entity::Model,
    work_type: WorkType,
    reward: i64,
    now: DateTime<Utc>,
) -> Result<wallet_entity::Model> {
    let txn = db.begin().await?;

    work::ActiveModel {
        user_discord_id: Set(wallet.user_discord_id.clone()),
        guild_discord_id: Set(wallet.guild_discord_id.clone()),
        work_type: Set(work_type.as_str().to_string()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let updated = wallet::adjust_balance_atomic(&txn, wallet.id, reward).await?;

    txn.commit().await?;
    debug!(
        "Recorded {} for wallet {} with reward {}",
        work_type.as_str(),
        wallet.id,
        reward
    );
    Ok(updated)
}
