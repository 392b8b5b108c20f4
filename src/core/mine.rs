//! Mining business logic behind `/mine`.
//!
//! A mine trip rolls one resource from a weighted table, rolls a reward inside
//! that resource's range, applies the clan bonus and records the use against the
//! cooldown window. The command layer only renders the returned [`MineResult`].

use crate::{
    config::settings::MineSettings,
    core::{
        clan,
        format::{format_currency, pluralize, relative_timestamp, work_title},
        odds::{self, StackedOdds},
        wallet,
        work::{self, CooldownPolicy, CooldownStatus, WorkType},
    },
    errors::Result,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;
use std::sync::LazyLock;
use tracing::{info, instrument};

/// Levels needed for a 100% clan bonus.
const CLAN_BONUS_DIVISOR: f64 = 20.0;

/// Multiplier a clan of `level` adds to positive mining rewards.
#[must_use]
pub fn clan_bonus_multiplier(level: i32) -> f64 {
    f64::from(level.max(0)) / CLAN_BONUS_DIVISOR
}

/// Clan bonus as a whole percentage, e.g. `15` for level 3.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clan_bonus_percent(level: i32) -> i64 {
    (clan_bonus_multiplier(level) * 100.0).round() as i64
}

/// Everything a mine trip can turn up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Common ore
    Copper,
    /// Common ore
    Silver,
    /// Uncommon ore
    Iron,
    /// Rare ore
    Gold,
    /// Very rare gem
    Emerald,
    /// Rarest find
    Diamond,
    /// Costs money for injuries
    Rockslide,
    /// No reward
    DeadEnd,
    /// No reward
    Nothing,
    /// Costs the most money
    Ambushed,
}

impl Resource {
    /// All resources in table order.
    pub const ALL: [Self; 10] = [
        Self::Copper,
        Self::Silver,
        Self::Iron,
        Self::Gold,
        Self::Emerald,
        Self::Diamond,
        Self::Rockslide,
        Self::DeadEnd,
        Self::Nothing,
        Self::Ambushed,
    ];

    /// Relative weight of the resource in the loot table
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Copper | Self::Silver => 100,
            Self::Iron | Self::Rockslide | Self::DeadEnd | Self::Nothing => 30,
            Self::Gold => 20,
            Self::Emerald | Self::Ambushed => 10,
            Self::Diamond => 5,
        }
    }

    /// Inclusive reward range; negative for accidents
    #[must_use]
    pub const fn reward_range(self) -> (i64, i64) {
        match self {
            Self::Copper => (500, 1_000),
            Self::Silver => (5_000, 10_000),
            Self::Iron => (30_000, 50_000),
            Self::Gold => (75_000, 100_000),
            Self::Emerald => (250_000, 500_000),
            Self::Diamond => (1_000_000, 1_950_000),
            Self::Rockslide => (-10_000, -7_000),
            Self::DeadEnd | Self::Nothing => (0, 0),
            Self::Ambushed => (-100_000, -75_000),
        }
    }

    /// Flavour text shown in the embed
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Copper => "You found Copper. ⛏️",
            Self::Silver => "You found Silver. ⛏️",
            Self::Iron => "You found Iron. ⛏️",
            Self::Gold => "You found Gold. ⛏️",
            Self::Emerald => "You found Emerald. ⛏️",
            Self::Diamond => "You found Diamond. 💎",
            Self::Rockslide => "You were caught in a rockslide and had to pay for injuries 🩹",
            Self::DeadEnd => "You reached a Dead End and had to return 🧱",
            Self::Nothing => "After hours of mining you found nothing 🚫",
            Self::Ambushed => "While mining you were ambushed by goblins 👽",
        }
    }
}

static MINE_ODDS: LazyLock<StackedOdds<Resource>> = LazyLock::new(|| {
    let table: Vec<(Resource, u32)> = Resource::ALL.iter().map(|r| (*r, r.weight())).collect();
    odds::stack_odds(&table)
});

/// Outcome of one roll, before anything is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MineOutcome {
    /// Resource that was found
    pub resource: Resource,
    /// Base reward (negative for accidents)
    pub reward: i64,
    /// Clan bonus multiplier applied to positive rewards (`level / 20`)
    pub bonus_multiplier: f64,
    /// Extra money from the clan bonus
    pub clan_bonus: i64,
    /// `reward + clan_bonus`
    pub total: i64,
}

impl MineOutcome {
    /// Builds an outcome for a resource and base reward, applying the clan bonus.
    #[must_use]
    pub fn new(resource: Resource, reward: i64, clan_level: Option<i32>) -> Self {
        let bonus_multiplier = if reward > 0 {
            clan_level.map_or(0.0, clan_bonus_multiplier)
        } else {
            0.0
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let clan_bonus = (reward as f64 * bonus_multiplier).round() as i64;

        Self {
            resource,
            reward,
            bonus_multiplier,
            clan_bonus,
            total: reward + clan_bonus,
        }
    }

    /// Bonus as a whole percentage, e.g. `15` for a level 3 clan.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn bonus_percent(&self) -> i64 {
        (self.bonus_multiplier * 100.0).round() as i64
    }

    /// Description: flavour text plus the clan bonus line when it applies.
    #[must_use]
    pub fn description(&self) -> String {
        let mut description = self.resource.message().to_string();
        if self.bonus_multiplier > 0.0 && self.reward > 0 {
            description.push_str(&format!(
                "\nClan Bonus: **+{}** ({}%)",
                format_currency(self.clan_bonus),
                self.bonus_percent()
            ));
        }
        description
    }
}

/// Rolls a resource and its reward.
pub fn roll_mine<R: Rng + ?Sized>(rng: &mut R, clan_level: Option<i32>) -> MineOutcome {
    let resource = odds::randomized_scenario(&MINE_ODDS, rng)
        .copied()
        .unwrap_or(Resource::Nothing);
    let (min, max) = resource.reward_range();
    let reward = odds::random_number(rng, min, max);
    MineOutcome::new(resource, reward, clan_level)
}

/// What `/mine` shows after a successful trip.
#[derive(Debug, Clone, PartialEq)]
pub struct MineReport {
    /// Roll details
    pub outcome: MineOutcome,
    /// Embed title
    pub title: String,
    /// Embed description, including the "Next Mine" line on the last use
    pub description: String,
    /// Footer with remaining uses, absent on the last use
    pub footer: Option<String>,
    /// Wallet balance after the reward
    pub balance: i64,
}

impl MineReport {
    /// Whether the embed should use the success colour
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.reward > 0
    }
}

/// Result of invoking `/mine`.
#[derive(Debug, Clone, PartialEq)]
pub enum MineResult {
    /// The user went mining
    Mined(MineReport),
    /// All uses in the window are consumed
    TooTired {
        /// When the next use becomes available
        available_at: DateTime<Utc>,
    },
}

impl MineResult {
    /// Message shown when the cooldown is exhausted
    #[must_use]
    pub fn too_tired_message(available_at: DateTime<Utc>) -> String {
        format!(
            "You are too tired to enter the mine, Visit again {}",
            relative_timestamp(available_at)
        )
    }
}

/// Runs one `/mine` for a user: cooldown check, roll, and atomic persistence.
#[instrument(skip(db, settings, rng))]
pub async fn mine<R: Rng + ?Sized>(
    db: &DatabaseConnection,
    settings: &MineSettings,
    user_id: &str,
    guild_id: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<MineResult> {
    let policy = CooldownPolicy::from_mine_settings(settings)?;
    let uses = work::recent_uses(db, user_id, WorkType::Mine, policy, now).await?;

    let used = match work::cooldown_status(&uses, policy) {
        CooldownStatus::Exhausted { available_at } => {
            return Ok(MineResult::TooTired { available_at });
        }
        CooldownStatus::Available { used } => used,
    };

    let clan_level = clan::get_user_clan(db, user_id, guild_id)
        .await?
        .map(|c| c.level);
    let outcome = roll_mine(rng, clan_level);

    let wallet = wallet::get_or_create_wallet(db, user_id, guild_id).await?;
    let updated = work::record_work(db, &wallet, WorkType::Mine, outcome.total, now).await?;

    info!(
        "User {} mined {:?} for {} in guild {}",
        user_id, outcome.resource, outcome.total, guild_id
    );

    let mut description = outcome.description();
    let footer = if used + 1 >= policy.uses {
        description.push_str(&format!(
            "\nNext Mine {}",
            relative_timestamp(now + policy.window)
        ));
        None
    } else {
        let left = policy.uses - used - 1;
        Some(format!("{left} {} left", pluralize(left, "use", "uses")))
    };

    Ok(MineResult::Mined(MineReport {
        outcome,
        title: work_title(outcome.total),
        description,
        footer,
        balance: updated.balance,
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_clan_bonus_percent_matches_outcome() {
        assert_eq!(clan_bonus_percent(0), 0);
        assert_eq!(clan_bonus_percent(3), 15);
        assert_eq!(clan_bonus_percent(20), 100);
        assert_eq!(clan_bonus_percent(-1), 0);
        for level in 1..=20 {
            let outcome = MineOutcome::new(Resource::Gold, 80_000, Some(level));
            assert_eq!(outcome.bonus_percent(), clan_bonus_percent(level));
        }
    }

    #[test]
    fn test_mine_odds_total() {
        assert_eq!(MINE_ODDS.total(), 365);
    }

    #[test]
    fn test_clan_bonus_applies_to_positive_rewards() {
        let outcome = MineOutcome::new(Resource::Silver, 8_000, Some(3));
        assert_eq!(outcome.bonus_multiplier, 0.15);
        assert_eq!(outcome.clan_bonus, 1_200);
        assert_eq!(outcome.total, 9_200);
        assert_eq!(outcome.bonus_percent(), 15);
        assert!(outcome.description().contains("Clan Bonus: **+$1,200** (15%)"));
    }

    #[test]
    fn test_clan_bonus_not_applied_to_losses() {
        let outcome = MineOutcome::new(Resource::Ambushed, -80_000, Some(10));
        assert_eq!(outcome.clan_bonus, 0);
        assert_eq!(outcome.total, -80_000);
        assert!(!outcome.description().contains("Clan Bonus"));
    }

    #[test]
    fn test_no_clan_no_bonus() {
        let outcome = MineOutcome::new(Resource::Gold, 90_000, None);
        assert_eq!(outcome.clan_bonus, 0);
        assert_eq!(outcome.total, 90_000);
        assert_eq!(outcome.description(), Resource::Gold.message());
    }

    #[test]
    fn test_roll_mine_rewards_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..2_000 {
            let outcome = roll_mine(&mut rng, None);
            let (min, max) = outcome.resource.reward_range();
            assert!((min..=max).contains(&outcome.reward));
        }
    }

    #[tokio::test]
    async fn test_mine_counts_down_uses_then_gets_tired() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = MineSettings {
            cooldown_secs: 3_600,
            uses: 2,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let now = Utc::now();

        let MineResult::Mined(first) = mine(&db, &settings, "miner", TEST_GUILD, now, &mut rng).await? else {
            panic!("first mine should succeed");
        };
        assert_eq!(first.footer.as_deref(), Some("1 use left"));
        assert_eq!(first.balance, first.outcome.total);

        let MineResult::Mined(second) = mine(&db, &settings, "miner", TEST_GUILD, now, &mut rng).await? else {
            panic!("second mine should succeed");
        };
        assert!(second.footer.is_none());
        assert!(second.description.contains("Next Mine <t:"));
        assert_eq!(second.balance, first.outcome.total + second.outcome.total);

        let third = mine(&db, &settings, "miner", TEST_GUILD, now, &mut rng).await?;
        assert!(matches!(third, MineResult::TooTired { .. }));
        Ok(())
    }

    #[test]
    fn test_too_tired_message() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            MineResult::too_tired_message(at),
            "You are too tired to enter the mine, Visit again <t:1700000000:R>"
        );
    }
}
