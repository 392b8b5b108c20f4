//! Weighted loot tables.
//!
//! A table of `(outcome, weight)` pairs is stacked into cumulative buckets once;
//! a roll in `0..total` then selects the first bucket whose upper bound exceeds it.

use rand::Rng;

/// Cumulative-probability buckets built from a weight table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedOdds<T> {
    buckets: Vec<(T, u32)>,
    total: u32,
}

/// Converts a weight table into cumulative buckets, keeping table order.
///
/// Outcomes with a zero weight can never be rolled and are dropped.
#[must_use]
pub fn stack_odds<T: Clone>(table: &[(T, u32)]) -> StackedOdds<T> {
    let mut total = 0u32;
    let buckets = table
        .iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|(outcome, weight)| {
            total = total.saturating_add(*weight);
            (outcome.clone(), total)
        })
        .collect();

    StackedOdds { buckets, total }
}

impl<T> StackedOdds<T> {
    /// Sum of all weights
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Upper bounds of each bucket in order
    pub fn buckets(&self) -> impl Iterator<Item = (&T, u32)> {
        self.buckets.iter().map(|(outcome, bound)| (outcome, *bound))
    }

    /// Returns the outcome selected by `roll`, or `None` when the roll is out of range.
    #[must_use]
    pub fn pick(&self, roll: u32) -> Option<&T> {
        self.buckets
            .iter()
            .find(|(_, bound)| roll < *bound)
            .map(|(outcome, _)| outcome)
    }
}

/// Rolls a random outcome from the stacked odds.
///
/// Returns `None` only for an empty table.
pub fn randomized_scenario<'a, T, R: Rng + ?Sized>(
    odds: &'a StackedOdds<T>,
    rng: &mut R,
) -> Option<&'a T> {
    if odds.total() == 0 {
        return None;
    }
    odds.pick(rng.random_range(0..odds.total()))
}

/// Random integer in `min..=max`; the bounds may be given in either order.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Loot {
        Common,
        Rare,
        Never,
        Legendary,
    }

    fn table() -> StackedOdds<Loot> {
        stack_odds(&[
            (Loot::Common, 70),
            (Loot::Rare, 25),
            (Loot::Never, 0),
            (Loot::Legendary, 5),
        ])
    }

    #[test]
    fn test_stack_odds_cumulative_bounds() {
        let odds = table();
        assert_eq!(odds.total(), 100);
        let bounds: Vec<(Loot, u32)> = odds.buckets().map(|(l, b)| (*l, b)).collect();
        assert_eq!(
            bounds,
            vec![(Loot::Common, 70), (Loot::Rare, 95), (Loot::Legendary, 100)]
        );
    }

    #[test]
    fn test_pick_bucket_edges() {
        let odds = table();
        assert_eq!(odds.pick(0), Some(&Loot::Common));
        assert_eq!(odds.pick(69), Some(&Loot::Common));
        assert_eq!(odds.pick(70), Some(&Loot::Rare));
        assert_eq!(odds.pick(94), Some(&Loot::Rare));
        assert_eq!(odds.pick(95), Some(&Loot::Legendary));
        assert_eq!(odds.pick(99), Some(&Loot::Legendary));
        assert_eq!(odds.pick(100), None);
    }

    #[test]
    fn test_zero_weight_never_rolled() {
        let odds = table();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let outcome = randomized_scenario(&odds, &mut rng);
            assert!(outcome.is_some());
            assert_ne!(outcome, Some(&Loot::Never));
        }
    }

    #[test]
    fn test_empty_table() {
        let odds: StackedOdds<Loot> = stack_odds(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(odds.total(), 0);
        assert!(randomized_scenario(&odds, &mut rng).is_none());
    }

    #[test]
    fn test_random_number_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let n = random_number(&mut rng, 500, 1_000);
            assert!((500..=1_000).contains(&n));
            let m = random_number(&mut rng, -7_000, -10_000);
            assert!((-10_000..=-7_000).contains(&m));
        }
    }
}
