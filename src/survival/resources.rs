//! Sanity, hunger and fire.
//!
//! All three stats share the same `[0, 100]` range and every write goes
//! through [`clamp_stat`], so no caller can ever observe an out-of-range
//! value.

use crate::core::constants::{STARTING_STAT, STAT_MAX, STAT_MIN};
use serde::{Deserialize, Serialize};

/// One of the three survival resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Sanity,
    Hunger,
    Fire,
}

impl Stat {
    pub fn all() -> [Stat; 3] {
        [Stat::Sanity, Stat::Hunger, Stat::Fire]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Sanity => "Sanity",
            Stat::Hunger => "Hunger",
            Stat::Fire => "Fire",
        }
    }
}

/// Per-second rates applied while sitting at camp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecayRates {
    pub sanity: f64,
    pub hunger: f64,
    pub fire: f64,
    pub sanity_regen: f64,
}

fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        return STAT_MIN;
    }
    value.clamp(STAT_MIN, STAT_MAX)
}

/// The player's three resources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalStats {
    sanity: f64,
    hunger: f64,
    fire: f64,
}

impl Default for SurvivalStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SurvivalStats {
    pub fn new() -> Self {
        Self {
            sanity: STARTING_STAT,
            hunger: STARTING_STAT,
            fire: STARTING_STAT,
        }
    }

    /// Builds stats from arbitrary values, clamping each into range.
    pub fn with_values(sanity: f64, hunger: f64, fire: f64) -> Self {
        Self {
            sanity: clamp_stat(sanity),
            hunger: clamp_stat(hunger),
            fire: clamp_stat(fire),
        }
    }

    pub fn sanity(&self) -> f64 {
        self.sanity
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn fire(&self) -> f64 {
        self.fire
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Sanity => self.sanity,
            Stat::Hunger => self.hunger,
            Stat::Fire => self.fire,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Sanity => &mut self.sanity,
            Stat::Hunger => &mut self.hunger,
            Stat::Fire => &mut self.fire,
        }
    }

    /// Adds `delta` to a stat and clamps it.
    ///
    /// Returns the change that actually landed after clamping.
    pub fn adjust(&mut self, stat: Stat, delta: f64) -> f64 {
        let slot = self.slot(stat);
        let before = *slot;
        *slot = clamp_stat(before + delta);
        *slot - before
    }

    /// Applies `dt` seconds of camp decay plus sanity regeneration.
    ///
    /// Does nothing when the player is away from camp.
    pub fn apply_decay(&mut self, dt: f64, at_camp: bool, rates: &DecayRates) {
        if !at_camp || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.sanity = clamp_stat(self.sanity - rates.sanity * dt + rates.sanity_regen * dt);
        self.hunger = clamp_stat(self.hunger - rates.hunger * dt);
        self.fire = clamp_stat(self.fire - rates.fire * dt);
    }

    /// True once any stat has run out.
    pub fn is_depleted(&self) -> bool {
        self.depleted_stat().is_some()
    }

    /// The first stat that ran out, checked in sanity, hunger, fire order.
    pub fn depleted_stat(&self) -> Option<Stat> {
        Stat::all().into_iter().find(|s| self.get(*s) <= STAT_MIN)
    }

    /// Sanity as a 0.0 - 1.0 fraction for the hallucination overlay.
    pub fn sanity_percent(&self) -> f64 {
        self.sanity / STAT_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn in_range(stats: &SurvivalStats) -> bool {
        Stat::all()
            .iter()
            .all(|s| (STAT_MIN..=STAT_MAX).contains(&stats.get(*s)))
    }

    #[test]
    fn test_new_stats_start_full() {
        let stats = SurvivalStats::new();
        assert_eq!(stats.sanity(), 100.0);
        assert_eq!(stats.hunger(), 100.0);
        assert_eq!(stats.fire(), 100.0);
        assert!(!stats.is_depleted());
    }

    #[test]
    fn test_adjust_clamps_high() {
        let mut stats = SurvivalStats::new();
        let applied = stats.adjust(Stat::Fire, 30.0);
        assert_eq!(stats.fire(), 100.0);
        assert_eq!(applied, 0.0);
    }

    #[test]
    fn test_adjust_clamps_low() {
        let mut stats = SurvivalStats::with_values(10.0, 50.0, 50.0);
        let applied = stats.adjust(Stat::Sanity, -25.0);
        assert_eq!(stats.sanity(), 0.0);
        assert_eq!(applied, -10.0);
        assert!(stats.is_depleted());
        assert_eq!(stats.depleted_stat(), Some(Stat::Sanity));
    }

    #[test]
    fn test_with_values_clamps() {
        let stats = SurvivalStats::with_values(-5.0, 150.0, f64::NAN);
        assert_eq!(stats.sanity(), 0.0);
        assert_eq!(stats.hunger(), 100.0);
        assert_eq!(stats.fire(), 0.0);
    }

    #[test]
    fn test_decay_only_at_camp() {
        let rates = DecayRates {
            sanity: 1.0,
            hunger: 1.0,
            fire: 1.0,
            sanity_regen: 0.0,
        };
        let mut stats = SurvivalStats::new();
        stats.apply_decay(10.0, false, &rates);
        assert_eq!(stats, SurvivalStats::new());

        stats.apply_decay(10.0, true, &rates);
        assert_eq!(stats.sanity(), 90.0);
        assert_eq!(stats.hunger(), 90.0);
        assert_eq!(stats.fire(), 90.0);
    }

    #[test]
    fn test_regen_offsets_sanity_decay() {
        let rates = DecayRates {
            sanity: 0.18,
            hunger: 0.32,
            fire: 0.40,
            sanity_regen: 1.0,
        };
        let mut stats = SurvivalStats::with_values(50.0, 50.0, 50.0);
        stats.apply_decay(10.0, true, &rates);
        assert!((stats.sanity() - 58.2).abs() < 1e-9);
        assert!((stats.hunger() - 46.8).abs() < 1e-9);
        assert!((stats.fire() - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_ignores_bad_dt() {
        let rates = DecayRates {
            sanity: 1.0,
            hunger: 1.0,
            fire: 1.0,
            sanity_regen: 0.0,
        };
        let mut stats = SurvivalStats::new();
        stats.apply_decay(-3.0, true, &rates);
        stats.apply_decay(f64::INFINITY, true, &rates);
        assert_eq!(stats, SurvivalStats::new());
    }

    #[test]
    fn test_depleted_order() {
        let stats = SurvivalStats::with_values(20.0, 0.0, 0.0);
        assert_eq!(stats.depleted_stat(), Some(Stat::Hunger));
    }

    #[test]
    fn test_random_mutations_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut stats = SurvivalStats::new();
        let rates = DecayRates {
            sanity: 3.0,
            hunger: 2.0,
            fire: 5.0,
            sanity_regen: 1.0,
        };
        for _ in 0..5_000 {
            if rng.gen_bool(0.5) {
                let stat = Stat::all()[rng.gen_range(0..3)];
                stats.adjust(stat, rng.gen_range(-150.0..150.0));
            } else {
                stats.apply_decay(rng.gen_range(0.0..20.0), rng.gen_bool(0.8), &rates);
            }
            assert!(in_range(&stats), "out of range: {:?}", stats);
        }
    }
}
