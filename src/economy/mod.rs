//! Economy model: owned heroes and upgrades, cost curves, purchases,
//! ascension and the derived click/DPS stats.
//!
//! Derived stats are always rebuilt from scratch by
//! [`Economy::recompute_derived_stats`] after any count or rank change.

pub mod artifacts;
pub mod catalog;

pub use artifacts::{ArtifactKind, Artifacts};
pub use catalog::{EntityId, HeroKind, HeroTag, UpgradeEffect, UpgradeKind};

use tracing::{debug, info};

use crate::config::Tuning;
use crate::error::{GameError, GameResult};
use crate::state::PlayerState;

/// A hero line owned by the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    pub kind: HeroKind,
    pub count: u32,
    pub rank: u32,
    /// Per-unit DPS after milestone, rank and synergy multipliers.
    pub current_effect: f64,
}

impl Hero {
    fn new(kind: HeroKind) -> Self {
        Self {
            kind,
            count: 0,
            rank: 0,
            current_effect: kind.base_dps(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub count: u32,
    /// Per-unit click bonus, or the synergy factor for synergy upgrades.
    pub current_effect: f64,
}

impl Upgrade {
    fn new(kind: UpgradeKind) -> Self {
        let current_effect = match kind.effect() {
            UpgradeEffect::ClickBonus(base) => base,
            UpgradeEffect::Synergy { .. } => 1.0,
        };
        Self {
            kind,
            count: 0,
            current_effect,
        }
    }
}

/// Emitted by a successful purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct Purchased {
    pub entity: EntityId,
    pub cost: f64,
    pub count: u32,
    /// `floor(count / step)` went up with this purchase.
    pub milestone_reached: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ascended {
    pub hero: HeroKind,
    pub rank: u32,
}

/// `floor(base × growth^count)`.
pub fn cost_at(base_cost: f64, growth: f64, count: u32) -> f64 {
    (base_cost * growth.powi(count as i32)).floor()
}

/// `base^floor(count / step)`.
pub fn milestone_multiplier(count: u32, step: u32, base: f64) -> f64 {
    if step == 0 {
        return 1.0;
    }
    base.powi((count / step) as i32)
}

fn milestone_tier(count: u32, step: u32) -> u32 {
    if step == 0 {
        0
    } else {
        count / step
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Economy {
    pub heroes: Vec<Hero>,
    pub upgrades: Vec<Upgrade>,
    pub artifacts: Artifacts,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

impl Economy {
    pub fn new() -> Self {
        Self {
            heroes: HeroKind::all().iter().map(|k| Hero::new(*k)).collect(),
            upgrades: UpgradeKind::all().iter().map(|k| Upgrade::new(*k)).collect(),
            artifacts: Artifacts::default(),
        }
    }

    pub fn hero(&self, kind: HeroKind) -> &Hero {
        &self.heroes[kind.index()]
    }

    pub fn hero_mut(&mut self, kind: HeroKind) -> &mut Hero {
        &mut self.heroes[kind.index()]
    }

    pub fn upgrade(&self, kind: UpgradeKind) -> &Upgrade {
        &self.upgrades[kind.index()]
    }

    pub fn upgrade_mut(&mut self, kind: UpgradeKind) -> &mut Upgrade {
        &mut self.upgrades[kind.index()]
    }

    pub fn count(&self, entity: EntityId) -> u32 {
        match entity {
            EntityId::Hero(h) => self.hero(h).count,
            EntityId::Upgrade(u) => self.upgrade(u).count,
        }
    }

    pub fn next_cost(&self, entity: EntityId, tuning: &Tuning) -> f64 {
        cost_at(entity.base_cost(), tuning.cost_growth, self.count(entity))
    }

    /// A hero stays locked below its unlock level unless one is already owned.
    pub fn is_locked(&self, kind: HeroKind, level: u32) -> bool {
        level < kind.unlock_level() && self.hero(kind).count == 0
    }

    /// Buy one unit. On failure nothing is deducted or incremented.
    pub fn purchase(
        &mut self,
        entity: EntityId,
        player: &mut PlayerState,
        tuning: &Tuning,
    ) -> GameResult<Purchased> {
        if let EntityId::Hero(kind) = entity {
            if self.is_locked(kind, player.level) {
                return Err(GameError::Locked {
                    required_level: kind.unlock_level(),
                });
            }
        }

        let cost = self.next_cost(entity, tuning);
        if !player.try_spend(cost) {
            return Err(GameError::InsufficientFunds {
                cost,
                available: player.currency,
            });
        }

        let count = match entity {
            EntityId::Hero(h) => {
                let hero = self.hero_mut(h);
                hero.count += 1;
                hero.count
            }
            EntityId::Upgrade(u) => {
                let upgrade = self.upgrade_mut(u);
                upgrade.count += 1;
                upgrade.count
            }
        };
        let step = tuning.milestone_step;
        let milestone_reached = milestone_tier(count, step) > milestone_tier(count - 1, step);

        self.recompute_derived_stats(player, tuning);

        debug!(event = "purchase", id = entity.id(), count, cost, "purchased");
        if milestone_reached {
            info!(event = "milestone", id = entity.id(), count, "milestone reached");
        }

        Ok(Purchased {
            entity,
            cost,
            count,
            milestone_reached,
        })
    }

    /// Trade a full hero line for a permanent rank.
    pub fn ascend(
        &mut self,
        kind: HeroKind,
        player: &mut PlayerState,
        tuning: &Tuning,
    ) -> GameResult<Ascended> {
        let hero = self.hero_mut(kind);
        if hero.count < tuning.ascension_threshold {
            return Err(GameError::NotEligible {
                reason: format!(
                    "{} needs {} owned to ascend (has {})",
                    kind.name(),
                    tuning.ascension_threshold,
                    hero.count
                ),
            });
        }
        hero.count = 0;
        hero.rank += 1;
        let rank = hero.rank;

        self.recompute_derived_stats(player, tuning);
        info!(event = "ascend", id = kind.id(), rank, "hero ascended");

        Ok(Ascended { hero: kind, rank })
    }

    /// Product over the hero's tags of every matching synergy upgrade's
    /// `1 + (multiplier - 1) × count`.
    pub fn synergy_multiplier(&self, kind: HeroKind) -> f64 {
        let mut total = 1.0;
        for upgrade in &self.upgrades {
            if let UpgradeEffect::Synergy { tag, multiplier } = upgrade.kind.effect() {
                if upgrade.count > 0 && kind.tags().contains(&tag) {
                    total *= 1.0 + (multiplier - 1.0) * upgrade.count as f64;
                }
            }
        }
        total
    }

    /// Rebuild every per-entity effect and the player's click/DPS caches.
    pub fn recompute_derived_stats(&mut self, player: &mut PlayerState, tuning: &Tuning) {
        let synergies: Vec<f64> = HeroKind::all()
            .iter()
            .map(|k| self.synergy_multiplier(*k))
            .collect();

        let mut auto_damage = 0.0;
        for (hero, synergy) in self.heroes.iter_mut().zip(synergies) {
            hero.current_effect = hero.kind.base_dps()
                * milestone_multiplier(
                    hero.count,
                    tuning.milestone_step,
                    tuning.hero_milestone_base,
                )
                * tuning.rank_base.powi(hero.rank as i32)
                * synergy;
            auto_damage += hero.current_effect * hero.count as f64;
        }

        let mut click_damage = tuning.base_click_damage;
        for upgrade in &mut self.upgrades {
            match upgrade.kind.effect() {
                UpgradeEffect::ClickBonus(base) => {
                    upgrade.current_effect = base
                        * milestone_multiplier(
                            upgrade.count,
                            tuning.milestone_step,
                            tuning.upgrade_milestone_base,
                        );
                    click_damage += upgrade.current_effect * upgrade.count as f64;
                }
                UpgradeEffect::Synergy { multiplier, .. } => {
                    upgrade.current_effect = 1.0 + (multiplier - 1.0) * upgrade.count as f64;
                }
            }
        }

        player.auto_damage = auto_damage;
        player.click_damage = click_damage;
    }

    /// Prestige reset: counts and ranks go, artifacts stay.
    pub fn reset_run(&mut self) {
        let artifacts = std::mem::take(&mut self.artifacts);
        *self = Economy::new();
        self.artifacts = artifacts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_player() -> PlayerState {
        PlayerState {
            currency: 1e15,
            level: 99,
            ..PlayerState::default()
        }
    }

    #[test]
    fn cost_curve_floors() {
        assert!((cost_at(15.0, 1.15, 0) - 15.0).abs() < 0.001);
        assert!((cost_at(15.0, 1.15, 1) - 17.0).abs() < 0.001);
        assert!((cost_at(100.0, 1.15, 2) - 132.0).abs() < 0.001);
    }

    #[test]
    fn purchase_deducts_and_increments() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState {
            currency: 100.0,
            ..PlayerState::default()
        };
        let ev = eco
            .purchase(EntityId::Upgrade(UpgradeKind::Gym), &mut player, &tuning)
            .unwrap();
        assert_eq!(ev.count, 1);
        assert!((ev.cost - 15.0).abs() < 0.001);
        assert!((player.currency - 85.0).abs() < 0.001);
        assert!((player.click_damage - 2.0).abs() < 0.001);
    }

    #[test]
    fn purchase_insufficient_funds_is_noop() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState {
            currency: 10.0,
            ..PlayerState::default()
        };
        let err = eco
            .purchase(EntityId::Hero(HeroKind::Rookie), &mut player, &tuning)
            .unwrap_err();
        assert!(matches!(err, GameError::InsufficientFunds { .. }));
        assert_eq!(eco.hero(HeroKind::Rookie).count, 0);
        assert!((player.currency - 10.0).abs() < 0.001);
    }

    #[test]
    fn hero_locked_below_unlock_level() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState {
            currency: 1e6,
            level: 2,
            ..PlayerState::default()
        };
        let err = eco
            .purchase(EntityId::Hero(HeroKind::Scout), &mut player, &tuning)
            .unwrap_err();
        assert!(matches!(err, GameError::Locked { required_level: 3 }));
        assert!((player.currency - 1e6).abs() < 0.001);

        // Already owning one (e.g. from before a prestige) unlocks the line.
        eco.hero_mut(HeroKind::Scout).count = 1;
        assert!(eco
            .purchase(EntityId::Hero(HeroKind::Scout), &mut player, &tuning)
            .is_ok());
    }

    #[test]
    fn hero_milestones_compound_by_four() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = rich_player();
        let mut milestones = 0;
        for _ in 0..25 {
            let ev = eco
                .purchase(EntityId::Hero(HeroKind::Rookie), &mut player, &tuning)
                .unwrap();
            if ev.milestone_reached {
                milestones += 1;
            }
        }
        assert_eq!(milestones, 1);
        assert!((eco.hero(HeroKind::Rookie).current_effect - 20.0).abs() < 0.001);
        for _ in 0..25 {
            eco.purchase(EntityId::Hero(HeroKind::Rookie), &mut player, &tuning)
                .unwrap();
        }
        assert!((eco.hero(HeroKind::Rookie).current_effect - 80.0).abs() < 0.001);
        assert!((player.auto_damage - 80.0 * 50.0).abs() < 0.001);
    }

    #[test]
    fn upgrade_milestone_base_is_two() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState::default();
        eco.upgrade_mut(UpgradeKind::Gym).count = 25;
        eco.recompute_derived_stats(&mut player, &tuning);
        assert!((eco.upgrade(UpgradeKind::Gym).current_effect - 2.0).abs() < 0.001);
        assert!((player.click_damage - (1.0 + 2.0 * 25.0)).abs() < 0.001);
    }

    #[test]
    fn ascend_requires_threshold() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState::default();
        eco.hero_mut(HeroKind::Rookie).count = 49;
        let err = eco.ascend(HeroKind::Rookie, &mut player, &tuning).unwrap_err();
        assert!(matches!(err, GameError::NotEligible { .. }));
        assert_eq!(eco.hero(HeroKind::Rookie).count, 49);
    }

    #[test]
    fn ascend_resets_count_and_ranks_up() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState::default();
        eco.hero_mut(HeroKind::Rookie).count = 50;
        let ev = eco.ascend(HeroKind::Rookie, &mut player, &tuning).unwrap();
        assert_eq!(ev.rank, 1);
        let hero = eco.hero(HeroKind::Rookie);
        assert_eq!(hero.count, 0);
        assert!((hero.current_effect - 50.0).abs() < 0.001);
        assert!(player.auto_damage.abs() < 0.001);
    }

    #[test]
    fn synergy_applies_per_tag() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState::default();
        eco.hero_mut(HeroKind::Rookie).count = 1;
        eco.hero_mut(HeroKind::Soldier).count = 1;
        eco.upgrade_mut(UpgradeKind::StreetNetwork).count = 2;
        eco.recompute_derived_stats(&mut player, &tuning);
        // Street ×(1 + 0.5 × 2) = ×2 for the rookie only.
        assert!((eco.hero(HeroKind::Rookie).current_effect - 10.0).abs() < 0.001);
        assert!((eco.hero(HeroKind::Soldier).current_effect - 80.0).abs() < 0.001);
        assert!((player.auto_damage - 90.0).abs() < 0.001);
        // Synergy upgrades never add click damage.
        assert!((player.click_damage - 1.0).abs() < 0.001);
    }

    #[test]
    fn synergy_multiplies_across_tags() {
        let mut eco = Economy::new();
        eco.upgrade_mut(UpgradeKind::NeuralUplink).count = 1;
        // Cyborg is Tech + Military; only Tech has a synergy.
        assert!((eco.synergy_multiplier(HeroKind::Cyborg) - 2.0).abs() < 0.001);
        assert!((eco.synergy_multiplier(HeroKind::Captain) - 1.0).abs() < 0.001);
    }

    #[test]
    fn recompute_is_idempotent() {
        let tuning = Tuning::default();
        let mut eco = Economy::new();
        let mut player = PlayerState::default();
        eco.hero_mut(HeroKind::Scout).count = 30;
        eco.hero_mut(HeroKind::Scout).rank = 1;
        eco.recompute_derived_stats(&mut player, &tuning);
        let first = player.auto_damage;
        eco.recompute_derived_stats(&mut player, &tuning);
        assert!((player.auto_damage - first).abs() < 1e-9);
    }

    #[test]
    fn reset_run_keeps_artifacts() {
        let mut eco = Economy::new();
        eco.hero_mut(HeroKind::Rookie).count = 10;
        eco.hero_mut(HeroKind::Rookie).rank = 2;
        eco.artifacts.grant(ArtifactKind::Cape);
        eco.reset_run();
        assert_eq!(eco.hero(HeroKind::Rookie).count, 0);
        assert_eq!(eco.hero(HeroKind::Rookie).rank, 0);
        assert!(eco.artifacts.owns(ArtifactKind::Cape));
    }
}
