//! The player aggregate root and the persisted world around it.

use crate::economy::Economy;
use crate::progression::Progression;
use crate::skills::Skills;

/// Everything about the player that is not owned by a dedicated subsystem.
///
/// `click_damage` and `auto_damage` are caches: they are rewritten by
/// [`Economy::recompute_derived_stats`](crate::economy::Economy::recompute_derived_stats)
/// and never treated as the source of truth when loading.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub currency: f64,
    pub premium_currency: f64,
    /// Currency earned since the last prestige.
    pub run_total_earned: f64,
    pub level: u32,
    pub click_damage: f64,
    pub auto_damage: f64,
    pub total_clicks: u64,
    pub total_villains_defeated: u64,
    pub total_bosses_defeated: u64,
    /// Chained clicks in the current combo.
    pub combo_count: u32,
    pub combo_multiplier: f64,
    /// Longest combo ever chained.
    pub best_combo: u32,
    /// Epoch milliseconds of the last save or offline reconciliation.
    pub last_persist_time: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            currency: 0.0,
            premium_currency: 0.0,
            run_total_earned: 0.0,
            level: 1,
            click_damage: 1.0,
            auto_damage: 0.0,
            total_clicks: 0,
            total_villains_defeated: 0,
            total_bosses_defeated: 0,
            combo_count: 0,
            combo_multiplier: 1.0,
            best_combo: 0,
            last_persist_time: 0.0,
        }
    }
}

impl PlayerState {
    /// Credit earned currency to both the wallet and the run total.
    pub fn earn(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.currency += amount;
            self.run_total_earned += amount;
        }
    }

    /// Spend if affordable. Returns false and leaves the wallet alone otherwise.
    pub fn try_spend(&mut self, cost: f64) -> bool {
        if self.currency >= cost {
            self.currency -= cost;
            true
        } else {
            false
        }
    }

    /// Replace non-finite or negative numeric fields with safe defaults.
    /// Returns true if anything was repaired.
    pub fn sanitize(&mut self) -> bool {
        let defaults = PlayerState::default();
        let mut repaired = false;
        for (field, fallback) in [
            (&mut self.currency, defaults.currency),
            (&mut self.premium_currency, defaults.premium_currency),
            (&mut self.run_total_earned, defaults.run_total_earned),
            (&mut self.click_damage, defaults.click_damage),
            (&mut self.auto_damage, defaults.auto_damage),
            (&mut self.last_persist_time, defaults.last_persist_time),
        ] {
            if !field.is_finite() || *field < 0.0 {
                *field = fallback;
                repaired = true;
            }
        }
        if !self.combo_multiplier.is_finite() || self.combo_multiplier < 1.0 {
            self.combo_multiplier = 1.0;
            repaired = true;
        }
        if self.level == 0 {
            self.level = 1;
            repaired = true;
        }
        repaired
    }
}

/// Everything that survives a save/load cycle. The live encounter is not
/// part of it; it is regenerated on load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    pub player: PlayerState,
    pub economy: Economy,
    pub skills: Skills,
    pub progression: Progression,
}
