//! Balance constants for the whole simulation.
//!
//! Every number that shapes pacing lives in [`Tuning`]. The defaults are the
//! canonical baseline; a partial JSON document can override any subset via
//! [`Tuning::from_json`] (missing keys keep their defaults, unknown keys are
//! ignored).

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// localStorage key for the save document.
pub const STORAGE_KEY: &str = "hero_clicker_save";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── Economy ────────────────────────────────────────────────
    /// Cost multiplier per owned unit: `floor(base × growth^count)`.
    pub cost_growth: f64,
    /// Units per milestone step (both heroes and upgrades).
    pub milestone_step: u32,
    /// Hero effect multiplier gained per milestone.
    pub hero_milestone_base: f64,
    /// Upgrade effect multiplier gained per milestone.
    pub upgrade_milestone_base: f64,
    /// Effect multiplier per ascension rank.
    pub rank_base: f64,
    /// Units required before a hero can ascend.
    pub ascension_threshold: u32,
    /// Click damage before any upgrade.
    pub base_click_damage: f64,

    // ── Modifiers ──────────────────────────────────────────────
    /// Additive bonus per premium currency unit.
    pub premium_bonus: f64,
    pub ring_click_bonus: f64,
    pub cape_dps_bonus: f64,
    pub amulet_reward_bonus: f64,

    // ── Criticals and combo ────────────────────────────────────
    pub crit_chance: f64,
    pub crit_skill_chance: f64,
    pub crit_multiplier: f64,
    pub forced_crit_multiplier: f64,
    /// Seconds between clicks that still chain a combo.
    pub combo_window: f64,
    pub combo_step: f64,
    pub combo_cap: f64,

    // ── Encounters ─────────────────────────────────────────────
    pub villain_base_hp: f64,
    pub villain_hp_growth: f64,
    pub villain_hp_per_level: f64,
    /// Max health used when the formula yields a non-finite value.
    pub fallback_hp: f64,
    pub reward_divisor: f64,
    pub reward_variance_min: f64,
    pub reward_variance_max: f64,
    pub lucky_reward_chance: f64,
    pub lucky_reward_multiplier: f64,
    pub special_reward_multiplier: f64,
    pub boss_reward_multiplier: f64,
    pub boss_every_kills: u64,
    pub boss_hp_multiplier: f64,
    pub boss_duration: f64,
    pub special_chance: f64,
    pub tank_hp_multiplier: f64,
    /// Fraction of max health a healer regains per two seconds.
    pub healer_regen: f64,
    pub elusive_evade_chance: f64,
    pub artifact_drop_chance: f64,

    // ── Offline / prestige ─────────────────────────────────────
    pub offline_min_secs: f64,
    pub offline_max_secs: f64,
    pub offline_efficiency: f64,
    /// Run earnings converted into one premium unit on prestige.
    pub prestige_divisor: f64,

    // ── Missions ───────────────────────────────────────────────
    pub missions_per_day: usize,
    pub mission_reset_secs: f64,
    pub claim_all_bonus: f64,

    // ── Loop and timers (seconds) ──────────────────────────────
    pub max_dt: f64,
    pub render_interval: f64,
    pub save_interval: f64,
    pub achievement_interval: f64,
    pub special_interval: f64,
    pub weak_point_interval: f64,
    pub weak_point_chance: f64,
    pub weak_point_lifetime: f64,
    pub drone_min_interval: f64,
    pub drone_max_interval: f64,
    pub drone_lifetime: f64,
    pub drone_gold_fraction: f64,
    pub drone_gold_min: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cost_growth: 1.15,
            milestone_step: 25,
            hero_milestone_base: 4.0,
            upgrade_milestone_base: 2.0,
            rank_base: 10.0,
            ascension_threshold: 50,
            base_click_damage: 1.0,

            premium_bonus: 0.1,
            ring_click_bonus: 0.2,
            cape_dps_bonus: 0.2,
            amulet_reward_bonus: 0.1,

            crit_chance: 0.05,
            crit_skill_chance: 0.5,
            crit_multiplier: 5.0,
            forced_crit_multiplier: 2.0,
            combo_window: 1.2,
            combo_step: 1.04,
            combo_cap: 1.5,

            villain_base_hp: 15.0,
            villain_hp_growth: 1.23,
            villain_hp_per_level: 2.0,
            fallback_hp: 20.0,
            reward_divisor: 4.0,
            reward_variance_min: 0.85,
            reward_variance_max: 1.3,
            lucky_reward_chance: 0.1,
            lucky_reward_multiplier: 3.0,
            special_reward_multiplier: 2.0,
            boss_reward_multiplier: 10.0,
            boss_every_kills: 10,
            boss_hp_multiplier: 8.0,
            boss_duration: 30.0,
            special_chance: 0.15,
            tank_hp_multiplier: 1.5,
            healer_regen: 0.01,
            elusive_evade_chance: 0.3,
            artifact_drop_chance: 0.02,

            offline_min_secs: 60.0,
            offline_max_secs: 24.0 * 60.0 * 60.0,
            offline_efficiency: 0.5,
            prestige_divisor: 1_000_000.0,

            missions_per_day: 3,
            mission_reset_secs: 24.0 * 60.0 * 60.0,
            claim_all_bonus: 5.0,

            max_dt: 0.1,
            render_interval: 1.0 / 30.0,
            save_interval: 30.0,
            achievement_interval: 1.0,
            special_interval: 5.0,
            weak_point_interval: 4.0,
            weak_point_chance: 0.3,
            weak_point_lifetime: 2.5,
            drone_min_interval: 60.0,
            drone_max_interval: 240.0,
            drone_lifetime: 8.0,
            drone_gold_fraction: 0.2,
            drone_gold_min: 100.0,
        }
    }
}

impl Tuning {
    /// Overlay a partial JSON document onto the defaults.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(PersistenceError::Decode)
    }

    /// Deterministic variant for tests and balance runs: no reward variance,
    /// no lucky bonus, no artifact drops.
    pub fn deterministic() -> Self {
        Self {
            reward_variance_min: 1.0,
            reward_variance_max: 1.0,
            lucky_reward_chance: 0.0,
            artifact_drop_chance: 0.0,
            ..Self::default()
        }
    }
}
