//! Damage resolution for clicks and passive DPS.
//!
//! Modifier order is fixed: the additive pool (premium currency, achievement
//! bonus, artifacts) is combined into one multiplier first, temporary buffs
//! (combo, Fury, TeamBoost) multiply that, and the critical multiplier is
//! applied last.

use crate::config::Tuning;
use crate::rng::Dice;
use crate::state::PlayerState;

/// Snapshot of every modifier source the resolver needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifiers {
    pub premium_currency: f64,
    /// Cached sum of completed achievement rewards.
    pub achievement_bonus: f64,
    pub artifact_click_bonus: f64,
    pub artifact_dps_bonus: f64,
    pub fury: bool,
    pub crit_boost: bool,
    pub team: bool,
}

impl Modifiers {
    fn shared_pool(&self, tuning: &Tuning) -> f64 {
        1.0 + self.premium_currency * tuning.premium_bonus + self.achievement_bonus
    }

    /// Additive pool for clicks.
    pub fn click_additive(&self, tuning: &Tuning) -> f64 {
        self.shared_pool(tuning) + self.artifact_click_bonus
    }

    /// Additive pool for DPS.
    pub fn dps_additive(&self, tuning: &Tuning) -> f64 {
        self.shared_pool(tuning) + self.artifact_dps_bonus
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageResult {
    pub amount: f64,
    pub is_critical: bool,
}

// ── Combo ──────────────────────────────────────────────────────

/// Tracks click timing for the combo chain. Counts live on [`PlayerState`].
#[derive(Clone, Debug, Default)]
pub struct Combo {
    last_click_at: Option<f64>,
}

impl Combo {
    /// Register a click at simulation time `now` (seconds).
    pub fn register_click(&mut self, player: &mut PlayerState, now: f64, tuning: &Tuning) {
        let chained = matches!(self.last_click_at, Some(t) if now - t <= tuning.combo_window);
        if chained {
            player.combo_count += 1;
            player.combo_multiplier =
                (player.combo_multiplier * tuning.combo_step).min(tuning.combo_cap);
        } else {
            player.combo_count = 1;
            player.combo_multiplier = 1.0;
        }
        player.best_combo = player.best_combo.max(player.combo_count);
        self.last_click_at = Some(now);
    }

    /// Drop an expired combo. Returns true if the combo was reset.
    pub fn decay(&mut self, player: &mut PlayerState, now: f64, tuning: &Tuning) -> bool {
        match self.last_click_at {
            Some(t) if now - t > tuning.combo_window => {
                self.last_click_at = None;
                let had_combo = player.combo_count > 0 || player.combo_multiplier > 1.0;
                player.combo_count = 0;
                player.combo_multiplier = 1.0;
                had_combo
            }
            _ => false,
        }
    }
}

// ── Resolution ─────────────────────────────────────────────────

/// Critical roll: base chance, then the CritBoost roll, then the forced flag.
fn roll_critical(mods: &Modifiers, dice: &mut Dice, tuning: &Tuning, forced: bool) -> bool {
    if dice.chance(tuning.crit_chance) {
        return true;
    }
    if mods.crit_boost && dice.chance(tuning.crit_skill_chance) {
        return true;
    }
    forced
}

/// Resolve one player click. The caller applies `amount` to the encounter.
pub fn resolve_click(
    player: &mut PlayerState,
    combo: &mut Combo,
    mods: &Modifiers,
    dice: &mut Dice,
    tuning: &Tuning,
    now: f64,
    forced_critical: bool,
) -> DamageResult {
    player.total_clicks += 1;
    combo.register_click(player, now, tuning);

    let mut multiplier = mods.click_additive(tuning);
    multiplier *= player.combo_multiplier;
    if mods.team {
        multiplier *= 2.0;
    }

    let is_critical = roll_critical(mods, dice, tuning, forced_critical);
    if is_critical {
        multiplier *= tuning.crit_multiplier;
        if forced_critical {
            multiplier *= tuning.forced_crit_multiplier;
        }
    }

    DamageResult {
        amount: player.click_damage * multiplier,
        is_critical,
    }
}

/// Full DPS including temporary skill buffs.
pub fn current_dps(player: &PlayerState, mods: &Modifiers, tuning: &Tuning) -> f64 {
    let mut dps = base_dps(player, mods, tuning);
    if mods.fury {
        dps *= 2.0;
    }
    if mods.team {
        dps *= 2.0;
    }
    dps
}

/// DPS from permanent sources only. Offline progress uses this path.
pub fn base_dps(player: &PlayerState, mods: &Modifiers, tuning: &Tuning) -> f64 {
    player.auto_damage * mods.dps_additive(tuning)
}

/// Passive damage for one tick of `dt` seconds.
pub fn resolve_tick(player: &PlayerState, mods: &Modifiers, tuning: &Tuning, dt: f64) -> f64 {
    if dt <= 0.0 || !dt.is_finite() {
        return 0.0;
    }
    current_dps(player, mods, tuning) * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_click(click: f64) -> PlayerState {
        PlayerState {
            click_damage: click,
            ..PlayerState::default()
        }
    }

    /// Dice whose next rolls never crit.
    fn no_crit_dice() -> Dice {
        let mut d = Dice::seeded(0);
        d.script([0.99; 8]);
        d
    }

    #[test]
    fn plain_click_deals_click_damage() {
        let tuning = Tuning::default();
        let mut player = player_with_click(10.0);
        let mut combo = Combo::default();
        let mut dice = no_crit_dice();
        let r = resolve_click(&mut player, &mut combo, &Modifiers::default(), &mut dice, &tuning, 0.0, false);
        assert!((r.amount - 10.0).abs() < 0.001);
        assert!(!r.is_critical);
        assert_eq!(player.total_clicks, 1);
    }

    #[test]
    fn forced_critical_is_ten_times() {
        let tuning = Tuning::default();
        let mut player = player_with_click(10.0);
        let mut combo = Combo::default();
        let mut dice = no_crit_dice();
        let r = resolve_click(&mut player, &mut combo, &Modifiers::default(), &mut dice, &tuning, 0.0, true);
        assert!((r.amount - 100.0).abs() < 0.001);
        assert!(r.is_critical);
    }

    #[test]
    fn natural_critical_is_five_times() {
        let tuning = Tuning::default();
        let mut player = player_with_click(10.0);
        let mut combo = Combo::default();
        let mut dice = Dice::seeded(0);
        dice.script([0.01]);
        let r = resolve_click(&mut player, &mut combo, &Modifiers::default(), &mut dice, &tuning, 0.0, false);
        assert!((r.amount - 50.0).abs() < 0.001);
    }

    #[test]
    fn crit_boost_adds_second_roll() {
        let tuning = Tuning::default();
        let mut player = player_with_click(1.0);
        let mut combo = Combo::default();
        let mods = Modifiers {
            crit_boost: true,
            ..Modifiers::default()
        };
        let mut dice = Dice::seeded(0);
        dice.script([0.9, 0.4]);
        let r = resolve_click(&mut player, &mut combo, &mods, &mut dice, &tuning, 0.0, false);
        assert!(r.is_critical);
    }

    #[test]
    fn additive_pool_then_team_then_crit() {
        let tuning = Tuning::default();
        let mut player = player_with_click(10.0);
        let mut combo = Combo::default();
        let mods = Modifiers {
            premium_currency: 5.0,
            achievement_bonus: 0.2,
            artifact_click_bonus: 0.2,
            team: true,
            ..Modifiers::default()
        };
        let mut dice = Dice::seeded(0);
        dice.script([0.01]);
        let r = resolve_click(&mut player, &mut combo, &mods, &mut dice, &tuning, 0.0, false);
        // (1 + 0.5 + 0.2 + 0.2) × 2 × 5 = 19
        assert!((r.amount - 190.0).abs() < 0.001);
    }

    #[test]
    fn combo_chains_within_window() {
        let tuning = Tuning::default();
        let mut player = PlayerState::default();
        let mut combo = Combo::default();
        combo.register_click(&mut player, 0.0, &tuning);
        combo.register_click(&mut player, 1.0, &tuning);
        combo.register_click(&mut player, 2.0, &tuning);
        assert_eq!(player.combo_count, 3);
        assert!((player.combo_multiplier - 1.04 * 1.04).abs() < 1e-9);
    }

    #[test]
    fn combo_caps() {
        let tuning = Tuning::default();
        let mut player = PlayerState::default();
        let mut combo = Combo::default();
        for i in 0..100 {
            combo.register_click(&mut player, i as f64 * 0.1, &tuning);
        }
        assert!((player.combo_multiplier - tuning.combo_cap).abs() < 1e-9);
    }

    #[test]
    fn combo_resets_after_idle() {
        let tuning = Tuning::default();
        let mut player = PlayerState::default();
        let mut combo = Combo::default();
        combo.register_click(&mut player, 0.0, &tuning);
        combo.register_click(&mut player, 0.5, &tuning);
        assert!(!combo.decay(&mut player, 1.0, &tuning));
        assert!(combo.decay(&mut player, 2.0, &tuning));
        assert_eq!(player.combo_count, 0);
        assert!((player.combo_multiplier - 1.0).abs() < 0.001);
    }

    #[test]
    fn tick_applies_fury_and_team() {
        let tuning = Tuning::default();
        let player = PlayerState {
            auto_damage: 10.0,
            ..PlayerState::default()
        };
        let mods = Modifiers {
            fury: true,
            team: true,
            ..Modifiers::default()
        };
        assert!((resolve_tick(&player, &mods, &tuning, 0.5) - 20.0).abs() < 0.001);
        assert!((base_dps(&player, &mods, &tuning) - 10.0).abs() < 0.001);
    }

    #[test]
    fn tick_ignores_bad_dt() {
        let tuning = Tuning::default();
        let player = PlayerState {
            auto_damage: 10.0,
            ..PlayerState::default()
        };
        assert!(resolve_tick(&player, &Modifiers::default(), &tuning, f64::NAN).abs() < 0.001);
        assert!(resolve_tick(&player, &Modifiers::default(), &tuning, -1.0).abs() < 0.001);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_combo_multiplier_stays_in_bounds(gaps in proptest::collection::vec(0.0f64..3.0, 1..200)) {
            let tuning = Tuning::default();
            let mut player = PlayerState::default();
            let mut combo = Combo::default();
            let mut now = 0.0;
            for gap in gaps {
                now += gap;
                combo.register_click(&mut player, now, &tuning);
                prop_assert!(player.combo_multiplier >= 1.0);
                prop_assert!(player.combo_multiplier <= tuning.combo_cap + 1e-9);
            }
        }

        #[test]
        fn prop_click_damage_non_negative(click in 0.0f64..1e9, premium in 0.0f64..100.0, seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut player = player_with(click);
            let mut combo = Combo::default();
            let mut dice = Dice::seeded(seed);
            let mods = Modifiers { premium_currency: premium, ..Modifiers::default() };
            let r = resolve_click(&mut player, &mut combo, &mods, &mut dice, &tuning, 0.0, false);
            prop_assert!(r.amount >= 0.0);
        }
    }

    fn player_with(click: f64) -> PlayerState {
        PlayerState {
            click_damage: click,
            ..PlayerState::default()
        }
    }
}
