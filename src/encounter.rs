//! The live villain: spawning, damage, special variants, boss countdown and
//! defeat rewards.
//!
//! Exactly one [`Encounter`] is alive at a time. It is regenerated on load
//! rather than persisted.

use tracing::{debug, info, warn};

use crate::config::Tuning;
use crate::economy::{ArtifactKind, Artifacts};
use crate::rng::Dice;
use crate::state::PlayerState;

const VILLAIN_ROSTER: [&str; 5] = ["Thief", "Bandit", "Mobster", "Ninja", "Mutant"];
const BOSS_ROSTER: [&str; 3] = ["Crime Lord", "Steel Giant", "Devourer"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialKind {
    /// Dodges a share of incoming damage.
    Elusive,
    /// Regenerates health every tick.
    Healer,
    /// Spawns with extra health.
    Tank,
}

impl SpecialKind {
    pub fn all() -> &'static [SpecialKind] {
        &[SpecialKind::Elusive, SpecialKind::Healer, SpecialKind::Tank]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialKind::Elusive => "Shadow",
            SpecialKind::Healer => "Healer",
            SpecialKind::Tank => "Armored Tank",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterKind {
    Normal,
    Special(SpecialKind),
    Boss,
}

/// What happened to a damage application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// Non-positive, non-finite, or the encounter is already down.
    Ignored,
    /// An elusive villain dodged.
    Evaded,
    Hit { dealt: f64 },
    /// Health reached zero with this hit. Reported once per encounter.
    Defeated { dealt: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Encounter {
    pub kind: EncounterKind,
    pub name: &'static str,
    pub roster_index: usize,
    pub max_health: f64,
    pub current_health: f64,
    /// Normal max health kept while a special variant is live.
    pub original_max_health_before_special: Option<f64>,
    pub boss_time_remaining: f64,
    defeated: bool,
}

/// `floor(base × growth^(level-1) + per_level × level)`, or the fallback if
/// that is not a positive finite number.
pub fn normal_max_health(level: u32, tuning: &Tuning) -> f64 {
    let lvl = level.max(1);
    let hp = (tuning.villain_base_hp * tuning.villain_hp_growth.powi(lvl as i32 - 1)
        + tuning.villain_hp_per_level * lvl as f64)
        .floor();
    if hp.is_finite() && hp > 0.0 {
        hp
    } else {
        tuning.fallback_hp
    }
}

impl Encounter {
    pub fn spawn_normal(level: u32, tuning: &Tuning) -> Self {
        let roster_index = (level.max(1) as usize - 1) % VILLAIN_ROSTER.len();
        let max_health = normal_max_health(level, tuning);
        debug!(event = "spawn", kind = "normal", level, max_health, "villain spawned");
        Self {
            kind: EncounterKind::Normal,
            name: VILLAIN_ROSTER[roster_index],
            roster_index,
            max_health,
            current_health: max_health,
            original_max_health_before_special: None,
            boss_time_remaining: 0.0,
            defeated: false,
        }
    }

    pub fn spawn_boss(level: u32, tuning: &Tuning) -> Self {
        let roster_index = (level / 5) as usize % BOSS_ROSTER.len();
        let max_health = normal_max_health(level, tuning) * tuning.boss_hp_multiplier;
        info!(event = "spawn", kind = "boss", level, max_health, "boss spawned");
        Self {
            kind: EncounterKind::Boss,
            name: BOSS_ROSTER[roster_index],
            roster_index,
            max_health,
            current_health: max_health,
            original_max_health_before_special: None,
            boss_time_remaining: tuning.boss_duration,
            defeated: false,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EncounterKind::Boss
    }

    pub fn is_special(&self) -> bool {
        matches!(self.kind, EncounterKind::Special(_))
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health > 0.0 {
            (self.current_health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Subtract damage, clamped to `[0, max_health]`.
    pub fn apply_damage(&mut self, amount: f64, dice: &mut Dice, tuning: &Tuning) -> DamageOutcome {
        if self.defeated || !amount.is_finite() || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }
        if self.kind == EncounterKind::Special(SpecialKind::Elusive)
            && dice.chance(tuning.elusive_evade_chance)
        {
            return DamageOutcome::Evaded;
        }
        let before = self.current_health;
        self.current_health = (self.current_health - amount).clamp(0.0, self.max_health);
        let dealt = before - self.current_health;
        if self.current_health <= 0.0 {
            self.current_health = 0.0;
            self.defeated = true;
            DamageOutcome::Defeated { dealt }
        } else {
            DamageOutcome::Hit { dealt }
        }
    }

    /// Roll for a special variant. Only normal, live encounters qualify.
    pub fn check_special_spawn(&mut self, dice: &mut Dice, tuning: &Tuning) -> Option<SpecialKind> {
        if self.kind != EncounterKind::Normal || self.defeated {
            return None;
        }
        if !dice.chance(tuning.special_chance) {
            return None;
        }
        let special = SpecialKind::all()[dice.pick(SpecialKind::all().len())];
        self.original_max_health_before_special = Some(self.max_health);
        if special == SpecialKind::Tank {
            self.max_health = (self.max_health * tuning.tank_hp_multiplier).floor();
        }
        self.current_health = self.max_health;
        self.kind = EncounterKind::Special(special);
        self.name = special.name();
        info!(
            event = "special_spawn",
            special = special.name(),
            max_health = self.max_health,
            "special villain appeared"
        );
        Some(special)
    }

    /// Per-tick special behaviour. Only the healer has one.
    pub fn apply_special_effects(&mut self, dt: f64, tuning: &Tuning) {
        if self.defeated {
            return;
        }
        if self.kind == EncounterKind::Special(SpecialKind::Healer) {
            let regen = self.max_health * tuning.healer_regen * (dt / 2.0);
            self.current_health = (self.current_health + regen).min(self.max_health);
        }
    }

    /// Count the boss timer down. Returns true once when it runs out.
    pub fn tick_boss_timer(&mut self, dt: f64) -> bool {
        if !self.is_boss() || self.defeated || self.boss_time_remaining <= 0.0 {
            return false;
        }
        self.boss_time_remaining -= dt;
        if self.boss_time_remaining <= 0.0 {
            self.boss_time_remaining = 0.0;
            return true;
        }
        false
    }

    /// Repair non-finite or out-of-range health. Returns true if repaired.
    pub fn sanitize(&mut self, tuning: &Tuning) -> bool {
        let mut repaired = false;
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            self.max_health = tuning.fallback_hp;
            repaired = true;
        }
        if !self.current_health.is_finite() {
            self.current_health = self.max_health;
            repaired = true;
        } else if self.current_health < 0.0 || self.current_health > self.max_health {
            self.current_health = self.current_health.clamp(0.0, self.max_health);
            repaired = true;
        }
        if repaired {
            warn!(
                event = "invalid_state",
                max_health = self.max_health,
                current_health = self.current_health,
                "encounter health repaired"
            );
        }
        repaired
    }

    /// Reward for defeating this encounter, in the fixed order: base ×
    /// variance × lucky, then artifact, special and boss bonuses. Floored,
    /// at least 1.
    pub fn reward(&self, artifacts: &Artifacts, dice: &mut Dice, tuning: &Tuning) -> f64 {
        let mut reward = (self.max_health / tuning.reward_divisor).ceil();
        reward *= dice.range(tuning.reward_variance_min, tuning.reward_variance_max);
        if dice.chance(tuning.lucky_reward_chance) {
            reward *= tuning.lucky_reward_multiplier;
        }
        reward *= artifacts.reward_factor(tuning);
        if self.is_special() {
            reward *= tuning.special_reward_multiplier;
        }
        if self.is_boss() {
            reward *= tuning.boss_reward_multiplier;
        }
        let reward = reward.floor();
        if reward.is_finite() {
            reward.max(1.0)
        } else {
            1.0
        }
    }
}

// ── Defeat ─────────────────────────────────────────────────────

/// Everything that followed a defeat.
#[derive(Clone, Debug, PartialEq)]
pub struct Defeat {
    pub reward: f64,
    pub was_boss: bool,
    pub was_special: bool,
    pub level_up: bool,
    pub artifact: Option<ArtifactKind>,
    /// The next encounter is a boss.
    pub boss_next: bool,
}

/// Pay out a defeated encounter and replace it with the next one.
pub fn resolve_defeat(
    encounter: &mut Encounter,
    player: &mut PlayerState,
    artifacts: &mut Artifacts,
    dice: &mut Dice,
    tuning: &Tuning,
) -> Defeat {
    player.total_villains_defeated += 1;
    let reward = encounter.reward(artifacts, dice, tuning);
    player.earn(reward);
    let artifact = artifacts.roll_drop(dice, tuning);

    let was_boss = encounter.is_boss();
    let was_special = encounter.is_special();
    let mut level_up = false;
    let boss_next;

    if was_boss {
        player.level += 1;
        player.total_bosses_defeated += 1;
        level_up = true;
        boss_next = false;
        *encounter = Encounter::spawn_normal(player.level, tuning);
        info!(event = "level_up", level = player.level, "boss defeated");
    } else if tuning.boss_every_kills > 0
        && player.total_villains_defeated % tuning.boss_every_kills == 0
    {
        boss_next = true;
        *encounter = Encounter::spawn_boss(player.level, tuning);
    } else {
        boss_next = false;
        *encounter = Encounter::spawn_normal(player.level, tuning);
    }

    if let Some(kind) = artifact {
        info!(event = "artifact", id = kind.id(), "artifact found");
    }
    debug!(
        event = "defeat",
        reward,
        kills = player.total_villains_defeated,
        was_boss,
        was_special,
        "villain defeated"
    );

    Defeat {
        reward,
        was_boss,
        was_special,
        level_up,
        artifact,
        boss_next,
    }
}

/// Boss ran out of time: it flees and a normal villain takes its place at
/// the same level. No other penalty.
pub fn resolve_boss_flee(encounter: &mut Encounter, player: &PlayerState, tuning: &Tuning) {
    warn!(event = "boss_fled", level = player.level, "boss fled");
    *encounter = Encounter::spawn_normal(player.level, tuning);
}
