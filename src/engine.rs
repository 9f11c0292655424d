//! The owning game context.
//!
//! [`Game`] holds the whole simulation (player, economy, skills, progression,
//! the live encounter, dice and timers) plus the injected clock, storage and
//! sinks. The frontend drives it with [`Game::tick`] once per frame and calls
//! the public operations in response to input; nothing here touches the DOM.
//!
//! Every periodic step inside `tick` runs under [`Game::supervise`], so a
//! panic in one subsystem is logged and the remaining steps still run.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use crate::clock::{clamp_dt, Interval, WallClock};
use crate::combat::{self, Combo, DamageResult, Modifiers};
use crate::config::Tuning;
use crate::economy::{Ascended, EntityId, HeroKind, Purchased};
use crate::encounter::{self, DamageOutcome, Defeat, Encounter};
use crate::error::{GameError, GameResult};
use crate::format::format_number;
use crate::progression::{ClaimAll, ProgressEvent};
use crate::rng::Dice;
use crate::save::{self, KeyValueStore, OfflineReward};
use crate::sinks::{AudioSink, Notice, NullSink, RenderSink};
use crate::skills::{SkillKind, Skills};
use crate::state::World;

pub const DEFAULT_STORAGE_KEY: &str = "hero_clicker_save";

/// Share of drone catches that grant Fury instead of currency.
const DRONE_FURY_CHANCE: f64 = 0.5;

/// Outcome of one click or weak-point strike.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickReport {
    pub damage: DamageResult,
    pub outcome: DamageOutcome,
    pub defeat: Option<Defeat>,
}

/// What one `tick` did. `faults` names the steps that panicked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub dt: f64,
    pub damage: f64,
    pub defeats: u32,
    pub boss_fled: bool,
    pub saved: bool,
    pub faults: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DroneReward {
    Currency(f64),
    Fury,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BootReport {
    pub loaded: bool,
    pub offline: Option<OfflineReward>,
    pub missions_refreshed: bool,
}

/// Cooperative timers, all measured on the simulation clock.
struct Timers {
    autosave: Interval,
    achievements: Interval,
    special: Interval,
    weak_point: Interval,
    drone: Interval,
}

pub struct Game {
    pub tuning: Tuning,
    pub world: World,
    pub encounter: Encounter,
    combo: Combo,
    dice: Dice,
    clock: Box<dyn WallClock>,
    store: Option<Box<dyn KeyValueStore>>,
    render: Box<dyn RenderSink>,
    audio: Box<dyn AudioSink>,
    storage_key: String,
    /// Simulation seconds since construction.
    elapsed: f64,
    timers: Timers,
    /// Seconds left on the live weak point.
    weak_point: Option<f64>,
    /// Seconds left on the live supply drone.
    drone: Option<f64>,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64, clock: Box<dyn WallClock>) -> Self {
        let mut dice = Dice::seeded(seed);
        let first_drone = dice.range(tuning.drone_min_interval, tuning.drone_max_interval);
        let timers = Timers {
            autosave: Interval::new(tuning.save_interval),
            achievements: Interval::new(tuning.achievement_interval),
            special: Interval::new(tuning.special_interval),
            weak_point: Interval::new(tuning.weak_point_interval),
            drone: Interval::new(first_drone),
        };

        let mut world = World::default();
        world
            .economy
            .recompute_derived_stats(&mut world.player, &tuning);
        let encounter = Encounter::spawn_normal(world.player.level, &tuning);

        Self {
            tuning,
            world,
            encounter,
            combo: Combo::default(),
            dice,
            clock,
            store: None,
            render: Box::new(NullSink),
            audio: Box::new(NullSink),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            elapsed: 0.0,
            timers,
            weak_point: None,
            drone: None,
        }
    }

    pub fn with_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn with_render_sink(mut self, sink: impl RenderSink + 'static) -> Self {
        self.render = Box::new(sink);
        self
    }

    pub fn with_audio_sink(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(sink);
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    // ── Queries ────────────────────────────────────────────────

    /// Every modifier source, read fresh so a just-completed achievement
    /// counts on the very next resolution.
    pub fn modifiers(&self) -> Modifiers {
        let artifacts = &self.world.economy.artifacts;
        Modifiers {
            premium_currency: self.world.player.premium_currency,
            achievement_bonus: self.world.progression.achievement_bonus(),
            artifact_click_bonus: artifacts.click_bonus(&self.tuning),
            artifact_dps_bonus: artifacts.dps_bonus(&self.tuning),
            fury: self.world.skills.is_active(SkillKind::Fury),
            crit_boost: self.world.skills.is_active(SkillKind::CritBoost),
            team: self.world.skills.is_active(SkillKind::TeamBoost),
        }
    }

    pub fn current_dps(&self) -> f64 {
        combat::current_dps(&self.world.player, &self.modifiers(), &self.tuning)
    }

    /// DPS without temporary skill buffs.
    pub fn base_dps(&self) -> f64 {
        combat::base_dps(&self.world.player, &self.modifiers(), &self.tuning)
    }

    pub fn next_cost(&self, entity: EntityId) -> f64 {
        self.world.economy.next_cost(entity, &self.tuning)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn weak_point_live(&self) -> bool {
        self.weak_point.is_some()
    }

    pub fn drone_live(&self) -> bool {
        self.drone.is_some()
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// The game's dice, for scripted runs.
    pub fn dice(&mut self) -> &mut Dice {
        &mut self.dice
    }

    // ── Update loop ────────────────────────────────────────────

    /// Advance the simulation by `raw_dt` seconds (clamped to `max_dt`).
    pub fn tick(&mut self, raw_dt: f64) -> TickReport {
        let dt = clamp_dt(raw_dt, self.tuning.max_dt);
        let mut report = TickReport {
            dt,
            ..TickReport::default()
        };
        if dt <= 0.0 {
            return report;
        }
        self.elapsed += dt;
        let now = self.elapsed;
        let mut faults = Vec::new();

        self.supervise("combo", &mut faults, |g| g.step_combo(now));
        self.supervise("skills", &mut faults, |g| g.step_skills(dt));
        if let Some((damage, defeated)) =
            self.supervise("combat", &mut faults, |g| g.step_combat(dt))
        {
            report.damage = damage;
            report.defeats = u32::from(defeated);
        }
        if let Some(fled) = self.supervise("encounter", &mut faults, |g| g.step_encounter(dt)) {
            report.boss_fled = fled;
        }
        self.supervise("special", &mut faults, |g| g.step_special(now));
        self.supervise("weak_point", &mut faults, |g| g.step_weak_point(dt, now));
        self.supervise("drone", &mut faults, |g| g.step_drone(dt, now));
        self.supervise("sanitize", &mut faults, |g| g.step_sanitize());
        self.supervise("progression", &mut faults, |g| g.step_progression(now));
        if let Some(saved) =
            self.supervise("autosave", &mut faults, |g| g.step_autosave(now))
        {
            report.saved = saved;
        }
        self.supervise("emit", &mut faults, |g| {
            g.emit_stats();
            g.emit_health();
        });

        report.faults = faults;
        report
    }

    /// Run one tick step, catching a panic so the rest of the tick proceeds.
    fn supervise<T>(
        &mut self,
        step: &'static str,
        faults: &mut Vec<&'static str>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> Option<T> {
        match panic::catch_unwind(AssertUnwindSafe(|| f(self))) {
            Ok(value) => Some(value),
            Err(_) => {
                let p = &self.world.player;
                error!(
                    event = "tick_fault",
                    step,
                    level = p.level,
                    currency = p.currency,
                    kills = p.total_villains_defeated,
                    "tick step panicked; continuing"
                );
                faults.push(step);
                None
            }
        }
    }

    fn step_combo(&mut self, now: f64) {
        if self.combo.decay(&mut self.world.player, now, &self.tuning) {
            self.render.on_combo_changed(0, 1.0);
        }
    }

    fn step_skills(&mut self, dt: f64) {
        let changing: Vec<SkillKind> = self
            .world
            .skills
            .iter()
            .filter(|s| s.active || s.cooldown_remaining > 0.0)
            .map(|s| s.kind)
            .collect();
        for kind in self.world.skills.tick(dt) {
            debug!(event = "skill_expired", skill = kind.id(), "skill effect ended");
        }
        for kind in changing {
            self.emit_skill(kind);
        }
    }

    fn step_combat(&mut self, dt: f64) -> (f64, bool) {
        let amount = combat::resolve_tick(&self.world.player, &self.modifiers(), &self.tuning, dt);
        if amount <= 0.0 {
            return (0.0, false);
        }
        match self.apply_damage(amount) {
            (DamageOutcome::Hit { dealt }, _) => (dealt, false),
            (DamageOutcome::Defeated { dealt }, _) => (dealt, true),
            _ => (0.0, false),
        }
    }

    fn step_encounter(&mut self, dt: f64) -> bool {
        self.encounter.apply_special_effects(dt, &self.tuning);
        if !self.encounter.tick_boss_timer(dt) {
            return false;
        }
        let name = self.encounter.name;
        encounter::resolve_boss_flee(&mut self.encounter, &self.world.player, &self.tuning);
        self.render.on_notice(Notice::BossFled { name });
        self.emit_encounter();
        true
    }

    fn step_special(&mut self, now: f64) {
        if !self.timers.special.due(now) || self.encounter.is_boss() {
            return;
        }
        if let Some(special) = self.encounter.check_special_spawn(&mut self.dice, &self.tuning) {
            self.render.on_notice(Notice::SpecialAppeared {
                name: special.name(),
            });
            self.emit_encounter();
        }
    }

    fn step_weak_point(&mut self, dt: f64, now: f64) {
        if let Some(remaining) = self.weak_point.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.weak_point = None;
            }
        }
        if !self.timers.weak_point.due(now)
            || self.weak_point.is_some()
            || self.encounter.is_boss()
        {
            return;
        }
        if self.dice.chance(self.tuning.weak_point_chance) {
            self.weak_point = Some(self.tuning.weak_point_lifetime);
            self.render.on_notice(Notice::WeakPointAppeared);
        }
    }

    fn step_drone(&mut self, dt: f64, now: f64) {
        if let Some(remaining) = self.drone.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.drone = None;
                debug!(event = "drone_missed", "supply drone left");
            }
        }
        if self.drone.is_some() || !self.timers.drone.due(now) {
            return;
        }
        self.drone = Some(self.tuning.drone_lifetime);
        let next = self
            .dice
            .range(self.tuning.drone_min_interval, self.tuning.drone_max_interval);
        self.timers.drone.rearm(now, next);
        self.render.on_notice(Notice::DroneAppeared);
    }

    fn step_sanitize(&mut self) {
        let player = self.world.player.sanitize();
        let encounter = self.encounter.sanitize(&self.tuning);
        if player {
            self.world
                .economy
                .recompute_derived_stats(&mut self.world.player, &self.tuning);
        }
        if player || encounter {
            self.emit_all();
        }
    }

    fn step_progression(&mut self, now: f64) {
        if self.timers.achievements.due(now) {
            self.check_achievements();
            self.check_daily_reset();
        }
    }

    fn step_autosave(&mut self, now: f64) -> bool {
        self.timers.autosave.due(now) && self.save()
    }

    // ── Damage and defeat ──────────────────────────────────────

    fn apply_damage(&mut self, amount: f64) -> (DamageOutcome, Option<Defeat>) {
        let outcome = self.encounter.apply_damage(amount, &mut self.dice, &self.tuning);
        match outcome {
            DamageOutcome::Defeated { .. } => (outcome, Some(self.handle_defeat())),
            _ => (outcome, None),
        }
    }

    fn handle_defeat(&mut self) -> Defeat {
        let defeat = encounter::resolve_defeat(
            &mut self.encounter,
            &mut self.world.player,
            &mut self.world.economy.artifacts,
            &mut self.dice,
            &self.tuning,
        );

        self.world.progression.update_progress(ProgressEvent::Kill);
        if defeat.was_boss {
            self.world.progression.update_progress(ProgressEvent::BossKill);
        }

        self.render.on_notice(Notice::VillainDefeated {
            reward: defeat.reward,
        });
        if let Some(kind) = defeat.artifact {
            self.render.on_notice(Notice::ArtifactFound { name: kind.name() });
        }
        if defeat.level_up {
            self.render.on_notice(Notice::LevelUp {
                level: self.world.player.level,
            });
            self.audio.on_level_up();
            // Level achievements must apply before the next resolution.
            self.check_achievements();
        }
        if defeat.boss_next {
            self.weak_point = None;
            self.render.on_notice(Notice::BossAppeared {
                name: self.encounter.name,
            });
        }
        self.emit_encounter();
        defeat
    }

    // ── Player operations ──────────────────────────────────────

    pub fn click(&mut self) -> ClickReport {
        self.strike(false)
    }

    /// Hit the live weak point for a forced critical. `None` if there is none.
    pub fn strike_weak_point(&mut self) -> Option<ClickReport> {
        self.weak_point.take()?;
        Some(self.strike(true))
    }

    fn strike(&mut self, forced_critical: bool) -> ClickReport {
        let mods = self.modifiers();
        let damage = combat::resolve_click(
            &mut self.world.player,
            &mut self.combo,
            &mods,
            &mut self.dice,
            &self.tuning,
            self.elapsed,
            forced_critical,
        );

        let player = &self.world.player;
        let (combo_count, combo_multiplier) = (player.combo_count, player.combo_multiplier);
        self.world.progression.update_progress(ProgressEvent::Click);
        self.world
            .progression
            .update_progress(ProgressEvent::Combo(combo_count));

        self.audio.on_click(damage.is_critical);
        self.render.on_combo_changed(combo_count, combo_multiplier);
        if damage.is_critical {
            self.render.on_notice(Notice::Critical {
                amount: damage.amount,
            });
        }

        let (outcome, defeat) = self.apply_damage(damage.amount);
        if outcome == DamageOutcome::Evaded {
            self.render.on_notice(Notice::Evaded);
        }
        self.emit_stats();
        self.emit_health();

        ClickReport {
            damage,
            outcome,
            defeat,
        }
    }

    pub fn purchase(&mut self, entity: EntityId) -> GameResult<Purchased> {
        let purchased = self
            .world
            .economy
            .purchase(entity, &mut self.world.player, &self.tuning)?;
        self.audio.on_purchase();
        if purchased.milestone_reached {
            self.render.on_notice(Notice::MilestoneReached {
                name: entity.name(),
                count: purchased.count,
            });
            self.audio.on_level_up();
        }
        self.emit_stats();
        Ok(purchased)
    }

    /// [`Game::purchase`] by save-document id.
    pub fn purchase_by_id(&mut self, id: &str) -> GameResult<Purchased> {
        let entity = EntityId::parse(id).ok_or_else(|| GameError::UnknownEntity(id.to_string()))?;
        self.purchase(entity)
    }

    pub fn ascend(&mut self, kind: HeroKind) -> GameResult<Ascended> {
        let ascended = self
            .world
            .economy
            .ascend(kind, &mut self.world.player, &self.tuning)?;
        self.render.on_notice(Notice::Ascended {
            name: kind.name(),
            rank: ascended.rank,
        });
        self.audio.on_level_up();
        self.emit_stats();
        Ok(ascended)
    }

    pub fn activate_skill(&mut self, kind: SkillKind) -> GameResult<()> {
        self.world.skills.activate(kind)?;
        self.world.progression.update_progress(ProgressEvent::SkillUse);
        self.emit_skill(kind);
        self.emit_stats();
        Ok(())
    }

    pub fn claim_mission(&mut self, id: &str) -> GameResult<f64> {
        let reward = self.world.progression.missions.claim(id, &mut self.world.player)?;
        self.render.on_notice(Notice::MissionClaimed { reward });
        self.emit_stats();
        Ok(reward)
    }

    pub fn claim_all_missions(&mut self) -> GameResult<ClaimAll> {
        let claimed = self
            .world
            .progression
            .missions
            .claim_all(&mut self.world.player, &self.tuning)?;
        self.render.on_notice(Notice::MissionClaimed {
            reward: claimed.total_reward,
        });
        self.emit_stats();
        Ok(claimed)
    }

    /// Premium currency this run would convert into right now.
    pub fn prestige_gain(&self) -> f64 {
        let gain = (self.world.player.run_total_earned / self.tuning.prestige_divisor).floor();
        if gain.is_finite() {
            gain.max(0.0)
        } else {
            0.0
        }
    }

    /// Convert run earnings into premium currency and restart the run.
    ///
    /// Currency, run total, level, hero and upgrade counts and ranks, combo,
    /// skills and the encounter reset. Premium currency, artifacts,
    /// achievements, lifetime counters and missions carry over.
    pub fn prestige(&mut self) -> GameResult<f64> {
        let gained = self.prestige_gain();
        if gained < 1.0 {
            return Err(GameError::NotEligible {
                reason: format!(
                    "earn {} this run to prestige",
                    format_number(self.tuning.prestige_divisor)
                ),
            });
        }

        let player = &mut self.world.player;
        player.premium_currency += gained;
        player.currency = 0.0;
        player.run_total_earned = 0.0;
        player.level = 1;
        player.combo_count = 0;
        player.combo_multiplier = 1.0;
        self.combo = Combo::default();
        self.world.skills = Skills::default();
        self.world.economy.reset_run();
        self.world
            .economy
            .recompute_derived_stats(&mut self.world.player, &self.tuning);
        self.encounter = Encounter::spawn_normal(1, &self.tuning);
        self.weak_point = None;
        self.drone = None;

        info!(
            event = "prestige",
            gained,
            premium = self.world.player.premium_currency,
            "run converted"
        );
        self.render.on_notice(Notice::Prestige { gained });
        self.emit_all();
        self.save();
        Ok(gained)
    }

    /// Catch the live supply drone. `None` if there is none.
    pub fn catch_drone(&mut self) -> Option<DroneReward> {
        self.drone.take()?;
        let wants_fury = self.dice.chance(DRONE_FURY_CHANCE);
        if wants_fury && self.world.skills.activate(SkillKind::Fury).is_ok() {
            self.world.progression.update_progress(ProgressEvent::SkillUse);
            self.render.on_notice(Notice::DroneFury);
            self.emit_skill(SkillKind::Fury);
            self.emit_stats();
            return Some(DroneReward::Fury);
        }

        let amount = (self.encounter.max_health * self.tuning.drone_gold_fraction)
            .floor()
            .max(self.tuning.drone_gold_min);
        self.world.player.earn(amount);
        info!(event = "drone_caught", amount, "supply drone caught");
        self.render.on_notice(Notice::DroneCurrency { amount });
        self.emit_stats();
        Some(DroneReward::Currency(amount))
    }

    // ── Progression ────────────────────────────────────────────

    /// Evaluate achievements now. The bonus cache is current on return.
    pub fn check_achievements(&mut self) -> usize {
        let unlocked = self.world.progression.check_achievements(&self.world.player);
        for def in &unlocked {
            self.render.on_notice(Notice::AchievementUnlocked { name: def.name });
        }
        if !unlocked.is_empty() {
            self.emit_stats();
        }
        unlocked.len()
    }

    pub fn check_daily_reset(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        let reset = self
            .world
            .progression
            .missions
            .check_daily_reset(now_ms, &mut self.dice, &self.tuning);
        if reset {
            self.render.on_notice(Notice::MissionsRefreshed);
        }
        reset
    }

    // ── Persistence ────────────────────────────────────────────

    /// Snapshot and write. False (and a logged warning) on any failure.
    pub fn save(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        let Some(store) = self.store.as_deref_mut() else {
            debug!(event = "save_skipped", "no durable storage");
            return false;
        };
        match save::save_to(store, &self.storage_key, &mut self.world, now_ms) {
            Ok(()) => {
                self.render.on_notice(Notice::Saved);
                true
            }
            Err(e) => {
                let p = &self.world.player;
                warn!(
                    event = "save_failed",
                    error = %e,
                    level = p.level,
                    currency = p.currency,
                    kills = p.total_villains_defeated,
                    "save failed"
                );
                self.render.on_notice(Notice::SaveFailed);
                false
            }
        }
    }

    /// Merge the stored document into the live state. False if nothing was
    /// stored or the document was rejected; live state is untouched then.
    pub fn load(&mut self) -> bool {
        let Some(store) = self.store.as_deref_mut() else {
            return false;
        };
        if let Err(e) = save::adopt_legacy(store, save::LEGACY_STORAGE_KEY, &self.storage_key) {
            warn!(event = "legacy_import_failed", error = %e, "legacy save left in place");
            self.render.on_notice(Notice::StartingFresh);
            return false;
        }
        match save::load_from(store, &self.storage_key, &mut self.world, &self.tuning) {
            Ok(true) => {
                self.encounter = Encounter::spawn_normal(self.world.player.level, &self.tuning);
                self.combo = Combo::default();
                self.weak_point = None;
                self.drone = None;
                self.emit_all();
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(event = "load_failed", error = %e, "starting fresh");
                self.render.on_notice(Notice::StartingFresh);
                false
            }
        }
    }

    /// Delete the stored document and start a fresh game in memory.
    pub fn reset_save(&mut self) -> bool {
        let removed = match self.store.as_deref_mut() {
            Some(store) => match store.remove(&self.storage_key) {
                Ok(()) => true,
                Err(e) => {
                    warn!(event = "reset_failed", error = %e, "could not remove save");
                    false
                }
            },
            None => false,
        };
        self.world = World::default();
        self.world
            .economy
            .recompute_derived_stats(&mut self.world.player, &self.tuning);
        self.encounter = Encounter::spawn_normal(1, &self.tuning);
        self.combo = Combo::default();
        self.weak_point = None;
        self.drone = None;
        info!(event = "reset", removed, "game reset");
        self.emit_all();
        removed
    }

    /// Pay out time spent away, using the buff-free DPS path.
    pub fn check_offline_progress(&mut self) -> Option<OfflineReward> {
        let now_ms = self.clock.now_ms();
        let dps = self.base_dps();
        let reward =
            save::check_offline_progress(&mut self.world.player, dps, now_ms, &self.tuning)?;
        self.render.on_notice(Notice::OfflineEarnings {
            time: reward.time.clone(),
            amount: reward.amount,
        });
        self.emit_stats();
        Some(reward)
    }

    /// Startup sequence: load, offline catch-up, daily missions, first paint.
    pub fn boot(&mut self) -> BootReport {
        let loaded = self.load();
        let offline = self.check_offline_progress();
        let missions_refreshed = self.check_daily_reset();
        self.check_achievements();
        self.emit_all();
        info!(
            event = "boot",
            loaded,
            offline = offline.is_some(),
            level = self.world.player.level,
            "game started"
        );
        BootReport {
            loaded,
            offline,
            missions_refreshed,
        }
    }

    // ── Sink emission ──────────────────────────────────────────

    fn emit_stats(&mut self) {
        let dps = self.current_dps();
        let p = &self.world.player;
        self.render.on_stats_changed(p.currency, dps, p.level);
    }

    fn emit_health(&mut self) {
        self.render
            .on_health_changed(self.encounter.current_health, self.encounter.max_health);
    }

    fn emit_encounter(&mut self) {
        self.render
            .on_encounter_changed(self.encounter.name, self.encounter.is_boss());
        self.emit_health();
    }

    fn emit_skill(&mut self, kind: SkillKind) {
        let s = self.world.skills.get(kind);
        self.render
            .on_skill_state_changed(kind, s.cooldown_remaining, s.max_cooldown, s.active);
    }

    /// Push the complete visible state to the render sink.
    pub fn emit_all(&mut self) {
        self.emit_stats();
        self.emit_encounter();
        let p = &self.world.player;
        self.render.on_combo_changed(p.combo_count, p.combo_multiplier);
        for kind in SkillKind::all() {
            self.emit_skill(*kind);
        }
    }
}
