//! Persistence manager: snapshot, encode, migrate, merge and offline
//! catch-up.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: bump whenever fields are added.
//! - `MIN_COMPATIBLE_VERSION`: bump only for breaking changes (a field's
//!   meaning changes or is removed). Anything at or above it loads, with
//!   missing fields filled from defaults.
//!
//! Loading never writes into live state until the whole document has been
//! parsed, migrated and decoded.

pub mod migrate;
pub mod offline;
pub mod store;

pub use migrate::{MIN_COMPATIBLE_VERSION, SAVE_VERSION};

/// Key used by the previous release of the game.
pub const LEGACY_STORAGE_KEY: &str = "heroClickerModularV2";
pub use offline::{check_offline_progress, OfflineReward};
pub use store::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Tuning;
use crate::economy::{ArtifactKind, HeroKind, UpgradeKind};
use crate::error::PersistenceError;
use crate::progression::missions::{mission_def, DailyStats, Mission};
use crate::skills::SkillKind;
use crate::state::{PlayerState, World};

#[derive(Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub game: GameSave,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySave {
    pub count: u32,
    pub rank: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSave {
    pub active: bool,
    pub cooldown_remaining: f64,
    pub duration_remaining: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSave {
    pub id: String,
    pub progress: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionsSave {
    pub last_reset_ms: f64,
    pub active: Vec<MissionSave>,
    pub clicks: u64,
    pub kills: u64,
    pub skills_used: u64,
    pub bosses_defeated: u64,
    pub max_combo: u64,
}

/// The whitelisted, persisted subset of a [`World`]. Maps are keyed by
/// entity id so catalog reordering never shifts counts between entities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSave {
    pub currency: f64,
    pub premium_currency: f64,
    pub run_total_earned: f64,
    pub level: u32,
    pub total_clicks: u64,
    pub total_villains_defeated: u64,
    pub total_bosses_defeated: u64,
    pub best_combo: u32,
    pub last_persist_time: f64,
    /// Cached derived stats. Informational only; recomputed on load.
    pub click_damage: f64,
    pub auto_damage: f64,

    pub heroes: BTreeMap<String, EntitySave>,
    pub upgrades: BTreeMap<String, EntitySave>,
    pub artifacts: BTreeMap<String, bool>,
    pub achievements: BTreeMap<String, bool>,
    pub skills: BTreeMap<String, SkillSave>,
    pub missions: MissionsSave,
}

impl Default for GameSave {
    fn default() -> Self {
        let p = PlayerState::default();
        Self {
            currency: p.currency,
            premium_currency: p.premium_currency,
            run_total_earned: p.run_total_earned,
            level: p.level,
            total_clicks: p.total_clicks,
            total_villains_defeated: p.total_villains_defeated,
            total_bosses_defeated: p.total_bosses_defeated,
            best_combo: p.best_combo,
            last_persist_time: p.last_persist_time,
            click_damage: p.click_damage,
            auto_damage: p.auto_damage,
            heroes: BTreeMap::new(),
            upgrades: BTreeMap::new(),
            artifacts: BTreeMap::new(),
            achievements: BTreeMap::new(),
            skills: BTreeMap::new(),
            missions: MissionsSave::default(),
        }
    }
}

// ── Snapshot ───────────────────────────────────────────────────

/// Copy the persisted subset out of the world.
pub fn extract_save(world: &World) -> SaveData {
    let p = &world.player;
    let eco = &world.economy;
    let missions = &world.progression.missions;
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            currency: p.currency,
            premium_currency: p.premium_currency,
            run_total_earned: p.run_total_earned,
            level: p.level,
            total_clicks: p.total_clicks,
            total_villains_defeated: p.total_villains_defeated,
            total_bosses_defeated: p.total_bosses_defeated,
            best_combo: p.best_combo,
            last_persist_time: p.last_persist_time,
            click_damage: p.click_damage,
            auto_damage: p.auto_damage,
            heroes: eco
                .heroes
                .iter()
                .map(|h| {
                    (
                        h.kind.id().to_string(),
                        EntitySave {
                            count: h.count,
                            rank: h.rank,
                        },
                    )
                })
                .collect(),
            upgrades: eco
                .upgrades
                .iter()
                .map(|u| {
                    (
                        u.kind.id().to_string(),
                        EntitySave {
                            count: u.count,
                            rank: 0,
                        },
                    )
                })
                .collect(),
            artifacts: ArtifactKind::all()
                .iter()
                .map(|a| (a.id().to_string(), eco.artifacts.owns(*a)))
                .collect(),
            achievements: world
                .progression
                .achievements
                .iter()
                .map(|a| (a.def.id.to_string(), a.done))
                .collect(),
            skills: world
                .skills
                .iter()
                .map(|s| {
                    (
                        s.kind.id().to_string(),
                        SkillSave {
                            active: s.active,
                            cooldown_remaining: s.cooldown_remaining,
                            duration_remaining: s.duration_remaining,
                        },
                    )
                })
                .collect(),
            missions: MissionsSave {
                last_reset_ms: missions.last_reset_ms,
                active: missions
                    .active
                    .iter()
                    .map(|m| MissionSave {
                        id: m.def.id.to_string(),
                        progress: m.progress,
                    })
                    .collect(),
                clicks: missions.stats.clicks,
                kills: missions.stats.kills,
                skills_used: missions.stats.skills_used,
                bosses_defeated: missions.stats.bosses_defeated,
                max_combo: missions.stats.max_combo,
            },
        },
    }
}

// ── Merge ──────────────────────────────────────────────────────

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        fallback
    }
}

/// Merge a decoded save into `world` field by field. Entities missing from
/// the save keep their current values; unknown ids are skipped. Derived
/// stats are recomputed afterwards.
pub fn apply_save(world: &mut World, save: &GameSave, tuning: &Tuning) {
    let p = &mut world.player;
    p.currency = finite_or(save.currency, p.currency);
    p.premium_currency = finite_or(save.premium_currency, p.premium_currency);
    p.run_total_earned = finite_or(save.run_total_earned, p.run_total_earned);
    p.level = save.level.max(1);
    p.total_clicks = save.total_clicks;
    p.total_villains_defeated = save.total_villains_defeated;
    p.total_bosses_defeated = save.total_bosses_defeated;
    p.best_combo = save.best_combo;
    p.last_persist_time = finite_or(save.last_persist_time, p.last_persist_time);

    for (id, entry) in &save.heroes {
        match HeroKind::from_id(id) {
            Some(kind) => {
                let hero = world.economy.hero_mut(kind);
                hero.count = entry.count;
                hero.rank = entry.rank;
            }
            None => debug!(event = "save_unknown_id", section = "heroes", id = %id, "skipped"),
        }
    }
    for (id, entry) in &save.upgrades {
        match UpgradeKind::from_id(id) {
            Some(kind) => world.economy.upgrade_mut(kind).count = entry.count,
            None => debug!(event = "save_unknown_id", section = "upgrades", id = %id, "skipped"),
        }
    }
    for (id, owned) in &save.artifacts {
        if let (Some(kind), true) = (ArtifactKind::from_id(id), *owned) {
            world.economy.artifacts.grant(kind);
        }
    }
    for (id, done) in &save.achievements {
        world.progression.achievements.restore(id, *done);
    }
    for (id, entry) in &save.skills {
        if let Some(kind) = SkillKind::from_id(id) {
            let skill = world.skills.get_mut(kind);
            skill.active = entry.active && entry.duration_remaining > 0.0;
            skill.cooldown_remaining =
                finite_or(entry.cooldown_remaining, 0.0).min(skill.max_cooldown);
            skill.duration_remaining =
                finite_or(entry.duration_remaining, 0.0).min(kind.duration());
        }
    }

    let m = &save.missions;
    let missions = &mut world.progression.missions;
    missions.last_reset_ms = finite_or(m.last_reset_ms, 0.0);
    missions.stats = DailyStats {
        clicks: m.clicks,
        kills: m.kills,
        skills_used: m.skills_used,
        bosses_defeated: m.bosses_defeated,
        max_combo: m.max_combo,
    };
    missions.active = m
        .active
        .iter()
        .filter_map(|ms| {
            mission_def(&ms.id).map(|def| Mission {
                def,
                progress: ms.progress.min(def.target),
            })
        })
        .collect();

    world.player.sanitize();
    world
        .economy
        .recompute_derived_stats(&mut world.player, tuning);
}

// ── Encode / decode ────────────────────────────────────────────

pub fn encode(world: &World) -> Result<String, PersistenceError> {
    serde_json::to_string(&extract_save(world)).map_err(PersistenceError::Encode)
}

/// Parse, migrate and decode a stored document without touching any state.
pub fn decode(json: &str) -> Result<SaveData, PersistenceError> {
    let mut doc: Value = serde_json::from_str(json).map_err(PersistenceError::Decode)?;
    migrate::migrate(&mut doc)?;
    serde_json::from_value(doc).map_err(PersistenceError::Decode)
}

/// Snapshot `world` and write it. `last_persist_time` is stamped first.
pub fn save_to(
    store: &mut dyn KeyValueStore,
    key: &str,
    world: &mut World,
    now_ms: f64,
) -> Result<(), PersistenceError> {
    world.player.last_persist_time = now_ms;
    let json = encode(world)?;
    store.set(key, &json)?;
    debug!(event = "saved", bytes = json.len(), "game saved");
    Ok(())
}

/// Move a document stored under `legacy_key` to `key`, migrated to the
/// current version. `Ok(false)` when `key` already holds a document or
/// there is nothing to adopt. On error both entries are left untouched.
pub fn adopt_legacy(
    store: &mut dyn KeyValueStore,
    legacy_key: &str,
    key: &str,
) -> Result<bool, PersistenceError> {
    if store.get(key)?.is_some() {
        return Ok(false);
    }
    let Some(json) = store.get(legacy_key)? else {
        return Ok(false);
    };
    let data = decode(&json)?;
    let migrated = serde_json::to_string(&data).map_err(PersistenceError::Encode)?;
    store.set(key, &migrated)?;
    store.remove(legacy_key)?;
    info!(event = "legacy_adopted", from = legacy_key, to = key, "legacy save imported");
    Ok(true)
}

/// Read, decode and merge. `Ok(false)` when nothing is stored.
///
/// On any error `world` is left exactly as it was and the stored document
/// is kept.
pub fn load_from(
    store: &dyn KeyValueStore,
    key: &str,
    world: &mut World,
    tuning: &Tuning,
) -> Result<bool, PersistenceError> {
    let Some(json) = store.get(key)? else {
        return Ok(false);
    };
    let data = decode(&json).map_err(|e| {
        warn!(event = "load_failed", error = %e, "save document rejected");
        e
    })?;
    apply_save(world, &data.game, tuning);
    info!(
        event = "loaded",
        level = world.player.level,
        currency = world.player.currency,
        "game loaded"
    );
    Ok(true)
}
