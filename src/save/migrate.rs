//! Forward migration of older save documents.
//!
//! Migration runs on the untyped `serde_json::Value` before typed decoding,
//! one step per version, so an old save is never lost to a schema change.
//!
//! Version history:
//! - v1: the legacy flat document (camelCase keys, per-entity objects such
//!   as `{"rookie": {"count": 7}}`). Documents with no `version` key are v1.
//! - v2: `{ "version": 2, "game": { ... } }` with snake_case fields, entity
//!   ranks, skills and missions.

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::PersistenceError;
use crate::progression::missions::{mission_def, MissionKind};

pub const SAVE_VERSION: u32 = 2;
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Legacy scalar key → current key, and whether the target is an integer.
const V1_SCALARS: [(&str, &str, bool); 9] = [
    ("score", "currency", false),
    ("crystals", "premium_currency", false),
    ("totalScoreRun", "run_total_earned", false),
    ("level", "level", true),
    ("totalClicks", "total_clicks", true),
    ("villainsDefeated", "total_villains_defeated", true),
    ("lastSaveTime", "last_persist_time", false),
    ("clickDamage", "click_damage", false),
    ("autoDamage", "auto_damage", false),
];

/// Version of a parsed document. A missing key means the legacy format.
pub fn document_version(doc: &Value) -> u32 {
    match doc.get("version") {
        None => 1,
        Some(v) => v.as_u64().map(|n| n as u32).unwrap_or(0),
    }
}

/// Bring `doc` up to [`SAVE_VERSION`]. Returns the version it started at.
pub fn migrate(doc: &mut Value) -> Result<u32, PersistenceError> {
    let found = document_version(doc);
    if found > SAVE_VERSION {
        return Err(PersistenceError::FutureVersion {
            found,
            current: SAVE_VERSION,
        });
    }
    if found < MIN_COMPATIBLE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found,
            min: MIN_COMPATIBLE_VERSION,
        });
    }

    let mut version = found;
    while version < SAVE_VERSION {
        if version == 1 {
            migrate_v1_to_v2(doc);
        }
        version += 1;
    }
    if found < SAVE_VERSION {
        warn!(event = "save_migrated", from = found, to = SAVE_VERSION, "migrated old save");
    }
    Ok(found)
}

fn migrate_v1_to_v2(doc: &mut Value) {
    let legacy = match doc.as_object() {
        Some(obj) => obj.clone(),
        None => Map::new(),
    };

    let mut game = Map::new();
    for (old, new, integer) in V1_SCALARS {
        let Some(n) = legacy.get(old).and_then(Value::as_f64) else {
            continue;
        };
        if !n.is_finite() || n < 0.0 {
            continue;
        }
        let value = if integer { json!(n.floor() as u64) } else { json!(n) };
        game.insert(new.to_string(), value);
    }
    game.insert("heroes".into(), entity_map(legacy.get("heroes")));
    game.insert("upgrades".into(), entity_map(legacy.get("upgrades")));
    game.insert("artifacts".into(), flag_map(legacy.get("artifacts"), "owned"));
    game.insert("achievements".into(), flag_map(legacy.get("achievements"), "done"));
    game.insert("skills".into(), skill_map(legacy.get("skills")));
    game.insert("missions".into(), missions_section(legacy.get("dailyMissions")));

    *doc = json!({ "version": 2, "game": Value::Object(game) });
}

/// `{"id": {"count": n, ...}}` → `{"id": {"count": n, "rank": r}}`.
fn entity_map(section: Option<&Value>) -> Value {
    let mut out = Map::new();
    if let Some(obj) = section.and_then(Value::as_object) {
        for (id, entry) in obj {
            let count = whole(entry.get("count"));
            let rank = whole(entry.get("rank"));
            out.insert(id.clone(), json!({ "count": count, "rank": rank }));
        }
    }
    Value::Object(out)
}

/// `{"fury": {"active", "cooldown", "duration", ...}}` → [`SkillSave`] shape.
///
/// [`SkillSave`]: super::SkillSave
fn skill_map(section: Option<&Value>) -> Value {
    let mut out = Map::new();
    if let Some(obj) = section.and_then(Value::as_object) {
        for (id, entry) in obj {
            out.insert(
                id.clone(),
                json!({
                    "active": entry.get("active").and_then(Value::as_bool).unwrap_or(false),
                    "cooldown_remaining": amount(entry.get("cooldown")),
                    "duration_remaining": amount(entry.get("duration")),
                }),
            );
        }
    }
    Value::Object(out)
}

/// The legacy `dailyMissions` block → [`MissionsSave`] shape.
///
/// Legacy kill missions counted lifetime kills and there was no per-day
/// kill counter, so today's kills start from the best kill-mission progress.
///
/// [`MissionsSave`]: super::MissionsSave
fn missions_section(section: Option<&Value>) -> Value {
    let Some(daily) = section.and_then(Value::as_object) else {
        return json!({});
    };
    let stats = daily.get("stats");
    let stat = |key: &str| whole(stats.and_then(|s| s.get(key)));
    let progress = daily.get("progress");

    let mut kills = 0;
    let mut active = Vec::new();
    for entry in daily
        .get("currentMissions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
    {
        // Full mission objects in the legacy format; bare ids are accepted too.
        let Some(id) = entry.get("id").and_then(Value::as_str).or_else(|| entry.as_str()) else {
            continue;
        };
        let done = whole(progress.and_then(|p| p.get(id)));
        if mission_def(id).is_some_and(|def| def.kind == MissionKind::Kills) {
            kills = kills.max(done);
        }
        active.push(json!({ "id": id, "progress": done }));
    }

    json!({
        "last_reset_ms": amount(daily.get("lastReset")),
        "active": active,
        "clicks": stat("clicksToday"),
        "kills": kills,
        "skills_used": stat("skillsUsed"),
        "bosses_defeated": stat("bossesDefeated"),
        "max_combo": stat("maxComboToday"),
    })
}

/// Finite, non-negative number or 0.
fn amount(v: Option<&Value>) -> f64 {
    v.and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0)
}

fn whole(v: Option<&Value>) -> u64 {
    v.and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.floor() as u64)
        .unwrap_or(0)
}

/// `{"id": {"<flag>": true}}` → `{"id": true}`.
fn flag_map(section: Option<&Value>, flag: &str) -> Value {
    let mut out = Map::new();
    if let Some(obj) = section.and_then(Value::as_object) {
        for (id, entry) in obj {
            let set = entry.get(flag).and_then(Value::as_bool).unwrap_or(false);
            out.insert(id.clone(), Value::Bool(set));
        }
    }
    Value::Object(out)
}
