//! Daily missions driven by per-day counters.

use tracing::info;

use crate::config::Tuning;
use crate::error::{GameError, GameResult};
use crate::rng::Dice;
use crate::state::PlayerState;

/// A single real game event fed to the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Click,
    Kill,
    SkillUse,
    BossKill,
    /// Current chained-click count; the day's maximum is kept.
    Combo(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionKind {
    Clicks,
    Kills,
    SkillUses,
    BossKills,
    Combo,
}

#[derive(Debug, PartialEq)]
pub struct MissionDef {
    pub id: &'static str,
    pub description: &'static str,
    pub kind: MissionKind,
    pub target: u64,
    pub reward_premium: f64,
}

pub static MISSION_POOL: [MissionDef; 5] = [
    MissionDef {
        id: "m1",
        description: "Click 500 times",
        kind: MissionKind::Clicks,
        target: 500,
        reward_premium: 2.0,
    },
    MissionDef {
        id: "m2",
        description: "Defeat 50 villains",
        kind: MissionKind::Kills,
        target: 50,
        reward_premium: 2.0,
    },
    MissionDef {
        id: "m3",
        description: "Use 5 skills",
        kind: MissionKind::SkillUses,
        target: 5,
        reward_premium: 3.0,
    },
    MissionDef {
        id: "m4",
        description: "Defeat 2 bosses",
        kind: MissionKind::BossKills,
        target: 2,
        reward_premium: 4.0,
    },
    MissionDef {
        id: "m5",
        description: "Reach a 50-hit combo",
        kind: MissionKind::Combo,
        target: 50,
        reward_premium: 3.0,
    },
];

pub fn mission_def(id: &str) -> Option<&'static MissionDef> {
    MISSION_POOL.iter().find(|m| m.id == id)
}

/// Counters that reset with the daily mission set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DailyStats {
    pub clicks: u64,
    pub kills: u64,
    pub skills_used: u64,
    pub bosses_defeated: u64,
    pub max_combo: u64,
}

impl DailyStats {
    fn get(&self, kind: MissionKind) -> u64 {
        match kind {
            MissionKind::Clicks => self.clicks,
            MissionKind::Kills => self.kills,
            MissionKind::SkillUses => self.skills_used,
            MissionKind::BossKills => self.bosses_defeated,
            MissionKind::Combo => self.max_combo,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mission {
    pub def: &'static MissionDef,
    /// Capped at `def.target`.
    pub progress: u64,
}

impl Mission {
    pub fn new(def: &'static MissionDef) -> Self {
        Self { def, progress: 0 }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.def.target
    }
}

/// Result of claiming every completed mission at once.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimAll {
    pub claimed: Vec<&'static str>,
    pub total_reward: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Missions {
    pub active: Vec<Mission>,
    pub stats: DailyStats,
    /// Epoch milliseconds of the last daily reset. 0 forces a reset.
    pub last_reset_ms: f64,
}

impl Missions {
    /// Record one event and refresh progress.
    pub fn update_progress(&mut self, event: ProgressEvent, amount: u64) {
        match event {
            ProgressEvent::Click => self.stats.clicks += amount,
            ProgressEvent::Kill => self.stats.kills += amount,
            ProgressEvent::SkillUse => self.stats.skills_used += amount,
            ProgressEvent::BossKill => self.stats.bosses_defeated += amount,
            ProgressEvent::Combo(count) => {
                self.stats.max_combo = self.stats.max_combo.max(count as u64);
            }
        }
        self.refresh_progress();
    }

    /// Recompute every mission's progress from the day's counters.
    pub fn refresh_progress(&mut self) {
        let stats = self.stats;
        for m in &mut self.active {
            if m.is_complete() {
                continue;
            }
            m.progress = stats.get(m.def.kind).min(m.def.target);
        }
    }

    /// Start a new day if the reset period has elapsed. Returns true on reset.
    pub fn check_daily_reset(&mut self, now_ms: f64, dice: &mut Dice, tuning: &Tuning) -> bool {
        let never_reset = self.last_reset_ms <= 0.0;
        if !never_reset && now_ms - self.last_reset_ms < tuning.mission_reset_secs * 1000.0 {
            return false;
        }
        let mut pool: Vec<&'static MissionDef> = MISSION_POOL.iter().collect();
        dice.shuffle(&mut pool);
        self.active = pool
            .into_iter()
            .take(tuning.missions_per_day)
            .map(Mission::new)
            .collect();
        self.stats = DailyStats::default();
        self.last_reset_ms = now_ms;
        info!(
            event = "daily_reset",
            missions = ?self.active.iter().map(|m| m.def.id).collect::<Vec<_>>(),
            "daily missions drawn"
        );
        true
    }

    pub fn claimable(&self) -> impl Iterator<Item = &Mission> {
        self.active.iter().filter(|m| m.is_complete())
    }

    /// Grant a completed mission's reward and remove it from the set.
    pub fn claim(&mut self, id: &str, player: &mut PlayerState) -> GameResult<f64> {
        let idx = self
            .active
            .iter()
            .position(|m| m.def.id == id)
            .ok_or_else(|| GameError::UnknownEntity(id.to_string()))?;
        if !self.active[idx].is_complete() {
            return Err(GameError::MissionNotReady(id.to_string()));
        }
        let mission = self.active.remove(idx);
        player.premium_currency += mission.def.reward_premium;
        info!(
            event = "mission_claimed",
            id,
            reward = mission.def.reward_premium,
            "mission claimed"
        );
        Ok(mission.def.reward_premium)
    }

    /// Claim every completed mission and add the claim-all bonus.
    pub fn claim_all(&mut self, player: &mut PlayerState, tuning: &Tuning) -> GameResult<ClaimAll> {
        let ids: Vec<&'static str> = self.claimable().map(|m| m.def.id).collect();
        if ids.is_empty() {
            return Err(GameError::MissionNotReady("no completed missions".to_string()));
        }
        let mut total_reward = 0.0;
        for id in &ids {
            total_reward += self.claim(id, player)?;
        }
        player.premium_currency += tuning.claim_all_bonus;
        total_reward += tuning.claim_all_bonus;
        Ok(ClaimAll {
            claimed: ids,
            total_reward,
        })
    }
}
