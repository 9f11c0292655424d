//! One-shot achievements and the additive damage bonus they grant.

use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AchievementKind {
    Kills,
    Clicks,
    Level,
    Combo,
}

#[derive(Debug)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: AchievementKind,
    pub threshold: u64,
    pub reward_multiplier: f64,
}

pub static ACHIEVEMENTS: [AchievementDef; 4] = [
    AchievementDef {
        id: "kill100",
        name: "Street Sweeper",
        kind: AchievementKind::Kills,
        threshold: 100,
        reward_multiplier: 0.1,
    },
    AchievementDef {
        id: "click1000",
        name: "Iron Fist",
        kind: AchievementKind::Clicks,
        threshold: 1000,
        reward_multiplier: 0.1,
    },
    AchievementDef {
        id: "level10",
        name: "City Guardian",
        kind: AchievementKind::Level,
        threshold: 10,
        reward_multiplier: 0.2,
    },
    AchievementDef {
        id: "combo50",
        name: "Unstoppable",
        kind: AchievementKind::Combo,
        threshold: 50,
        reward_multiplier: 0.1,
    },
];

/// Lifetime counters achievements are measured against. Never reset daily.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LifetimeCounters {
    pub kills: u64,
    pub clicks: u64,
    pub level: u64,
    pub best_combo: u64,
}

impl LifetimeCounters {
    fn get(&self, kind: AchievementKind) -> u64 {
        match kind {
            AchievementKind::Kills => self.kills,
            AchievementKind::Clicks => self.clicks,
            AchievementKind::Level => self.level,
            AchievementKind::Combo => self.best_combo,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    pub def: &'static AchievementDef,
    pub done: bool,
}

/// Achievement flags plus the cached bonus sum read by combat.
#[derive(Clone, Debug, PartialEq)]
pub struct Achievements {
    list: Vec<Achievement>,
    bonus: f64,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            list: ACHIEVEMENTS
                .iter()
                .map(|def| Achievement { def, done: false })
                .collect(),
            bonus: 0.0,
        }
    }
}

impl PartialEq for AchievementDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Achievements {
    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.list.iter()
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.list.iter().any(|a| a.def.id == id && a.done)
    }

    /// Sum of `reward_multiplier` over completed achievements.
    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    /// Complete every achievement whose counter crossed its threshold.
    /// The bonus cache is rebuilt before returning.
    pub fn check(&mut self, counters: &LifetimeCounters) -> Vec<&'static AchievementDef> {
        let mut newly_done = Vec::new();
        for a in self.list.iter_mut().filter(|a| !a.done) {
            if counters.get(a.def.kind) >= a.def.threshold {
                a.done = true;
                newly_done.push(a.def);
                info!(event = "achievement", id = a.def.id, "achievement unlocked");
            }
        }
        if !newly_done.is_empty() {
            self.recompute_bonus();
        }
        newly_done
    }

    /// Restore a done flag from a save. Unknown ids are ignored.
    pub fn restore(&mut self, id: &str, done: bool) {
        if let Some(a) = self.list.iter_mut().find(|a| a.def.id == id) {
            a.done = done;
        }
        self.recompute_bonus();
    }

    fn recompute_bonus(&mut self) {
        self.bonus = self
            .list
            .iter()
            .filter(|a| a.done)
            .map(|a| a.def.reward_multiplier)
            .sum();
    }
}
