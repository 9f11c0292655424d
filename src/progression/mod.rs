//! Progression tracker: lifetime achievements and daily missions.

pub mod achievements;
pub mod missions;

pub use achievements::{Achievement, AchievementDef, AchievementKind, Achievements, LifetimeCounters};
pub use missions::{ClaimAll, DailyStats, Mission, MissionDef, MissionKind, Missions, ProgressEvent};

use crate::state::PlayerState;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Progression {
    pub achievements: Achievements,
    pub missions: Missions,
}

impl Progression {
    /// Feed one event into the per-day counters.
    pub fn update_progress(&mut self, event: ProgressEvent) {
        self.missions.update_progress(event, 1);
    }

    /// Check achievements against the player's lifetime counters. The bonus
    /// cache is current as soon as this returns.
    pub fn check_achievements(&mut self, player: &PlayerState) -> Vec<&'static AchievementDef> {
        self.achievements.check(&lifetime_counters(player))
    }

    pub fn achievement_bonus(&self) -> f64 {
        self.achievements.bonus()
    }
}

pub fn lifetime_counters(player: &PlayerState) -> LifetimeCounters {
    LifetimeCounters {
        kills: player.total_villains_defeated,
        clicks: player.total_clicks,
        level: player.level as u64,
        best_combo: player.best_combo as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievement_check_reads_player_counters() {
        let mut p = Progression::default();
        let player = PlayerState {
            total_villains_defeated: 100,
            best_combo: 50,
            ..PlayerState::default()
        };
        let done = p.check_achievements(&player);
        assert_eq!(done.len(), 2);
        assert!((p.achievement_bonus() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn events_route_to_daily_stats() {
        let mut p = Progression::default();
        p.update_progress(ProgressEvent::Click);
        p.update_progress(ProgressEvent::Kill);
        p.update_progress(ProgressEvent::Combo(7));
        assert_eq!(p.missions.stats.clicks, 1);
        assert_eq!(p.missions.stats.kills, 1);
        assert_eq!(p.missions.stats.max_combo, 7);
    }
}
