//! Retroactive earnings for time spent away.

use tracing::info;

use crate::config::Tuning;
use crate::format::format_duration;
use crate::state::PlayerState;

#[derive(Clone, Debug, PartialEq)]
pub struct OfflineReward {
    /// Seconds actually credited (after the cap).
    pub elapsed_secs: f64,
    /// `HH:MM:SS` of the credited time.
    pub time: String,
    pub amount: f64,
}

/// Credit `base_dps × min(elapsed, cap) × efficiency` for the time since the
/// last persist.
///
/// `base_dps` must come from the permanent-only damage path so temporary
/// buffs active at save time never inflate the payout. `last_persist_time`
/// is advanced to `now_ms` whether or not anything was paid, so a second
/// call right after returns `None`.
pub fn check_offline_progress(
    player: &mut PlayerState,
    base_dps: f64,
    now_ms: f64,
    tuning: &Tuning,
) -> Option<OfflineReward> {
    let last = player.last_persist_time;
    player.last_persist_time = now_ms;

    if last <= 0.0 || !now_ms.is_finite() {
        return None;
    }
    let elapsed = (now_ms - last) / 1000.0;
    if elapsed <= tuning.offline_min_secs {
        return None;
    }
    if !base_dps.is_finite() || base_dps <= 0.0 {
        return None;
    }

    let credited = elapsed.min(tuning.offline_max_secs);
    let amount = (base_dps * credited * tuning.offline_efficiency).floor();
    if amount <= 0.0 {
        return None;
    }
    player.earn(amount);
    info!(event = "offline_progress", elapsed_secs = credited, amount, "offline earnings granted");

    Some(OfflineReward {
        elapsed_secs: credited,
        time: format_duration(credited),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: f64 = 3600.0 * 1000.0;

    fn away_player() -> PlayerState {
        PlayerState {
            last_persist_time: 1_000_000.0,
            ..PlayerState::default()
        }
    }

    #[test]
    fn ten_hours_pays_half_rate() {
        let tuning = Tuning::default();
        let mut p = away_player();
        let now = 1_000_000.0 + 10.0 * HOUR_MS;
        let r = check_offline_progress(&mut p, 10.0, now, &tuning).unwrap();
        assert!((r.amount - 10.0 * 3600.0 * 10.0 * 0.5).abs() < 1.0);
        assert_eq!(r.time, "10:00:00");
        assert!((p.currency - r.amount).abs() < 0.001);
        assert!(check_offline_progress(&mut p, 10.0, now, &tuning).is_none());
    }

    #[test]
    fn capped_at_a_day() {
        let tuning = Tuning::default();
        let mut p = away_player();
        let now = 1_000_000.0 + 72.0 * HOUR_MS;
        let r = check_offline_progress(&mut p, 2.0, now, &tuning).unwrap();
        assert!((r.elapsed_secs - 86_400.0).abs() < 0.001);
        assert!((r.amount - 86_400.0).abs() < 1.0);
    }

    #[test]
    fn short_absence_pays_nothing_but_advances_time() {
        let tuning = Tuning::default();
        let mut p = away_player();
        let now = 1_000_000.0 + 30_000.0;
        assert!(check_offline_progress(&mut p, 100.0, now, &tuning).is_none());
        assert!((p.last_persist_time - now).abs() < f64::EPSILON);
        assert!(p.currency.abs() < f64::EPSILON);
    }

    #[test]
    fn zero_dps_pays_nothing() {
        let tuning = Tuning::default();
        let mut p = away_player();
        assert!(check_offline_progress(&mut p, 0.0, 1_000_000.0 + HOUR_MS, &tuning).is_none());
    }

    #[test]
    fn never_saved_pays_nothing() {
        let tuning = Tuning::default();
        let mut p = PlayerState::default();
        assert!(check_offline_progress(&mut p, 50.0, 5.0 * HOUR_MS, &tuning).is_none());
        assert!((p.last_persist_time - 5.0 * HOUR_MS).abs() < f64::EPSILON);
    }
}
