//! Outbound notifications. The core calls these after mutating state; the
//! presentation layer owns all formatting, drawing and sound.

use std::cell::RefCell;
use std::rc::Rc;

use crate::skills::SkillKind;

/// One-off events worth a toast or log line.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Evaded,
    Critical { amount: f64 },
    VillainDefeated { reward: f64 },
    LevelUp { level: u32 },
    BossAppeared { name: &'static str },
    BossFled { name: &'static str },
    SpecialAppeared { name: &'static str },
    MilestoneReached { name: &'static str, count: u32 },
    Ascended { name: &'static str, rank: u32 },
    AchievementUnlocked { name: &'static str },
    ArtifactFound { name: &'static str },
    WeakPointAppeared,
    DroneAppeared,
    DroneCurrency { amount: f64 },
    DroneFury,
    MissionsRefreshed,
    MissionClaimed { reward: f64 },
    Prestige { gained: f64 },
    OfflineEarnings { time: String, amount: f64 },
    Saved,
    SaveFailed,
    StartingFresh,
}

pub trait RenderSink {
    fn on_stats_changed(&mut self, _currency: f64, _dps: f64, _level: u32) {}
    fn on_health_changed(&mut self, _current: f64, _max: f64) {}
    fn on_encounter_changed(&mut self, _identity: &str, _is_boss: bool) {}
    fn on_skill_state_changed(&mut self, _kind: SkillKind, _cooldown: f64, _max: f64, _active: bool) {}
    fn on_combo_changed(&mut self, _count: u32, _multiplier: f64) {}
    fn on_notice(&mut self, _notice: Notice) {}
}

/// Fire-and-forget sound cues.
pub trait AudioSink {
    fn on_click(&mut self, _is_critical: bool) {}
    fn on_purchase(&mut self) {}
    fn on_level_up(&mut self) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}
impl AudioSink for NullSink {}

/// Lets the frontend keep a handle on a sink the game owns.
impl<T: RenderSink> RenderSink for Rc<RefCell<T>> {
    fn on_stats_changed(&mut self, currency: f64, dps: f64, level: u32) {
        self.borrow_mut().on_stats_changed(currency, dps, level);
    }
    fn on_health_changed(&mut self, current: f64, max: f64) {
        self.borrow_mut().on_health_changed(current, max);
    }
    fn on_encounter_changed(&mut self, identity: &str, is_boss: bool) {
        self.borrow_mut().on_encounter_changed(identity, is_boss);
    }
    fn on_skill_state_changed(&mut self, kind: SkillKind, cooldown: f64, max: f64, active: bool) {
        self.borrow_mut().on_skill_state_changed(kind, cooldown, max, active);
    }
    fn on_combo_changed(&mut self, count: u32, multiplier: f64) {
        self.borrow_mut().on_combo_changed(count, multiplier);
    }
    fn on_notice(&mut self, notice: Notice) {
        self.borrow_mut().on_notice(notice);
    }
}

impl<T: AudioSink> AudioSink for Rc<RefCell<T>> {
    fn on_click(&mut self, is_critical: bool) {
        self.borrow_mut().on_click(is_critical);
    }
    fn on_purchase(&mut self) {
        self.borrow_mut().on_purchase();
    }
    fn on_level_up(&mut self) {
        self.borrow_mut().on_level_up();
    }
}
