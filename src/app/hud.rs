//! The frontend's sink: keeps the last values the core reported plus a
//! short event log, for the renderer to read.

use std::collections::VecDeque;

use hero_clicker::format::{format_compact, format_number};
use hero_clicker::skills::SkillKind;
use hero_clicker::{AudioSink, Notice, RenderSink};

const LOG_CAPACITY: usize = 40;

/// Frames a hit flash stays visible.
const FLASH_FRAMES: u8 = 6;

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkillLamp {
    pub cooldown: f64,
    pub max: f64,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct Hud {
    pub currency: f64,
    pub dps: f64,
    pub level: u32,
    pub health: f64,
    pub max_health: f64,
    pub encounter: String,
    pub is_boss: bool,
    pub combo_count: u32,
    pub combo_multiplier: f64,
    pub skills: [SkillLamp; 3],
    pub log: VecDeque<LogEntry>,
    /// Remaining frames of the hit flash; `crit_flash` marks a critical.
    pub flash: u8,
    pub crit_flash: bool,
    /// Remaining frames of the fanfare banner (purchase milestone, level up).
    pub fanfare: u8,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            level: 1,
            combo_multiplier: 1.0,
            ..Self::default()
        }
    }

    pub fn add_log(&mut self, text: impl Into<String>, is_important: bool) {
        self.log.push_back(LogEntry {
            text: text.into(),
            is_important,
        });
        while self.log.len() > LOG_CAPACITY {
            self.log.pop_front();
        }
    }

    /// Age the flashes by one frame.
    pub fn fade(&mut self) {
        self.flash = self.flash.saturating_sub(1);
        self.fanfare = self.fanfare.saturating_sub(1);
        if self.flash == 0 {
            self.crit_flash = false;
        }
    }

    pub fn skill(&self, kind: SkillKind) -> SkillLamp {
        self.skills[kind.index()]
    }
}

/// Log line for a notice, or `None` for ones shown elsewhere.
fn describe(notice: &Notice) -> Option<(String, bool)> {
    let line = match notice {
        Notice::Evaded => ("Evaded!".to_string(), false),
        Notice::Critical { .. } | Notice::Saved => return None,
        Notice::VillainDefeated { reward } => (format!("Villain defeated: +{}", format_compact(*reward)), false),
        Notice::LevelUp { level } => (format!("LEVEL UP! Now level {}", level), true),
        Notice::BossAppeared { name } => (format!("BOSS: {} appears!", name), true),
        Notice::BossFled { name } => (format!("{} fled. Try again next cycle.", name), true),
        Notice::SpecialAppeared { name } => (format!("A special villain appears: {}", name), true),
        Notice::MilestoneReached { name, count } => (format!("{} x{}: power up!", name, count), true),
        Notice::Ascended { name, rank } => (format!("{} ascended to rank {}", name, rank), true),
        Notice::AchievementUnlocked { name } => (format!("Achievement: {}", name), true),
        Notice::ArtifactFound { name } => (format!("Artifact found: {}", name), true),
        Notice::WeakPointAppeared => ("Weak point exposed! [W]".to_string(), false),
        Notice::DroneAppeared => ("Supply drone overhead! [D]".to_string(), true),
        Notice::DroneCurrency { amount } => (format!("Drone dropped +{}", format_number(*amount)), false),
        Notice::DroneFury => ("Drone triggered Fury!".to_string(), false),
        Notice::MissionsRefreshed => ("New daily missions".to_string(), true),
        Notice::MissionClaimed { reward } => (format!("Mission reward: +{} crystals", format_number(*reward)), false),
        Notice::Prestige { gained } => (format!("Prestige! +{} crystals", format_number(*gained)), true),
        Notice::OfflineEarnings { time, amount } => {
            (format!("Away for {}: earned {}", time, format_number(*amount)), true)
        }
        Notice::SaveFailed => ("Save failed".to_string(), true),
        Notice::StartingFresh => ("Save data unreadable, starting a new game".to_string(), true),
    };
    Some(line)
}

impl RenderSink for Hud {
    fn on_stats_changed(&mut self, currency: f64, dps: f64, level: u32) {
        self.currency = currency;
        self.dps = dps;
        self.level = level;
    }

    fn on_health_changed(&mut self, current: f64, max: f64) {
        self.health = current;
        self.max_health = max;
    }

    fn on_encounter_changed(&mut self, identity: &str, is_boss: bool) {
        self.encounter = identity.to_string();
        self.is_boss = is_boss;
    }

    fn on_skill_state_changed(&mut self, kind: SkillKind, cooldown: f64, max: f64, active: bool) {
        self.skills[kind.index()] = SkillLamp { cooldown, max, active };
    }

    fn on_combo_changed(&mut self, count: u32, multiplier: f64) {
        self.combo_count = count;
        self.combo_multiplier = multiplier;
    }

    fn on_notice(&mut self, notice: Notice) {
        if let Some((text, important)) = describe(&notice) {
            self.add_log(text, important);
        }
    }
}

impl AudioSink for Hud {
    fn on_click(&mut self, is_critical: bool) {
        self.flash = FLASH_FRAMES;
        self.crit_flash = is_critical;
    }

    fn on_purchase(&mut self) {
        self.fanfare = self.fanfare.max(2);
    }

    fn on_level_up(&mut self) {
        self.fanfare = FLASH_FRAMES * 3;
    }
}
