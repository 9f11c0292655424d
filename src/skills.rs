//! Timed player skills: Ready → Active → cooling down → Ready.

use tracing::debug;

use crate::error::{GameError, GameResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkillKind {
    /// Doubles DPS while active.
    Fury,
    /// Adds a high-probability critical roll to clicks.
    CritBoost,
    /// Doubles both click damage and DPS.
    TeamBoost,
}

/// `(kind, duration secs, max cooldown secs)`.
const SKILL_TABLE: [(SkillKind, f64, f64); 3] = [
    (SkillKind::Fury, 5.0, 60.0),
    (SkillKind::CritBoost, 10.0, 90.0),
    (SkillKind::TeamBoost, 10.0, 120.0),
];

impl SkillKind {
    pub fn all() -> &'static [SkillKind] {
        &[SkillKind::Fury, SkillKind::CritBoost, SkillKind::TeamBoost]
    }

    pub fn id(&self) -> &'static str {
        match self {
            SkillKind::Fury => "fury",
            SkillKind::CritBoost => "crit",
            SkillKind::TeamBoost => "team",
        }
    }

    pub fn from_id(id: &str) -> Option<SkillKind> {
        SkillKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkillKind::Fury => "Fury",
            SkillKind::CritBoost => "Precision",
            SkillKind::TeamBoost => "Team-up",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            SkillKind::Fury => 0,
            SkillKind::CritBoost => 1,
            SkillKind::TeamBoost => 2,
        }
    }

    pub fn duration(&self) -> f64 {
        SKILL_TABLE[self.index()].1
    }

    pub fn max_cooldown(&self) -> f64 {
        SKILL_TABLE[self.index()].2
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Skill {
    pub kind: SkillKind,
    pub active: bool,
    pub cooldown_remaining: f64,
    pub duration_remaining: f64,
    pub max_cooldown: f64,
}

impl Skill {
    pub fn new(kind: SkillKind) -> Self {
        Self {
            kind,
            active: false,
            cooldown_remaining: 0.0,
            duration_remaining: 0.0,
            max_cooldown: kind.max_cooldown(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    /// Start the effect and the cooldown together.
    pub fn activate(&mut self) -> GameResult<()> {
        if !self.is_ready() {
            return Err(GameError::SkillOnCooldown {
                remaining: self.cooldown_remaining,
            });
        }
        self.active = true;
        self.duration_remaining = self.kind.duration();
        self.cooldown_remaining = self.max_cooldown;
        Ok(())
    }

    /// Decay timers. Returns true if the active effect ended this tick.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
        if self.active {
            self.duration_remaining -= dt;
            if self.duration_remaining <= 0.0 {
                self.duration_remaining = 0.0;
                self.active = false;
                return true;
            }
        }
        false
    }
}

/// One [`Skill`] per [`SkillKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct Skills {
    skills: Vec<Skill>,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            skills: SkillKind::all().iter().map(|k| Skill::new(*k)).collect(),
        }
    }
}

impl Skills {
    pub fn get(&self, kind: SkillKind) -> &Skill {
        &self.skills[kind.index()]
    }

    pub fn get_mut(&mut self, kind: SkillKind) -> &mut Skill {
        &mut self.skills[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn is_active(&self, kind: SkillKind) -> bool {
        self.get(kind).active
    }

    pub fn activate(&mut self, kind: SkillKind) -> GameResult<()> {
        self.get_mut(kind).activate()?;
        debug!(event = "skill_activated", skill = kind.id(), "skill activated");
        Ok(())
    }

    /// Advance every skill. Returns the kinds whose effect just expired.
    pub fn tick(&mut self, dt: f64) -> Vec<SkillKind> {
        self.skills
            .iter_mut()
            .filter_map(|s| if s.tick(dt) { Some(s.kind) } else { None })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_kinds() {
        assert!((SkillKind::Fury.duration() - 5.0).abs() < 0.001);
        assert!((SkillKind::CritBoost.max_cooldown() - 90.0).abs() < 0.001);
        assert!((SkillKind::TeamBoost.max_cooldown() - 120.0).abs() < 0.001);
        for k in SkillKind::all() {
            assert_eq!(SkillKind::from_id(k.id()), Some(*k));
        }
    }

    #[test]
    fn activate_starts_duration_and_cooldown() {
        let mut s = Skill::new(SkillKind::Fury);
        s.activate().unwrap();
        assert!(s.active);
        assert!((s.duration_remaining - 5.0).abs() < 0.001);
        assert!((s.cooldown_remaining - 60.0).abs() < 0.001);
    }

    #[test]
    fn activate_on_cooldown_fails() {
        let mut s = Skill::new(SkillKind::Fury);
        s.activate().unwrap();
        let err = s.activate().unwrap_err();
        assert!(matches!(err, GameError::SkillOnCooldown { .. }));
    }

    #[test]
    fn effect_expires_before_cooldown() {
        let mut s = Skill::new(SkillKind::Fury);
        s.activate().unwrap();
        let mut expired_at = None;
        for i in 0..100 {
            if s.tick(0.1) {
                expired_at = Some(i);
            }
        }
        // 5 s at 0.1 s steps; float accumulation may land on step 49 or 50.
        let step = expired_at.unwrap();
        assert!((48..=50).contains(&step), "expired at {}", step);
        assert!(!s.active);
        assert!(s.cooldown_remaining > 0.0);
    }

    #[test]
    fn cooldown_returns_to_ready() {
        let mut s = Skill::new(SkillKind::CritBoost);
        s.activate().unwrap();
        s.tick(91.0);
        assert!(s.is_ready());
        assert!(s.activate().is_ok());
    }

    #[test]
    fn skills_tick_reports_expired() {
        let mut skills = Skills::default();
        skills.activate(SkillKind::Fury).unwrap();
        skills.activate(SkillKind::TeamBoost).unwrap();
        assert!(skills.tick(6.0) == vec![SkillKind::Fury]);
        assert!(skills.is_active(SkillKind::TeamBoost));
        assert!(!skills.is_active(SkillKind::Fury));
    }
}
