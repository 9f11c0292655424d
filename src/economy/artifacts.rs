//! Binary-owned passive modifiers dropped by defeated villains.

use crate::config::Tuning;
use crate::rng::Dice;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Bonus reward on every defeat.
    Amulet,
    /// Additive click bonus.
    Ring,
    /// Additive DPS bonus.
    Cape,
}

impl ArtifactKind {
    pub fn all() -> &'static [ArtifactKind] {
        &[ArtifactKind::Amulet, ArtifactKind::Ring, ArtifactKind::Cape]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ArtifactKind::Amulet => "amulet",
            ArtifactKind::Ring => "ring",
            ArtifactKind::Cape => "cape",
        }
    }

    pub fn from_id(id: &str) -> Option<ArtifactKind> {
        ArtifactKind::all().iter().copied().find(|a| a.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Amulet => "Lucky Amulet",
            ArtifactKind::Ring => "Power Ring",
            ArtifactKind::Cape => "Hero Cape",
        }
    }

    pub fn effect_description(&self) -> &'static str {
        match self {
            ArtifactKind::Amulet => "+10% villain rewards",
            ArtifactKind::Ring => "+20% click damage",
            ArtifactKind::Cape => "+20% hero DPS",
        }
    }
}

/// Owned flags for every artifact. Never revoked except by a full reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Artifacts {
    owned: Vec<ArtifactKind>,
}

impl Artifacts {
    pub fn owns(&self, kind: ArtifactKind) -> bool {
        self.owned.contains(&kind)
    }

    /// Returns true if the artifact was newly granted.
    pub fn grant(&mut self, kind: ArtifactKind) -> bool {
        if self.owns(kind) {
            return false;
        }
        self.owned.push(kind);
        true
    }

    pub fn unowned(&self) -> Vec<ArtifactKind> {
        ArtifactKind::all()
            .iter()
            .copied()
            .filter(|a| !self.owns(*a))
            .collect()
    }

    /// Roll the per-kill drop. Grants a random unowned artifact on success.
    ///
    /// Consumes one roll for the drop check and, on success, one for the pick.
    pub fn roll_drop(&mut self, dice: &mut Dice, tuning: &Tuning) -> Option<ArtifactKind> {
        if !dice.chance(tuning.artifact_drop_chance) {
            return None;
        }
        let pool = self.unowned();
        if pool.is_empty() {
            return None;
        }
        let kind = pool[dice.pick(pool.len())];
        self.grant(kind);
        Some(kind)
    }

    // ── Modifier contributions ─────────────────────────────────

    pub fn click_bonus(&self, tuning: &Tuning) -> f64 {
        if self.owns(ArtifactKind::Ring) {
            tuning.ring_click_bonus
        } else {
            0.0
        }
    }

    pub fn dps_bonus(&self, tuning: &Tuning) -> f64 {
        if self.owns(ArtifactKind::Cape) {
            tuning.cape_dps_bonus
        } else {
            0.0
        }
    }

    /// Multiplicative reward factor (1.0 without the amulet).
    pub fn reward_factor(&self, tuning: &Tuning) -> f64 {
        if self.owns(ArtifactKind::Amulet) {
            1.0 + tuning.amulet_reward_bonus
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_is_once_only() {
        let mut a = Artifacts::default();
        assert!(a.grant(ArtifactKind::Ring));
        assert!(!a.grant(ArtifactKind::Ring));
        assert_eq!(a.unowned().len(), 2);
    }

    #[test]
    fn drop_roll_respects_chance() {
        let tuning = Tuning::default();
        let mut dice = Dice::seeded(1);
        let mut a = Artifacts::default();
        dice.script([0.5]);
        assert_eq!(a.roll_drop(&mut dice, &tuning), None);
        dice.script([0.01, 0.0]);
        assert_eq!(a.roll_drop(&mut dice, &tuning), Some(ArtifactKind::Amulet));
        assert!(a.owns(ArtifactKind::Amulet));
    }

    #[test]
    fn no_drop_when_all_owned() {
        let tuning = Tuning::default();
        let mut dice = Dice::seeded(1);
        let mut a = Artifacts::default();
        for k in ArtifactKind::all() {
            a.grant(*k);
        }
        dice.script([0.0]);
        assert_eq!(a.roll_drop(&mut dice, &tuning), None);
    }

    #[test]
    fn bonuses_only_when_owned() {
        let tuning = Tuning::default();
        let mut a = Artifacts::default();
        assert!(a.click_bonus(&tuning).abs() < 0.001);
        assert!((a.reward_factor(&tuning) - 1.0).abs() < 0.001);
        a.grant(ArtifactKind::Ring);
        a.grant(ArtifactKind::Amulet);
        assert!((a.click_bonus(&tuning) - 0.2).abs() < 0.001);
        assert!((a.reward_factor(&tuning) - 1.1).abs() < 0.001);
        assert!(a.dps_bonus(&tuning).abs() < 0.001);
    }
}
