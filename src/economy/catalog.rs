//! Static definitions for everything the player can buy.

/// Hero grouping targeted by synergy upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeroTag {
    Street,
    Military,
    Arcane,
    Tech,
}

/// Passive damage dealers, bought with currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeroKind {
    Rookie,
    Scout,
    Soldier,
    Captain,
    Sorcerer,
    Cyborg,
}

impl HeroKind {
    /// All heroes in shop order.
    pub fn all() -> &'static [HeroKind] {
        &[
            HeroKind::Rookie,
            HeroKind::Scout,
            HeroKind::Soldier,
            HeroKind::Captain,
            HeroKind::Sorcerer,
            HeroKind::Cyborg,
        ]
    }

    /// Stable identifier used in save documents.
    pub fn id(&self) -> &'static str {
        match self {
            HeroKind::Rookie => "rookie",
            HeroKind::Scout => "scout",
            HeroKind::Soldier => "soldier",
            HeroKind::Captain => "captain",
            HeroKind::Sorcerer => "sorcerer",
            HeroKind::Cyborg => "cyborg",
        }
    }

    pub fn from_id(id: &str) -> Option<HeroKind> {
        HeroKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeroKind::Rookie => "Rookie",
            HeroKind::Scout => "Vigilante",
            HeroKind::Soldier => "Soldier",
            HeroKind::Captain => "Captain",
            HeroKind::Sorcerer => "Mystic",
            HeroKind::Cyborg => "Cyborg",
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            HeroKind::Rookie => 100.0,
            HeroKind::Scout => 500.0,
            HeroKind::Soldier => 2_000.0,
            HeroKind::Captain => 10_000.0,
            HeroKind::Sorcerer => 50_000.0,
            HeroKind::Cyborg => 200_000.0,
        }
    }

    /// Damage per second per unit before any multiplier.
    pub fn base_dps(&self) -> f64 {
        match self {
            HeroKind::Rookie => 5.0,
            HeroKind::Scout => 20.0,
            HeroKind::Soldier => 80.0,
            HeroKind::Captain => 250.0,
            HeroKind::Sorcerer => 1_000.0,
            HeroKind::Cyborg => 5_000.0,
        }
    }

    /// Player level required before the first unit can be bought.
    pub fn unlock_level(&self) -> u32 {
        match self {
            HeroKind::Rookie => 1,
            HeroKind::Scout => 3,
            HeroKind::Soldier => 5,
            HeroKind::Captain => 10,
            HeroKind::Sorcerer => 15,
            HeroKind::Cyborg => 20,
        }
    }

    pub fn tags(&self) -> &'static [HeroTag] {
        match self {
            HeroKind::Rookie => &[HeroTag::Street],
            HeroKind::Scout => &[HeroTag::Street],
            HeroKind::Soldier => &[HeroTag::Military],
            HeroKind::Captain => &[HeroTag::Military],
            HeroKind::Sorcerer => &[HeroTag::Arcane],
            HeroKind::Cyborg => &[HeroTag::Tech, HeroTag::Military],
        }
    }

    pub fn index(&self) -> usize {
        HeroKind::all().iter().position(|k| k == self).unwrap_or(0)
    }
}

/// What an upgrade does per owned unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Flat click damage per unit (milestone-scaled).
    ClickBonus(f64),
    /// Heroes carrying `tag` get `1 + (multiplier - 1) × count`.
    Synergy { tag: HeroTag, multiplier: f64 },
}

/// Click-power and synergy upgrades, bought with currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UpgradeKind {
    Gym,
    Supplements,
    Equipment,
    Cybernetics,
    StreetNetwork,
    NeuralUplink,
}

impl UpgradeKind {
    pub fn all() -> &'static [UpgradeKind] {
        &[
            UpgradeKind::Gym,
            UpgradeKind::Supplements,
            UpgradeKind::Equipment,
            UpgradeKind::Cybernetics,
            UpgradeKind::StreetNetwork,
            UpgradeKind::NeuralUplink,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            UpgradeKind::Gym => "gym",
            UpgradeKind::Supplements => "supplements",
            UpgradeKind::Equipment => "equipment",
            UpgradeKind::Cybernetics => "cybernetics",
            UpgradeKind::StreetNetwork => "street_network",
            UpgradeKind::NeuralUplink => "neural_uplink",
        }
    }

    pub fn from_id(id: &str) -> Option<UpgradeKind> {
        UpgradeKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Gym => "Gym",
            UpgradeKind::Supplements => "Supplements",
            UpgradeKind::Equipment => "Tactical Gear",
            UpgradeKind::Cybernetics => "Cybernetic Arm",
            UpgradeKind::StreetNetwork => "Street Network",
            UpgradeKind::NeuralUplink => "Neural Uplink",
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            UpgradeKind::Gym => 15.0,
            UpgradeKind::Supplements => 100.0,
            UpgradeKind::Equipment => 500.0,
            UpgradeKind::Cybernetics => 2_000.0,
            UpgradeKind::StreetNetwork => 5_000.0,
            UpgradeKind::NeuralUplink => 250_000.0,
        }
    }

    pub fn effect(&self) -> UpgradeEffect {
        match self {
            UpgradeKind::Gym => UpgradeEffect::ClickBonus(1.0),
            UpgradeKind::Supplements => UpgradeEffect::ClickBonus(5.0),
            UpgradeKind::Equipment => UpgradeEffect::ClickBonus(20.0),
            UpgradeKind::Cybernetics => UpgradeEffect::ClickBonus(100.0),
            UpgradeKind::StreetNetwork => UpgradeEffect::Synergy {
                tag: HeroTag::Street,
                multiplier: 1.5,
            },
            UpgradeKind::NeuralUplink => UpgradeEffect::Synergy {
                tag: HeroTag::Tech,
                multiplier: 2.0,
            },
        }
    }

    pub fn is_synergy(&self) -> bool {
        matches!(self.effect(), UpgradeEffect::Synergy { .. })
    }

    pub fn index(&self) -> usize {
        UpgradeKind::all().iter().position(|k| k == self).unwrap_or(0)
    }
}

/// Anything the shop sells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityId {
    Hero(HeroKind),
    Upgrade(UpgradeKind),
}

impl EntityId {
    /// Resolve a save/UI identifier such as `"rookie"` or `"gym"`.
    pub fn parse(id: &str) -> Option<EntityId> {
        HeroKind::from_id(id)
            .map(EntityId::Hero)
            .or_else(|| UpgradeKind::from_id(id).map(EntityId::Upgrade))
    }

    pub fn id(&self) -> &'static str {
        match self {
            EntityId::Hero(h) => h.id(),
            EntityId::Upgrade(u) => u.id(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityId::Hero(h) => h.name(),
            EntityId::Upgrade(u) => u.name(),
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            EntityId::Hero(h) => h.base_cost(),
            EntityId::Upgrade(u) => u.base_cost(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for h in HeroKind::all() {
            assert_eq!(HeroKind::from_id(h.id()), Some(*h));
        }
        for u in UpgradeKind::all() {
            assert_eq!(UpgradeKind::from_id(u.id()), Some(*u));
        }
    }

    #[test]
    fn entity_ids_are_unique_across_kinds() {
        let mut ids: Vec<&str> = HeroKind::all().iter().map(|h| h.id()).collect();
        ids.extend(UpgradeKind::all().iter().map(|u| u.id()));
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn parse_resolves_both_variants() {
        assert_eq!(EntityId::parse("rookie"), Some(EntityId::Hero(HeroKind::Rookie)));
        assert_eq!(EntityId::parse("gym"), Some(EntityId::Upgrade(UpgradeKind::Gym)));
        assert_eq!(EntityId::parse("dragon"), None);
    }

    #[test]
    fn unlock_levels_are_non_decreasing() {
        let levels: Vec<u32> = HeroKind::all().iter().map(|h| h.unlock_level()).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(HeroKind::Rookie.unlock_level(), 1);
    }

    #[test]
    fn synergy_upgrades_are_flagged() {
        assert!(UpgradeKind::StreetNetwork.is_synergy());
        assert!(!UpgradeKind::Gym.is_synergy());
    }
}
