//! Semantic action ids for click targets.

// ── Combat ──────────────────────────────────────────────────────
pub const ATTACK: u16 = 0;
pub const STRIKE_WEAK_POINT: u16 = 1;
pub const CATCH_DRONE: u16 = 2;

// ── Tabs ────────────────────────────────────────────────────────
pub const TAB_HEROES: u16 = 10;
pub const TAB_UPGRADES: u16 = 11;
pub const TAB_MISSIONS: u16 = 12;
pub const TAB_STATS: u16 = 13;

// ── Skills (base + skill index) ─────────────────────────────────
pub const SKILL_BASE: u16 = 20;

// ── Shop (base + catalogue index) ───────────────────────────────
pub const BUY_HERO_BASE: u16 = 100;
pub const ASCEND_HERO_BASE: u16 = 150;
pub const BUY_UPGRADE_BASE: u16 = 200;

// ── Missions (base + position in the active list) ───────────────
pub const CLAIM_MISSION_BASE: u16 = 300;
pub const CLAIM_ALL_MISSIONS: u16 = 399;

// ── Account ─────────────────────────────────────────────────────
pub const PRESTIGE: u16 = 500;
pub const SAVE: u16 = 501;
pub const RESET: u16 = 502;
