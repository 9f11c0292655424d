//! Frontend application state and input dispatch.

pub mod actions;
pub mod hud;
pub mod render;

use hero_clicker::economy::{EntityId, HeroKind, UpgradeKind};
use hero_clicker::skills::SkillKind;
use hero_clicker::{Game, GameError};
use tracing::debug;

use crate::input::InputEvent;
use actions::*;

/// Which shop panel is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Heroes,
    Upgrades,
    Missions,
    Stats,
}

pub struct App {
    pub tab: Tab,
    /// Reset needs a second press.
    pub confirm_reset: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Heroes,
            confirm_reset: false,
        }
    }

    /// Apply one input to the game. Returns true if it mapped to an action.
    pub fn handle_input(&mut self, game: &mut Game, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Key(c) => match self.key_action(*c) {
                Some(action) => action,
                None => return false,
            },
            InputEvent::Click(id) => *id,
        };
        self.dispatch(game, action)
    }

    fn key_action(&self, key: char) -> Option<u16> {
        let action = match key {
            ' ' | 'c' => ATTACK,
            'w' => STRIKE_WEAK_POINT,
            'd' => CATCH_DRONE,
            'h' => TAB_HEROES,
            'u' => TAB_UPGRADES,
            'm' => TAB_MISSIONS,
            'p' => TAB_STATS,
            'q' => SKILL_BASE,
            'e' => SKILL_BASE + 1,
            'r' => SKILL_BASE + 2,
            '1'..='6' => {
                let idx = (key as u8 - b'1') as u16;
                match self.tab {
                    Tab::Heroes => BUY_HERO_BASE + idx,
                    Tab::Upgrades => BUY_UPGRADE_BASE + idx,
                    Tab::Missions => CLAIM_MISSION_BASE + idx,
                    Tab::Stats => return None,
                }
            }
            // Shifted digits ascend the matching hero.
            '!' | '@' | '#' | '$' | '%' | '^' if self.tab == Tab::Heroes => {
                let idx = "!@#$%^".find(key)? as u16;
                ASCEND_HERO_BASE + idx
            }
            'A' => CLAIM_ALL_MISSIONS,
            'P' => PRESTIGE,
            'S' => SAVE,
            'X' => RESET,
            _ => return None,
        };
        Some(action)
    }

    fn dispatch(&mut self, game: &mut Game, action: u16) -> bool {
        if action != RESET {
            self.confirm_reset = false;
        }
        match action {
            ATTACK => {
                game.click();
            }
            STRIKE_WEAK_POINT => {
                game.strike_weak_point();
            }
            CATCH_DRONE => {
                game.catch_drone();
            }
            TAB_HEROES => self.tab = Tab::Heroes,
            TAB_UPGRADES => self.tab = Tab::Upgrades,
            TAB_MISSIONS => self.tab = Tab::Missions,
            TAB_STATS => self.tab = Tab::Stats,
            id if (SKILL_BASE..SKILL_BASE + 3).contains(&id) => {
                let Some(kind) = SkillKind::all().get((id - SKILL_BASE) as usize) else {
                    return false;
                };
                refused("skill", game.activate_skill(*kind));
            }
            id if (BUY_HERO_BASE..ASCEND_HERO_BASE).contains(&id) => {
                let Some(kind) = HeroKind::all().get((id - BUY_HERO_BASE) as usize) else {
                    return false;
                };
                refused("buy_hero", game.purchase(EntityId::Hero(*kind)));
            }
            id if (ASCEND_HERO_BASE..BUY_UPGRADE_BASE).contains(&id) => {
                let Some(kind) = HeroKind::all().get((id - ASCEND_HERO_BASE) as usize) else {
                    return false;
                };
                refused("ascend", game.ascend(*kind));
            }
            id if (BUY_UPGRADE_BASE..CLAIM_MISSION_BASE).contains(&id) => {
                let Some(kind) = UpgradeKind::all().get((id - BUY_UPGRADE_BASE) as usize) else {
                    return false;
                };
                refused("buy_upgrade", game.purchase(EntityId::Upgrade(*kind)));
            }
            CLAIM_ALL_MISSIONS => refused("claim_all", game.claim_all_missions()),
            id if (CLAIM_MISSION_BASE..CLAIM_ALL_MISSIONS).contains(&id) => {
                let idx = (id - CLAIM_MISSION_BASE) as usize;
                let Some(mission_id) = game.world.progression.missions.active.get(idx).map(|m| m.def.id) else {
                    return false;
                };
                refused("claim", game.claim_mission(mission_id));
            }
            PRESTIGE => refused("prestige", game.prestige()),
            SAVE => {
                game.save();
            }
            RESET => {
                if self.confirm_reset {
                    game.reset_save();
                    self.confirm_reset = false;
                } else {
                    self.confirm_reset = true;
                }
            }
            _ => return false,
        }
        true
    }
}

/// Refusals are expected (the row is drawn disabled); only trace them.
fn refused<T>(action: &'static str, result: Result<T, GameError>) {
    if let Err(e) = result {
        debug!(event = "action_refused", action, error = %e, "action refused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_clicker::clock::ManualClock;
    use hero_clicker::Tuning;

    fn game() -> Game {
        Game::new(Tuning::deterministic(), 3, Box::new(ManualClock::new(1.7e12)))
    }

    #[test]
    fn space_attacks() {
        let mut app = App::new();
        let mut g = game();
        assert!(app.handle_input(&mut g, &InputEvent::Key(' ')));
        assert_eq!(g.world.player.total_clicks, 1);
    }

    #[test]
    fn digits_follow_the_open_tab() {
        let mut app = App::new();
        let mut g = game();
        g.world.player.currency = 10_000.0;
        app.handle_input(&mut g, &InputEvent::Key('1'));
        assert_eq!(g.world.economy.hero(HeroKind::Rookie).count, 1);

        app.handle_input(&mut g, &InputEvent::Key('u'));
        assert_eq!(app.tab, Tab::Upgrades);
        app.handle_input(&mut g, &InputEvent::Key('1'));
        assert_eq!(g.world.economy.upgrade(UpgradeKind::Gym).count, 1);
    }

    #[test]
    fn click_ids_dispatch_like_keys() {
        let mut app = App::new();
        let mut g = game();
        assert!(app.handle_input(&mut g, &InputEvent::Click(SKILL_BASE)));
        assert!(g.world.skills.is_active(SkillKind::Fury));
        assert!(app.handle_input(&mut g, &InputEvent::Click(TAB_MISSIONS)));
        assert_eq!(app.tab, Tab::Missions);
    }

    #[test]
    fn unaffordable_purchase_is_a_no_op() {
        let mut app = App::new();
        let mut g = game();
        app.handle_input(&mut g, &InputEvent::Click(BUY_HERO_BASE + 5));
        assert_eq!(g.world.economy.hero(HeroKind::Cyborg).count, 0);
        assert!(g.world.player.currency.abs() < 1e-9);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut app = App::new();
        let mut g = game();
        g.world.player.currency = 77.0;
        app.handle_input(&mut g, &InputEvent::Key('X'));
        assert!(app.confirm_reset);
        assert!((g.world.player.currency - 77.0).abs() < 1e-9);
        app.handle_input(&mut g, &InputEvent::Key('X'));
        assert!(!app.confirm_reset);
        assert!(g.world.player.currency.abs() < 1e-9);
    }

    #[test]
    fn any_other_action_cancels_reset() {
        let mut app = App::new();
        let mut g = game();
        app.handle_input(&mut g, &InputEvent::Key('X'));
        app.handle_input(&mut g, &InputEvent::Key('h'));
        assert!(!app.confirm_reset);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut app = App::new();
        let mut g = game();
        assert!(!app.handle_input(&mut g, &InputEvent::Key('z')));
        assert!(!app.handle_input(&mut g, &InputEvent::Click(9_999)));
    }
}
