//! End-to-end scenarios driven through the public API.

use hero_clicker::clock::ManualClock;
use hero_clicker::economy::{EntityId, HeroKind};
use hero_clicker::encounter::{self, DamageOutcome, Encounter, EncounterKind, SpecialKind};
use hero_clicker::engine::DEFAULT_STORAGE_KEY;
use hero_clicker::rng::Dice;
use hero_clicker::save::MemoryStore;
use hero_clicker::state::PlayerState;
use hero_clicker::{Game, Tuning};
use proptest::prelude::*;

const NOW_MS: f64 = 1.7e12;

fn game_at(clock: &ManualClock) -> Game {
    Game::new(Tuning::deterministic(), 7, Box::new(clock.clone()))
}

fn game() -> Game {
    game_at(&ManualClock::new(NOW_MS))
}

#[test]
fn purchases_raise_count_and_cost() {
    let mut g = game();
    g.world.player.currency = 1e12;
    let rookie = EntityId::Hero(HeroKind::Rookie);
    let mut last_cost = g.next_cost(rookie);
    for expected in 1..=30 {
        g.purchase(rookie).expect("affordable");
        assert_eq!(g.world.economy.hero(HeroKind::Rookie).count, expected);
        let cost = g.next_cost(rookie);
        assert!(cost > last_cost, "cost must grow at count {}", expected);
        last_cost = cost;
    }
}

#[test]
fn hero_milestones_multiply_by_four() {
    let mut g = game();
    g.world.player.currency = 1e12;
    let rookie = EntityId::Hero(HeroKind::Rookie);
    for _ in 0..25 {
        g.purchase(rookie).expect("affordable");
    }
    assert!((g.world.economy.hero(HeroKind::Rookie).current_effect - 20.0).abs() < 1e-9);
    for _ in 0..25 {
        g.purchase(rookie).expect("affordable");
    }
    assert!((g.world.economy.hero(HeroKind::Rookie).current_effect - 80.0).abs() < 1e-9);
    assert!((g.world.player.auto_damage - 80.0 * 50.0).abs() < 1e-6);
}

#[test]
fn failed_purchase_changes_nothing() {
    let mut g = game();
    g.world.player.currency = 50.0;
    assert!(g.purchase(EntityId::Hero(HeroKind::Rookie)).is_err());
    assert!((g.world.player.currency - 50.0).abs() < 1e-9);
    assert_eq!(g.world.economy.hero(HeroKind::Rookie).count, 0);
}

#[test]
fn defeat_is_reported_once_per_encounter() {
    let tuning = Tuning::deterministic();
    let mut dice = Dice::seeded(1);
    let mut e = Encounter::spawn_normal(3, &tuning);
    let overkill = e.max_health * 2.0;
    assert!(matches!(
        e.apply_damage(overkill, &mut dice, &tuning),
        DamageOutcome::Defeated { .. }
    ));
    assert_eq!(e.apply_damage(overkill, &mut dice, &tuning), DamageOutcome::Ignored);
    assert!(e.current_health.abs() < 1e-12);
}

#[test]
fn bosses_follow_every_tenth_kill() {
    let tuning = Tuning::deterministic();
    let mut dice = Dice::seeded(5);
    let mut player = PlayerState::default();
    let mut artifacts = Default::default();
    let mut e = Encounter::spawn_normal(1, &tuning);
    let mut boss_spawned_at = Vec::new();

    while boss_spawned_at.len() < 3 {
        let defeat =
            encounter::resolve_defeat(&mut e, &mut player, &mut artifacts, &mut dice, &tuning);
        if defeat.boss_next {
            assert_eq!(e.kind, EncounterKind::Boss);
            boss_spawned_at.push(player.total_villains_defeated);
        }
        assert!(player.total_villains_defeated < 100);
    }
    assert_eq!(boss_spawned_at, vec![10, 20, 30]);
    assert_eq!(player.level, 3);
}

#[test]
fn boss_defeat_levels_up() {
    let mut g = game();
    g.encounter = Encounter::spawn_boss(1, &g.tuning);
    g.world.player.click_damage = 1e12;
    g.dice().script([0.9]);
    let report = g.click();
    let defeat = report.defeat.expect("boss down");
    assert!(defeat.was_boss && defeat.level_up);
    assert_eq!(g.world.player.level, 2);
    assert_eq!(g.encounter.kind, EncounterKind::Normal);
}

#[test]
fn offline_reward_is_capped_and_paid_once() {
    let clock = ManualClock::new(NOW_MS);
    let mut g = game_at(&clock);
    g.world.player.currency = 100.0;
    g.purchase(EntityId::Hero(HeroKind::Rookie)).expect("affordable");
    assert!((g.base_dps() - 5.0).abs() < 1e-9);

    let ten_hours = 10.0 * 3600.0;
    g.world.player.last_persist_time = NOW_MS - ten_hours * 1000.0;
    let before = g.world.player.currency;
    let reward = g.check_offline_progress().expect("reward");
    assert!((reward.amount - ten_hours * 5.0 * 0.5).abs() < 1e-6);
    assert!((g.world.player.currency - before - reward.amount).abs() < 1e-6);
    assert!(g.check_offline_progress().is_none());

    g.world.player.last_persist_time = NOW_MS - 3.0 * 86_400_000.0;
    let capped = g.check_offline_progress().expect("reward");
    assert!((capped.elapsed_secs - 86_400.0).abs() < 1e-9);
}

#[test]
fn offline_reward_ignores_active_buffs() {
    let mut g = game();
    g.world.player.currency = 100.0;
    g.purchase(EntityId::Hero(HeroKind::Rookie)).expect("affordable");
    g.activate_skill(hero_clicker::skills::SkillKind::Fury).expect("ready");
    assert!(g.current_dps() > g.base_dps());

    g.world.player.last_persist_time = NOW_MS - 1000.0 * 1000.0;
    let reward = g.check_offline_progress().expect("reward");
    assert!((reward.amount - 1000.0 * 5.0 * 0.5).abs() < 1e-6);
}

#[test]
fn save_and_load_round_trip() {
    let store = MemoryStore::new();
    let mut g = game().with_store(store.clone());
    g.world.player.currency = 12345.0;
    {
        let rookie = g.world.economy.hero_mut(HeroKind::Rookie);
        rookie.count = 7;
        rookie.rank = 2;
    }
    g.world.progression.achievements.restore("kill100", true);
    assert!(g.save());

    let mut fresh = game().with_store(store);
    assert!(fresh.load());
    assert!((fresh.world.player.currency - 12345.0).abs() < 1e-9);
    let rookie = fresh.world.economy.hero(HeroKind::Rookie);
    assert_eq!((rookie.count, rookie.rank), (7, 2));
    assert!(fresh.world.progression.achievements.is_done("kill100"));
    assert!((fresh.world.player.auto_damage - 5.0 * 100.0 * 7.0).abs() < 1e-6);
}

#[test]
fn legacy_save_fills_defaults() {
    let store = MemoryStore::new();
    store.insert_raw(
        DEFAULT_STORAGE_KEY,
        r#"{"score": 500, "level": 4, "heroes": {"scout": {"count": 2}}}"#,
    );
    let mut g = game().with_store(store);
    assert!(g.load());
    let p = &g.world.player;
    assert!((p.currency - 500.0).abs() < 1e-9);
    assert_eq!(p.level, 4);
    assert!(p.premium_currency.abs() < 1e-9);
    assert_eq!(g.world.economy.hero(HeroKind::Scout).count, 2);
    assert_eq!(g.world.economy.hero(HeroKind::Rookie).count, 0);
    assert!(!g.world.progression.achievements.is_done("kill100"));
}

#[test]
fn unreadable_save_leaves_state_alone() {
    let store = MemoryStore::new();
    store.insert_raw(DEFAULT_STORAGE_KEY, "{ not json");
    let mut g = game().with_store(store.clone());
    g.world.player.currency = 42.0;
    assert!(!g.load());
    assert!((g.world.player.currency - 42.0).abs() < 1e-9);
    assert_eq!(store.raw(DEFAULT_STORAGE_KEY).as_deref(), Some("{ not json"));
}

#[test]
fn achievement_bonus_applies_to_clicks_and_ticks() {
    let mut g = game();
    g.world.player.currency = 100.0;
    g.purchase(EntityId::Hero(HeroKind::Rookie)).expect("affordable");
    g.world.player.total_clicks = 1000;
    assert_eq!(g.check_achievements(), 1);

    assert!((g.current_dps() - 5.0 * 1.1).abs() < 1e-9);
    let tick = g.tick(0.1);
    assert!((tick.damage - 0.55).abs() < 1e-9);

    g.dice().script([0.9]);
    let report = g.click();
    assert!((report.damage.amount - 1.1).abs() < 1e-9);
}

#[test]
fn combo_resets_after_idle_window() {
    let mut g = game();
    g.dice().script([0.9, 0.9]);
    g.click();
    g.tick(0.1);
    g.click();
    assert_eq!(g.world.player.combo_count, 2);
    assert!(g.world.player.combo_multiplier > 1.0);

    for _ in 0..15 {
        g.tick(0.1);
    }
    assert!((g.world.player.combo_multiplier - 1.0).abs() < 1e-12);
    g.dice().script([0.9]);
    g.click();
    assert_eq!(g.world.player.combo_count, 1);
    assert!((g.world.player.combo_multiplier - 1.0).abs() < 1e-12);
}

#[test]
fn forced_critical_click_deals_tenfold() {
    let mut g = game();
    g.world.player.click_damage = 10.0;
    let mods = g.modifiers();
    let mut player = g.world.player.clone();
    let mut combo = Default::default();
    let mut dice = Dice::seeded(3);
    dice.script([0.9]);
    let result = hero_clicker::combat::resolve_click(
        &mut player,
        &mut combo,
        &mods,
        &mut dice,
        &g.tuning,
        0.0,
        true,
    );
    assert!(result.is_critical);
    assert!((result.amount - 100.0).abs() < 1e-9);
}

#[test]
fn elusive_villain_dodges_on_low_roll() {
    let mut g = game();
    g.encounter.kind = EncounterKind::Special(SpecialKind::Elusive);
    g.world.player.click_damage = 50.0;
    let before = g.encounter.current_health;
    // Crit roll misses, evade roll hits.
    g.dice().script([0.9, 0.1]);
    let report = g.click();
    assert_eq!(report.outcome, DamageOutcome::Evaded);
    assert!((g.encounter.current_health - before).abs() < 1e-12);
}

#[test]
fn huge_frame_gaps_are_clamped() {
    let mut g = game();
    let report = g.tick(3600.0);
    assert!((report.dt - g.tuning.max_dt).abs() < 1e-12);
    assert!(g.tick(f64::NAN).dt.abs() < 1e-12);
}

proptest! {
    #[test]
    fn prop_health_stays_in_bounds(
        level in 1u32..60,
        hits in prop::collection::vec(any::<f64>(), 1..20),
    ) {
        let tuning = Tuning::deterministic();
        let mut dice = Dice::seeded(11);
        let mut e = Encounter::spawn_normal(level, &tuning);
        for amount in hits {
            e.apply_damage(amount, &mut dice, &tuning);
            prop_assert!(e.current_health >= 0.0);
            prop_assert!(e.current_health <= e.max_health);
        }
    }

    #[test]
    fn prop_failed_purchase_is_a_no_op(currency in 0.0f64..99.0) {
        let mut g = game();
        g.world.player.currency = currency;
        prop_assert!(g.purchase(EntityId::Hero(HeroKind::Rookie)).is_err());
        prop_assert!((g.world.player.currency - currency).abs() < 1e-9);
    }
}
