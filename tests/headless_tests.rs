//! Integration tests for headless scene execution
//!
//! These tests verify that:
//! - Scripted scenes run to completion
//! - Scene results are accessible programmatically
//! - Every variant spawns and lays out its roster
//! - Seeded RNG produces deterministic results

use bevy::prelude::*;
use thanos_arena::arena::{ArenaVariant, Viewport};
use thanos_arena::combat::attacker::{ActorSlot, Attacker, Footing};
use thanos_arena::combat::boss::{Boss, DefeatBanner};
use thanos_arena::headless::{
    build_headless_app, simulate_scene, HeadlessSceneConfig, SceneOutcome, ScriptAction,
    ScriptStep,
};
use thanos_arena::{CombatLog, CombatLogEventType, Leaderboard};

fn step(at_secs: f32, slot: u8, action: ScriptAction) -> ScriptStep {
    ScriptStep {
        at_secs,
        slot,
        action,
    }
}

/// Helper to create a seeded scene config
fn create_config(variant: ArenaVariant, script: Vec<ScriptStep>) -> HeadlessSceneConfig {
    HeadlessSceneConfig {
        variant,
        script,
        random_seed: Some(12345),
        max_duration_secs: 20.0,
        ..Default::default()
    }
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn attackers(app: &mut App) -> Vec<Attacker> {
    let world = app.world_mut();
    let mut query = world.query::<&Attacker>();
    let mut actors: Vec<Attacker> = query.iter(world).cloned().collect();
    actors.sort_by_key(|a| a.slot);
    actors
}

#[test]
fn test_heavy_attack_defeats_boss() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![step(0.1, 0, ScriptAction::Heavy)],
    );
    let result = simulate_scene(config).unwrap();

    assert_eq!(result.outcome, SceneOutcome::Defeated);
    assert!(result.boss_defeated);
    assert!(result.banner_visible);
    assert_eq!(result.attacks_heavy, 1);
    assert_eq!(result.impacts, 1);
    assert_eq!(result.leaderboard.len(), 1);
    assert_eq!(result.random_seed, Some(12345));
}

#[test]
fn test_attack_after_defeat_has_no_effect() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![
            step(0.0, 0, ScriptAction::Heavy),
            step(2.5, 0, ScriptAction::Heavy),
        ],
    );
    let result = simulate_scene(config).unwrap();

    assert_eq!(result.outcome, SceneOutcome::Defeated);
    assert_eq!(result.attacks_heavy, 1);
    assert_eq!(result.attacks_rejected, 1);
    assert_eq!(result.impacts, 1);
    assert_eq!(result.leaderboard.len(), 1);
}

#[test]
fn test_impact_landing_after_defeat_is_ignored() {
    // Slot 1 reaches the boss after the lethal blow from slot 0
    let config = create_config(
        ArenaVariant::Squad,
        vec![
            step(0.0, 0, ScriptAction::Heavy),
            step(0.9, 1, ScriptAction::Light),
        ],
    );
    let result = simulate_scene(config).unwrap();

    assert_eq!(result.outcome, SceneOutcome::Defeated);
    assert_eq!(result.attacks_heavy, 1);
    assert_eq!(result.attacks_light, 1);
    assert_eq!(result.attacks_rejected, 0);
    assert_eq!(result.impacts, 1);
    assert_eq!(result.leaderboard.len(), 1);
}

#[test]
fn test_light_attack_adds_leaderboard_entry() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![step(0.0, 0, ScriptAction::Light)],
    );
    let result = simulate_scene(config).unwrap();

    assert_eq!(result.outcome, SceneOutcome::Settled);
    assert!(!result.boss_defeated);
    assert!(!result.banner_visible);
    assert_eq!(result.attacks_light, 1);
    assert_eq!(result.impacts, 1);
    assert_eq!(result.leaderboard.len(), 1);
    let entry = &result.leaderboard[0];
    assert_eq!(entry.rank, 1);
    assert!((50..=149).contains(&entry.total));
}

#[test]
fn test_busy_actor_drops_second_request() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![
            step(0.0, 0, ScriptAction::Light),
            step(0.1, 0, ScriptAction::Light),
        ],
    );
    let result = simulate_scene(config).unwrap();

    assert_eq!(result.attacks_light, 1);
    assert_eq!(result.attacks_rejected, 1);
    assert_eq!(result.impacts, 1);
}

#[test]
fn test_seeded_scenes_are_deterministic() {
    let script = vec![
        step(0.0, 0, ScriptAction::Light),
        step(2.0, 0, ScriptAction::Light),
        step(4.0, 0, ScriptAction::Light),
    ];
    let first = simulate_scene(create_config(ArenaVariant::Solo, script.clone())).unwrap();
    let second = simulate_scene(create_config(ArenaVariant::Solo, script)).unwrap();

    assert_eq!(first.impacts, 3);
    assert_eq!(first.leaderboard, second.leaderboard);
}

#[test]
fn test_scene_times_out() {
    let config = HeadlessSceneConfig {
        variant: ArenaVariant::Wave,
        max_duration_secs: 1.0,
        ..Default::default()
    };
    let result = simulate_scene(config).unwrap();

    assert_eq!(result.outcome, SceneOutcome::TimedOut);
    assert!(result.elapsed_secs >= 1.0);
    assert!(!result.boss_defeated);
}

#[test]
fn test_squad_spawns_four_actors_on_mixed_footing() {
    let config = create_config(
        ArenaVariant::Squad,
        vec![step(5.0, 3, ScriptAction::Light)],
    );
    let mut app = build_headless_app(config);
    run_frames(&mut app, 2);

    let actors = attackers(&mut app);
    assert_eq!(actors.len(), 4);
    assert_eq!(actors[0].footing, Footing::Ground);
    assert!(matches!(actors[1].footing, Footing::Platform(_)));
    assert!(actors.iter().all(|a| !a.is_busy()));

    // Slots stand apart from each other
    for pair in actors.windows(2) {
        assert!(pair[1].home.x > pair[0].home.x);
    }
}

#[test]
fn test_squad_actor_attacks_independently() {
    let config = create_config(
        ArenaVariant::Squad,
        vec![step(0.0, 2, ScriptAction::Light)],
    );
    let mut app = build_headless_app(config);
    run_frames(&mut app, 10);

    let actors = attackers(&mut app);
    let busy: Vec<ActorSlot> = actors.iter().filter(|a| a.is_busy()).map(|a| a.slot).collect();
    assert_eq!(busy, vec![ActorSlot(2)]);
}

#[test]
fn test_wave_spawns_actors_over_time() {
    let config = HeadlessSceneConfig {
        variant: ArenaVariant::Wave,
        random_seed: Some(7),
        ..Default::default()
    };
    let mut app = build_headless_app(config);
    run_frames(&mut app, 2);
    assert!(attackers(&mut app).is_empty());

    // First tick at 1.6 s
    run_frames(&mut app, 120);
    assert_eq!(attackers(&mut app).len(), 1);

    // Roster caps at four
    run_frames(&mut app, 60 * 10);
    assert_eq!(attackers(&mut app).len(), 4);

    let world = app.world();
    assert!(world.resource::<CombatLog>().count(CombatLogEventType::Impact) > 0);
    assert!(!world.resource::<Leaderboard>().is_empty());
}

#[test]
fn test_resize_repositions_boss_and_clamps_homes() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![step(10.0, 0, ScriptAction::Light)],
    );
    let mut app = build_headless_app(config);
    run_frames(&mut app, 2);
    assert_eq!(app.world().resource::<Boss>().anchor(), Vec2::new(980.0, 450.0));

    *app.world_mut().resource_mut::<Viewport>() = Viewport::new(1600.0, 900.0);
    run_frames(&mut app, 1);
    assert_eq!(app.world().resource::<Boss>().anchor(), Vec2::new(1300.0, 450.0));

    *app.world_mut().resource_mut::<Viewport>() = Viewport::new(120.0, 400.0);
    run_frames(&mut app, 1);
    let actors = attackers(&mut app);
    assert_eq!(actors[0].home.x, 100.0);
    assert_eq!(actors[0].position.x, 100.0);
}

#[test]
fn test_banner_hidden_until_defeat() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![step(0.0, 0, ScriptAction::Heavy)],
    );
    let mut app = build_headless_app(config);
    run_frames(&mut app, 30);

    assert!(app.world().resource::<Boss>().is_alive());
    assert!(!app.world().resource::<DefeatBanner>().is_visible());
}

#[test]
fn test_headless_log_records_scene() {
    let config = create_config(
        ArenaVariant::Solo,
        vec![step(0.0, 0, ScriptAction::Light)],
    );
    let mut app = build_headless_app(config);
    run_frames(&mut app, 60 * 3);

    let log = app.world().resource::<CombatLog>();
    assert_eq!(log.count(CombatLogEventType::Attack), 1);
    assert_eq!(log.count(CombatLogEventType::Impact), 1);
    assert_eq!(log.count(CombatLogEventType::Damage), 1);
    assert!(log.scene_time > 0.0);
}

#[test]
fn test_demo_configs_load() {
    for name in ["heavy_finish", "squad_rotation", "wave_timer"] {
        let path = std::path::PathBuf::from(format!("demos/{}.json", name));
        let config = HeadlessSceneConfig::load_from_file(&path)
            .unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert!(config.random_seed.is_some());
    }
}
