use galaxia::arena::Arena;
use galaxia::config::{GameConfig, SpawnRule};
use galaxia::entities::*;
use galaxia::spawner::*;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn always_config() -> GameConfig {
    GameConfig {
        hostile: SpawnRule::new(1.0, 5),
        power_up: SpawnRule::new(1.0, 3),
        asteroid: SpawnRule::new(1.0, 8),
        hazard: SpawnRule::new(1.0, 2),
        ..GameConfig::default()
    }
}

fn fighting_boss(last_shot_ms: u64) -> Entity {
    let mut boss = new_boss(1, 800.0);
    boss.pos.y = 50.0;
    boss.kind = Kind::Boss { health: 100, phase: BossPhase::Fighting, last_shot_ms };
    boss
}

// ── roll_spawns ──────────────────────────────────────────────────────────────

#[test]
fn spawns_stop_at_caps() {
    let config = always_config();
    let mut arena = Arena::new();
    let mut rng = seeded_rng();
    for _ in 0..30 {
        roll_spawns(&mut arena, &config, 1, &mut rng);
    }
    assert_eq!(arena.count(KindTag::Hostile), 6);
    assert_eq!(arena.count(KindTag::PowerUp), 3);
    assert_eq!(arena.count(KindTag::Asteroid), 8);
    assert_eq!(arena.count(KindTag::Hazard), 2);
}

#[test]
fn hostile_cap_grows_with_stage() {
    let config = always_config();
    assert_eq!(hostile_cap(&config, 1), 6);
    assert_eq!(hostile_cap(&config, 4), 9);

    let mut arena = Arena::new();
    let mut rng = seeded_rng();
    for _ in 0..30 {
        roll_spawns(&mut arena, &config, 4, &mut rng);
    }
    assert_eq!(arena.count(KindTag::Hostile), 9);
}

#[test]
fn zero_chance_never_spawns() {
    let config = GameConfig {
        hostile: SpawnRule::new(0.0, 5),
        power_up: SpawnRule::new(0.0, 3),
        asteroid: SpawnRule::new(0.0, 8),
        hazard: SpawnRule::new(0.0, 2),
        ..GameConfig::default()
    };
    let mut arena = Arena::new();
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        assert!(roll_spawns(&mut arena, &config, 1, &mut rng).is_empty());
    }
    assert!(arena.is_empty());
}

#[test]
fn first_roll_reports_every_kind() {
    let mut arena = Arena::new();
    let spawned = roll_spawns(&mut arena, &always_config(), 1, &mut seeded_rng());
    assert_eq!(
        spawned,
        vec![KindTag::Hostile, KindTag::PowerUp, KindTag::Asteroid, KindTag::Hazard]
    );
}

// ── Constructors ─────────────────────────────────────────────────────────────

#[test]
fn hostile_scales_with_stage() {
    let mut rng = seeded_rng();
    let h = new_hostile(3, 800.0, &mut rng);
    assert_eq!(h.kind, Kind::Hostile { stage: 3, health: 30 });
    assert_eq!(h.size, Vec2::splat(50.0));
    assert!((1.0..=6.0).contains(&h.vel.y));
    assert_eq!(h.vel.x.abs(), 2.0);
}

#[test]
fn asteroid_carries_resources() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        match new_asteroid(800.0, &mut rng).kind {
            Kind::Asteroid { resources } => assert!((10..=50).contains(&resources)),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn hazard_lies_inside_playfield() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let h = new_hazard(800.0, 600.0, &mut rng);
        assert!(h.left() >= 0.0 && h.right() <= 800.0);
        assert!(h.top() >= 0.0 && h.bottom() <= 600.0);
        assert_eq!(h.kind, Kind::Hazard { ticks_left: HAZARD_TICKS });
    }
}

#[test]
fn boss_waits_above_playfield() {
    let b = new_boss(2, 800.0);
    assert_eq!(b.pos, Vec2::new(350.0, -100.0));
    assert!(matches!(
        b.kind,
        Kind::Boss { health: 200, phase: BossPhase::Descending, .. }
    ));
}

// ── Boss volleys ─────────────────────────────────────────────────────────────

#[test]
fn boss_fires_three_way_spread() {
    let mut boss = fighting_boss(0);
    let shots = boss_volley(&mut boss, 1500);
    assert_eq!(shots.len(), 3);
    let dx: Vec<f32> = shots.iter().map(|s| s.vel.x).collect();
    assert_eq!(dx, vec![-2.0, 0.0, 2.0]);
    assert!(shots.iter().all(|s| s.kind == Kind::BossShot && s.top() == boss.bottom()));
    assert!(matches!(boss.kind, Kind::Boss { last_shot_ms: 1500, .. }));
}

#[test]
fn boss_waits_between_volleys() {
    let mut boss = fighting_boss(1000);
    assert!(boss_volley(&mut boss, 2000).is_empty());
    assert_eq!(boss_volley(&mut boss, 2001).len(), 3);
}

#[test]
fn descending_boss_holds_fire() {
    let mut boss = new_boss(1, 800.0);
    assert!(boss_volley(&mut boss, 10_000).is_empty());
}
