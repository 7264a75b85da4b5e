use galaxia::arena::Handle;
use galaxia::collision::{credit_kill, resolve};
use galaxia::compute::init_state;
use galaxia::config::{GameConfig, SpawnRule};
use galaxia::entities::*;
use galaxia::objectives::ObjectiveKind;
use galaxia::pilot::{Loadout, ShipClass, Upgrades};
use galaxia::spawner;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_config() -> GameConfig {
    GameConfig {
        star_count: 0,
        hostile: SpawnRule::new(0.0, 5),
        power_up: SpawnRule::new(0.0, 3),
        asteroid: SpawnRule::new(0.0, 8),
        hazard: SpawnRule::new(0.0, 2),
        ..GameConfig::default()
    }
}

fn make_state() -> Session {
    init_state(&quiet_config(), Loadout::default(), &mut StdRng::seed_from_u64(42))
}

fn place(s: &mut Session, kind: Kind, x: f32, y: f32, side: f32) -> Handle {
    s.arena.insert(Entity::new(kind, Vec2::new(x, y), Vec2::splat(side), Vec2::ZERO))
}

fn laser_at(s: &mut Session, x: f32, y: f32, power: i32) -> Handle {
    s.arena.insert(Entity::new(
        Kind::Laser { kind: LaserKind::Normal, power },
        Vec2::new(x, y),
        Vec2::new(4.0, 20.0),
        Vec2::new(0.0, -10.0),
    ))
}

/// Boss parked at `(x, y)`, already fighting.
fn boss_at(s: &mut Session, x: f32, y: f32, health: i32) -> Handle {
    let mut boss = spawner::new_boss(s.stage, s.config.width);
    boss.pos = Vec2::new(x, y);
    boss.kind = Kind::Boss { health, phase: BossPhase::Fighting, last_shot_ms: 0 };
    let h = s.arena.insert(boss);
    s.boss = Some(h);
    h
}

fn is_alive(s: &Session, h: Handle) -> bool {
    s.arena.get(h).is_some_and(|e| e.alive)
}

// The ship sits at (380, 540), 40x50.

// ── Lasers ───────────────────────────────────────────────────────────────────

#[test]
fn laser_hits_every_overlapping_hostile() {
    let mut s = make_state();
    let a = place(&mut s, Kind::Hostile { stage: 1, health: 10 }, 90.0, 95.0, 30.0);
    let b = place(&mut s, Kind::Hostile { stage: 1, health: 10 }, 92.0, 95.0, 30.0);
    let l = laser_at(&mut s, 100.0, 100.0, 10);
    resolve(&mut s);
    assert!(!is_alive(&s, l));
    assert!(!is_alive(&s, a));
    assert!(!is_alive(&s, b));
    // Second kill is paid at the combo from the first: 10 + 10 * 1.1
    assert!((s.score - 21.0).abs() < 1e-9);
}

#[test]
fn laser_wounds_every_overlapping_hostile() {
    let mut s = make_state();
    let a = place(&mut s, Kind::Hostile { stage: 2, health: 20 }, 90.0, 95.0, 30.0);
    let b = place(&mut s, Kind::Hostile { stage: 2, health: 20 }, 92.0, 95.0, 30.0);
    laser_at(&mut s, 100.0, 100.0, 10);
    resolve(&mut s);
    for h in [a, b] {
        assert!(matches!(
            s.arena.get(h).map(|e| &e.kind),
            Some(Kind::Hostile { health: 10, .. })
        ));
    }
    assert_eq!(s.score, 0.0);
}

#[test]
fn laser_that_kills_hostile_cannot_hit_boss() {
    let mut s = make_state();
    let boss = boss_at(&mut s, 60.0, 60.0, 100);
    let hostile = place(&mut s, Kind::Hostile { stage: 1, health: 10 }, 90.0, 95.0, 30.0);
    laser_at(&mut s, 100.0, 100.0, 10);
    resolve(&mut s);
    assert!(!is_alive(&s, hostile));
    assert!(matches!(
        s.arena.get(boss).map(|e| &e.kind),
        Some(Kind::Boss { health: 100, .. })
    ));
}

#[test]
fn laser_damages_boss() {
    let mut s = make_state();
    let boss = boss_at(&mut s, 60.0, 60.0, 100);
    laser_at(&mut s, 100.0, 100.0, 10);
    laser_at(&mut s, 110.0, 100.0, 10);
    resolve(&mut s);
    assert!(matches!(
        s.arena.get(boss).map(|e| &e.kind),
        Some(Kind::Boss { health: 80, .. })
    ));
    assert_eq!(s.arena.count(KindTag::Laser), 0);
}

#[test]
fn boss_defeat_advances_stage() {
    let mut s = make_state();
    let boss = boss_at(&mut s, 60.0, 60.0, 10);
    laser_at(&mut s, 100.0, 100.0, 10);
    let spare = laser_at(&mut s, 110.0, 100.0, 10);
    resolve(&mut s);
    assert!(!is_alive(&s, boss));
    assert!(s.boss.is_none());
    assert_eq!(s.stage, 2);
    assert_eq!(s.score, 1000.0);
    // Resolution stops at the killing shot
    assert!(is_alive(&s, spare));
}

// ── Ship contacts ────────────────────────────────────────────────────────────

#[test]
fn hostile_contact_costs_twenty() {
    let mut s = make_state();
    let h = place(&mut s, Kind::Hostile { stage: 1, health: 10 }, 390.0, 550.0, 30.0);
    resolve(&mut s);
    assert_eq!(s.pilot.shield, 80.0);
    assert!(!is_alive(&s, h));
    // Rammed hostiles are not kills
    assert_eq!(s.score, 0.0);
    assert_eq!(s.objectives.active().map(|o| o.progress), Some(0));
}

#[test]
fn shield_pickup_is_clamped() {
    let mut s = make_state();
    s.pilot.shield = 80.0;
    let p = place(&mut s, Kind::PowerUp(PowerUpKind::Shield), 390.0, 550.0, 20.0);
    resolve(&mut s);
    assert_eq!(s.pilot.shield, 100.0);
    assert!(!is_alive(&s, p));
}

#[test]
fn shield_pickup_respects_upgraded_max() {
    let loadout = Loadout {
        class: ShipClass::Standard,
        upgrades: Upgrades { shield: 3, ..Upgrades::default() },
    };
    let mut s = init_state(&quiet_config(), loadout, &mut StdRng::seed_from_u64(42));
    place(&mut s, Kind::PowerUp(PowerUpKind::Shield), 390.0, 550.0, 20.0);
    resolve(&mut s);
    assert_eq!(s.pilot.shield, 130.0);
}

#[test]
fn speed_pickup_adds_one() {
    let mut s = make_state();
    place(&mut s, Kind::PowerUp(PowerUpKind::Speed), 390.0, 550.0, 20.0);
    resolve(&mut s);
    assert_eq!(s.pilot.speed, 6.0);
}

#[test]
fn weapon_pickup_upgrades_laser() {
    let mut s = make_state();
    place(&mut s, Kind::PowerUp(PowerUpKind::Weapon), 390.0, 550.0, 20.0);
    resolve(&mut s);
    assert_eq!(s.pilot.laser, LaserKind::Rapid);
}

#[test]
fn pickup_counts_toward_collect_objective() {
    use galaxia::objectives::{Objective, Objectives};
    let mut s = make_state();
    s.objectives = Objectives::new(Some(Objective::new(ObjectiveKind::Collect, 5, 100)), vec![]);
    place(&mut s, Kind::PowerUp(PowerUpKind::Speed), 390.0, 550.0, 20.0);
    place(&mut s, Kind::PowerUp(PowerUpKind::Weapon), 395.0, 555.0, 20.0);
    resolve(&mut s);
    assert_eq!(s.objectives.active().map(|o| o.progress), Some(2));
}

#[test]
fn asteroid_yields_resources() {
    let mut s = make_state();
    let a = place(&mut s, Kind::Asteroid { resources: 25 }, 390.0, 550.0, 30.0);
    resolve(&mut s);
    assert_eq!(s.resources, 25);
    assert!(!is_alive(&s, a));
    assert_eq!(s.pilot.shield, 100.0);
}

#[test]
fn hazards_drain_once_per_tick() {
    let mut s = make_state();
    let h1 = place(&mut s, Kind::Hazard { ticks_left: 300 }, 350.0, 500.0, 100.0);
    place(&mut s, Kind::Hazard { ticks_left: 300 }, 360.0, 510.0, 100.0);
    resolve(&mut s);
    assert!((s.pilot.shield - 99.9).abs() < 1e-4);
    // Zones are not consumed
    assert!(is_alive(&s, h1));
}

#[test]
fn boss_contact_drains_without_killing_boss() {
    let mut s = make_state();
    let boss = boss_at(&mut s, 350.0, 500.0, 100);
    resolve(&mut s);
    resolve(&mut s);
    assert_eq!(s.pilot.shield, 98.0);
    assert!(is_alive(&s, boss));
}

#[test]
fn boss_shot_hits_for_ten() {
    let mut s = make_state();
    let shot = s.arena.insert(Entity::new(
        Kind::BossShot,
        Vec2::new(395.0, 545.0),
        Vec2::new(6.0, 12.0),
        Vec2::new(0.0, 6.0),
    ));
    resolve(&mut s);
    assert_eq!(s.pilot.shield, 90.0);
    assert!(!is_alive(&s, shot));
}

#[test]
fn nothing_touching_changes_nothing() {
    let mut s = make_state();
    place(&mut s, Kind::Hostile { stage: 1, health: 10 }, 10.0, 10.0, 30.0);
    place(&mut s, Kind::Asteroid { resources: 25 }, 600.0, 10.0, 30.0);
    let before = s.clone();
    resolve(&mut s);
    assert_eq!(s.pilot, before.pilot);
    assert_eq!(s.arena.len(), before.arena.len());
    assert_eq!(s.score, 0.0);
}

// ── Kill credit ──────────────────────────────────────────────────────────────

#[test]
fn combo_builds_within_window() {
    let mut s = make_state();
    for now in [0, 500, 900] {
        s.now_ms = now;
        credit_kill(&mut s, 1);
    }
    // Each kill pays with the multiplier from before it: 10 + 10 + 11
    assert!((s.score - 31.0).abs() < 1e-9);
    assert_eq!(s.pilot.combo, 2);
    assert_eq!(s.pilot.xp, 15);
}

#[test]
fn combo_resets_after_window() {
    let mut s = make_state();
    for now in [0, 500, 1500] {
        s.now_ms = now;
        credit_kill(&mut s, 1);
    }
    assert_eq!(s.pilot.combo, 0);
    // The late kill still pays at the multiplier the combo had reached
    assert!((s.score - 31.0).abs() < 1e-9);
}

#[test]
fn kill_score_scales_with_hostile_stage() {
    let mut s = make_state();
    credit_kill(&mut s, 3);
    assert_eq!(s.score, 30.0);
    assert_eq!(s.pilot.xp, 15);
}

#[test]
fn kill_credit_can_level_up() {
    let mut s = make_state();
    s.pilot.xp = 95;
    s.pilot.shield = 50.0;
    credit_kill(&mut s, 1);
    assert_eq!(s.pilot.level, 2);
    assert_eq!(s.pilot.shield, 70.0);
}
