use galaxia::config::ParticleConfig;
use galaxia::particles::*;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn center() -> Vec2 {
    Vec2::new(500.0, 500.0)
}

/// A still particle: no spin speed, no wind, long life.
fn particle(pos: Vec2, mode: Mode) -> Particle {
    Particle {
        pos,
        anchor: Anchor::Fixed(pos),
        mode,
        gravity: None,
        size: 1.0,
        shade: 0,
        speed: 0.0,
        heading: 0.0,
        spin: 0.0,
        wind: 0.0,
        wind_angle: 0.0,
        lifespan: 1000,
        alive: true,
    }
}

fn config() -> ParticleConfig {
    ParticleConfig {
        recall_chance: 0.0,
        ..ParticleConfig::default()
    }
}

// ── Curve ────────────────────────────────────────────────────────────────────

#[test]
fn curve_is_a_figure_eight() {
    assert_eq!(curve_point(center(), 0.0), center());
    let quarter = curve_point(center(), std::f32::consts::FRAC_PI_2);
    assert!((quarter.x - 600.0).abs() < 1e-3);
    assert!((quarter.y - 500.0).abs() < 1e-3);
}

#[test]
fn closest_point_of_a_curve_point_is_itself() {
    let on_curve = curve_point(center(), 1.0);
    assert!(closest_curve_point(center(), on_curve).distance(on_curve) < 0.5);
}

#[test]
fn closest_point_from_far_away_lies_on_curve() {
    let p = closest_curve_point(center(), Vec2::new(900.0, 500.0));
    // Rightmost lobe of the curve
    assert!((p.x - 600.0).abs() < 1.0);
}

// ── Wind ─────────────────────────────────────────────────────────────────────

#[test]
fn wind_decays_without_cursor() {
    let cfg = config();
    assert!((wind_force(50.0, None, &cfg) - 49.0).abs() < 1e-4);
    assert!((wind_force(50.0, Some(400.0), &cfg) - 49.0).abs() < 1e-4);
}

#[test]
fn wind_falls_off_with_distance() {
    let cfg = config();
    assert_eq!(wind_force(0.0, Some(25.0), &cfg), 100.0);
    // Inside the radius but past the falloff: no push, and no decay either
    assert_eq!(wind_force(80.0, Some(140.0), &cfg), 0.0);
}

#[test]
fn wind_pulls_toward_cursor() {
    let cfg = config();
    let p = particle(Vec2::new(500.0, 500.0), Mode::Orbiting);
    let cursor = Vec2::new(550.0, 500.0);
    let next = update_particle(&p, Some(cursor), center(), &cfg, &mut seeded_rng());
    assert_eq!(next.wind, 75.0);
    assert!(next.wind_angle.abs() < 1e-6);
    assert!(next.pos.x > p.pos.x);
}

#[test]
fn strong_wind_sends_particle_wild() {
    let cfg = config();
    let p = particle(Vec2::new(500.0, 500.0), Mode::Orbiting);
    let next = update_particle(&p, Some(Vec2::new(500.0, 500.0)), center(), &cfg, &mut seeded_rng());
    assert_eq!(next.mode, Mode::Wild { life: 1.0 });
    assert_eq!(next.opacity(), 1.0);
}

#[test]
fn threshold_wind_is_not_wild() {
    let cfg = config();
    let p = particle(Vec2::new(500.0, 500.0), Mode::Orbiting);
    let next = update_particle(&p, Some(Vec2::new(525.0, 500.0)), center(), &cfg, &mut seeded_rng());
    assert_eq!(next.mode, Mode::Orbiting);
}

// ── Wild excursions ──────────────────────────────────────────────────────────

#[test]
fn wild_particle_fades_and_dies() {
    let cfg = config();
    let p = particle(Vec2::new(500.0, 500.0), Mode::Wild { life: 0.03 });
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert!(next.alive);
    assert!(next.opacity() < 0.02);
    let last = update_particle(&next, None, center(), &cfg, &mut seeded_rng());
    assert!(!last.alive);
}

#[test]
fn wild_particle_dies_off_field() {
    let cfg = config();
    let mut p = particle(Vec2::new(999.0, 500.0), Mode::Wild { life: 1.0 });
    p.speed = 4.0;
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert!(!next.alive);
}

// ── Gravitation ──────────────────────────────────────────────────────────────

#[test]
fn gravity_strength_is_clamped() {
    let cfg = config();
    assert_eq!(gravity_strength(0.0, &cfg), 1.0);
    assert_eq!(gravity_strength(1000.0, &cfg), 0.05);
    assert!((gravity_strength(4.0, &cfg) - 0.2).abs() < 1e-6);
}

#[test]
fn close_gravitating_particle_is_captured() {
    let cfg = config();
    let start = Vec2::new(300.0, 300.0);
    let target = Vec2::new(305.0, 300.0);
    let mut p = particle(start, Mode::Orbiting);
    p.gravity = Some(target);
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert_eq!(next.gravity, None);
    assert_eq!(next.anchor, Anchor::Fixed(next.pos));
    assert!(next.pos.x > start.x && next.pos.x < target.x);
}

#[test]
fn distant_gravitating_particle_closes_in() {
    let cfg = config();
    let target = Vec2::new(400.0, 300.0);
    let mut p = particle(Vec2::new(300.0, 300.0), Mode::Orbiting);
    p.gravity = Some(target);
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert_eq!(next.gravity, Some(target));
    assert!(next.pos.distance(target) < p.pos.distance(target));
}

#[test]
fn gravity_and_spring_add_up() {
    let cfg = config();
    let mut p = particle(Vec2::new(300.0, 300.0), Mode::Orbiting);
    p.anchor = Anchor::Fixed(Vec2::new(300.0, 700.0));
    p.gravity = Some(Vec2::new(700.0, 300.0));
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    // (400, 0) * 0.05 from gravity, (0, 400) * 0.02 from the spring
    assert!(next.pos.distance(Vec2::new(320.0, 308.0)) < 1e-3);
}

#[test]
fn gravity_and_escape_add_up() {
    let cfg = config();
    let mut p = particle(Vec2::new(300.0, 300.0), Mode::Escaping);
    p.speed = 1.0;
    p.gravity = Some(Vec2::new(700.0, 300.0));
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert_eq!(next.mode, Mode::Escaping);
    assert!(next.pos.distance(Vec2::new(325.0, 300.0)) < 1e-3);
}

#[test]
fn certain_recall_turns_escaper_around() {
    let cfg = ParticleConfig {
        recall_chance: 1.0,
        ..ParticleConfig::default()
    };
    let p = particle(Vec2::new(900.0, 500.0), Mode::Escaping);
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert_eq!(next.mode, Mode::Orbiting);
    assert_eq!(next.gravity, Some(closest_curve_point(center(), p.pos)));
}

// ── Orbit and lifespan ───────────────────────────────────────────────────────

#[test]
fn orbiting_particle_springs_to_anchor() {
    let cfg = config();
    let mut p = particle(Vec2::new(300.0, 300.0), Mode::Orbiting);
    p.anchor = Anchor::Fixed(Vec2::new(400.0, 300.0));
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert!((next.pos.x - 302.0).abs() < 1e-4);
    assert_eq!(next.pos.y, 300.0);
}

#[test]
fn particle_dies_of_old_age() {
    let cfg = config();
    let mut p = particle(Vec2::new(300.0, 300.0), Mode::Orbiting);
    p.lifespan = 1;
    let next = update_particle(&p, None, center(), &cfg, &mut seeded_rng());
    assert!(!next.alive);
    // Dead particles stay put until regenerated
    assert_eq!(update_particle(&next, None, center(), &cfg, &mut seeded_rng()), next);
}

#[test]
fn regenerated_particle_starts_at_centre_or_falls_in() {
    let cfg = config();
    let mut rng = seeded_rng();
    let mut outside = 0;
    for _ in 0..100 {
        let p = regenerate(center(), &cfg, &mut rng);
        assert!(p.alive);
        match p.gravity {
            Some(target) => {
                outside += 1;
                let off_x = p.pos.x <= 0.0 || p.pos.x >= cfg.width;
                let off_y = p.pos.y <= 0.0 || p.pos.y >= cfg.height;
                assert!(off_x && off_y);
                assert!(closest_curve_point(center(), target).distance(target) < 1e-3);
            }
            None => assert_eq!(p.pos, center()),
        }
    }
    assert!(outside > 0 && outside < 100);
}

// ── Field ────────────────────────────────────────────────────────────────────

#[test]
fn field_lays_particles_on_curve() {
    let cfg = ParticleConfig { count: 50, ..config() };
    let field = ParticleField::new(cfg, &mut seeded_rng());
    assert_eq!(field.particles().len(), 50);
    assert_eq!(field.center(), center());
    assert!(field
        .particles()
        .iter()
        .all(|p| p.alive && matches!(p.anchor, Anchor::Curve(_))));
}

#[test]
fn field_keeps_its_population() {
    let cfg = ParticleConfig { count: 50, ..config() };
    let mut rng = seeded_rng();
    let mut field = ParticleField::new(cfg, &mut rng);
    for t in 0..200 {
        let cursor = (t % 2 == 0).then(|| Vec2::new(500.0 + t as f32, 500.0));
        field.step(cursor, &mut rng);
    }
    assert_eq!(field.particles().len(), 50);
}
