//! Mouse-reactive particle field.
//!
//! Particles rest on a figure-eight curve.  The cursor blows them around,
//! springs pull them back, some escape and later fall back in under a
//! gravity-like pull that adds to whatever else moves them, and particles caught too close to the cursor go wild
//! for a short, fading excursion.  Dead particles regenerate in place.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::ParticleConfig;

/// Samples used when searching the curve for the closest point.
const CURVE_SAMPLES: usize = 2000;
const CURVE_STEP: f32 = 0.05;
const SPIN_RATE: f32 = 0.1;
/// Escaping particles travel at this multiple of their speed.
const ESCAPE_BOOST: f32 = 5.0;
/// Number of colour shades a renderer may pick from.
pub const SHADES: u8 = 6;

/// Point of the figure-eight curve at `phase` around `center`.
pub fn curve_point(center: Vec2, phase: f32) -> Vec2 {
    Vec2::new(
        center.x + 100.0 * phase.sin(),
        center.y + 50.0 * (phase * 2.0).sin(),
    )
}

/// Closest of [`CURVE_SAMPLES`] samples of the curve to `pos`.
pub fn closest_curve_point(center: Vec2, pos: Vec2) -> Vec2 {
    (0..CURVE_SAMPLES)
        .map(|t| curve_point(center, t as f32 * CURVE_STEP))
        .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)))
        .unwrap_or(center)
}

/// Where a particle springs back to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// A point on the curve; the phase may drift over time.
    Curve(f32),
    Fixed(Vec2),
}

impl Anchor {
    pub fn position(&self, center: Vec2) -> Vec2 {
        match *self {
            Anchor::Curve(phase) => curve_point(center, phase),
            Anchor::Fixed(p) => p,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Springing toward the anchor while spinning in place.
    Orbiting,
    /// Drifting away along `heading`.
    Escaping,
    /// Off on a random excursion; `life` fades from 1 to 0.
    Wild { life: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub anchor: Anchor,
    pub mode: Mode,
    /// Point the particle is falling toward, on top of its mode's motion.
    pub gravity: Option<Vec2>,
    pub size: f32,
    pub shade: u8,
    pub speed: f32,
    /// Direction of travel while escaping or wild.
    pub heading: f32,
    pub spin: f32,
    pub wind: f32,
    pub wind_angle: f32,
    /// Ticks left before the particle dies of old age.
    pub lifespan: u32,
    pub alive: bool,
}

impl Particle {
    /// A fresh particle resting on the curve at `phase`.
    pub fn on_curve<R: Rng + ?Sized>(center: Vec2, phase: f32, rng: &mut R) -> Self {
        Self {
            pos: curve_point(center, phase),
            anchor: Anchor::Curve(phase),
            mode: if rng.gen_bool(0.5) {
                Mode::Escaping
            } else {
                Mode::Orbiting
            },
            gravity: None,
            size: rng.gen_range(1.0..2.0),
            shade: rng.gen_range(0..SHADES),
            speed: rng.gen_range(0.1..0.5),
            heading: rng.gen_range(0.0..TAU),
            spin: rng.gen_range(0.0..TAU),
            wind: 0.0,
            wind_angle: 0.0,
            lifespan: rng.gen_range(100..=10_000),
            alive: true,
        }
    }

    /// Opacity for drawing; only wild particles fade.
    pub fn opacity(&self) -> f32 {
        match self.mode {
            Mode::Wild { life } => life.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }
}

/// Wind force felt at distance `d` from the cursor, given last tick's force.
pub fn wind_force(previous: f32, distance: Option<f32>, config: &ParticleConfig) -> f32 {
    match distance {
        Some(d) if d < config.wind_radius => {
            (config.wind_falloff - d).max(0.0) / config.wind_divisor
        }
        _ => previous * config.wind_decay,
    }
}

/// Pull strength toward a gravity target `d` away.
pub fn gravity_strength(d: f32, config: &ParticleConfig) -> f32 {
    (1.0 / (d + 1.0)).clamp(config.gravity_min, config.gravity_max)
}

/// One tick of a single particle.  Every force is computed from the
/// particle's state at the start of the tick and summed before moving.
pub fn update_particle<R: Rng + ?Sized>(
    p: &Particle,
    cursor: Option<Vec2>,
    center: Vec2,
    config: &ParticleConfig,
    rng: &mut R,
) -> Particle {
    let mut next = p.clone();
    if !p.alive {
        return next;
    }

    if let Mode::Wild { life } = p.mode {
        let dir = Vec2::from_angle(p.heading);
        next.pos += dir * p.speed;
        let life = life - config.wild_decay;
        next.mode = Mode::Wild { life };
        let outside = next.pos.x < 0.0
            || next.pos.y < 0.0
            || next.pos.x > config.width
            || next.pos.y > config.height;
        if life <= 0.0 || outside {
            next.alive = false;
        }
        return next;
    }

    let mut delta = Vec2::ZERO;

    // Wind
    let to_cursor = cursor.map(|c| c - p.pos);
    next.wind = wind_force(p.wind, to_cursor.map(Vec2::length), config);
    if let Some(v) = to_cursor.filter(|v| v.length() < config.wind_radius) {
        next.wind_angle = v.y.atan2(v.x);
    }
    delta += Vec2::from_angle(next.wind_angle) * next.wind;

    if next.wind > config.wild_threshold {
        next.mode = Mode::Wild { life: 1.0 };
        next.heading = rng.gen_range(0.0..TAU);
        next.speed = rng.gen_range(2.0..6.0);
        next.pos += delta;
        return next;
    }

    let mut captured = false;
    if let Some(target) = p.gravity {
        let d = p.pos.distance(target);
        delta += (target - p.pos) * gravity_strength(d, config);
        if d < config.capture_distance {
            captured = true;
            next.gravity = None;
        }
    }

    match p.mode {
        Mode::Orbiting => {
            let anchor = p.anchor.position(center);
            delta += (anchor - p.pos) * config.spring;
            delta += Vec2::from_angle(p.spin) * p.speed;
            next.spin = p.spin + SPIN_RATE;
            if let Anchor::Curve(phase) = p.anchor {
                next.anchor = Anchor::Curve(phase + config.anchor_drift);
            }
        }
        Mode::Escaping => {
            delta += Vec2::from_angle(p.heading) * p.speed * ESCAPE_BOOST;
            if rng.gen_bool(config.recall_chance) {
                next.mode = Mode::Orbiting;
                next.gravity = Some(closest_curve_point(center, p.pos));
            }
        }
        Mode::Wild { .. } => {}
    }

    next.pos += delta;
    if captured {
        next.anchor = Anchor::Fixed(next.pos);
    }

    next.lifespan = p.lifespan.saturating_sub(1);
    if next.lifespan == 0 {
        next.alive = false;
    }
    next
}

/// Bring a dead particle back: half restart at the centre of the field,
/// half just outside it and fall back onto the curve.
pub fn regenerate<R: Rng + ?Sized>(center: Vec2, config: &ParticleConfig, rng: &mut R) -> Particle {
    let phase = rng.gen_range(0.0..TAU);
    let mut p = Particle::on_curve(center, phase, rng);
    p.size = rng.gen_range(0.1..0.5);
    if rng.gen_bool(0.5) {
        p.pos = center;
    } else {
        let (w, h) = (config.width, config.height);
        let x = if rng.gen_bool(0.5) {
            rng.gen_range(-w * 0.1..=0.0)
        } else {
            rng.gen_range(w..=w * 1.1)
        };
        let y = if rng.gen_bool(0.5) {
            rng.gen_range(-h * 0.1..=0.0)
        } else {
            rng.gen_range(h..=h * 1.1)
        };
        p.pos = Vec2::new(x, y);
        p.gravity = Some(closest_curve_point(center, p.pos));
    }
    p
}

/// The whole simulation for particle mode.
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    center: Vec2,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Lay `config.count` particles along the curve.
    pub fn new<R: Rng + ?Sized>(config: ParticleConfig, rng: &mut R) -> Self {
        let center = Vec2::new(config.width / 2.0, config.height / 2.0);
        let particles = (0..config.count)
            .map(|t| Particle::on_curve(center, t as f32 * CURVE_STEP, rng))
            .collect();
        Self {
            config,
            center,
            particles,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle one tick; dead ones are regenerated first.
    pub fn step<R: Rng + ?Sized>(&mut self, cursor: Option<Vec2>, rng: &mut R) {
        for p in &mut self.particles {
            if !p.alive {
                *p = regenerate(self.center, &self.config, rng);
            }
            *p = update_particle(p, cursor, self.center, &self.config, rng);
        }
    }
}
