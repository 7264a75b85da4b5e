//! The player's ship stats: loadout, shield, experience and kill combo.

use crate::entities::LaserKind;

/// Experience needed for a level-up is `level * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

/// Shield gained per upgrade point spent on shield.
pub const SHIELD_PER_UPGRADE: f32 = 10.0;

/// Shield restored by a shield power-up.
pub const SHIELD_PICKUP: f32 = 50.0;

/// Ticks before the shield ability can be used again (10 s).
pub const SHIELD_COOLDOWN: u32 = 600;

/// Ticks before the blast ability can be used again (30 s).
pub const BLAST_COOLDOWN: u32 = 1800;

const BASE_SHIELD: f32 = 100.0;
const BASE_SPEED: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipClass {
    Standard,
    Swift,
    Heavy,
}

impl ShipClass {
    pub const ALL: [ShipClass; 3] = [ShipClass::Standard, ShipClass::Swift, ShipClass::Heavy];

    pub fn name(&self) -> &'static str {
        match self {
            ShipClass::Standard => "Standard",
            ShipClass::Swift => "Swift",
            ShipClass::Heavy => "Heavy",
        }
    }

    /// Laser the ship launches with.
    pub fn starting_laser(&self) -> LaserKind {
        match self {
            ShipClass::Standard => LaserKind::Normal,
            ShipClass::Swift => LaserKind::Rapid,
            ShipClass::Heavy => LaserKind::Heavy,
        }
    }
}

/// Points spent in the hangar before launch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Upgrades {
    pub speed: u32,
    pub shield: u32,
    pub fire_power: u32,
}

impl Upgrades {
    pub fn total(&self) -> u32 {
        self.speed + self.shield + self.fire_power
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loadout {
    pub class: ShipClass,
    pub upgrades: Upgrades,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            class: ShipClass::Standard,
            upgrades: Upgrades::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pilot {
    pub class: ShipClass,
    pub upgrades: Upgrades,
    /// Can dip below zero within a tick; the session ends once it does.
    pub shield: f32,
    /// Movement per tick before the speed upgrade bonus.
    pub speed: f32,
    pub xp: u32,
    pub level: u32,
    pub laser: LaserKind,
    /// Ticks until the shield ability is ready again.
    pub shield_cooldown: u32,
    /// Ticks until the blast ability is ready again.
    pub blast_cooldown: u32,
    pub combo: u32,
    pub last_kill_ms: Option<u64>,
}

impl Pilot {
    pub fn new(loadout: Loadout, starting_shield: f32) -> Self {
        let mut pilot = Self {
            class: loadout.class,
            upgrades: loadout.upgrades,
            shield: starting_shield,
            speed: BASE_SPEED,
            xp: 0,
            level: 1,
            laser: loadout.class.starting_laser(),
            shield_cooldown: 0,
            blast_cooldown: 0,
            combo: 0,
            last_kill_ms: None,
        };
        pilot.shield = pilot.shield.min(pilot.max_shield());
        pilot
    }

    pub fn max_shield(&self) -> f32 {
        BASE_SHIELD + self.upgrades.shield as f32 * SHIELD_PER_UPGRADE
    }

    /// Movement per tick including the upgrade bonus.
    pub fn move_speed(&self) -> f32 {
        self.speed + self.upgrades.speed as f32
    }

    pub fn laser_power(&self) -> i32 {
        self.laser.base_power() + self.upgrades.fire_power as i32
    }

    pub fn restore_shield(&mut self, amount: f32) {
        self.shield = (self.shield + amount).min(self.max_shield());
    }

    /// Score multiplier for the current combo.
    pub fn multiplier(&self) -> f64 {
        1.0 + f64::from(self.combo) * 0.1
    }

    /// Extends the combo if the previous kill was within `window_ms`,
    /// otherwise resets it.
    pub fn register_kill(&mut self, now_ms: u64, window_ms: u64) {
        self.combo = match self.last_kill_ms {
            Some(last) if now_ms.saturating_sub(last) < window_ms => self.combo + 1,
            _ => 0,
        };
        self.last_kill_ms = Some(now_ms);
    }

    /// Adds experience; returns `true` when this crossed into a new level.
    pub fn gain_xp(&mut self, amount: u32) -> bool {
        self.xp += amount;
        if self.xp >= self.level * XP_PER_LEVEL {
            self.level += 1;
            self.speed += 0.5;
            self.restore_shield(20.0);
            return true;
        }
        false
    }

    pub fn cool_down(&mut self) {
        self.shield_cooldown = self.shield_cooldown.saturating_sub(1);
        self.blast_cooldown = self.blast_cooldown.saturating_sub(1);
    }

    pub fn is_defeated(&self) -> bool {
        self.shield <= 0.0
    }
}
