//! Screen state machine and the hangar (ship selection) model.
//!
//! `Menu → ShipSelect → Playing → GameOver → Menu`.  The hangar can also be
//! opened from the menu just to edit the loadout, in which case confirming
//! returns to the menu.

use crate::pilot::{Loadout, ShipClass, Upgrades};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectPurpose {
    /// Confirming launches a session.
    Launch,
    /// Confirming only stores the loadout.
    Browse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    ShipSelect(SelectPurpose),
    Playing,
    GameOver,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Hangar,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    Menu(MenuChoice),
    /// Loadout confirmed in the hangar.
    Confirm,
    /// Quit key or window close on the current screen.
    Abort,
    /// Shield ran out.
    Defeated,
    /// Game-over screen timed out or was dismissed.
    Dismissed,
}

/// Next screen for `event`; events that mean nothing on `screen` leave it
/// unchanged.
pub fn advance(screen: Screen, event: FlowEvent) -> Screen {
    use FlowEvent::*;
    match (screen, event) {
        (Screen::Menu, Menu(MenuChoice::Start)) => Screen::ShipSelect(SelectPurpose::Launch),
        (Screen::Menu, Menu(MenuChoice::Hangar)) => Screen::ShipSelect(SelectPurpose::Browse),
        (Screen::Menu, Menu(MenuChoice::Quit) | Abort) => Screen::Exit,
        (Screen::ShipSelect(SelectPurpose::Launch), Confirm) => Screen::Playing,
        (Screen::ShipSelect(SelectPurpose::Browse), Confirm) => Screen::Menu,
        (Screen::ShipSelect(_), Abort) => Screen::Menu,
        (Screen::Playing, Defeated | Abort) => Screen::GameOver,
        (Screen::GameOver, Dismissed | Abort) => Screen::Menu,
        (screen, _) => screen,
    }
}

/// Upgrade stat a hangar point can go to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Speed,
    Shield,
    FirePower,
}

/// Hangar cursor and point allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipSelection {
    pub index: usize,
    pub points_left: u32,
    pub upgrades: Upgrades,
}

impl ShipSelection {
    pub const POINTS: u32 = 5;

    pub fn new() -> Self {
        Self {
            index: 0,
            points_left: Self::POINTS,
            upgrades: Upgrades::default(),
        }
    }

    pub fn class(&self) -> ShipClass {
        ShipClass::ALL[self.index % ShipClass::ALL.len()]
    }

    pub fn previous(&mut self) {
        let n = ShipClass::ALL.len();
        self.index = (self.index + n - 1) % n;
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % ShipClass::ALL.len();
    }

    /// Spends one point; `false` once the points are gone.
    pub fn spend(&mut self, stat: Stat) -> bool {
        if self.points_left == 0 {
            return false;
        }
        self.points_left -= 1;
        match stat {
            Stat::Speed => self.upgrades.speed += 1,
            Stat::Shield => self.upgrades.shield += 1,
            Stat::FirePower => self.upgrades.fire_power += 1,
        }
        true
    }

    /// Returns every spent point.
    pub fn reset_points(&mut self) {
        self.points_left = Self::POINTS;
        self.upgrades = Upgrades::default();
    }

    pub fn loadout(&self) -> Loadout {
        Loadout {
            class: self.class(),
            upgrades: self.upgrades,
        }
    }
}

impl Default for ShipSelection {
    fn default() -> Self {
        Self::new()
    }
}
