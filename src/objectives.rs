//! Missions: countable goals that pay a score reward when met.

use log::info;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectiveKind {
    /// Destroy hostiles.
    Destroy,
    /// Pick up power-ups.
    Collect,
    /// Stay alive, counted in whole seconds since launch.
    Survive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub target: u32,
    pub progress: u32,
    pub reward: u32,
}

impl Objective {
    pub fn new(kind: ObjectiveKind, target: u32, reward: u32) -> Self {
        Self {
            kind,
            target,
            progress: 0,
            reward,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    pub fn description(&self) -> String {
        match self.kind {
            ObjectiveKind::Destroy => format!("Destroy {} hostiles", self.target),
            ObjectiveKind::Collect => format!("Collect {} power-ups", self.target),
            ObjectiveKind::Survive => format!("Survive {} seconds", self.target),
        }
    }
}

/// The active objective plus the ones still waiting.
#[derive(Clone, Debug, PartialEq)]
pub struct Objectives {
    active: Option<Objective>,
    pending: Vec<Objective>,
}

impl Objectives {
    pub fn new(active: Option<Objective>, pending: Vec<Objective>) -> Self {
        Self { active, pending }
    }

    /// Destroy 10, then the other two in random order.
    pub fn standard() -> Self {
        Self::new(
            Some(Objective::new(ObjectiveKind::Destroy, 10, 50)),
            vec![
                Objective::new(ObjectiveKind::Collect, 5, 100),
                Objective::new(ObjectiveKind::Survive, 60, 150),
            ],
        )
    }

    pub fn active(&self) -> Option<&Objective> {
        self.active.as_ref()
    }

    pub fn pending(&self) -> &[Objective] {
        &self.pending
    }

    /// Counts one event toward the active objective if its kind matches.
    /// A no-op once every objective is done.
    pub fn record(&mut self, kind: ObjectiveKind) {
        if let Some(active) = self.active.as_mut().filter(|o| o.kind == kind) {
            active.progress += 1;
        }
    }

    /// Survival progress tracks the session clock rather than events.
    pub fn set_survived(&mut self, seconds: u32) {
        if let Some(active) = self
            .active
            .as_mut()
            .filter(|o| o.kind == ObjectiveKind::Survive)
        {
            active.progress = seconds;
        }
    }

    /// If the active objective is complete, retire it, activate a random
    /// pending one and return the reward.
    pub fn settle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u32> {
        if !self.active.as_ref().is_some_and(Objective::is_complete) {
            return None;
        }
        let done = self.active.take()?;
        info!("objective complete: {} (+{})", done.description(), done.reward);
        if !self.pending.is_empty() {
            let next = rng.gen_range(0..self.pending.len());
            self.active = Some(self.pending.swap_remove(next));
        }
        Some(done.reward)
    }
}
