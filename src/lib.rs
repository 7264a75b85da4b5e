//! Galaxia: a terminal arcade shooter and a mouse-reactive particle field.
//!
//! The library holds every piece of simulation logic. The binary only owns
//! the terminal, the clock and the frame pacing.

pub mod arena;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod flow;
pub mod logging;
pub mod motion;
pub mod objectives;
pub mod particles;
pub mod pilot;
pub mod spawner;

pub use error::{GalaxiaError, Result};
