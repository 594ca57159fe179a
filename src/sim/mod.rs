//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per scheduler tick, no delta-time scaling
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies; the tick emits a [`Frame`]

pub mod behavior;
pub mod collision;
pub mod population;
pub mod state;
pub mod tick;

pub use behavior::steer;
pub use collision::{Bounds, is_colliding};
pub use population::{relocate_if_outside, spawn_enemy, spawn_item, top_up};
pub use state::{DeathCause, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Item, Player};
pub use tick::tick;

pub use crate::render::Frame;
