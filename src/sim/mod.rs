//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed movement step per tick, wall-clock timestamps for timers
//! - Seeded RNG only
//! - Stable iteration order (collection order decides ties)
//! - No rendering, audio or platform dependencies

pub mod barrier;
pub mod bonus;
pub mod collision;
pub mod entity;
pub mod formation;
pub mod member;
pub mod player;
pub mod projectile;
pub mod starfield;
pub mod state;
pub mod targeting;
pub mod tick;
pub mod wave;

pub use barrier::{Barrier, Segment};
pub use bonus::BonusTarget;
pub use collision::{Resolution, resolve};
pub use entity::{Body, HasBody};
pub use formation::{Formation, FormationStep};
pub use member::{DiveState, FormationMember};
pub use player::Player;
pub use projectile::{Owner, Projectile};
pub use starfield::{Star, StarField};
pub use state::{GameEvent, GamePhase, GameState};
pub use targeting::DiveCap;
pub use tick::tick;
