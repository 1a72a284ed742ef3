//! Records observed and mutated by the elimination engine.
//!
//! Records are created by external game setup; the engine only updates
//! existing ones in place.
//!
//! - [`Game`] — Lifecycle flags, winner, and roster of a game
//! - [`Player`] — One participant: liveness, target, pending claim
//! - [`User`] — Account behind a player, read for rendering mail
//! - [`Update`] — Before/after pair for one record write
mod game;
mod player;
mod update;
mod user;

pub use game::*;
pub use player::*;
pub use update::*;
pub use user::*;
