//! Elimination engine for assassin games.
//!
//! Players of a game form a single kill chain: each alive player hunts
//! exactly one other alive player. The engine keeps that chain intact as
//! players are eliminated, declares the last survivor the winner, and
//! mails everyone who needs to know.
//!
//! ## Hooks
//!
//! - [`Elimination`] — Guard: hands the victim's target to their assassin
//! - [`NewTarget`] — Reaction: mails a player their new target
//! - [`ClaimCheck`] — Reaction: asks a target to confirm a claimed kill
//! - [`Lifecycle`] — Reaction: broadcasts game start and game end
//!
//! ## Pipeline
//!
//! - [`Engine`] — Runs guards, commits, then runs reactions
//! - [`chain`] — Kill chain verification
pub mod chain;
mod claim;
mod elimination;
mod engine;
mod error;
mod hooks;
mod lifecycle;
mod retarget;

pub use chain::Defect;
pub use claim::*;
pub use elimination::*;
pub use engine::*;
pub use error::*;
pub use hooks::*;
pub use lifecycle::*;
pub use retarget::*;

use asn_core::*;
use asn_mailer::*;
use asn_records::*;
use asn_store::*;
