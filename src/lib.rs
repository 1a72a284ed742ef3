//! Elimination engine for assassin games.
//!
//! This facade crate re-exports the assassin crates for convenient access.
//!
//! ## Crate Organization
//!
//! - [`core`] — Typed ids, settings, logging
//! - [`records`] — Game, player, and user records
//! - [`store`] — Record store trait, memory and PostgreSQL backends
//! - [`mailer`] — Letters, messages, and notifiers
//! - [`engine`] — Hooks, kill chain upkeep, and the update pipeline
//! - `pg` — PostgreSQL connectivity (feature `database`)

pub use asn_core    as core;
pub use asn_records as records;
pub use asn_store   as store;
pub use asn_mailer  as mailer;
pub use asn_engine  as engine;

#[cfg(feature = "database")]
pub use asn_pg      as pg;
