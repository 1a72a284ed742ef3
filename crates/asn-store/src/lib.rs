//! Record store abstraction.
//!
//! The engine never touches storage directly. It reads records through
//! typed lookups and hands back a [`Changes`] set that the store commits
//! atomically, rejecting writes whose pre-image no longer matches.
//!
//! ## Backends
//!
//! - [`Memory`] — In-process tables, used by tests and dry runs
//! - [`Postgres`] — `tokio-postgres` backed store (feature `database`)
mod changes;
mod error;
mod memory;

pub use changes::*;
pub use error::*;
pub use memory::*;

#[cfg(feature = "database")]
mod postgres;
#[cfg(feature = "database")]
pub use postgres::*;

use asn_core::GAMES;
use asn_core::ID;
use asn_core::PLAYERS;
use asn_core::USERS;
use asn_records::*;

/// Typed queries and atomic commits over games, players, and users.
///
/// Lookups of a single record fail with [`StoreError::NotFound`] when
/// the record is missing. Implementations must apply a [`Changes`] set
/// all-or-nothing.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn game(&self, id: ID<Game>) -> Result<Game, StoreError>;
    async fn player(&self, id: ID<Player>) -> Result<Player, StoreError>;
    async fn user(&self, id: ID<User>) -> Result<User, StoreError>;
    /// Alive players in `game` whose current target is `target`.
    /// A healthy kill chain yields exactly one.
    async fn hunters(&self, game: ID<Game>, target: ID<Player>)
    -> Result<Vec<Player>, StoreError>;
    /// Every player of `game`, alive or not.
    async fn roster(&self, game: ID<Game>) -> Result<Vec<Player>, StoreError>;
    /// Apply every write in order, or none of them.
    async fn commit(&self, changes: &Changes) -> Result<(), StoreError>;
}
