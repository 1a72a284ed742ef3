use thiserror::Error;

/// Failures surfaced by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists in the collection.
    #[error("{collection} record {id} not found")]
    NotFound {
        collection: &'static str,
        id: uuid::Uuid,
    },

    /// The stored record no longer matches the pre-image of a write.
    /// Another update won the race; nothing from the change set was applied.
    #[error("{collection} record {id} was modified concurrently")]
    Conflict {
        collection: &'static str,
        id: uuid::Uuid,
    },

    /// The game a write belongs to had already ended when the change
    /// set reached the store. Nothing from the change set was applied.
    #[error("game {game} has ended")]
    Closed { game: uuid::Uuid },

    #[cfg(feature = "database")]
    #[error("postgres: {0}")]
    Postgres(#[from] asn_pg::PgErr),
}

impl StoreError {
    pub fn not_found<T>(collection: &'static str, id: asn_core::ID<T>) -> Self {
        Self::NotFound {
            collection,
            id: id.inner(),
        }
    }
    pub fn conflict<T>(collection: &'static str, id: asn_core::ID<T>) -> Self {
        Self::Conflict {
            collection,
            id: id.inner(),
        }
    }
    pub fn closed<T>(game: asn_core::ID<T>) -> Self {
        Self::Closed { game: game.inner() }
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
