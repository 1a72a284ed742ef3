use super::*;
use thiserror::Error;

/// Everything that can stop or taint an update.
#[derive(Debug, Error)]
pub enum Error {
    /// A record the update depends on is missing.
    #[error("lookup failed: {0}")]
    Lookup(#[source] StoreError),

    /// The kill chain is corrupt. Never retried.
    #[error("kill chain of game {game} is broken: {defect}")]
    Chain { game: ID<Game>, defect: Defect },

    /// The notifier refused or lost a message.
    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),

    /// The store failed to read or commit, including lost races.
    #[error("store failure: {0}")]
    Store(#[source] StoreError),

    /// The game is over and no longer accepts updates.
    #[error("game {0} has ended")]
    Ended(ID<Game>),

    /// The update tried to move a field callers may not set directly.
    #[error("{field} of {collection} record {id} cannot change")]
    Frozen {
        collection: &'static str,
        field: &'static str,
        id: uuid::Uuid,
    },

    /// Hooks kept staging writes past the cascade limit.
    #[error("update cascaded past {0} writes")]
    Cascade(usize),
}

/// Coarse classification for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Lookup,
    Consistency,
    Delivery,
    Storage,
    Rejected,
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Lookup(_) => Kind::Lookup,
            Self::Chain { .. } => Kind::Consistency,
            Self::Cascade(_) => Kind::Consistency,
            Self::Delivery(_) => Kind::Delivery,
            Self::Store(_) => Kind::Storage,
            Self::Ended(_) => Kind::Rejected,
            Self::Frozen { .. } => Kind::Rejected,
        }
    }
    pub fn chain(game: ID<Game>, defect: Defect) -> Self {
        Self::Chain { game, defect }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Closed { game } => Self::Ended(ID::from(game)),
            e if e.is_not_found() => Self::Lookup(e),
            e => Self::Store(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn missing_records_classify_as_lookup() {
        let e = Error::from(StoreError::not_found(PLAYERS, ID::<Player>::default()));
        assert_eq!(e.kind(), Kind::Lookup);
        let e = Error::from(StoreError::conflict(PLAYERS, ID::<Player>::default()));
        assert_eq!(e.kind(), Kind::Storage);
    }
    #[test]
    fn closed_game_at_commit_is_a_rejection() {
        let game = ID::<Game>::default();
        let e = Error::from(StoreError::closed(game));
        assert!(matches!(e, Error::Ended(id) if id == game));
        assert_eq!(e.kind(), Kind::Rejected);
    }
    #[test]
    fn broken_chain_is_not_a_lookup() {
        let e = Error::chain(
            ID::default(),
            Defect::Hunters {
                target: ID::default(),
                found: 0,
            },
        );
        assert_eq!(e.kind(), Kind::Consistency);
        assert!(e.to_string().contains("0 live players hunt"));
    }
}
