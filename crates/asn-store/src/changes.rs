use asn_core::GAMES;
use asn_core::PLAYERS;
use asn_core::Unique;
use asn_records::*;

/// One pending record write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Game(Update<Game>),
    Player(Update<Player>),
}

impl Write {
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Game(_) => GAMES,
            Self::Player(_) => PLAYERS,
        }
    }
    pub fn id(&self) -> uuid::Uuid {
        match self {
            Self::Game(update) => update.id().inner(),
            Self::Player(update) => update.id().inner(),
        }
    }
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Game(update) => update.is_noop(),
            Self::Player(update) => update.is_noop(),
        }
    }
    /// The game this write belongs to.
    pub fn game(&self) -> asn_core::ID<Game> {
        match self {
            Self::Game(update) => update.proposed().id(),
            Self::Player(update) => update.proposed().game(),
        }
    }
}

impl From<Update<Game>> for Write {
    fn from(update: Update<Game>) -> Self {
        Self::Game(update)
    }
}
impl From<Update<Player>> for Write {
    fn from(update: Update<Player>) -> Self {
        Self::Player(update)
    }
}

impl std::fmt::Display for Write {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection(), self.id())
    }
}

/// Ordered set of writes committed as one unit.
///
/// Order is significant: writes staged by hooks precede the write that
/// triggered them, so a game's end is recorded before the reassignment
/// that closes its kill chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    writes: Vec<Write>,
}

impl Changes {
    pub fn push<W>(&mut self, write: W)
    where
        W: Into<Write>,
    {
        self.writes.push(write.into());
    }
    pub fn writes(&self) -> &[Write] {
        &self.writes
    }
    pub fn len(&self) -> usize {
        self.writes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

impl From<Vec<Write>> for Changes {
    fn from(writes: Vec<Write>) -> Self {
        Self { writes }
    }
}

impl IntoIterator for Changes {
    type Item = Write;
    type IntoIter = std::vec::IntoIter<Write>;
    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
