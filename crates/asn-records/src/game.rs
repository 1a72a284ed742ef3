use super::*;
use asn_core::ID;
use asn_core::Unique;

/// A single assassin game and its roster.
/// Once `ended` is set the record is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: ID<Self>,
    name: String,
    code: String,
    started: bool,
    ended: bool,
    winner: Option<ID<Player>>,
    players: Vec<ID<Player>>,
}

impl Game {
    pub fn new(id: ID<Self>, name: String, code: String) -> Self {
        Self {
            id,
            name,
            code,
            started: false,
            ended: false,
            winner: None,
            players: Vec::new(),
        }
    }
    /// Rebuild a game exactly as stored.
    pub fn restore(
        id: ID<Self>,
        name: String,
        code: String,
        started: bool,
        ended: bool,
        winner: Option<ID<Player>>,
        players: Vec<ID<Player>>,
    ) -> Self {
        Self {
            id,
            name,
            code,
            started,
            ended,
            winner,
            players,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn started(&self) -> bool {
        self.started
    }
    pub fn ended(&self) -> bool {
        self.ended
    }
    pub fn winner(&self) -> Option<ID<Player>> {
        self.winner
    }
    pub fn players(&self) -> &[ID<Player>] {
        &self.players
    }
    pub fn join(&mut self, player: ID<Player>) {
        if !self.players.contains(&player) {
            self.players.push(player);
        }
    }
    pub fn start(&mut self) {
        self.started = true;
    }
    /// End the game. A winner implies the game is over, so the two
    /// are only ever set together.
    pub fn end(&mut self, winner: Option<ID<Player>>) {
        self.ended = true;
        self.winner = winner;
    }
}

impl Unique for Game {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use asn_pg::*;

    impl Schema for Game {
        fn name() -> &'static str {
            GAMES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                GAMES,
                " (
                    id          UUID PRIMARY KEY,
                    name        VARCHAR(255) NOT NULL,
                    game_code   VARCHAR(32) UNIQUE NOT NULL,
                    started     BOOLEAN NOT NULL DEFAULT FALSE,
                    ended       BOOLEAN NOT NULL DEFAULT FALSE,
                    winner      UUID,
                    players     UUID[] NOT NULL DEFAULT '{}',
                    CHECK (winner IS NULL OR ended)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_games_code ON ",
                GAMES,
                " (game_code);"
            )
        }
    }
}
