use super::*;
use asn_core::ID;
use asn_core::Unique;

/// One participant of a game.
///
/// `target` is unset until game setup assigns the kill chain. Among alive
/// players, targets form a single cycle; the last survivor targets itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: ID<Self>,
    user: ID<User>,
    game: ID<Game>,
    alive: bool,
    target: Option<ID<Player>>,
    pending: bool,
}

impl Player {
    pub fn new(id: ID<Self>, user: ID<User>, game: ID<Game>) -> Self {
        Self {
            id,
            user,
            game,
            alive: true,
            target: None,
            pending: false,
        }
    }
    /// Rebuild a player exactly as stored.
    pub fn restore(
        id: ID<Self>,
        user: ID<User>,
        game: ID<Game>,
        alive: bool,
        target: Option<ID<Player>>,
        pending: bool,
    ) -> Self {
        Self {
            id,
            user,
            game,
            alive,
            target,
            pending,
        }
    }
    pub fn user(&self) -> ID<User> {
        self.user
    }
    pub fn game(&self) -> ID<Game> {
        self.game
    }
    pub fn alive(&self) -> bool {
        self.alive
    }
    pub fn target(&self) -> Option<ID<Player>> {
        self.target
    }
    /// Whether this player has claimed their target and awaits confirmation.
    pub fn pending(&self) -> bool {
        self.pending
    }
    /// True once this player is the only one left and hunts itself.
    pub fn hunts_self(&self) -> bool {
        self.target == Some(self.id)
    }
    pub fn eliminate(&mut self) {
        self.alive = false;
    }
    pub fn retarget(&mut self, target: ID<Player>) {
        self.target = Some(target);
    }
    pub fn claim(&mut self) {
        self.pending = true;
    }
    pub fn settle(&mut self) {
        self.pending = false;
    }
    pub fn with_target(mut self, target: ID<Player>) -> Self {
        self.retarget(target);
        self
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use asn_pg::*;

    impl Schema for Player {
        fn name() -> &'static str {
            PLAYERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                PLAYERS,
                " (
                    id                          UUID PRIMARY KEY,
                    user_id                     UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    game_id                     UUID NOT NULL REFERENCES ",
                GAMES,
                "(id),
                    is_alive                    BOOLEAN NOT NULL DEFAULT TRUE,
                    target                      UUID REFERENCES ",
                PLAYERS,
                "(id),
                    target_pending_elimination  BOOLEAN NOT NULL DEFAULT FALSE
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_players_game_target ON ",
                PLAYERS,
                " (game_id, target);
                 CREATE INDEX IF NOT EXISTS idx_players_user ON ",
                PLAYERS,
                " (user_id);"
            )
        }
    }
}
