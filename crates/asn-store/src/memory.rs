use super::*;
use asn_core::Unique;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct Tables {
    games: HashMap<ID<Game>, Game>,
    players: HashMap<ID<Player>, Player>,
    users: HashMap<ID<User>, User>,
}

impl Tables {
    /// Writes may only land in a game that is still running.
    fn admits(&self, write: &Write) -> Result<(), StoreError> {
        let game = write.game();
        match self.games.get(&game) {
            None => Err(StoreError::not_found(GAMES, game)),
            Some(stored) if stored.ended() => Err(StoreError::closed(game)),
            Some(_) => Ok(()),
        }
    }
    fn apply(&mut self, write: &Write) -> Result<(), StoreError> {
        match write {
            Write::Game(update) => {
                let id = update.id();
                match self.games.get(&id) {
                    None => Err(StoreError::not_found(GAMES, id)),
                    Some(stored) if stored != update.original() => {
                        Err(StoreError::conflict(GAMES, id))
                    }
                    Some(_) => {
                        self.games.insert(id, update.proposed().clone());
                        Ok(())
                    }
                }
            }
            Write::Player(update) => {
                let id = update.id();
                match self.players.get(&id) {
                    None => Err(StoreError::not_found(PLAYERS, id)),
                    Some(stored) if stored != update.original() => {
                        Err(StoreError::conflict(PLAYERS, id))
                    }
                    Some(_) => {
                        self.players.insert(id, update.proposed().clone());
                        Ok(())
                    }
                }
            }
        }
    }
}

/// In-process record store.
///
/// Commits are staged against a copy of the tables and swapped in only
/// when every write's pre-image matched, so a failed commit leaves no trace.
/// Whether a game is still running is judged on the tables as they were
/// before the commit, so a change set may end its own game.
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<Tables>,
}

impl Memory {
    pub async fn insert_game(&self, game: Game) {
        self.tables.lock().await.games.insert(game.id(), game);
    }
    pub async fn insert_player(&self, player: Player) {
        self.tables.lock().await.players.insert(player.id(), player);
    }
    pub async fn insert_user(&self, user: User) {
        self.tables.lock().await.users.insert(user.id(), user);
    }
}

#[async_trait::async_trait]
impl RecordStore for Memory {
    async fn game(&self, id: ID<Game>) -> Result<Game, StoreError> {
        self.tables
            .lock()
            .await
            .games
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(GAMES, id))
    }
    async fn player(&self, id: ID<Player>) -> Result<Player, StoreError> {
        self.tables
            .lock()
            .await
            .players
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(PLAYERS, id))
    }
    async fn user(&self, id: ID<User>) -> Result<User, StoreError> {
        self.tables
            .lock()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(USERS, id))
    }
    async fn hunters(
        &self,
        game: ID<Game>,
        target: ID<Player>,
    ) -> Result<Vec<Player>, StoreError> {
        let mut hunters = self
            .tables
            .lock()
            .await
            .players
            .values()
            .filter(|p| p.game() == game)
            .filter(|p| p.alive())
            .filter(|p| p.target() == Some(target))
            .cloned()
            .collect::<Vec<_>>();
        hunters.sort_by_key(|p| p.id());
        Ok(hunters)
    }
    async fn roster(&self, game: ID<Game>) -> Result<Vec<Player>, StoreError> {
        let mut roster = self
            .tables
            .lock()
            .await
            .players
            .values()
            .filter(|p| p.game() == game)
            .cloned()
            .collect::<Vec<_>>();
        roster.sort_by_key(|p| p.id());
        Ok(roster)
    }
    async fn commit(&self, changes: &Changes) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let mut staged = tables.clone();
        for write in changes.writes() {
            tables.admits(write)?;
            staged.apply(write)?;
        }
        *tables = staged;
        log::debug!("[memory] committed {} writes", changes.len());
        Ok(())
    }
}
