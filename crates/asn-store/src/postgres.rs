use super::*;
use asn_core::Unique;
use asn_pg::Schema;
use tokio::sync::Mutex;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// PostgreSQL record store.
///
/// Owns its client behind a mutex so a commit can open a transaction.
/// Every `UPDATE` repeats the pre-image of the watched columns in its
/// `WHERE` clause; a row count of zero means another request got there
/// first and the transaction is dropped, rolling everything back.
pub struct Postgres {
    client: Mutex<Client>,
}

impl From<Client> for Postgres {
    fn from(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }
}

impl Postgres {
    /// Create tables and indices if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let client = self.client.lock().await;
        for (name, creates, indices) in [
            (<User as Schema>::name(), <User as Schema>::creates(), <User as Schema>::indices()),
            (<Game as Schema>::name(), <Game as Schema>::creates(), <Game as Schema>::indices()),
            (<Player as Schema>::name(), <Player as Schema>::creates(), <Player as Schema>::indices()),
        ] {
            log::info!("migrating table {}", name);
            client.batch_execute(creates).await?;
            client.batch_execute(indices).await?;
        }
        Ok(())
    }
}

fn game(row: &Row) -> Game {
    Game::restore(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, bool>(3),
        row.get::<_, bool>(4),
        row.get::<_, Option<uuid::Uuid>>(5).map(ID::from),
        row.get::<_, Vec<uuid::Uuid>>(6)
            .into_iter()
            .map(ID::from)
            .collect(),
    )
}

fn player(row: &Row) -> Player {
    Player::restore(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        ID::from(row.get::<_, uuid::Uuid>(1)),
        ID::from(row.get::<_, uuid::Uuid>(2)),
        row.get::<_, bool>(3),
        row.get::<_, Option<uuid::Uuid>>(4).map(ID::from),
        row.get::<_, bool>(5),
    )
}

fn user(row: &Row) -> User {
    User::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
    )
}

fn existence(write: &Write) -> &'static str {
    match write {
        Write::Game(_) => {
            const_format::concatcp!("SELECT 1 FROM ", asn_pg::GAMES, " WHERE id = $1")
        }
        Write::Player(_) => {
            const_format::concatcp!("SELECT 1 FROM ", asn_pg::PLAYERS, " WHERE id = $1")
        }
    }
}

/// Classify an update that matched no row: the row is either gone or
/// was changed underneath us.
fn mismatch(write: &Write, exists: bool) -> StoreError {
    match exists {
        true => StoreError::Conflict {
            collection: write.collection(),
            id: write.id(),
        },
        false => StoreError::NotFound {
            collection: write.collection(),
            id: write.id(),
        },
    }
}

#[async_trait::async_trait]
impl RecordStore for Postgres {
    async fn game(&self, id: ID<Game>) -> Result<Game, StoreError> {
        self.client
            .lock()
            .await
            .query_opt(
                const_format::concatcp!(
                    "SELECT id, name, game_code, started, ended, winner, players FROM ",
                    asn_pg::GAMES,
                    " WHERE id = $1"
                ),
                &[&id.inner()],
            )
            .await?
            .map(|row| game(&row))
            .ok_or_else(|| StoreError::not_found(GAMES, id))
    }
    async fn player(&self, id: ID<Player>) -> Result<Player, StoreError> {
        self.client
            .lock()
            .await
            .query_opt(
                const_format::concatcp!(
                    "SELECT id, user_id, game_id, is_alive, target, target_pending_elimination FROM ",
                    asn_pg::PLAYERS,
                    " WHERE id = $1"
                ),
                &[&id.inner()],
            )
            .await?
            .map(|row| player(&row))
            .ok_or_else(|| StoreError::not_found(PLAYERS, id))
    }
    async fn user(&self, id: ID<User>) -> Result<User, StoreError> {
        self.client
            .lock()
            .await
            .query_opt(
                const_format::concatcp!(
                    "SELECT id, email, name FROM ",
                    asn_pg::USERS,
                    " WHERE id = $1"
                ),
                &[&id.inner()],
            )
            .await?
            .map(|row| user(&row))
            .ok_or_else(|| StoreError::not_found(USERS, id))
    }
    async fn hunters(
        &self,
        game: ID<Game>,
        target: ID<Player>,
    ) -> Result<Vec<Player>, StoreError> {
        Ok(self
            .client
            .lock()
            .await
            .query(
                const_format::concatcp!(
                    "SELECT id, user_id, game_id, is_alive, target, target_pending_elimination FROM ",
                    asn_pg::PLAYERS,
                    " WHERE game_id = $1 AND target = $2 AND is_alive ORDER BY id"
                ),
                &[&game.inner(), &target.inner()],
            )
            .await?
            .iter()
            .map(player)
            .collect())
    }
    async fn roster(&self, game: ID<Game>) -> Result<Vec<Player>, StoreError> {
        Ok(self
            .client
            .lock()
            .await
            .query(
                const_format::concatcp!(
                    "SELECT id, user_id, game_id, is_alive, target, target_pending_elimination FROM ",
                    asn_pg::PLAYERS,
                    " WHERE game_id = $1 ORDER BY id"
                ),
                &[&game.inner()],
            )
            .await?
            .iter()
            .map(player)
            .collect())
    }
    async fn commit(&self, changes: &Changes) -> Result<(), StoreError> {
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;
        let mut games = changes.writes().iter().map(Write::game).collect::<Vec<_>>();
        games.sort();
        games.dedup();
        for game in games {
            let ended = tx
                .query_opt(
                    const_format::concatcp!(
                        "SELECT ended FROM ",
                        asn_pg::GAMES,
                        " WHERE id = $1 FOR UPDATE"
                    ),
                    &[&game.inner()],
                )
                .await?
                .map(|row| row.get::<_, bool>(0))
                .ok_or_else(|| StoreError::not_found(GAMES, game))?;
            if ended {
                log::warn!("[postgres] game {} has ended, refusing commit", game);
                return Err(StoreError::closed(game));
            }
        }
        for write in changes.writes() {
            let rows = match write {
                Write::Game(update) => {
                    let (old, new) = (update.original(), update.proposed());
                    tx.execute(
                        const_format::concatcp!(
                            "UPDATE ",
                            asn_pg::GAMES,
                            " SET name = $2, game_code = $3, started = $4, ended = $5, winner = $6, players = $7
                              WHERE id = $1 AND started = $8 AND ended = $9 AND winner IS NOT DISTINCT FROM $10"
                        ),
                        &[
                            &new.id().inner(),
                            &new.name(),
                            &new.code(),
                            &new.started(),
                            &new.ended(),
                            &new.winner().map(|id| id.inner()),
                            &new.players().iter().map(|id| id.inner()).collect::<Vec<_>>(),
                            &old.started(),
                            &old.ended(),
                            &old.winner().map(|id| id.inner()),
                        ],
                    )
                    .await?
                }
                Write::Player(update) => {
                    let (old, new) = (update.original(), update.proposed());
                    tx.execute(
                        const_format::concatcp!(
                            "UPDATE ",
                            asn_pg::PLAYERS,
                            " SET is_alive = $2, target = $3, target_pending_elimination = $4
                              WHERE id = $1 AND is_alive = $5 AND target IS NOT DISTINCT FROM $6 AND target_pending_elimination = $7"
                        ),
                        &[
                            &new.id().inner(),
                            &new.alive(),
                            &new.target().map(|id| id.inner()),
                            &new.pending(),
                            &old.alive(),
                            &old.target().map(|id| id.inner()),
                            &old.pending(),
                        ],
                    )
                    .await?
                }
            };
            if rows != 1 {
                let exists = tx.query_opt(existence(write), &[&write.id()]).await?.is_some();
                log::warn!("[postgres] pre-image mismatch on {}", write);
                return Err(mismatch(write, exists));
            }
        }
        tx.commit().await?;
        log::debug!("[postgres] committed {} writes", changes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanished_rows_classify_like_memory() {
        let player = Player::new(ID::default(), ID::default(), ID::default());
        let write = Write::from(Update::new(player.clone(), player));
        assert!(mismatch(&write, false).is_not_found());
        assert!(matches!(mismatch(&write, true), StoreError::Conflict { .. }));
    }

    #[test]
    fn existence_checks_the_written_table() {
        let game = Game::new(ID::default(), "Dorm".into(), "ABCD".into());
        let write = Write::from(Update::new(game.clone(), game));
        assert!(existence(&write).contains(asn_pg::GAMES));
    }
}
