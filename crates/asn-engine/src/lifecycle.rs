use super::*;

/// Fires when a game ends or starts.
pub fn transitioned(update: &Update<Game>) -> bool {
    update.rose(Game::ended) || update.rose(Game::started)
}

/// Broadcasts game start and game end to every player on the roster.
///
/// End takes precedence when one update does both, so at most one
/// message goes out per update. Recipients go on the blind list, and
/// resolving any of them failing aborts the broadcast.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lifecycle;

impl Lifecycle {
    async fn recipients(&self, game: &Game, cx: &Context<'_>) -> Result<Vec<Address>, Error> {
        let mut bcc = Vec::with_capacity(game.players().len());
        for player in game.players() {
            bcc.push(cx.address(*player).await?);
        }
        Ok(bcc)
    }
}

#[async_trait::async_trait]
impl Reaction<Game> for Lifecycle {
    fn name(&self) -> &'static str {
        "lifecycle"
    }
    async fn react(&self, update: &Update<Game>, cx: &Context<'_>) -> Result<(), Error> {
        let game = update.proposed();
        let winner = match (update.rose(Game::ended), game.winner()) {
            (true, Some(winner)) => {
                let player = cx.store().player(winner).await?;
                Some(cx.store().user(player.user()).await?)
            }
            _ => None,
        };
        let letter = if update.rose(Game::ended) {
            match winner.as_ref() {
                Some(user) => Letter::Won {
                    game: game.name(),
                    winner: user.name(),
                },
                None => Letter::Ended { game: game.name() },
            }
        } else if update.rose(Game::started) {
            Letter::Started { game: game.name() }
        } else {
            return Ok(());
        };
        let bcc = self.recipients(game, cx).await?;
        if bcc.is_empty() {
            log::debug!("[lifecycle] game {} has nobody to tell", game.id());
            return Ok(());
        }
        log::info!("[lifecycle] '{}' to {} players", letter.subject(), bcc.len());
        cx.notifier()
            .send(&letter.broadcast(cx.settings(), bcc))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// An unstarted game with two seated players.
    async fn lobby(store: &Memory) -> Game {
        let mut game = Game::new(ID::default(), "Dorm".into(), "ABCD".into());
        for name in ["ann", "ben"] {
            let user = User::new(ID::default(), format!("{}@dorm.edu", name), name.into());
            let player = Player::new(ID::default(), user.id(), game.id());
            game.join(player.id());
            store.insert_user(user).await;
            store.insert_player(player).await;
        }
        store.insert_game(game.clone()).await;
        game
    }

    #[tokio::test]
    async fn end_outranks_start_in_one_update() {
        let (store, outbox) = (Arc::new(Memory::default()), Arc::new(Outbox::default()));
        let game = lobby(&store).await;
        let engine = Engine::new(store, outbox.clone(), Settings::default());
        let mut proposed = game.clone();
        proposed.start();
        proposed.end(None);
        let outcome = engine.update_game(proposed).await.unwrap();
        assert!(outcome.is_clean());
        let subjects = outbox
            .sent()
            .await
            .iter()
            .map(|m| m.subject().to_string())
            .collect::<Vec<_>>();
        assert_eq!(subjects, vec!["Your game has ended"]);
    }

    #[tokio::test]
    async fn unresolvable_player_aborts_broadcast() {
        let (store, outbox) = (Arc::new(Memory::default()), Arc::new(Outbox::default()));
        let mut game = lobby(&store).await;
        game.join(ID::default());
        store.insert_game(game.clone()).await;
        let engine = Engine::new(store.clone(), outbox.clone(), Settings::default());
        let outcome = engine.end(game.id()).await.unwrap();
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].kind(), Kind::Lookup);
        assert!(outbox.sent().await.is_empty());
        assert!(store.game(game.id()).await.unwrap().ended());
    }

    #[test]
    fn fires_on_start_and_end_only() {
        let game = Game::new(ID::default(), "Dorm".into(), "ABCD".into());
        let mut started = game.clone();
        started.start();
        let mut joined = game.clone();
        joined.join(ID::default());
        assert!(transitioned(&Update::new(game.clone(), started.clone())));
        assert!(!transitioned(&Update::new(started.clone(), started)));
        assert!(!transitioned(&Update::new(game, joined)));
    }
}
