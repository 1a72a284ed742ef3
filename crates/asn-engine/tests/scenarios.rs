use asn_core::ID;
use asn_core::Settings;
use asn_core::Unique;
use asn_engine::*;
use asn_mailer::*;
use asn_records::*;
use asn_store::*;
use std::sync::Arc;

struct Table {
    engine: Engine,
    store: Arc<Memory>,
    outbox: Arc<Outbox>,
    game: Game,
    players: Vec<Player>,
    users: Vec<User>,
}

/// A started game whose players hunt each other in seating order.
async fn table(names: &[&str]) -> Table {
    let store = Arc::new(Memory::default());
    let outbox = Arc::new(Outbox::default());
    let mut game = Game::new(ID::default(), "Spring Dorm".into(), "SPRG".into());
    let users = names
        .iter()
        .map(|n| User::new(ID::default(), format!("{}@dorm.edu", n.to_lowercase()), n.to_string()))
        .collect::<Vec<_>>();
    let ids = users.iter().map(|_| ID::<Player>::default()).collect::<Vec<_>>();
    let players = users
        .iter()
        .zip(ids.iter())
        .enumerate()
        .map(|(i, (u, id))| Player::new(*id, u.id(), game.id()).with_target(ids[(i + 1) % ids.len()]))
        .collect::<Vec<_>>();
    for (user, player) in users.iter().zip(players.iter()) {
        game.join(player.id());
        store.insert_user(user.clone()).await;
        store.insert_player(player.clone()).await;
    }
    game.start();
    store.insert_game(game.clone()).await;
    let engine = Engine::new(store.clone(), outbox.clone(), Settings::default());
    Table {
        engine,
        store,
        outbox,
        game,
        players,
        users,
    }
}

fn unstarted(game: &Game) -> Game {
    Game::restore(
        game.id(),
        game.name().to_string(),
        game.code().to_string(),
        false,
        false,
        None,
        game.players().to_vec(),
    )
}

fn emails(addresses: &[Address]) -> Vec<&str> {
    let mut emails = addresses.iter().map(Address::address).collect::<Vec<_>>();
    emails.sort();
    emails
}

#[tokio::test]
async fn last_survivor_wins() {
    let t = table(&["Ann", "Ben", "Cat"]).await;
    let (a, b, c) = (t.players[0].id(), t.players[1].id(), t.players[2].id());

    let outcome = t.engine.eliminate(b).await.unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.committed().len(), 2);
    assert_eq!(t.store.player(a).await.unwrap().target(), Some(c));
    assert!(!t.store.player(b).await.unwrap().alive());
    assert!(!t.store.game(t.game.id()).await.unwrap().ended());
    t.engine.audit(t.game.id()).await.unwrap();
    let sent = t.outbox.drain().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject(), "New Target Assigned");
    assert_eq!(emails(sent[0].recipients()), vec!["ann@dorm.edu"]);
    assert!(sent[0].html().contains("game.html?code=SPRG"));

    let outcome = t.engine.eliminate(c).await.unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.committed().len(), 3);
    assert!(matches!(outcome.committed()[0], Write::Game(_)));
    let game = t.store.game(t.game.id()).await.unwrap();
    assert!(game.ended());
    assert_eq!(game.winner(), Some(a));
    assert!(t.store.player(a).await.unwrap().hunts_self());
    t.engine.audit(t.game.id()).await.unwrap();
    let sent = t.outbox.drain().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject(), "Someone won your game!");
    assert!(sent[0].recipients().is_empty());
    assert_eq!(
        emails(sent[0].blind()),
        vec!["ann@dorm.edu", "ben@dorm.edu", "cat@dorm.edu"]
    );
    assert!(sent[0].html().contains(t.users[0].name()));
}

#[tokio::test]
async fn repeated_elimination_is_idempotent() {
    let t = table(&["Ann", "Ben", "Cat", "Dan"]).await;
    t.engine.eliminate(t.players[1].id()).await.unwrap();
    t.outbox.drain().await;
    let outcome = t.engine.eliminate(t.players[1].id()).await.unwrap();
    assert!(outcome.is_noop());
    assert!(t.outbox.sent().await.is_empty());
    assert_eq!(
        t.store.player(t.players[0].id()).await.unwrap().target(),
        Some(t.players[2].id())
    );
}

#[tokio::test]
async fn broken_chain_vetoes_elimination() {
    let t = table(&["Ann", "Ben", "Cat"]).await;
    let mut orphaned = t.players[0].clone();
    orphaned.retarget(t.players[2].id());
    t.store.insert_player(orphaned.clone()).await;
    let err = t.engine.eliminate(t.players[1].id()).await.unwrap_err();
    assert_eq!(err.kind(), Kind::Consistency);
    assert_eq!(t.store.player(t.players[1].id()).await.unwrap(), t.players[1]);
    assert_eq!(t.store.player(t.players[0].id()).await.unwrap(), orphaned);
    assert!(t.outbox.sent().await.is_empty());
}

#[tokio::test]
async fn delivery_failure_keeps_the_commit() {
    let t = table(&["Ann", "Ben", "Cat"]).await;
    t.outbox.close();
    let outcome = t.engine.eliminate(t.players[1].id()).await.unwrap();
    assert!(!outcome.is_clean());
    assert_eq!(outcome.failures()[0].kind(), Kind::Delivery);
    assert_eq!(
        t.store.player(t.players[0].id()).await.unwrap().target(),
        Some(t.players[2].id())
    );
    assert!(!t.store.player(t.players[1].id()).await.unwrap().alive());
}

#[tokio::test]
async fn claim_prompts_the_target() {
    let t = table(&["Ann", "Ben", "Cat"]).await;
    let outcome = t.engine.claim(t.players[0].id()).await.unwrap();
    assert!(outcome.is_clean());
    assert!(t.store.player(t.players[0].id()).await.unwrap().pending());
    let sent = t.outbox.drain().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject(), "Were you eliminated?");
    assert_eq!(emails(sent[0].recipients()), vec!["ben@dorm.edu"]);

    t.engine.eliminate(t.players[1].id()).await.unwrap();
    let ann = t.store.player(t.players[0].id()).await.unwrap();
    assert!(!ann.pending());
    assert_eq!(ann.target(), Some(t.players[2].id()));
}

#[tokio::test]
async fn start_and_end_broadcast_once_each() {
    let t = table(&["Ann", "Ben"]).await;
    t.store.insert_game(unstarted(&t.game)).await;

    t.engine.start(t.game.id()).await.unwrap();
    let sent = t.outbox.drain().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject(), "Your game has started!");
    assert_eq!(sent[0].blind().len(), 2);

    t.engine.end(t.game.id()).await.unwrap();
    let sent = t.outbox.drain().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject(), "Your game has ended");
    assert_eq!(t.store.game(t.game.id()).await.unwrap().winner(), None);
}

#[tokio::test]
async fn ended_game_rejects_updates() {
    let t = table(&["Ann", "Ben", "Cat"]).await;
    t.engine.end(t.game.id()).await.unwrap();
    let err = t.engine.eliminate(t.players[0].id()).await.unwrap_err();
    assert!(matches!(err, Error::Ended(id) if id == t.game.id()));
    assert_eq!(err.kind(), Kind::Rejected);
    let err = t.engine.update_game(unstarted(&t.game)).await.unwrap_err();
    assert_eq!(err.kind(), Kind::Rejected);
}

#[tokio::test]
async fn chain_holds_through_a_whole_game() {
    let names = ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"];
    let t = table(&names).await;
    for victim in [3, 1, 5, 2, 4] {
        t.engine.eliminate(t.players[victim].id()).await.unwrap();
        t.engine.audit(t.game.id()).await.unwrap();
    }
    let game = t.store.game(t.game.id()).await.unwrap();
    assert_eq!(game.winner(), Some(t.players[0].id()));
    let subjects = t
        .outbox
        .sent()
        .await
        .iter()
        .map(|m| m.subject().to_string())
        .collect::<Vec<_>>();
    assert_eq!(subjects.last().map(String::as_str), Some("Someone won your game!"));
    assert_eq!(subjects.iter().filter(|s| *s == "New Target Assigned").count(), 4);
}
