//! Update pipeline.
//!
//! Every record update goes through [`Engine::process`]:
//!
//! 1. drop the update if it changes nothing
//! 2. run guards over the update and over everything they stage, until
//!    no new writes appear
//! 3. commit the whole change set atomically, staged writes first
//! 4. run reactions over each committed write, collecting failures
//!
//! A guard error aborts before anything is stored. A reaction error is
//! reported in the [`Outcome`] and leaves the commit in place.
use super::*;
use std::sync::Arc;

/// What one processed update left behind.
#[derive(Debug, Default)]
pub struct Outcome {
    committed: Vec<Write>,
    failures: Vec<Error>,
}

impl Outcome {
    /// Writes that reached the store, in commit order.
    pub fn committed(&self) -> &[Write] {
        &self.committed
    }
    /// Post-commit hooks that failed. The commit stands regardless.
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }
    pub fn is_noop(&self) -> bool {
        self.committed.is_empty()
    }
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Elimination engine over a record store and a notifier.
pub struct Engine {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    settings: Settings,
    games: Hooks<Game>,
    players: Hooks<Player>,
}

impl Engine {
    /// Engine with the standard game rules registered.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>, settings: Settings) -> Self {
        let mut engine = Self::bare(store, notifier, settings);
        engine
            .players
            .before(eliminated, Arc::new(Elimination))
            .after(retargeted, Arc::new(NewTarget))
            .after(claimed, Arc::new(ClaimCheck));
        engine.games.after(transitioned, Arc::new(Lifecycle));
        engine
    }
    /// Engine with no hooks at all. Updates are committed verbatim.
    pub fn bare(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>, settings: Settings) -> Self {
        Self {
            store,
            notifier,
            settings,
            games: Hooks::default(),
            players: Hooks::default(),
        }
    }
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn games_mut(&mut self) -> &mut Hooks<Game> {
        &mut self.games
    }
    pub fn players_mut(&mut self) -> &mut Hooks<Player> {
        &mut self.players
    }
    fn context(&self) -> Context<'_> {
        Context::new(self.store.as_ref(), self.notifier.as_ref(), &self.settings)
    }
}

impl Engine {
    /// Replace a stored player with `proposed`.
    ///
    /// Callers may eliminate a player or raise and drop a claim. Targets
    /// only move through elimination, the dead stay dead, and players of
    /// an ended game are frozen.
    pub async fn update_player(&self, proposed: Player) -> Result<Outcome, Error> {
        let original = self.store.player(proposed.id()).await?;
        let frozen = |field| Error::Frozen {
            collection: PLAYERS,
            field,
            id: proposed.id().inner(),
        };
        if original.user() != proposed.user() {
            return Err(frozen("user"));
        }
        if original.game() != proposed.game() {
            return Err(frozen("game"));
        }
        if original.target() != proposed.target() {
            return Err(frozen("target"));
        }
        if !original.alive() && proposed.alive() {
            return Err(frozen("is_alive"));
        }
        let update = Update::new(original, proposed);
        if update.is_noop() {
            log::debug!("[engine] player {} unchanged", update.id());
            return Ok(Outcome::default());
        }
        let game = self.store.game(update.original().game()).await?;
        if game.ended() {
            return Err(Error::Ended(game.id()));
        }
        self.process(Write::from(update)).await
    }

    /// Replace a stored game with `proposed`. Ended games are frozen.
    pub async fn update_game(&self, proposed: Game) -> Result<Outcome, Error> {
        let original = self.store.game(proposed.id()).await?;
        let update = Update::new(original, proposed);
        if update.is_noop() {
            log::debug!("[engine] game {} unchanged", update.id());
            return Ok(Outcome::default());
        }
        if update.original().ended() {
            return Err(Error::Ended(update.id()));
        }
        self.process(Write::from(update)).await
    }

    /// Run one write through guards, commit, and reactions.
    pub async fn process(&self, root: Write) -> Result<Outcome, Error> {
        if root.is_noop() {
            return Ok(Outcome::default());
        }
        let cx = self.context();
        let changes = self.stage(root, &cx).await?;
        self.store.commit(&changes).await?;
        log::info!(
            "[engine] committed {} writes: {}",
            changes.len(),
            changes
                .writes()
                .iter()
                .map(Write::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let mut failures = Vec::new();
        for write in changes.writes() {
            failures.extend(self.react(write, &cx).await);
        }
        Ok(Outcome {
            committed: changes.into_iter().collect(),
            failures,
        })
    }

    /// Expand a write into its full change set.
    ///
    /// Each guard sees one write; whatever it stages is checked in turn.
    /// The set is ordered so that the latest staged write commits first
    /// and the root commits last.
    async fn stage(&self, root: Write, cx: &Context<'_>) -> Result<Changes, Error> {
        let mut pending = vec![root];
        let mut checked = Vec::new();
        while let Some(write) = pending.pop() {
            let staged = self.check(&write, cx).await?;
            checked.push(write);
            pending.extend(staged.into_iter().filter(|w| !w.is_noop()));
            if checked.len() + pending.len() > MAX_CASCADE {
                log::error!("[engine] cascade exceeded {} writes", MAX_CASCADE);
                return Err(Error::Cascade(MAX_CASCADE));
            }
        }
        checked.reverse();
        Ok(Changes::from(checked))
    }

    async fn check(&self, write: &Write, cx: &Context<'_>) -> Result<Vec<Write>, Error> {
        match write {
            Write::Game(update) => self.games.check(update, cx).await,
            Write::Player(update) => self.players.check(update, cx).await,
        }
    }

    async fn react(&self, write: &Write, cx: &Context<'_>) -> Vec<Error> {
        match write {
            Write::Game(update) => self.games.react(update, cx).await,
            Write::Player(update) => self.players.react(update, cx).await,
        }
    }
}

/// Operator commands.
impl Engine {
    /// Mark a player eliminated.
    pub async fn eliminate(&self, player: ID<Player>) -> Result<Outcome, Error> {
        let mut proposed = self.store.player(player).await?;
        proposed.eliminate();
        self.update_player(proposed).await
    }
    /// Flag that a player claims to have eliminated their target.
    pub async fn claim(&self, player: ID<Player>) -> Result<Outcome, Error> {
        let mut proposed = self.store.player(player).await?;
        proposed.claim();
        self.update_player(proposed).await
    }
    pub async fn start(&self, game: ID<Game>) -> Result<Outcome, Error> {
        let mut proposed = self.store.game(game).await?;
        proposed.start();
        self.update_game(proposed).await
    }
    /// Close a game without declaring a winner.
    pub async fn end(&self, game: ID<Game>) -> Result<Outcome, Error> {
        let mut proposed = self.store.game(game).await?;
        proposed.end(None);
        self.update_game(proposed).await
    }
    pub async fn audit(&self, game: ID<Game>) -> Result<(), Error> {
        chain::audit(self.store.as_ref(), game).await
    }
}
