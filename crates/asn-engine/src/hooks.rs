//! Edge-triggered hook registry.
//!
//! Hooks are registered per record type together with an [`Edge`]: a
//! predicate over the before/after pair that decides whether the hook
//! fires for a given write. Two phases exist:
//!
//! - [`Guard`] runs before commit. It may read the store, stage extra
//!   writes to commit alongside, or veto the whole update with an error.
//! - [`Reaction`] runs after commit. Its errors are reported, never
//!   unwound.
//!
//! Hooks of one phase run in registration order.
use super::*;
use std::sync::Arc;

/// Transition predicate over a write's before/after pair.
pub type Edge<T> = fn(&Update<T>) -> bool;

/// Collaborators available to hooks while one update is processed.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    store: &'a dyn RecordStore,
    notifier: &'a dyn Notifier,
    settings: &'a Settings,
}

impl<'a> Context<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        notifier: &'a dyn Notifier,
        settings: &'a Settings,
    ) -> Self {
        Self {
            store,
            notifier,
            settings,
        }
    }
    pub fn store(&self) -> &'a dyn RecordStore {
        self.store
    }
    pub fn notifier(&self) -> &'a dyn Notifier {
        self.notifier
    }
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }
    /// Resolve the mailbox of the user behind a player.
    pub async fn address(&self, player: ID<Player>) -> Result<Address, Error> {
        let player = self.store.player(player).await?;
        let user = self.store.user(player.user()).await?;
        Ok(Address::named(user.email(), user.name()))
    }
}

/// Runs before commit and may veto or stage writes.
#[async_trait::async_trait]
pub trait Guard<T>: Send + Sync {
    fn name(&self) -> &'static str;
    /// Writes to commit together with `update`, or the reason to reject it.
    async fn check(&self, update: &Update<T>, cx: &Context<'_>) -> Result<Vec<Write>, Error>;
}

/// Runs after commit; cannot undo the committed state.
#[async_trait::async_trait]
pub trait Reaction<T>: Send + Sync {
    fn name(&self) -> &'static str;
    async fn react(&self, update: &Update<T>, cx: &Context<'_>) -> Result<(), Error>;
}

/// Hooks registered for one record type.
pub struct Hooks<T> {
    guards: Vec<(Edge<T>, Arc<dyn Guard<T>>)>,
    reactions: Vec<(Edge<T>, Arc<dyn Reaction<T>>)>,
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Self {
            guards: Vec::new(),
            reactions: Vec::new(),
        }
    }
}

impl<T> Hooks<T>
where
    T: Send + Sync,
{
    pub fn before(&mut self, edge: Edge<T>, guard: Arc<dyn Guard<T>>) -> &mut Self {
        log::debug!("[hooks] registering guard {}", guard.name());
        self.guards.push((edge, guard));
        self
    }
    pub fn after(&mut self, edge: Edge<T>, reaction: Arc<dyn Reaction<T>>) -> &mut Self {
        log::debug!("[hooks] registering reaction {}", reaction.name());
        self.reactions.push((edge, reaction));
        self
    }
    pub fn len(&self) -> usize {
        self.guards.len() + self.reactions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Run every guard whose edge fires, collecting staged writes.
    /// The first veto aborts the rest.
    pub async fn check(&self, update: &Update<T>, cx: &Context<'_>) -> Result<Vec<Write>, Error> {
        let mut staged = Vec::new();
        for (edge, guard) in self.guards.iter() {
            if edge(update) {
                log::debug!("[hooks] guard {} fired", guard.name());
                staged.extend(guard.check(update, cx).await?);
            }
        }
        Ok(staged)
    }
    /// Run every reaction whose edge fires. Failures are logged and
    /// returned; they do not stop later reactions.
    pub async fn react(&self, update: &Update<T>, cx: &Context<'_>) -> Vec<Error> {
        let mut failures = Vec::new();
        for (edge, reaction) in self.reactions.iter() {
            if edge(update) {
                log::debug!("[hooks] reaction {} fired", reaction.name());
                if let Err(e) = reaction.react(update, cx).await {
                    log::warn!("[hooks] reaction {} failed: {}", reaction.name(), e);
                    failures.push(e);
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[async_trait::async_trait]
    impl Reaction<Player> for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }
        async fn react(&self, _: &Update<Player>, _: &Context<'_>) -> Result<(), Error> {
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    struct Veto;

    #[async_trait::async_trait]
    impl Guard<Player> for Veto {
        fn name(&self) -> &'static str {
            "veto"
        }
        async fn check(&self, update: &Update<Player>, _: &Context<'_>) -> Result<Vec<Write>, Error> {
            Err(Error::Ended(update.proposed().game()))
        }
    }

    fn claimed(update: &Update<Player>) -> bool {
        update.rose(Player::pending)
    }

    #[tokio::test]
    async fn reactions_fire_only_on_their_edge() {
        let (store, outbox, settings) = (Memory::default(), Outbox::default(), Settings::default());
        let cx = Context::new(&store, &outbox, &settings);
        let counter = Arc::new(Counter::default());
        let mut hooks = Hooks::<Player>::default();
        hooks.after(claimed, counter.clone());
        let before = Player::new(ID::default(), ID::default(), ID::default());
        let mut after = before.clone();
        after.claim();
        assert!(hooks.react(&Update::new(before.clone(), after.clone()), &cx).await.is_empty());
        assert!(hooks.react(&Update::new(after.clone(), after), &cx).await.is_empty());
        assert!(hooks.react(&Update::new(before.clone(), before), &cx).await.is_empty());
        assert_eq!(counter.0.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn guards_veto_only_when_fired() {
        let (store, outbox, settings) = (Memory::default(), Outbox::default(), Settings::default());
        let cx = Context::new(&store, &outbox, &settings);
        let mut hooks = Hooks::<Player>::default();
        hooks.before(claimed, Arc::new(Veto));
        let before = Player::new(ID::default(), ID::default(), ID::default());
        let mut after = before.clone();
        assert!(hooks.check(&Update::new(before.clone(), after.clone()), &cx).await.unwrap().is_empty());
        after.claim();
        let err = hooks.check(&Update::new(before, after), &cx).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Rejected);
        assert_eq!(hooks.len(), 1);
    }
}
