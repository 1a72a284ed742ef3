//! Elimination transition.
//!
//! When a player dies, the one live player hunting them inherits their
//! target. If that target is the assassin itself, the chain has closed on
//! a single survivor and the game ends with the assassin as winner.
use super::*;

/// Fires when a player goes from alive to eliminated.
pub fn eliminated(update: &Update<Player>) -> bool {
    update.fell(Player::alive)
}

/// Reassigns the assassin's target and detects the win.
#[derive(Debug, Default, Clone, Copy)]
pub struct Elimination;

#[async_trait::async_trait]
impl Guard<Player> for Elimination {
    fn name(&self) -> &'static str {
        "elimination"
    }
    async fn check(&self, update: &Update<Player>, cx: &Context<'_>) -> Result<Vec<Write>, Error> {
        let victim = update.original();
        let game = victim.game();
        let hunters = cx.store().hunters(game, victim.id()).await?;
        let assassin = match hunters.as_slice() {
            [one] => one.clone(),
            _ => {
                return Err(Error::chain(
                    game,
                    Defect::Hunters {
                        target: victim.id(),
                        found: hunters.len(),
                    },
                ));
            }
        };
        if assassin.id() == victim.id() {
            return Err(Error::chain(game, Defect::SelfHunt(victim.id())));
        }
        let inherited = victim
            .target()
            .ok_or_else(|| Error::chain(game, Defect::Untargeted(victim.id())))?;
        let mut staged = Vec::with_capacity(2);
        if inherited == assassin.id() {
            let before = cx.store().game(game).await?;
            let mut after = before.clone();
            after.end(Some(assassin.id()));
            log::info!("[elimination] {} wins game {}", assassin.id(), game);
            staged.push(Write::from(Update::new(before, after)));
        }
        let mut hunter = assassin.clone();
        hunter.retarget(inherited);
        hunter.settle();
        log::info!(
            "[elimination] {} eliminated; {} now hunts {}",
            victim.id(),
            assassin.id(),
            inherited
        );
        staged.push(Write::from(Update::new(assassin, hunter)));
        Ok(staged)
    }
}
