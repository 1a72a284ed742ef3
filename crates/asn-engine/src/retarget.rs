use super::*;

/// Fires when a player's target reference changes.
pub fn retargeted(update: &Update<Player>) -> bool {
    update.changed(Player::target)
}

/// Tells a player they have someone new to hunt.
/// Silent when the new target is the player itself: that is the win.
#[derive(Debug, Default, Clone, Copy)]
pub struct NewTarget;

#[async_trait::async_trait]
impl Reaction<Player> for NewTarget {
    fn name(&self) -> &'static str {
        "new-target"
    }
    async fn react(&self, update: &Update<Player>, cx: &Context<'_>) -> Result<(), Error> {
        let player = update.proposed();
        if player.target().is_none() || player.hunts_self() {
            log::debug!("[new-target] {} has no one new to hunt", player.id());
            return Ok(());
        }
        let to = cx.address(player.id()).await?;
        let game = cx.store().game(player.game()).await?;
        let letter = Letter::Target {
            game: game.name(),
            code: game.code(),
        };
        cx.notifier().send(&letter.to(cx.settings(), to)).await?;
        Ok(())
    }
}
