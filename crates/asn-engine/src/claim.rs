use super::*;

/// Fires when a player raises an elimination claim.
pub fn claimed(update: &Update<Player>) -> bool {
    update.rose(Player::pending)
}

/// Asks the claimed target to confirm their own elimination.
///
/// Only a prompt. The target still has to mark themselves eliminated,
/// which then goes through [`Elimination`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ClaimCheck;

#[async_trait::async_trait]
impl Reaction<Player> for ClaimCheck {
    fn name(&self) -> &'static str {
        "claim-check"
    }
    async fn react(&self, update: &Update<Player>, cx: &Context<'_>) -> Result<(), Error> {
        let claimant = update.proposed();
        let target = claimant
            .target()
            .ok_or_else(|| Error::chain(claimant.game(), Defect::Untargeted(claimant.id())))?;
        let to = cx.address(target).await?;
        let game = cx.store().game(claimant.game()).await?;
        let letter = Letter::Claim {
            game: game.name(),
            code: game.code(),
        };
        log::info!("[claim-check] {} claims {}", claimant.id(), target);
        cx.notifier().send(&letter.to(cx.settings(), to)).await?;
        Ok(())
    }
}
