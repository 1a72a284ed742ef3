use super::*;

/// Writes every message to the log. Used when no relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

#[async_trait::async_trait]
impl Notifier for Logger {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        message.check()?;
        log::info!(
            "[mail] '{}' from {} to {} recipients ({} blind)",
            message.subject(),
            message.sender(),
            message.recipients().len(),
            message.blind().len(),
        );
        log::debug!("[mail] {}", message.html());
        Ok(())
    }
}
