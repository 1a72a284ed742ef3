use super::*;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for relay requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hands messages to an HTTP mail relay as a JSON POST.
///
/// The body is the serialized [`Message`]. Any non-2xx response is a
/// rejection; the message is not retried.
#[derive(Debug, Clone)]
pub struct Relay {
    url: String,
    client: Client,
    timeout: Duration,
}

impl Relay {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Notifier for Relay {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        message.check()?;
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(message)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            log::debug!("[relay] '{}' accepted by {}", message.subject(), self.url);
            Ok(())
        } else {
            log::warn!("[relay] '{}' rejected by {}: {}", message.subject(), self.url, status);
            Err(MailError::Rejected(status.to_string()))
        }
    }
}
