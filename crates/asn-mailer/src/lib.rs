//! Outbound notifications.
//!
//! The engine renders a [`Letter`] into a [`Message`] and hands it to a
//! [`Notifier`]. Delivery is at-most-once: no backend retries.
//!
//! ## Backends
//!
//! - [`Outbox`] — Captures messages in memory
//! - [`Logger`] — Writes messages to the log instead of sending them
//! - [`Relay`] — POSTs messages as JSON to an HTTP mail relay
mod error;
mod letter;
mod logger;
mod message;
mod outbox;
mod relay;

pub use error::*;
pub use letter::*;
pub use logger::*;
pub use message::*;
pub use outbox::*;
pub use relay::*;

/// Delivers a rendered message to its recipients.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), MailError>;
}
