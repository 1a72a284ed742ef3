use super::*;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;

/// Captures messages in memory instead of delivering them.
/// Can be closed to make every send fail, for exercising delivery errors.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Mutex<Vec<Message>>,
    closed: AtomicBool,
}

impl Outbox {
    pub async fn sent(&self) -> Vec<Message> {
        self.sent.lock().await.clone()
    }
    pub async fn drain(&self) -> Vec<Message> {
        std::mem::take(&mut *self.sent.lock().await)
    }
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }
    pub fn open(&self) {
        self.closed.store(false, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl Notifier for Outbox {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        message.check()?;
        if self.closed.load(Ordering::Relaxed) {
            return Err(MailError::Rejected(String::from("outbox closed")));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
