use super::*;
use serde::Serialize;

/// A mailbox, optionally with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Address {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            name: None,
        }
    }
    pub fn named(address: &str, name: &str) -> Self {
        Self {
            address: address.to_string(),
            name: Some(name.to_string()).filter(|n| !n.is_empty()),
        }
    }
    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// A rendered HTML message.
///
/// Broadcasts go out through `bcc` only, so recipients never see each
/// other's addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    from: Address,
    to: Vec<Address>,
    bcc: Vec<Address>,
    subject: String,
    html: String,
}

impl Message {
    pub fn new(from: Address, subject: String, html: String) -> Self {
        Self {
            from,
            to: Vec::new(),
            bcc: Vec::new(),
            subject,
            html,
        }
    }
    pub fn to(mut self, to: Address) -> Self {
        self.to.push(to);
        self
    }
    pub fn bcc(mut self, bcc: Vec<Address>) -> Self {
        self.bcc.extend(bcc);
        self
    }
    pub fn sender(&self) -> &Address {
        &self.from
    }
    pub fn recipients(&self) -> &[Address] {
        &self.to
    }
    pub fn blind(&self) -> &[Address] {
        &self.bcc
    }
    pub fn subject(&self) -> &str {
        &self.subject
    }
    pub fn html(&self) -> &str {
        &self.html
    }
    /// Every backend refuses a message nobody would receive.
    pub fn check(&self) -> Result<(), MailError> {
        match self.to.is_empty() && self.bcc.is_empty() {
            true => Err(MailError::Empty(self.subject.clone())),
            false => Ok(()),
        }
    }
}
