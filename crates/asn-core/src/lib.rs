//! Identity types, settings, and runtime utilities for the assassin engine.
//!
//! Every other crate in the workspace addresses records through [`ID`] and
//! reads deployment parameters through [`Settings`].
#![allow(dead_code)]

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for stored records.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::str::FromStr;

/// Record identifier tagged with the record type it points at.
/// `ID<Player>` and `ID<Game>` never compare or convert implicitly.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Reinterpret the same UUID as an id of another record type.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self::from)
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// ENGINE PARAMETERS
// ============================================================================
/// Upper bound on writes produced by one update, counting the update itself.
/// A hook chain that stages more than this is treated as runaway.
pub const MAX_CASCADE: usize = 16;

// ============================================================================
// COLLECTIONS
// ============================================================================
/// Games and their lifecycle flags.
#[rustfmt::skip]
pub const GAMES:   &str = "games";
/// Players, their targets, and elimination state.
#[rustfmt::skip]
pub const PLAYERS: &str = "players";
/// User accounts, owned by the account service and only read here.
#[rustfmt::skip]
pub const USERS:   &str = "users";

// ============================================================================
// DEPLOYMENT DEFAULTS
// ============================================================================
/// Sender address used when `SENDER_ADDRESS` is unset.
#[rustfmt::skip]
pub const SENDER_ADDRESS: &str = "noreply@assassingame.org";
/// Sender display name used when `SENDER_NAME` is unset.
#[rustfmt::skip]
pub const SENDER_NAME:    &str = "Assassin";
/// Public site root used when `SITE_URL` is unset.
#[rustfmt::skip]
pub const SITE_URL:       &str = "https://assassingame.org";

/// Deployment parameters shared by the mailer and the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    sender_address: String,
    sender_name: String,
    site_url: String,
    relay_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sender_address: String::from(SENDER_ADDRESS),
            sender_name: String::from(SENDER_NAME),
            site_url: String::from(SITE_URL),
            relay_url: None,
        }
    }
}

impl Settings {
    /// Read `SENDER_ADDRESS`, `SENDER_NAME`, `SITE_URL` and `RELAY_URL`,
    /// falling back to the compiled defaults for anything unset or blank.
    pub fn from_env() -> Self {
        let var = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            sender_address: var("SENDER_ADDRESS").unwrap_or(defaults.sender_address),
            sender_name: var("SENDER_NAME").unwrap_or(defaults.sender_name),
            site_url: var("SITE_URL").unwrap_or(defaults.site_url),
            relay_url: var("RELAY_URL"),
        }
    }
    pub fn with_sender(mut self, address: &str, name: &str) -> Self {
        self.sender_address = address.to_string();
        self.sender_name = name.to_string();
        self
    }
    pub fn with_site(mut self, url: &str) -> Self {
        self.site_url = url.to_string();
        self
    }
    pub fn with_relay(mut self, url: &str) -> Self {
        self.relay_url = Some(url.to_string());
        self
    }
    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }
    pub fn site_url(&self) -> &str {
        &self.site_url
    }
    pub fn relay_url(&self) -> Option<&str> {
        self.relay_url.as_deref()
    }
    /// Link that logs a player into the game with the given join code.
    pub fn game_link(&self, code: &str) -> String {
        format!("{}/game.html?code={}", self.site_url.trim_end_matches('/'), code)
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
