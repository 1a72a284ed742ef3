use asn_core::ID;
use asn_core::Unique;

/// Account behind a player. Managed by the account service;
/// the engine reads it only to address and personalize mail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    id: ID<Self>,
    email: String,
    name: String,
}

impl User {
    pub fn new(id: ID<Self>, email: String, name: String) -> Self {
        Self { id, email, name }
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Unique for User {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use asn_pg::*;

    /// The users table belongs to the account service. The DDL here only
    /// guarantees the columns this workspace reads.
    impl Schema for User {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    name        VARCHAR(255) NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
