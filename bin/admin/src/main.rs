//! Assassin Operator CLI
//!
//! Drives the elimination engine against the PostgreSQL store named by
//! `DB_URL`. Mail goes to `RELAY_URL` when set, otherwise to the log.
//!
//! Commands: migrate, eliminate, claim, start, end, verify

use asn_core::ID;
use asn_core::Settings;
use asn_engine::Engine;
use asn_engine::Outcome;
use asn_mailer::Logger;
use asn_mailer::Notifier;
use asn_mailer::Relay;
use asn_records::Game;
use asn_records::Player;
use asn_store::Postgres;
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Create missing tables and indices")]
    Migrate,
    #[command(about = "Mark a player eliminated and hand their target on", alias = "kill")]
    Eliminate {
        #[arg(required = true)]
        player: String,
    },
    #[command(about = "Claim a player has eliminated their target")]
    Claim {
        #[arg(required = true)]
        player: String,
    },
    #[command(about = "Start a game and tell its players")]
    Start {
        #[arg(required = true)]
        game: String,
    },
    #[command(about = "End a game without declaring a winner")]
    End {
        #[arg(required = true)]
        game: String,
    },
    #[command(about = "Check that a game's kill chain is intact", alias = "audit")]
    Verify {
        #[arg(required = true)]
        game: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    asn_core::log();
    let command = Command::parse();
    let settings = Settings::from_env();
    let store = Arc::new(Postgres::from(asn_pg::db().await?));
    if let Command::Migrate = command {
        store.migrate().await?;
        log::info!("schema is up to date");
        return Ok(());
    }
    let notifier: Arc<dyn Notifier> = match settings.relay_url() {
        Some(url) => Arc::new(Relay::new(url)),
        None => Arc::new(Logger),
    };
    let engine = Engine::new(store, notifier, settings);
    let outcome = match command {
        Command::Migrate => return Ok(()),
        Command::Eliminate { player } => engine.eliminate(player.parse::<ID<Player>>()?).await?,
        Command::Claim { player } => engine.claim(player.parse::<ID<Player>>()?).await?,
        Command::Start { game } => engine.start(game.parse::<ID<Game>>()?).await?,
        Command::End { game } => engine.end(game.parse::<ID<Game>>()?).await?,
        Command::Verify { game } => {
            engine.audit(game.parse::<ID<Game>>()?).await?;
            println!("kill chain of game {} is intact", game.trim());
            return Ok(());
        }
    };
    report(&outcome)
}

fn report(outcome: &Outcome) -> anyhow::Result<()> {
    if outcome.is_noop() {
        println!("nothing to do");
    }
    for write in outcome.committed() {
        println!("committed {}", write);
    }
    for failure in outcome.failures() {
        eprintln!("notification failed: {}", failure);
    }
    match outcome.is_clean() {
        true => Ok(()),
        false => anyhow::bail!("{} notifications failed", outcome.failures().len()),
    }
}
