//! Run the alias bot against the terminal.
//!
//! Usage: `cargo run --bin aliasbot`, then type chat messages on stdin.

use std::process::ExitCode;
use std::sync::Arc;

use aliasbot::gateway::ConsoleGateway;
use aliasbot::logging::init_tracing;
use aliasbot::storage::{FileAliasStore, MemoryAliasStore, SharedAliasStore};
use aliasbot::{AliasBot, BotSettings, CoreResult, StoreKind};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CoreResult<()> {
    let settings = BotSettings::from_env()?;
    let store = open_store(&settings).await?;
    let bot = AliasBot::from_settings(&settings, store);
    let mut gateway = ConsoleGateway::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        settings.user_id,
    );

    tracing::info!(prefix = %settings.prefix, "alias bot is running, Ctrl-C to exit");

    tokio::select! {
        result = bot.run(&mut gateway) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    }
}

async fn open_store(settings: &BotSettings) -> CoreResult<SharedAliasStore> {
    match settings.store {
        StoreKind::Memory => Ok(Arc::new(MemoryAliasStore::new())),
        StoreKind::File => {
            let path = settings.alias_file();
            tracing::info!("using alias file {}", path.display());
            Ok(Arc::new(FileAliasStore::open(path).await?))
        }
    }
}
