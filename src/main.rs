mod shell;

use std::{io, path::PathBuf};

use clap::Parser;
use teller::{Config, SessionManager};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Single-user bank account simulator.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File holding one `name,password,balance` line per account.
    #[arg(long, default_value = teller::config::ACCOUNTS_FILE)]
    accounts: PathBuf,
    /// Append-only transaction log.
    #[arg(long, default_value = teller::config::LOG_FILE)]
    log: PathBuf,
}

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::default()
        .with_accounts_path(args.accounts)
        .with_log_path(args.log);
    info!(?config, "starting");

    let mut manager = SessionManager::open(&config);
    shell::run(&mut manager, io::stdin().lock(), io::stdout().lock())
}
