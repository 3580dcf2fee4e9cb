use anyhow::Context;
use clap::{Parser, Subcommand};
use ledger_migrate::{read_config, resolve_ledger_path, revert_applied, FileLedger, Ledger};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ledger Migrate - inspect and edit the applied-migrations ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project directory containing the .migrate folder
    #[arg(short, long, env = "MIGRATE_PROJECT", default_value = ".")]
    project: PathBuf,

    /// Ledger file to use instead of the one from the project config
    #[arg(short, long, env = "MIGRATE_LEDGER")]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List applied migrations, oldest first
    List,

    /// Record a migration as applied without running it
    Mark {
        /// Migration name
        name: String,
    },

    /// Remove applied migrations from the ledger, oldest first
    Down {
        /// How many to remove; 0 removes all of them
        #[arg(short, long, default_value_t = 0)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let ledger_path = match args.ledger {
        Some(path) => path,
        None => {
            let config = read_config(&args.project)
                .await
                .context("failed to read project config")?;
            resolve_ledger_path(&args.project, config.as_ref())
        }
    };
    let ledger = FileLedger::new(ledger_path);

    info!(ledger = %ledger.path().display(), "Using ledger");

    match args.command {
        Command::List => {
            for entry in ledger.entries().await? {
                println!("{}\t{}", entry.applied_at, entry.name);
            }
        }
        Command::Mark { name } => {
            Ledger::<()>::mark_applied(&ledger, &(), &name).await?;
            println!("marked {}", name);
        }
        Command::Down { count } => {
            let reverted = revert_applied(&ledger, &(), count).await?;
            for name in &reverted {
                println!("removed {}", name);
            }
            info!(count = reverted.len(), "Done");
        }
    }

    Ok(())
}
