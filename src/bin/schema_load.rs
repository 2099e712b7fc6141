//! One-time schema bootstrap: run a SQL script against a database file.
//!
//! Sits outside the request path; request handlers go through `Scope`
//! directly.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sqlite_scope::Scope;

#[derive(Parser, Debug)]
#[command(author, version, about = "Load a SQL script into a SQLite database")]
struct Args {
    /// SQL script to execute.
    file: PathBuf,
    /// Database file (created if absent).
    #[arg(long, default_value = "database.sqlite3")]
    db: PathBuf,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = load(&args) {
        tracing::error!("schema load failed: {err}");
        std::process::exit(1);
    }
}

fn load(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let sql = std::fs::read_to_string(&args.file)?;
    Scope::run(&args.db, |scope| {
        scope.execute_script(&sql)?;
        Ok(())
    })?;
    tracing::info!("applied {} to {}", args.file.display(), args.db.display());
    Ok(())
}
