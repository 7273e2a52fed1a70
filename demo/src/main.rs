//! FileDB demo - walks a user table through create, read, update and delete.
//!
//! The store file location and write mode come from the environment (see
//! [`config::Config`]); a `.env` file in the working directory is honored.

mod config;
mod driver;
mod error;

use crate::config::Config;
use filedb_engine::RecordStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> error::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filedb_demo=info,filedb_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(
        path = %config.path.display(),
        atomic_writes = config.atomic_writes,
        exclusive = config.exclusive,
        "Opening store"
    );

    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let store = RecordStore::open_with(&config.path, driver::user_schema(), config.store_options())?;

    let stdout = std::io::stdout();
    driver::run(&store, &mut stdout.lock())?;

    Ok(())
}
