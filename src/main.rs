// Entrypoint for the CLI application.
// - Keeps `main` small: load config, prepare the store and hand it to
//   the UI loop.
// - Logs go to stderr and default to `warn` so they stay out of the way
//   of the menu. Set `RUST_LOG=debug` to see every statement.

use anyhow::Context;
use chocolate_accounts::{config::AppConfig, store::AccountStore, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    let store = AccountStore::new(config.database_path);
    store
        .initialize()
        .with_context(|| format!("Failed to open database {}", store.db_path().display()))?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(&store)?;
    Ok(())
}
