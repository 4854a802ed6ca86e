//! Engine supervisor: keeps the trading engine process running forever.
//!
//! Exits non-zero only when the engine executable is missing at startup;
//! every other condition is logged and retried.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use arena_console::config::Settings;
use arena_console::supervisor::Supervisor;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("[engine-supervisor] fatal: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut supervisor = Supervisor::new(settings.engine);
    supervisor.run().await?;
    Ok(())
}
