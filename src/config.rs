//! Runtime configuration for both binaries.
//!
//! Read once at startup and passed into constructors; nothing consults the
//! environment after that.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the dashboard server and the shared store.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind_port: u16,
    pub engine: EngineSettings,
}

/// How the supervisor launches and restarts the engine process.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub executable: PathBuf,
    pub working_dir: PathBuf,
    /// Passed to the engine as `--interval <secs>`.
    pub poll_interval_secs: u64,
    /// Cool-down between an engine exit and the next launch.
    pub restart_delay: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_path = env::var("ARENA_DB_PATH")
            .unwrap_or_else(|_| "/opt/arena/arena.db".to_string())
            .into();

        let bind_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let engine = EngineSettings {
            executable: env::var("ARENA_ENGINE_BIN")
                .unwrap_or_else(|_| "/opt/arena/engine".to_string())
                .into(),
            working_dir: env::var("ARENA_ENGINE_DIR")
                .unwrap_or_else(|_| "/opt/arena".to_string())
                .into(),
            poll_interval_secs: env::var("ARENA_ENGINE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            restart_delay: Duration::from_secs(
                env::var("ARENA_RESTART_DELAY_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            ),
        };

        Settings {
            database_path,
            bind_port,
            engine,
        }
    }
}
