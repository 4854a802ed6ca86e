//! Keeps the engine process alive.
//!
//! One sequential loop: launch, wait for exit, cool down, relaunch. Any exit
//! code and any spawn fault lead back to a launch after the same fixed delay.
//! The only terminal condition is an executable that was never there. There is
//! no internal timeout: a hung engine keeps the loop waiting until the child
//! exits or the supervisor itself is killed.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tokio::time;
use tracing::{error, info, warn};

use crate::config::EngineSettings;

/// Stable prefix on every transition line, for operational grepping.
const LOG_PREFIX: &str = "[engine-supervisor]";

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("engine executable not found at {0}")]
    MissingExecutable(String),
}

/// Lifecycle of the supervised engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    NotStarted,
    Running,
    CoolingDown,
    FailedPrecondition,
}

/// What one supervision round observed.
#[derive(Debug)]
pub enum ExitOutcome {
    /// Child exited on its own; None means it was killed by a signal.
    Exited(Option<i32>),
    /// Spawning or waiting failed at the supervisor level.
    Fault(io::Error),
}

pub struct Supervisor {
    engine: EngineSettings,
    state: SupervisorState,
}

impl Supervisor {
    pub fn new(engine: EngineSettings) -> Self {
        Self {
            engine,
            state: SupervisorState::NotStarted,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// The one unrecoverable condition: the engine binary must exist before
    /// the first launch. Everything after that is retried.
    pub fn check_preconditions(&mut self) -> Result<(), SupervisorError> {
        if self.engine.executable.exists() {
            Ok(())
        } else {
            self.state = SupervisorState::FailedPrecondition;
            Err(SupervisorError::MissingExecutable(
                self.engine.executable.display().to_string(),
            ))
        }
    }

    /// Launch the engine and block until it exits, reporting what happened.
    pub async fn supervise_once(&mut self) -> ExitOutcome {
        self.state = SupervisorState::Running;
        info!(
            "{} starting engine {} (--interval {})",
            LOG_PREFIX,
            self.engine.executable.display(),
            self.engine.poll_interval_secs
        );

        let outcome = match self.spawn_and_wait().await {
            Ok(status) => {
                match status.code() {
                    Some(code) => info!("{} engine exited with code {}", LOG_PREFIX, code),
                    None => warn!("{} engine terminated by signal", LOG_PREFIX),
                }
                ExitOutcome::Exited(status.code())
            }
            Err(e) => {
                error!("{} failed to run engine: {}", LOG_PREFIX, e);
                ExitOutcome::Fault(e)
            }
        };
        self.state = SupervisorState::CoolingDown;
        outcome
    }

    async fn spawn_and_wait(&self) -> io::Result<ExitStatus> {
        let mut child = Command::new(&self.engine.executable)
            .arg("--interval")
            .arg(self.engine.poll_interval_secs.to_string())
            .current_dir(&self.engine.working_dir)
            .spawn()?;
        child.wait().await
    }

    /// Supervise forever: launch, wait, cool down, relaunch. Only the
    /// precondition check can make this return.
    pub async fn run(&mut self) -> Result<(), SupervisorError> {
        self.check_preconditions()?;
        loop {
            self.supervise_once().await;
            info!(
                "{} restarting in {}s",
                LOG_PREFIX,
                self.engine.restart_delay.as_secs_f64()
            );
            time::sleep(self.engine.restart_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;
    use tempfile::TempDir;

    fn fake_engine(dir: &TempDir, script: &str, mode: u32) -> EngineSettings {
        let path = dir.path().join("engine");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(mode);
        std::fs::set_permissions(&path, perms).unwrap();
        EngineSettings {
            executable: path,
            working_dir: dir.path().to_path_buf(),
            poll_interval_secs: 1,
            restart_delay: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_clean_exit_is_captured() {
        let dir = TempDir::new().unwrap();
        let mut supervisor = Supervisor::new(fake_engine(&dir, "exit 0", 0o755));

        match supervisor.supervise_once().await {
            ExitOutcome::Exited(Some(0)) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(supervisor.state(), SupervisorState::CoolingDown);
    }

    #[tokio::test]
    async fn test_crash_exit_is_captured() {
        let dir = TempDir::new().unwrap();
        let mut supervisor = Supervisor::new(fake_engine(&dir, "exit 3", 0o755));

        match supervisor.supervise_once().await {
            ExitOutcome::Exited(Some(3)) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(supervisor.state(), SupervisorState::CoolingDown);
    }

    #[tokio::test]
    async fn test_signal_kill_reports_no_code() {
        let dir = TempDir::new().unwrap();
        let mut supervisor = Supervisor::new(fake_engine(&dir, "kill -9 $$", 0o755));

        match supervisor.supervise_once().await {
            ExitOutcome::Exited(None) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(supervisor.state(), SupervisorState::CoolingDown);
    }

    #[tokio::test]
    async fn test_spawn_fault_is_recoverable() {
        let dir = TempDir::new().unwrap();
        // File exists (precondition holds) but is not executable.
        let mut supervisor = Supervisor::new(fake_engine(&dir, "exit 0", 0o644));

        assert!(supervisor.check_preconditions().is_ok());
        match supervisor.supervise_once().await {
            ExitOutcome::Fault(_) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(supervisor.state(), SupervisorState::CoolingDown);
    }

    #[tokio::test]
    async fn test_missing_executable_is_terminal() {
        let dir = TempDir::new().unwrap();
        let engine = EngineSettings {
            executable: dir.path().join("no-such-engine"),
            working_dir: dir.path().to_path_buf(),
            poll_interval_secs: 1,
            restart_delay: Duration::from_millis(10),
        };
        let mut supervisor = Supervisor::new(engine);

        match supervisor.run().await {
            Err(SupervisorError::MissingExecutable(_)) => {}
            Ok(_) => panic!("run returned without a terminal error"),
        }
        assert_eq!(supervisor.state(), SupervisorState::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_relaunches_after_any_exit() {
        let dir = TempDir::new().unwrap();
        let engine = fake_engine(&dir, "echo run >> runs.log; exit 1", 0o755);
        let mut supervisor = Supervisor::new(engine);

        // The loop never returns on its own; give it time for a few rounds.
        let _ = time::timeout(Duration::from_millis(500), supervisor.run()).await;

        let runs = std::fs::read_to_string(dir.path().join("runs.log")).unwrap();
        assert!(runs.lines().count() >= 2, "expected at least two launches");
    }
}
