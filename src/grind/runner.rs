//! Generator process execution and interrupt handling.

use super::artifact_manager::ArtifactManager;
use super::command::CommandPlan;
use crate::cli::OutputManager;
use crate::error::{EXIT_INTERRUPTED, Result, VanityError};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::task::{Context, Waker};
use tokio::process::Command;

/// Result of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Generator exit status, or 130 when interrupted
    pub exit_code: i32,
    /// Keypair files present after the run that were not there before
    pub generated_files: BTreeSet<PathBuf>,
    pub interrupted: bool,
}

impl RunResult {
    pub fn success(&self) -> bool {
        !self.interrupted && self.exit_code == 0
    }
}

/// What the runner did with a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The plan was printed; no process was started
    DryRun,
    /// The generator ran (to completion or until interrupted)
    Completed(RunResult),
}

/// Runs the generator in a working directory with the terminal attached.
pub struct GenerationRunner {
    working_dir: PathBuf,
}

impl GenerationRunner {
    /// Creates a new runner.
    ///
    /// # Arguments
    ///
    /// * `working_dir` - Directory the generator runs in and writes keypairs to
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Executes `plan`, or only prints it when `dry_run` is set.
    ///
    /// The interrupt listener is installed before the child is spawned. On an
    /// interrupt the child is left alone and whatever it already wrote stays
    /// where it is; the result carries exit code 130.
    pub async fn run(
        &self,
        plan: &CommandPlan,
        dry_run: bool,
        output: &OutputManager,
    ) -> Result<RunOutcome> {
        if dry_run {
            output.progress("Dry run, generator not started. Command:")?;
            output.indent(&plan.display())?;
            return Ok(RunOutcome::DryRun);
        }

        let artifacts = ArtifactManager::new(self.working_dir.clone());
        let before = artifacts.snapshot().await?;

        let mut interrupt = InterruptListener::install()?;

        log::info!("Spawning generator: {}", plan.display());
        output.progress(&format!("Running: {}", plan.display()))?;

        let mut child = Command::new(plan.program())
            .args(plan.args())
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| VanityError::DependencyMissing {
                tool: plan.program().to_string(),
                reason: format!("failed to start: {}", e),
            })?;

        let (exit_code, interrupted) = tokio::select! {
            biased;
            _ = interrupt.recv() => (EXIT_INTERRUPTED, true),
            status = child.wait() => {
                let status = status?;
                // Ctrl-C reaches the whole process group; the child may exit first.
                if interrupt.received() {
                    (EXIT_INTERRUPTED, true)
                } else {
                    (exit_code_of(status), false)
                }
            }
        };
        if interrupted {
            log::warn!("Interrupt received while the generator was running");
            let _ = output.warn("Generation interrupted");
        }

        let after = artifacts.snapshot().await?;
        let generated_files: BTreeSet<PathBuf> = after.difference(&before).cloned().collect();

        if interrupted {
            for path in &generated_files {
                let _ = output.indent(&format!("Partial output kept: {}", path.display()));
            }
        } else {
            log::info!(
                "Generator exited with {} ({} new keypair file(s))",
                exit_code,
                generated_files.len()
            );
        }

        Ok(RunOutcome::Completed(RunResult {
            exit_code,
            generated_files,
            interrupted,
        }))
    }
}

/// Exit code of a finished child; signal deaths map to `128 + signal`.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Interrupt signal subscription, registered as soon as it is created.
struct InterruptListener {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
    #[cfg(windows)]
    signal: tokio::signal::windows::CtrlC,
}

impl InterruptListener {
    #[cfg(unix)]
    fn install() -> Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self {
            signal: signal(SignalKind::interrupt())?,
        })
    }

    #[cfg(windows)]
    fn install() -> Result<Self> {
        Ok(Self {
            signal: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) {
        self.signal.recv().await;
    }

    /// Whether an interrupt is already pending, without waiting for one.
    fn received(&mut self) -> bool {
        let mut cx = Context::from_waker(Waker::noop());
        self.signal.poll_recv(&mut cx).is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grind::{AddressType, Request};

    fn quiet() -> OutputManager {
        OutputManager::new(true)
    }

    #[tokio::test]
    async fn dry_run_never_spawns() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = Request::new(AddressType::Prefix, "sol", "");
        request.dry_run = true;
        let plan = CommandPlan::build("/nonexistent/generator", &request);

        let runner = GenerationRunner::new(dir.path().to_path_buf());
        let outcome = runner.run(&plan, true, &quiet()).await.unwrap();
        assert_eq!(outcome, RunOutcome::DryRun);
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::new(AddressType::Prefix, "sol", "");
        let plan = CommandPlan::build("/nonexistent/generator", &request);

        let runner = GenerationRunner::new(dir.path().to_path_buf());
        let err = runner.run(&plan, false, &quiet()).await.unwrap_err();
        assert!(matches!(err, VanityError::DependencyMissing { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_new_files_and_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("old.json"), "[]").unwrap();

        let plan = CommandPlan::raw(
            "sh",
            &["-c", "echo '[]' > new.json; echo log > notes.txt; exit 7"],
        );
        let runner = GenerationRunner::new(dir.path().to_path_buf());
        let outcome = runner.run(&plan, false, &quiet()).await.unwrap();

        let RunOutcome::Completed(result) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(result.exit_code, 7);
        assert!(!result.interrupted);
        assert!(!result.success());
        let names: Vec<_> = result
            .generated_files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["new.json".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn signal_deaths_map_above_128() {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(exit_code_of(ExitStatus::from_raw(9)), 137);
        assert_eq!(exit_code_of(ExitStatus::from_raw(3 << 8)), 3);
    }
}
