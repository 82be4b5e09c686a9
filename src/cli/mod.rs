//! Command line interface for the vanity search orchestrator.
//!
//! Runs the pipeline in order: resolve, validate, estimate, build, check the
//! generator, run, collect. Each stage ends in an [`Outcome`] or an error, and
//! both map to a single exit code.

mod args;
mod output;
mod prompt;
mod resolver;

pub use args::{Args, split_passthrough};
pub use output::OutputManager;
pub use prompt::Prompt;
pub use resolver::{MAX_ATTEMPTS, Resolution, resolve};

use crate::error::{CliError, EXIT_INTERRUPTED, EXIT_INVALID_INPUT, Result, VanityError};
use crate::grind::{
    ArtifactManager, CommandPlan, CostEstimate, GenerationRunner, RunOutcome,
    tool_detection, validator,
};
use clap::error::ErrorKind;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// How an invocation ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Generator succeeded and output was collected
    Completed,
    /// Plan printed, nothing run
    DryRun,
    /// User quit or declined the confirmation
    Aborted,
    /// Interrupt signal during the run
    Interrupted,
    /// Generator exited non-zero with this status
    GeneratorFailed(i32),
}

/// Exit code for a given outcome.
pub fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Completed | Outcome::DryRun | Outcome::Aborted => 0,
        Outcome::Interrupted => EXIT_INTERRUPTED,
        Outcome::GeneratorFailed(code) => code,
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: OutputManager,
    generator: String,
    confirm_threshold: usize,
    working_dir: PathBuf,
}

impl RuntimeConfig {
    pub fn new(args: &Args, working_dir: PathBuf) -> Self {
        Self {
            output: OutputManager::new(false),
            generator: args.generator.clone(),
            confirm_threshold: args.confirm_threshold,
            working_dir,
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &OutputManager {
        &self.output
    }
}

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = match Args::parse_args() {
        Ok(args) => args,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_INVALID_INPUT,
            };
            err.print()?;
            return Ok(code);
        }
    };

    let config = RuntimeConfig::new(&args, std::env::current_dir()?);
    let mut prompt = Prompt::stdio()?;
    let outcome = run_pipeline(args, &config, &mut prompt).await?;
    Ok(exit_code(outcome))
}

/// Runs every stage after argument parsing.
pub async fn run_pipeline<R: BufRead, W: Write>(
    args: Args,
    config: &RuntimeConfig,
    prompt: &mut Prompt<R, W>,
) -> Result<Outcome> {
    let output = config.output();

    let request = match resolve(args, prompt)? {
        Resolution::Ready(request) => request,
        Resolution::Abort => {
            output.progress("Aborted")?;
            return Ok(Outcome::Aborted);
        }
    };
    log::debug!("Resolved request: {:?}", request);

    validator::validate(&request)?;

    let estimate = CostEstimate::for_request(&request, config.confirm_threshold);
    if !confirm_cost(&estimate, output, prompt)? {
        output.progress("Aborted; nothing was run")?;
        return Ok(Outcome::Aborted);
    }

    let plan = CommandPlan::build(&config.generator, &request);
    log::debug!("Command plan: {:?}", plan);

    let out_dir = request.out_dir.as_ref().map(|dir| config.working_dir.join(dir));
    if !request.dry_run {
        tool_detection::probe_generator(&config.generator)?;
        if let Some(out_dir) = out_dir.as_deref() {
            prepare_out_dir(out_dir).await?;
        }
    }

    let runner = GenerationRunner::new(config.working_dir.clone());
    let result = match runner.run(&plan, request.dry_run, output).await? {
        RunOutcome::DryRun => return Ok(Outcome::DryRun),
        RunOutcome::Completed(result) => result,
    };

    if result.interrupted {
        let _ = output.warn("Interrupted; files already written were left in place");
        return Ok(Outcome::Interrupted);
    }
    if !result.success() {
        let _ = output.warn(&format!("Generator exited with status {}", result.exit_code));
        return Ok(Outcome::GeneratorFailed(result.exit_code));
    }

    output.success("Generation finished")?;
    let artifacts = ArtifactManager::new(config.working_dir.clone());
    let report = artifacts
        .collect(
            &result,
            out_dir.as_deref(),
            plan.explicit_output_control(),
            output,
        )
        .await?;
    if !report.failed.is_empty() {
        output.warn(&format!(
            "{} file(s) could not be moved and remain in {}",
            report.failed.len(),
            config.working_dir.display()
        ))?;
    }

    Ok(Outcome::Completed)
}

/// Prints the cost advisory and asks for confirmation when required.
///
/// Returns `false` when the user declines.
fn confirm_cost<R: BufRead, W: Write>(
    estimate: &CostEstimate,
    output: &OutputManager,
    prompt: &mut Prompt<R, W>,
) -> Result<bool> {
    output.progress(&estimate.advisory())?;
    if let Some(advisory) = estimate.case_advisory() {
        output.indent(advisory)?;
    }

    if !estimate.requires_confirmation {
        return Ok(true);
    }
    Ok(prompt.confirm(&format!(
        "A {}-character pattern can take a very long time. Continue?",
        estimate.total_pattern_chars
    ))?)
}

/// Creates the output directory up front so a bad path fails before the search.
async fn prepare_out_dir(out_dir: &Path) -> Result<()> {
    ArtifactManager::ensure_out_dir(out_dir).await.map_err(|e| {
        VanityError::from(CliError::InvalidArguments {
            reason: format!("--out-dir {}: {}", out_dir.display(), e),
        })
    })
}
