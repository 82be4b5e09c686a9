//! External generator detection and availability checking.

use crate::error::{Result, VanityError};
use std::path::PathBuf;

/// Generator used when none is configured.
pub const DEFAULT_GENERATOR: &str = "solana-keygen";

/// Resolves `program` and checks that it runs.
///
/// The program is looked up on `PATH` (or taken as a path when it contains a
/// separator) and probed with `--version`.
pub fn probe_generator(program: &str) -> Result<PathBuf> {
    let path = which::which(program).map_err(|e| {
        log::debug!("{} not found in PATH: {}", program, e);
        VanityError::DependencyMissing {
            tool: program.to_string(),
            reason: format!(
                "not found ({}). Install the Solana CLI tools or point --generator at the binary",
                e
            ),
        }
    })?;
    log::debug!("Found {} at: {}", program, path.display());

    match std::process::Command::new(&path).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!("✓ {} available: {}", program, version.trim());
            Ok(path)
        }
        Ok(output) => Err(VanityError::DependencyMissing {
            tool: program.to_string(),
            reason: format!(
                "found at {} but --version check failed (exit code: {:?}). Stderr: {}",
                path.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }),
        Err(e) => Err(VanityError::DependencyMissing {
            tool: program.to_string(),
            reason: format!(
                "found at {} but failed to execute: {}. Check file permissions",
                path.display(),
                e
            ),
        }),
    }
}
