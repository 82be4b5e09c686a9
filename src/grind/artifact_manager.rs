//! Keypair file discovery, relocation and inventory.

use super::runner::RunResult;
use crate::cli::OutputManager;
use crate::error::Result;
use anyhow::Context;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Extension of keypair files written by the generator.
pub const ARTIFACT_EXTENSION: &str = "json";

/// What the collector did after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Final locations of moved files
    pub moved: Vec<PathBuf>,
    /// Files that could not be moved, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Listing of the output directory after collection, if one was set
    pub inventory: Option<Vec<PathBuf>>,
}

/// Artifact manager for generator outputs.
pub struct ArtifactManager {
    working_dir: PathBuf,
}

impl ArtifactManager {
    /// Creates a new artifact manager.
    ///
    /// # Arguments
    ///
    /// * `working_dir` - Directory the generator writes keypair files into
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Keypair files currently in the working directory.
    ///
    /// Only regular files with the artifact extension count; directories and
    /// symlinks are skipped.
    pub async fn snapshot(&self) -> Result<BTreeSet<PathBuf>> {
        let mut artifacts = BTreeSet::new();
        let mut entries = tokio::fs::read_dir(&self.working_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Ok(metadata) = tokio::fs::symlink_metadata(&path).await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            if is_artifact(&path) {
                artifacts.insert(path);
            }
        }

        Ok(artifacts)
    }

    /// Creates the output directory if it is missing.
    pub async fn ensure_out_dir(out_dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(out_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;
        Ok(())
    }

    /// Moves the files a run produced into `out_dir` and reports the result.
    ///
    /// Only files in `result.generated_files` are considered, so keypairs that
    /// were in the working directory before the run are never touched. With
    /// `explicit_output_control` nothing is moved. A failed move is logged and
    /// the remaining files are still moved.
    pub async fn collect(
        &self,
        result: &RunResult,
        out_dir: Option<&Path>,
        explicit_output_control: bool,
        output: &OutputManager,
    ) -> Result<CollectionReport> {
        let mut report = CollectionReport::default();

        if explicit_output_control {
            output.progress("Output routing set by generator arguments; leaving files in place")?;
            if let Some(out_dir) = out_dir {
                report.inventory = Some(self.report_inventory(out_dir, output).await?);
            }
            return Ok(report);
        }

        let Some(out_dir) = out_dir else {
            output.progress(&format!(
                "Keypair files are in the working directory: {}",
                self.working_dir.display()
            ))?;
            for path in &result.generated_files {
                output.indent(&path.display().to_string())?;
            }
            return Ok(report);
        };

        Self::ensure_out_dir(out_dir).await?;

        if same_directory(out_dir, &self.working_dir).await {
            output.progress("Output directory is the working directory; nothing to move")?;
            report.inventory = Some(self.report_inventory(out_dir, output).await?);
            return Ok(report);
        }

        for source in &result.generated_files {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let destination = out_dir.join(file_name);

            match move_file(source, &destination).await {
                Ok(()) => {
                    log::debug!("Moved {} -> {}", source.display(), destination.display());
                    report.moved.push(destination);
                }
                Err(e) => {
                    log::warn!("Failed to move {}: {}", source.display(), e);
                    output.warn(&format!("Could not move {}: {}", source.display(), e))?;
                    report.failed.push((source.clone(), e.to_string()));
                }
            }
        }

        output.success(&format!(
            "Moved {} keypair file(s) to {}",
            report.moved.len(),
            out_dir.display()
        ))?;
        report.inventory = Some(self.report_inventory(out_dir, output).await?);

        Ok(report)
    }

    async fn report_inventory(&self, out_dir: &Path, output: &OutputManager) -> Result<Vec<PathBuf>> {
        let listing = list_directory(out_dir).await?;
        output.section(&format!("Contents of {}", out_dir.display()))?;
        if listing.is_empty() {
            output.indent("(empty)")?;
        }
        for path in &listing {
            output.indent(&path.display().to_string())?;
        }
        Ok(listing)
    }
}

fn is_artifact(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ARTIFACT_EXTENSION))
}

/// Sorted entries of `dir`.
async fn list_directory(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut listing = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read {}", dir.display()))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read entry in {}", dir.display()))?
    {
        listing.push(entry.path());
    }
    listing.sort();
    Ok(listing)
}

/// Moves a file without replacing an existing destination.
///
/// The destination is created by hard link, which fails instead of
/// overwriting. Across filesystems the content is copied into a newly created
/// file. Either way the source is removed last; if that fails the new
/// destination is removed again so only one copy remains.
async fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match tokio::fs::hard_link(source, destination).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", destination.display()),
            ));
        }
        Err(e) if matches!(e.kind(), io::ErrorKind::CrossesDevices | io::ErrorKind::Unsupported) => {
            copy_to_new_file(source, destination).await?;
        }
        Err(e) => return Err(e),
    }

    remove_source_or_roll_back(source, destination).await
}

/// Copies `source` into `destination`, which must not exist yet.
async fn copy_to_new_file(source: &Path, destination: &Path) -> io::Result<()> {
    let mut reader = tokio::fs::File::open(source).await?;
    let permissions = reader.metadata().await?.permissions();
    let mut writer = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .await?;

    let copied = async {
        tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
        writer.set_permissions(permissions).await
    }
    .await;

    if let Err(e) = copied {
        drop(writer);
        if let Err(cleanup) = tokio::fs::remove_file(destination).await {
            log::warn!("Failed to remove partial copy {}: {}", destination.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}

async fn remove_source_or_roll_back(source: &Path, destination: &Path) -> io::Result<()> {
    let Err(e) = tokio::fs::remove_file(source).await else {
        return Ok(());
    };
    if let Err(cleanup) = tokio::fs::remove_file(destination).await {
        log::warn!("Failed to remove {} after a failed move: {}", destination.display(), cleanup);
    }
    Err(e)
}

/// Whether two paths name the same existing directory.
async fn same_directory(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
