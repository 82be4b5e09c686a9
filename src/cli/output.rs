//! User-facing terminal messages.
//!
//! Diagnostics go through `log`; this is for what the user is meant to read.

use std::io::{self, Write};

/// Plain stdout/stderr reporter.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager. `quiet` suppresses everything but warnings.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "\n== {} ==", title)
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "▶ {}", message)
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "✓ {}", message)
    }

    /// Prints an indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "  {}", message)
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr(), "⚠ {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_output_reports_success_without_writing() {
        let output = OutputManager::new(true);
        assert!(output.section("Contents").is_ok());
        assert!(output.progress("Running").is_ok());
        assert!(output.success("Done").is_ok());
        assert!(output.indent("key.json").is_ok());
    }
}
