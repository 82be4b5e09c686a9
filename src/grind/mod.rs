//! Vanity search pipeline: request model, validation, cost estimation,
//! command construction, generator execution and artifact collection.
//!
//! # Module Organization
//!
//! - [`validator`] - Base58 charset and field checks
//! - [`cost`] - Expected-attempts estimate and confirmation policy
//! - [`command`] - Argument vector construction for the generator
//! - [`tool_detection`] - Generator presence check
//! - [`runner`] - Child process lifecycle and interrupt handling
//! - [`artifact_manager`] - Keypair file discovery and relocation

pub mod artifact_manager;
pub mod command;
pub mod cost;
pub mod runner;
pub mod tool_detection;
pub mod validator;

use std::fmt;
use std::path::PathBuf;

pub use artifact_manager::{ArtifactManager, CollectionReport};
pub use command::CommandPlan;
pub use cost::CostEstimate;
pub use runner::{GenerationRunner, RunOutcome, RunResult};

/// Base58 alphabet used by address encodings.
///
/// Excludes the visually ambiguous glyphs `0`, `O`, `I` and `l`.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Glyphs left out of [`BASE58_ALPHABET`].
pub const AMBIGUOUS_GLYPHS: [char; 4] = ['0', 'O', 'I', 'l'];

/// Which end(s) of the address the pattern must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    Prefix,
    Suffix,
    Both,
}

impl AddressType {
    pub fn needs_prefix(self) -> bool {
        matches!(self, AddressType::Prefix | AddressType::Both)
    }

    pub fn needs_suffix(self) -> bool {
        matches!(self, AddressType::Suffix | AddressType::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AddressType::Prefix => "prefix",
            AddressType::Suffix => "suffix",
            AddressType::Both => "both",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the generator should match letters case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    Sensitive,
    #[default]
    Insensitive,
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseMode::Sensitive => f.write_str("sensitive"),
            CaseMode::Insensitive => f.write_str("insensitive"),
        }
    }
}

/// A fully resolved search request.
///
/// Built once per invocation and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub address_type: AddressType,
    /// Empty unless the address type needs it
    pub prefix: String,
    /// Empty unless the address type needs it
    pub suffix: String,
    /// Number of matching keypairs to generate
    pub count: u64,
    pub case_mode: CaseMode,
    /// Destination for collected keypair files
    pub out_dir: Option<PathBuf>,
    /// Skip the cost confirmation prompt
    pub auto_confirm: bool,
    /// Print the command instead of running it
    pub dry_run: bool,
    /// Tokens forwarded verbatim to the generator
    pub passthrough: Vec<String>,
}

impl Request {
    /// Request with defaults for everything but the pattern.
    pub fn new(address_type: AddressType, prefix: &str, suffix: &str) -> Self {
        Self {
            address_type,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            count: 1,
            case_mode: CaseMode::default(),
            out_dir: None,
            auto_confirm: false,
            dry_run: false,
            passthrough: Vec::new(),
        }
    }

    /// Combined pattern length the generator has to match.
    pub fn total_pattern_chars(&self) -> usize {
        let prefix = if self.address_type.needs_prefix() {
            self.prefix.chars().count()
        } else {
            0
        };
        let suffix = if self.address_type.needs_suffix() {
            self.suffix.chars().count()
        } else {
            0
        };
        prefix + suffix
    }
}
