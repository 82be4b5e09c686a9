//! Error types for the vanity search pipeline.
//!
//! Every failure maps to exactly one stable exit code so callers can script
//! against the binary.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, VanityError>;

/// Exit code for invalid input (argument, prompt or validation failures)
pub const EXIT_INVALID_INPUT: i32 = 2;

/// Exit code when the external generator is absent or non-functional
pub const EXIT_DEPENDENCY_MISSING: i32 = 3;

/// Exit code after an interrupt signal
pub const EXIT_INTERRUPTED: i32 = 130;

/// Main error type for all pipeline operations
#[derive(Error, Debug)]
pub enum VanityError {
    /// CLI argument and prompt errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Request failed validation
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// External generator missing or not runnable
    #[error("Missing dependency: {tool} - {reason}")]
    DependencyMissing {
        /// Program that was looked up
        tool: String,
        /// Why it is unusable
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl VanityError {
    /// Exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VanityError::Cli(_) | VanityError::Validation(_) => EXIT_INVALID_INPUT,
            VanityError::DependencyMissing { .. } => EXIT_DEPENDENCY_MISSING,
            VanityError::Io(_) | VanityError::Anyhow(_) => 1,
        }
    }
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Required field could not be resolved from flags or prompts
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Interactive question answered invalidly too many times
    #[error("Too many invalid replies for {field} (gave up after {attempts} attempts)")]
    RetriesExhausted {
        /// Field being asked for
        field: String,
        /// Number of rejected replies
        attempts: usize,
    },
}

/// Validation failures, one per rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Address type not one of prefix/suffix/both
    #[error("unknown address type '{0}' (expected prefix, suffix or both)")]
    UnknownAddressType(String),

    /// Case mode not one of sensitive/insensitive
    #[error("unknown case mode '{0}' (expected sensitive or insensitive)")]
    UnknownCaseMode(String),

    /// Pattern required by the address type is empty
    #[error("{field} is required for address type '{address_type}'")]
    MissingPattern {
        /// `prefix` or `suffix`
        field: &'static str,
        /// Address type that requires it
        address_type: String,
    },

    /// Pattern contains a character outside the Base58 alphabet
    #[error(
        "{field} '{pattern}' contains '{character}' at position {position}, which is not in the Base58 alphabet{hint}"
    )]
    InvalidCharacter {
        /// `prefix` or `suffix`
        field: &'static str,
        /// Offending pattern
        pattern: String,
        /// First rejected character
        character: char,
        /// 1-based character position
        position: usize,
        /// Extra note for the ambiguous glyphs
        hint: &'static str,
    },

    /// Count is not a positive integer
    #[error("count must be a positive integer, got '{0}'")]
    InvalidCount(String),
}
