//! Vanity keypair search orchestrator.
//!
//! Builds and runs an external generator (`solana-keygen grind` by default):
//! - resolves a search request from flags and interactive prompts
//! - validates patterns against the Base58 alphabet
//! - estimates the search cost and asks before long searches
//! - runs the generator with the terminal attached and traps interrupts
//! - moves the keypair files it wrote into an output directory
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod grind;

// Re-export commonly used types
pub use error::{CliError, Result, ValidationError, VanityError};
pub use grind::{AddressType, CaseMode, Request};
