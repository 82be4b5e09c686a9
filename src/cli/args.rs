//! Command line argument parsing.
//!
//! Only the orchestrator's own flags go through clap. Every other token is
//! kept, in order, as a passthrough argument for the generator, because the
//! generator's flag surface is not known here.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::grind::cost::DEFAULT_CONFIRM_THRESHOLD;
use crate::grind::tool_detection::DEFAULT_GENERATOR;

/// Flags that take a value.
const VALUE_FLAGS: [&str; 8] = [
    "--type",
    "--prefix",
    "--suffix",
    "--count",
    "--case",
    "--out-dir",
    "--confirm-threshold",
    "--generator",
];

/// Flags without a value.
const SWITCH_FLAGS: [&str; 6] = ["--yes", "--dry-run", "-h", "--help", "-V", "--version"];

/// Vanity keypair search orchestrator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vanity_grind",
    version,
    about = "Search for vanity keypairs with an external generator",
    long_about = "Validates a Base58 vanity pattern, estimates the search cost, runs the generator \
(solana-keygen grind by default) and collects the keypair files it writes.

Missing fields are asked for interactively. Unrecognized arguments, and everything after `--`, \
are passed to the generator unchanged.

Usage:
  vanity_grind --type prefix --prefix sol
  vanity_grind --type both --prefix A --suffix Z --count 2 --out-dir ./vanity-outputs
  vanity_grind --type suffix --suffix pump --yes -- --use-mnemonic --no-bip39-passphrase

Exit codes: 0 success, dry run or abort; 2 invalid input; 3 generator missing; 130 interrupted; \
anything else is the generator's own exit status.",
    args_override_self = true
)]
pub struct Args {
    /// Address type: prefix, suffix or both
    #[arg(long = "type", value_name = "TYPE")]
    pub address_type: Option<String>,

    /// Pattern the address must start with
    #[arg(long, value_name = "STR")]
    pub prefix: Option<String>,

    /// Pattern the address must end with
    #[arg(long, value_name = "STR")]
    pub suffix: Option<String>,

    /// Number of matching keypairs to generate (default: 1)
    #[arg(long, value_name = "N")]
    pub count: Option<String>,

    /// Case matching: sensitive or insensitive (default: insensitive)
    #[arg(long = "case", value_name = "MODE")]
    pub case_mode: Option<String>,

    /// Do not ask for confirmation of long searches
    #[arg(long)]
    pub yes: bool,

    /// Print the generator command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Move generated keypair files into this directory (created if missing)
    #[arg(long, value_name = "PATH")]
    pub out_dir: Option<PathBuf>,

    /// Pattern length above which confirmation is required
    #[arg(
        long,
        value_name = "N",
        env = "VANITY_GRIND_CONFIRM_THRESHOLD",
        default_value_t = DEFAULT_CONFIRM_THRESHOLD
    )]
    pub confirm_threshold: usize,

    /// Generator executable
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "VANITY_GRIND_GENERATOR",
        default_value = DEFAULT_GENERATOR
    )]
    pub generator: String,

    /// Arguments forwarded to the generator
    #[arg(skip)]
    pub passthrough: Vec<String>,
}

impl Args {
    /// Parse the process arguments.
    pub fn parse_args() -> Result<Self, clap::Error> {
        let tokens = std::env::args_os()
            .skip(1)
            .map(|token| token.to_string_lossy().into_owned());
        Self::parse_tokens(tokens)
    }

    /// Parse raw tokens (without the program name).
    pub fn parse_tokens<I, T>(tokens: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let (recognized, passthrough) = split_passthrough(tokens);
        let argv = std::iter::once(OsString::from("vanity_grind"))
            .chain(recognized.into_iter().map(OsString::from));
        let mut args = Self::try_parse_from(argv)?;
        args.passthrough = passthrough;
        Ok(args)
    }
}

/// Splits tokens into orchestrator flags and generator passthrough.
///
/// Value flags are normalized to `--flag=value` so that values starting with
/// `-` reach clap intact. A value flag at the very end is kept bare and clap
/// reports the missing value.
pub fn split_passthrough<I, T>(tokens: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut recognized = Vec::new();
    let mut passthrough = Vec::new();
    let mut tokens = tokens.into_iter().map(Into::<String>::into);

    while let Some(token) = tokens.next() {
        if token == "--" {
            passthrough.extend(tokens.by_ref());
            break;
        }

        if SWITCH_FLAGS.contains(&token.as_str()) {
            recognized.push(token);
            continue;
        }

        if VALUE_FLAGS.contains(&token.as_str()) {
            match tokens.next() {
                Some(value) => recognized.push(format!("{}={}", token, value)),
                None => recognized.push(token),
            }
            continue;
        }

        let inline_value_flag = token
            .split_once('=')
            .is_some_and(|(name, _)| VALUE_FLAGS.contains(&name));
        if inline_value_flag {
            recognized.push(token);
        } else {
            passthrough.push(token);
        }
    }

    (recognized, passthrough)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_tokens_pass_through_in_order() {
        let (recognized, passthrough) = split_passthrough([
            "--use-mnemonic",
            "--type",
            "prefix",
            "--language",
            "english",
            "--prefix=sol",
            "bare",
            "--yes",
        ]);
        assert_eq!(recognized, strings(&["--type=prefix", "--prefix=sol", "--yes"]));
        assert_eq!(
            passthrough,
            strings(&["--use-mnemonic", "--language", "english", "bare"])
        );
    }

    #[test]
    fn separator_forwards_everything_after_it() {
        let (recognized, passthrough) =
            split_passthrough(["--dry-run", "--", "--prefix", "abc", "--", "--yes"]);
        assert_eq!(recognized, strings(&["--dry-run"]));
        assert_eq!(passthrough, strings(&["--prefix", "abc", "--", "--yes"]));
    }

    #[test]
    fn value_flag_keeps_dash_values() {
        let args = Args::parse_tokens(["--type", "prefix", "--prefix", "sol", "--count", "-1"]).unwrap();
        assert_eq!(args.count.as_deref(), Some("-1"));
    }

    #[test]
    fn parses_all_known_flags() {
        let args = Args::parse_tokens([
            "--type",
            "both",
            "--prefix",
            "A",
            "--suffix",
            "Z",
            "--count",
            "2",
            "--case",
            "sensitive",
            "--yes",
            "--dry-run",
            "--out-dir",
            "./vanity-outputs",
            "--confirm-threshold",
            "7",
            "--generator",
            "/opt/solana-keygen",
            "--no-outfile",
        ])
        .unwrap();

        assert_eq!(args.address_type.as_deref(), Some("both"));
        assert_eq!(args.prefix.as_deref(), Some("A"));
        assert_eq!(args.suffix.as_deref(), Some("Z"));
        assert_eq!(args.count.as_deref(), Some("2"));
        assert_eq!(args.case_mode.as_deref(), Some("sensitive"));
        assert!(args.yes);
        assert!(args.dry_run);
        assert_eq!(args.out_dir, Some(PathBuf::from("./vanity-outputs")));
        assert_eq!(args.confirm_threshold, 7);
        assert_eq!(args.generator, "/opt/solana-keygen");
        assert_eq!(args.passthrough, strings(&["--no-outfile"]));
    }

    #[test]
    fn repeated_flag_keeps_last_value() {
        let args = Args::parse_tokens(["--prefix", "abc", "--prefix", "xyz"]).unwrap();
        assert_eq!(args.prefix.as_deref(), Some("xyz"));
    }

    #[test]
    fn trailing_value_flag_is_an_error() {
        let err = Args::parse_tokens(["--type", "prefix", "--prefix"]).unwrap_err();
        assert_ne!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Args::parse_tokens(["--prefix", "abc", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
