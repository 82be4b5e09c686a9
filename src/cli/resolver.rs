//! Request resolution from flags with interactive fallback.
//!
//! Flags are taken as given. Required fields left unset are asked for, each
//! question re-asked on an invalid reply up to [`MAX_ATTEMPTS`] times.

use super::args::Args;
use super::prompt::Prompt;
use crate::error::{CliError, Result};
use crate::grind::validator::{check_pattern, parse_address_type, parse_case_mode, parse_count};
use crate::grind::{AddressType, CaseMode, Request};
use std::io::{BufRead, Write};

/// Invalid replies tolerated per question.
pub const MAX_ATTEMPTS: usize = 5;

/// Result of resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Ready(Request),
    /// The user chose to quit from the menu
    Abort,
}

enum Reply<T> {
    Value(T),
    Quit,
}

/// Builds a [`Request`] from parsed flags, prompting for what is missing.
///
/// Without `--type` the full menu runs, which also asks for count and case.
/// Values given as flags are not re-asked and are checked later by the
/// validator.
pub fn resolve<R: BufRead, W: Write>(args: Args, prompt: &mut Prompt<R, W>) -> Result<Resolution> {
    let (address_type, interactive) = match args.address_type.as_deref() {
        Some(raw) => (parse_address_type(raw)?, false),
        None => match ask_address_type(prompt)? {
            Reply::Value(address_type) => (address_type, true),
            Reply::Quit => return Ok(Resolution::Abort),
        },
    };

    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None if address_type.needs_prefix() => ask_pattern(prompt, "prefix")?,
        None => String::new(),
    };
    let suffix = match args.suffix {
        Some(suffix) => suffix,
        None if address_type.needs_suffix() => ask_pattern(prompt, "suffix")?,
        None => String::new(),
    };

    let count = match args.count.as_deref() {
        Some(raw) => parse_count(raw)?,
        None if interactive => ask_count(prompt)?,
        None => 1,
    };
    let case_mode = match args.case_mode.as_deref() {
        Some(raw) => parse_case_mode(raw)?,
        None if interactive => ask_case_mode(prompt)?,
        None => CaseMode::default(),
    };

    Ok(Resolution::Ready(Request {
        address_type,
        prefix,
        suffix,
        count,
        case_mode,
        out_dir: args.out_dir,
        auto_confirm: args.yes,
        dry_run: args.dry_run,
        passthrough: args.passthrough,
    }))
}

/// Re-asks `question` until `accept` returns a value or attempts run out.
///
/// `accept` returns `Err(reason)` to reject a reply.
fn ask_until<R, W, T, F>(
    prompt: &mut Prompt<R, W>,
    field: &str,
    question: &str,
    mut accept: F,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> std::result::Result<T, String>,
{
    for _ in 0..MAX_ATTEMPTS {
        let Some(reply) = prompt.ask(question)? else {
            return Err(CliError::MissingArgument {
                argument: field.to_string(),
            }
            .into());
        };
        match accept(&reply) {
            Ok(value) => return Ok(value),
            Err(reason) => prompt.say(&format!("  {}", reason))?,
        }
    }
    Err(CliError::RetriesExhausted {
        field: field.to_string(),
        attempts: MAX_ATTEMPTS,
    }
    .into())
}

fn ask_address_type<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<Reply<AddressType>> {
    prompt.say("Which part of the address should match?")?;
    prompt.say("  1) prefix")?;
    prompt.say("  2) suffix")?;
    prompt.say("  3) both")?;
    prompt.say("  4) quit")?;
    ask_until(prompt, "type", "Choice [1-4]:", |reply| {
        match reply.to_ascii_lowercase().as_str() {
            "1" => Ok(Reply::Value(AddressType::Prefix)),
            "2" => Ok(Reply::Value(AddressType::Suffix)),
            "3" => Ok(Reply::Value(AddressType::Both)),
            "4" | "q" | "quit" => Ok(Reply::Quit),
            other => parse_address_type(other)
                .map(Reply::Value)
                .map_err(|_| format!("'{}' is not a menu choice", reply)),
        }
    })
}

fn ask_pattern<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>, field: &'static str) -> Result<String> {
    let question = format!("Enter {} (Base58):", field);
    ask_until(prompt, field, &question, |reply| {
        if reply.is_empty() {
            return Err(format!("{} cannot be empty", field));
        }
        check_pattern(field, reply).map_err(|e| e.to_string())?;
        Ok(reply.to_string())
    })
}

fn ask_count<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<u64> {
    ask_until(prompt, "count", "How many matches? [1]:", |reply| {
        if reply.is_empty() {
            return Ok(1);
        }
        parse_count(reply).map_err(|e| e.to_string())
    })
}

fn ask_case_mode<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<CaseMode> {
    ask_until(
        prompt,
        "case",
        "Case sensitive? [y/N]:",
        |reply| match reply.to_ascii_lowercase().as_str() {
            "" | "n" | "no" => Ok(CaseMode::Insensitive),
            "y" | "yes" => Ok(CaseMode::Sensitive),
            _ => Err("answer y or n".to_string()),
        },
    )
}
