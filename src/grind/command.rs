//! Argument vector construction for the generator.
//!
//! The plan is a plain list of arguments handed to the process API as-is.
//! Nothing here joins arguments into a string that a shell would re-parse.

use super::{AddressType, CaseMode, Request};

/// Generator subcommand that performs the search.
pub const GRIND_SUBCOMMAND: &str = "grind";

/// Generator flag for case-insensitive matching.
pub const IGNORE_CASE_FLAG: &str = "--ignore-case";

/// Passthrough tokens that take over where the generator writes keypairs.
pub const OUTPUT_CONTROL_FLAGS: [&str; 2] = ["--no-outfile", "--outfile"];

/// The generator invocation derived from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    program: String,
    args: Vec<String>,
    explicit_output_control: bool,
}

impl CommandPlan {
    /// Builds the invocation of `program` for `request`.
    ///
    /// Passthrough arguments come last so the generator's own parser sees them
    /// after the generated flags.
    pub fn build(program: &str, request: &Request) -> Self {
        let mut args = vec![GRIND_SUBCOMMAND.to_string()];

        let (flag, value) = match request.address_type {
            AddressType::Prefix => (
                "--starts-with",
                format!("{}:{}", request.prefix, request.count),
            ),
            AddressType::Suffix => (
                "--ends-with",
                format!("{}:{}", request.suffix, request.count),
            ),
            AddressType::Both => (
                "--starts-and-ends-with",
                format!("{}:{}:{}", request.prefix, request.suffix, request.count),
            ),
        };
        args.push(flag.to_string());
        args.push(value);

        if request.case_mode == CaseMode::Insensitive {
            args.push(IGNORE_CASE_FLAG.to_string());
        }

        args.extend(request.passthrough.iter().cloned());

        Self {
            program: program.to_string(),
            args,
            explicit_output_control: has_output_control(&request.passthrough),
        }
    }

    /// Plan for an arbitrary program, with no output control.
    #[cfg(test)]
    pub(crate) fn raw(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            explicit_output_control: false,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Passthrough arguments route output themselves; nothing is collected.
    pub fn explicit_output_control(&self) -> bool {
        self.explicit_output_control
    }

    /// Shell-quoted rendering for display and logs.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|arg| shell_quote(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn has_output_control(passthrough: &[String]) -> bool {
    passthrough.iter().any(|token| {
        OUTPUT_CONTROL_FLAGS.iter().any(|flag| {
            token == flag
                || token
                    .strip_prefix(flag)
                    .is_some_and(|rest| rest.starts_with('='))
        })
    })
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
