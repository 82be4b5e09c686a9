//! Expected search cost for a vanity pattern.
//!
//! Every pattern character narrows the search by one Base58 symbol, so the
//! expected number of attempts is `58^n`. This is an order-of-magnitude
//! expectation, not a bound. Case-insensitive matching makes letters cheaper
//! in practice, but that depends on the letters in the pattern and is not
//! modelled here.

use super::{CaseMode, Request};

/// Default pattern length above which a confirmation is asked for.
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 5;

const BASE: u128 = 58;

/// Cost of searching for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostEstimate {
    pub total_pattern_chars: usize,
    /// `58^total_pattern_chars`, exact up to 21 characters and saturating beyond
    pub expected_attempts: u128,
    pub requires_confirmation: bool,
    pub case_sensitive: bool,
}

impl CostEstimate {
    pub fn for_request(request: &Request, threshold: usize) -> Self {
        let total_pattern_chars = request.total_pattern_chars();
        Self {
            total_pattern_chars,
            expected_attempts: expected_attempts(total_pattern_chars),
            requires_confirmation: total_pattern_chars > threshold && !request.auto_confirm,
            case_sensitive: request.case_mode == CaseMode::Sensitive,
        }
    }

    /// Advisory shown before every run.
    pub fn advisory(&self) -> String {
        let figure = if self.expected_attempts == u128::MAX {
            format!("more than {}", group_thousands(self.expected_attempts))
        } else {
            group_thousands(self.expected_attempts)
        };
        format!(
            "Pattern length {} -> expected attempts ~ 58^{} = {} (order of magnitude, not a bound)",
            self.total_pattern_chars, self.total_pattern_chars, figure
        )
    }

    /// Extra advisory for case-sensitive searches, if any.
    pub fn case_advisory(&self) -> Option<&'static str> {
        self.case_sensitive.then_some(
            "Case-sensitive matching: letters must match exactly, so the search can take \
             considerably longer than a case-insensitive one",
        )
    }
}

/// `58^n` with integer arithmetic.
pub fn expected_attempts(pattern_chars: usize) -> u128 {
    match u32::try_from(pattern_chars) {
        Ok(exp) => BASE.saturating_pow(exp),
        Err(_) => u128::MAX,
    }
}

/// Formats a number with `,` between groups of three digits.
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
