//! Request validation against the Base58 alphabet and field rules.
//!
//! Checks run in a fixed order and stop at the first violation. Nothing here
//! corrects input; callers decide whether to re-ask or fail.

use super::{AMBIGUOUS_GLYPHS, AddressType, CaseMode, Request};
use crate::error::ValidationError;

/// Parses an address type name (`prefix`, `suffix`, `both`).
pub fn parse_address_type(raw: &str) -> Result<AddressType, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "prefix" => Ok(AddressType::Prefix),
        "suffix" => Ok(AddressType::Suffix),
        "both" => Ok(AddressType::Both),
        _ => Err(ValidationError::UnknownAddressType(raw.to_string())),
    }
}

/// Parses a case mode name (`sensitive`, `insensitive`).
pub fn parse_case_mode(raw: &str) -> Result<CaseMode, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "sensitive" => Ok(CaseMode::Sensitive),
        "insensitive" => Ok(CaseMode::Insensitive),
        _ => Err(ValidationError::UnknownCaseMode(raw.to_string())),
    }
}

/// Parses a match count; zero and non-numbers are rejected.
pub fn parse_count(raw: &str) -> Result<u64, ValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ValidationError::InvalidCount(raw.to_string())),
    }
}

/// Checks that every character of `pattern` is in the Base58 alphabet.
///
/// An empty pattern passes; emptiness is a per-type rule checked by
/// [`validate`].
pub fn check_pattern(field: &'static str, pattern: &str) -> Result<(), ValidationError> {
    let byte_index = match bs58::decode(pattern).into_vec() {
        Ok(_) => return Ok(()),
        Err(bs58::decode::Error::InvalidCharacter { index, .. })
        | Err(bs58::decode::Error::NonAsciiCharacter { index }) => index,
        // Remaining errors need a checksum or a fixed output buffer.
        Err(_) => 0,
    };

    let character = pattern
        .get(byte_index..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    let position = pattern
        .get(..byte_index)
        .map_or(0, |head| head.chars().count())
        + 1;
    let hint = if AMBIGUOUS_GLYPHS.contains(&character) {
        " (0, O, I and l are excluded as ambiguous)"
    } else {
        ""
    };

    Err(ValidationError::InvalidCharacter {
        field,
        pattern: pattern.to_string(),
        character,
        position,
        hint,
    })
}

/// Validates a resolved request.
pub fn validate(request: &Request) -> Result<(), ValidationError> {
    let address_type = request.address_type;

    if address_type.needs_prefix() && request.prefix.is_empty() {
        return Err(ValidationError::MissingPattern {
            field: "prefix",
            address_type: address_type.to_string(),
        });
    }
    if address_type.needs_suffix() && request.suffix.is_empty() {
        return Err(ValidationError::MissingPattern {
            field: "suffix",
            address_type: address_type.to_string(),
        });
    }

    check_pattern("prefix", &request.prefix)?;
    check_pattern("suffix", &request.suffix)?;

    if request.count == 0 {
        return Err(ValidationError::InvalidCount(request.count.to_string()));
    }

    Ok(())
}
