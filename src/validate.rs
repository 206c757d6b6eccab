//! Input validators.
//!
//! Pure functions from raw input to a typed value or a [`ValidationError`].
//! Prompting again after a failure is the caller's business.

use std::sync::OnceLock;

use regex::Regex;

use crate::entity::{ItemKind, DISPLAY_ID_LEN};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("you can't leave the {field} empty")]
    Empty { field: &'static str },
    #[error("please enter a number")]
    NotANumber,
    #[error("choice must be between {min} - {max}")]
    OutOfRange { min: u32, max: u32 },
    #[error("{field} is not formatted correctly")]
    BadFormat { field: &'static str },
    #[error("{field} must be {expected} characters")]
    BadLength { field: &'static str, expected: usize },
    #[error("invalid item type, expected Book, DVD or Magazine")]
    UnknownKind,
}

/// Trimmed `input`, or `Empty` if nothing is left.
pub fn non_empty(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value.to_string())
}

/// A menu choice in `min..=max`.
pub fn choice(input: &str, min: u32, max: u32) -> Result<u32, ValidationError> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange { min, max });
    }
    Ok(value)
}

/// A lower-cased `local@domain.tld` address.
pub fn email(input: &str) -> Result<String, ValidationError> {
    let value = non_empty("email", input)?.to_lowercase();
    if !email_regex().is_match(&value) {
        return Err(ValidationError::BadFormat { field: "email" });
    }
    Ok(value)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// An 8-character display id.
pub fn display_id(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let value = non_empty(field, input)?;
    if value.chars().count() != DISPLAY_ID_LEN {
        return Err(ValidationError::BadLength {
            field,
            expected: DISPLAY_ID_LEN,
        });
    }
    Ok(value)
}

pub fn item_kind(input: &str) -> Result<ItemKind, ValidationError> {
    let value = non_empty("item type", input)?;
    value.parse().map_err(|_| ValidationError::UnknownKind)
}
